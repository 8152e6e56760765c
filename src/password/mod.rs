//! Password generation.
//!
//! Produces credentials for newly provisioned accounts that contain at
//! least one lowercase letter, uppercase letter, digit, and special
//! character.

mod generator;

pub use generator::{
    generate, generate_password, PasswordPolicy, DEFAULT_PASSWORD_LENGTH, SPECIAL,
};
