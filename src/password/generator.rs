//! Random password generation.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::auth::Secret;
use crate::error::{PolicyErrorKind, ProvisionError, ProvisionResult};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Special characters a generated password may contain.
pub const SPECIAL: &[u8] = b"!@#$%^&*()_+-=[]{}|";

/// Character classes every generated password draws at least one character from.
const REQUIRED_CLASSES: [&[u8]; 4] = [LOWERCASE, UPPERCASE, DIGITS, SPECIAL];

/// Default generated password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 8;

/// Composition policy for generated passwords.
///
/// The length is validated on construction, so a policy always has room for
/// one character of every required class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    length: usize,
}

impl PasswordPolicy {
    /// Smallest length that can satisfy the policy.
    pub const MIN_LENGTH: usize = REQUIRED_CLASSES.len();

    /// Largest length accepted for a generated password.
    pub const MAX_LENGTH: usize = 256;

    /// Create a policy for passwords of `length` characters.
    pub fn new(length: usize) -> ProvisionResult<Self> {
        if length < Self::MIN_LENGTH {
            return Err(ProvisionError::Policy {
                kind: PolicyErrorKind::LengthTooShort {
                    length,
                    required: Self::MIN_LENGTH,
                },
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(ProvisionError::Policy {
                kind: PolicyErrorKind::LengthTooLong {
                    length,
                    maximum: Self::MAX_LENGTH,
                },
            });
        }
        Ok(Self { length })
    }

    /// Length of passwords produced under this policy.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

/// Generate a password satisfying `policy` using the supplied RNG.
///
/// One character is drawn from each required class, the remainder uniformly
/// from their union, and the result is shuffled.
pub fn generate_password<R>(policy: &PasswordPolicy, rng: &mut R) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut chars: Vec<u8> = Vec::with_capacity(policy.length);

    for class in REQUIRED_CLASSES {
        chars.push(class[rng.random_range(0..class.len())]);
    }

    let union: Vec<u8> = REQUIRED_CLASSES.concat();
    for _ in REQUIRED_CLASSES.len()..policy.length {
        chars.push(union[rng.random_range(0..union.len())]);
    }

    chars.shuffle(rng);

    // Every byte comes from the ASCII tables above.
    Secret::from(chars.into_iter().map(char::from).collect::<String>())
}

/// Generate a password of `length` characters from the thread-local CSPRNG.
pub fn generate(length: usize) -> ProvisionResult<Secret> {
    let policy = PasswordPolicy::new(length)?;
    Ok(generate_password(&policy, &mut rand::rng()))
}
