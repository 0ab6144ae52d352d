//! Random password generation
//!
//! Every password contains at least one lowercase letter plus at least one
//! character from each optional class that was requested. The remaining
//! positions are drawn from the union of the enabled alphabets and the
//! result is shuffled, so the guaranteed characters can sit anywhere.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VaultError};

/// Shortest length the interactive front end offers
pub const MIN_UI_LENGTH: usize = 4;

/// Longest length the interactive front end offers
pub const MAX_UI_LENGTH: usize = 99;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"^$*.[]{}()?-\"!@#%&/\\,><':;_~";

/// A category of characters a password can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// The fixed alphabet of this class
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    /// Whether `c` belongs to this class
    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c as u8))
    }
}

/// Optional character classes a password must contain
///
/// Lowercase letters are always enabled and are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PasswordRequirements {
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl PasswordRequirements {
    /// Require every optional class
    pub fn all() -> Self {
        Self {
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }

    /// Enabled classes in seeding order: lowercase, uppercase, digits, symbols
    pub fn classes(&self) -> Vec<CharacterClass> {
        let mut classes = vec![CharacterClass::Lowercase];
        if self.uppercase {
            classes.push(CharacterClass::Uppercase);
        }
        if self.digits {
            classes.push(CharacterClass::Digit);
        }
        if self.symbols {
            classes.push(CharacterClass::Symbol);
        }
        classes
    }

    /// Shortest password that can hold one character of every enabled class
    pub fn min_length(&self) -> usize {
        self.classes().len()
    }
}

/// Generate a password with the operating system's CSPRNG
pub fn generate(length: usize, requirements: PasswordRequirements) -> Result<String> {
    generate_with_rng(&mut OsRng, length, requirements)
}

/// Generate a password with the given cryptographically secure generator
pub fn generate_with_rng<R>(
    rng: &mut R,
    length: usize,
    requirements: PasswordRequirements,
) -> Result<String>
where
    R: Rng + CryptoRng,
{
    let classes = requirements.classes();
    if length < classes.len() {
        return Err(VaultError::PasswordTooShort {
            length,
            required: classes.len(),
        });
    }

    let mut password: Vec<u8> = Vec::with_capacity(length);
    let mut pool: Vec<u8> = Vec::new();

    for class in &classes {
        let alphabet = class.alphabet();
        password.push(alphabet[rng.gen_range(0..alphabet.len())]);
        pool.extend_from_slice(alphabet);
    }

    while password.len() < length {
        password.push(pool[rng.gen_range(0..pool.len())]);
    }

    password.shuffle(rng);

    debug!(
        "Generated password of length {} from {} character classes",
        length,
        classes.len()
    );
    Ok(password.into_iter().map(char::from).collect())
}
