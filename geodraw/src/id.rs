//! Random feature identifiers.

use std::collections::HashSet;

use geodraw_types::FeatureId;

use crate::error::GeodrawError;

/// Default number of characters in a generated identifier.
pub const DEFAULT_ID_LENGTH: usize = 7;

/// Default alphabet of generated identifiers.
pub const DEFAULT_ID_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const MAX_ATTEMPTS: usize = 16;

/// Shape of generated identifiers: their length and the alphabet characters are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdConfig {
    length: usize,
    alphabet: Vec<char>,
}

impl IdConfig {
    /// Creates a new configuration.
    ///
    /// Returns an error if `length` is zero, or if the alphabet has less than 2 or more than 256 characters, or
    /// contains duplicates.
    pub fn new(length: usize, alphabet: &str) -> Result<Self, GeodrawError> {
        if length == 0 {
            return Err(GeodrawError::InvalidIdConfig(
                "id length must be positive".to_string(),
            ));
        }

        let chars: Vec<char> = alphabet.chars().collect();
        let unique: HashSet<char> = chars.iter().copied().collect();
        if unique.len() != chars.len() {
            return Err(GeodrawError::InvalidIdConfig(format!(
                "alphabet `{alphabet}` contains duplicate characters"
            )));
        }

        if !(2..=256).contains(&chars.len()) {
            return Err(GeodrawError::InvalidIdConfig(format!(
                "alphabet must contain from 2 to 256 characters, got {}",
                chars.len()
            )));
        }

        Ok(Self {
            length,
            alphabet: chars,
        })
    }

    /// Number of characters in an identifier.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Characters identifiers are drawn from.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns true if `id` has the configured length and consists of alphabet characters only.
    pub fn matches(&self, id: &str) -> bool {
        id.chars().count() == self.length && id.chars().all(|c| self.alphabet.contains(&c))
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_ID_LENGTH,
            alphabet: DEFAULT_ID_ALPHABET.chars().collect(),
        }
    }
}

/// Generates random identifiers that are never repeated within the lifetime of the generator.
///
/// Every identifier the generator has produced or was told about with [`IdGenerator::reserve`] is remembered, so
/// an identifier of a removed shape is never given to a new one.
#[derive(Debug, Default)]
pub struct IdGenerator {
    config: IdConfig,
    issued: HashSet<FeatureId>,
}

impl IdGenerator {
    /// Creates a new generator.
    pub fn new(config: IdConfig) -> Self {
        Self {
            config,
            issued: HashSet::new(),
        }
    }

    /// Configuration of the generator.
    pub fn config(&self) -> &IdConfig {
        &self.config
    }

    /// Generates a new identifier.
    ///
    /// Identifiers colliding with an already issued one are discarded and generated again. After a number of
    /// failed attempts [`GeodrawError::IdSpaceExhausted`] is returned.
    pub fn generate(&mut self) -> Result<FeatureId, GeodrawError> {
        for _ in 0..MAX_ATTEMPTS {
            let id = FeatureId::new(self.random_string()?);
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }

            log::debug!("Generated feature id {id} collides with an issued one, retrying");
        }

        Err(GeodrawError::IdSpaceExhausted(MAX_ATTEMPTS))
    }

    /// Marks an identifier that came from outside (e.g. a stored feature) as issued.
    pub fn reserve(&mut self, id: &FeatureId) {
        self.issued.insert(id.clone());
    }

    /// Returns true if the identifier was generated or reserved before.
    pub fn is_issued(&self, id: &FeatureId) -> bool {
        self.issued.contains(id)
    }

    fn random_string(&self) -> Result<String, GeodrawError> {
        let alphabet = &self.config.alphabet;
        let base = alphabet.len();
        // Bytes at or above the last multiple of the alphabet size are rejected, so every character is equally
        // likely.
        let zone = 256 - 256 % base;

        let mut result = String::with_capacity(self.config.length);
        let mut count = 0;
        let mut buffer = vec![0u8; self.config.length * 2];

        while count < self.config.length {
            getrandom::fill(&mut buffer)?;
            for byte in buffer.iter().map(|b| *b as usize) {
                if byte < zone {
                    result.push(alphabet[byte % base]);
                    count += 1;
                    if count == self.config.length {
                        break;
                    }
                }
            }
        }

        Ok(result)
    }
}
