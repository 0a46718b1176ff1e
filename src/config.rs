//! Generation limits.

use crate::error::{Error, Result};

/// Limits of one generation run.
///
/// - `strength` is `t`, the length of the target subsequences to cover.
/// - `max_repetition` caps the number of occurrences of every event in a sequence.
/// - `max_length` caps the length of every sequence.
///
/// # Examples
///
/// ```
/// use seqcov_rs::config::Config;
///
/// let config = Config::new(2, 2, 8).unwrap();
/// assert_eq!(config, Config::default());
/// assert!(Config::new(3, 1, 2).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Config {
    /// Coverage strength `t >= 1`.
    pub strength: usize,
    /// Maximum occurrences of a single event, `>= 1`.
    pub max_repetition: usize,
    /// Maximum sequence length, `>= strength`.
    pub max_length: usize,
}

impl Config {
    /// Creates a validated config.
    pub fn new(strength: usize, max_repetition: usize, max_length: usize) -> Result<Self> {
        let config = Config {
            strength,
            max_repetition,
            max_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `strength >= 1`, `max_repetition >= 1` and `max_length >= strength`.
    pub fn validate(&self) -> Result<()> {
        if self.strength == 0 {
            return Err(Error::InvalidConfig("strength must be at least 1".into()));
        }
        if self.max_repetition == 0 {
            return Err(Error::InvalidConfig("max repetition must be at least 1".into()));
        }
        if self.max_length < self.strength {
            return Err(Error::InvalidConfig(format!(
                "max length {} is smaller than strength {}",
                self.max_length, self.strength
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strength: 2,
            max_repetition: 2,
            max_length: 8,
        }
    }
}
