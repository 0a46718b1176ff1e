//! Error type for configuration problems.
//!
//! Only setup can fail: an unusable alphabet, an event name that the alphabet
//! does not know, or inconsistent limits. Running out of starting sequences
//! during generation is not an error; it shows up as a non-empty residual
//! target set in [`Generation`][crate::generator::Generation].

use std::fmt;

/// Error type for alphabet, constraint and configuration setup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The alphabet has no events.
    EmptyAlphabet,
    /// The alphabet does not fit into the symbol space.
    AlphabetTooLarge { size: usize, limit: usize },
    /// The same event name was declared twice.
    DuplicateEvent(String),
    /// An event name (in a sequence or a constraint) is not in the alphabet.
    UnknownEvent(String),
    /// An event set `{...}` without events.
    EmptyEventSet,
    /// Inconsistent generation limits.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyAlphabet => write!(f, "Alphabet must contain at least one event"),
            Error::AlphabetTooLarge { size, limit } => {
                write!(f, "Alphabet of {} events exceeds the symbol space of {}", size, limit)
            }
            Error::DuplicateEvent(event) => write!(f, "Duplicate event: {}", event),
            Error::UnknownEvent(event) => write!(f, "Unknown event: {}", event),
            Error::EmptyEventSet => write!(f, "Event set must contain at least one event"),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
