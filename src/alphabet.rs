//! Event alphabets.
//!
//! An [`Alphabet`] is the ordered list of event names of one run. Each event is
//! mapped to the [`Symbol`] equal to its position, so the symbols of an alphabet
//! always form the contiguous range `0..len`. Automata only ever see symbols;
//! names come back in at the boundary through [`Alphabet::decode`].

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::types::Symbol;

/// Ordered, duplicate-free set of event names with a fixed symbol mapping.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Alphabet {
    events: Vec<String>,
    index: HashMap<String, Symbol>,
}

impl Alphabet {
    /// Number of symbols available for events.
    pub const SYMBOL_SPACE: usize = 1 << 16;

    /// Creates an alphabet from event names, in the given order.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyAlphabet`] if there are no events,
    /// - [`Error::DuplicateEvent`] if a name appears twice,
    /// - [`Error::AlphabetTooLarge`] if there are more than [`Alphabet::SYMBOL_SPACE`] events.
    pub fn new<I, S>(events: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let events: Vec<String> = events.into_iter().map(Into::into).collect();
        if events.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        if events.len() > Self::SYMBOL_SPACE {
            return Err(Error::AlphabetTooLarge {
                size: events.len(),
                limit: Self::SYMBOL_SPACE,
            });
        }

        let mut index = HashMap::with_capacity(events.len());
        for (i, event) in events.iter().enumerate() {
            if index.insert(event.clone(), Symbol::new(i as u32)).is_some() {
                return Err(Error::DuplicateEvent(event.clone()));
            }
        }

        Ok(Self { events, index })
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false`: empty alphabets are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event names in declaration order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.events.len()).map(|i| Symbol::new(i as u32))
    }

    /// Smallest symbol of the alphabet.
    pub fn min_symbol(&self) -> Symbol {
        Symbol::MIN
    }

    /// Largest symbol of the alphabet.
    pub fn max_symbol(&self) -> Symbol {
        Symbol::new((self.events.len() - 1) as u32)
    }

    /// Does the alphabet contain `symbol`?
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.index() < self.events.len()
    }

    /// Symbol of an event name.
    pub fn symbol(&self, event: &str) -> Result<Symbol> {
        self.index
            .get(event)
            .copied()
            .ok_or_else(|| Error::UnknownEvent(event.to_string()))
    }

    /// Event name of a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is outside the alphabet.
    pub fn event(&self, symbol: Symbol) -> &str {
        &self.events[symbol.index()]
    }

    /// Encodes a sequence of event names into symbols.
    pub fn encode<S: AsRef<str>>(&self, sequence: &[S]) -> Result<Vec<Symbol>> {
        sequence.iter().map(|e| self.symbol(e.as_ref())).collect()
    }

    /// Decodes a sequence of symbols into event names.
    pub fn decode(&self, sequence: &[Symbol]) -> Vec<String> {
        sequence.iter().map(|&s| self.event(s).to_string()).collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.events.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_mapping_follows_declaration_order() {
        let alphabet = Alphabet::new(["Open", "Read", "Write", "Close"]).unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.symbol("Open").unwrap(), Symbol::new(0));
        assert_eq!(alphabet.symbol("Close").unwrap(), Symbol::new(3));
        assert_eq!(alphabet.event(Symbol::new(2)), "Write");
        assert_eq!(alphabet.min_symbol(), Symbol::new(0));
        assert_eq!(alphabet.max_symbol(), Symbol::new(3));
    }

    #[test]
    fn test_encode_decode() {
        let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
        let seq = alphabet.encode(&["c", "a", "a"]).unwrap();
        assert_eq!(seq, vec![Symbol::new(2), Symbol::new(0), Symbol::new(0)]);
        assert_eq!(alphabet.decode(&seq), vec!["c", "a", "a"]);
    }

    #[test]
    fn test_unknown_event() {
        let alphabet = Alphabet::new(["a", "b"]).unwrap();
        assert_eq!(alphabet.encode(&["a", "z"]), Err(Error::UnknownEvent("z".to_string())));
    }

    #[test]
    fn test_rejects_bad_alphabets() {
        assert_eq!(Alphabet::new(Vec::<String>::new()), Err(Error::EmptyAlphabet));
        assert_eq!(Alphabet::new(["a", "b", "a"]), Err(Error::DuplicateEvent("a".to_string())));

        let too_many = (0..=Alphabet::SYMBOL_SPACE).map(|i| format!("e{}", i));
        assert!(matches!(Alphabet::new(too_many), Err(Error::AlphabetTooLarge { .. })));
    }

    #[test]
    fn test_more_than_26_events() {
        let alphabet = Alphabet::new((0..40).map(|i| format!("e{}", i))).unwrap();
        assert_eq!(alphabet.max_symbol(), Symbol::new(39));
        assert_eq!(alphabet.symbols().count(), 40);
    }
}
