//! Type-safe wrappers for automaton symbols and states.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between transition symbols (coded events) and state indices, preventing
//! common mistakes in automaton manipulation code.

use std::fmt;

/// A coded event (0-indexed).
///
/// Symbols are the letters automata read. Every event of an [`Alphabet`][crate::alphabet::Alphabet]
/// is mapped to exactly one symbol, in declaration order.
///
/// # Invariants
///
/// - Symbols of one alphabet are contiguous: `0..alphabet.len()`
/// - The mapping is fixed for the lifetime of the alphabet
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Smallest symbol value.
    pub const MIN: Symbol = Symbol(0);
    /// Largest symbol value representable in the symbol space.
    pub const MAX: Symbol = Symbol(u32::MAX);

    /// Creates a new symbol with the given code.
    pub const fn new(code: u32) -> Self {
        Symbol(code)
    }

    /// Returns the raw symbol code as a `u32`.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Returns the symbol code as an index (for alphabet lookups).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the next symbol, or `None` at the top of the symbol space.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Symbol)
    }

    /// Returns the previous symbol, or `None` at symbol 0.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<Symbol> for u32 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl From<u32> for Symbol {
    fn from(code: u32) -> Self {
        Symbol(code)
    }
}

/// A state of an automaton (0-indexed).
///
/// State ids are positions in the automaton's state table. They are only
/// meaningful relative to the automaton that produced them; every derived
/// construction renumbers its states.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Creates a new state id with the given index.
    pub const fn new(index: usize) -> Self {
        StateId(index)
    }

    /// Returns the raw state index as a `usize`.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<StateId> for usize {
    fn from(state: StateId) -> Self {
        state.0
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        StateId(index)
    }
}
