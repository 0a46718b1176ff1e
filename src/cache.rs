//! Memoization of extendability checks.
//!
//! Extendability is a pure function of the sequence (for a fixed automaton and
//! fixed limits), so entries are never invalidated. The cache lives as long as
//! one generation run and is unbounded: it holds at most one entry per distinct
//! sequence that was ever checked.

use std::cell::Cell;
use std::collections::HashMap;

use crate::types::Symbol;

#[derive(Debug, Default)]
pub struct ExtendabilityCache {
    data: HashMap<Vec<Symbol>, bool>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl ExtendabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Number of cached sequences.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reset the cache and its counters.
    pub fn clear(&mut self) {
        self.data.clear();
        self.hits.set(0);
        self.misses.set(0);
    }

    /// Get the cached result.
    pub fn get(&self, sequence: &[Symbol]) -> Option<bool> {
        match self.data.get(sequence) {
            Some(&value) => {
                self.hits.set(self.hits.get() + 1);
                Some(value)
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, sequence: &[Symbol], value: bool) {
        self.data.insert(sequence.to_vec(), value);
    }
}
