//! Constraint solver: validity and extendability of sequences.
//!
//! A sequence is *valid* when it fits the length and repetition limits and the
//! compiled automaton accepts it. It is *extendable* when some continuation,
//! still within the limits, becomes valid.

use std::collections::HashMap;

use log::debug;

use crate::alphabet::Alphabet;
use crate::ast::Constraint;
use crate::automaton::Automaton;
use crate::cache::ExtendabilityCache;
use crate::compiler::Compiler;
use crate::config::Config;
use crate::error::Result;
use crate::types::Symbol;

/// Validity oracle for one compiled constraint under fixed limits.
#[derive(Debug, Clone)]
pub struct Solver {
    alphabet: Alphabet,
    automaton: Automaton,
    max_repetition: usize,
    max_length: usize,
}

impl Solver {
    /// Compiles `constraint` once and wraps it with the limits of `config`.
    pub fn new(alphabet: &Alphabet, constraint: &Constraint, config: Config) -> Result<Self> {
        config.validate()?;
        let automaton = Compiler::new(alphabet).compile(constraint)?;
        debug!(
            "solver for {}: {} states, max repetition {}, max length {}",
            constraint,
            automaton.num_states(),
            config.max_repetition,
            config.max_length
        );
        Ok(Self::with_automaton(alphabet, automaton, config))
    }

    /// Wraps an already compiled automaton.
    ///
    /// Labels are clipped to the alphabet first, so symbols that no event maps
    /// to are neither accepted nor offered as extension candidates.
    pub fn with_automaton(alphabet: &Alphabet, automaton: Automaton, config: Config) -> Self {
        let automaton = automaton
            .restrict(alphabet.min_symbol(), alphabet.max_symbol())
            .minimize();
        Self {
            alphabet: alphabet.clone(),
            automaton,
            max_repetition: config.max_repetition,
            max_length: config.max_length,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn max_repetition(&self) -> usize {
        self.max_repetition
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Does some event occur more than `max_repetition` times?
    pub fn exceeds_repetition(&self, sequence: &[Symbol]) -> bool {
        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for &s in sequence {
            let count = counts.entry(s).or_insert(0);
            *count += 1;
            if *count > self.max_repetition {
                return true;
            }
        }
        false
    }

    /// Is `sequence` complete and acceptable as it is?
    pub fn solve(&self, sequence: &[Symbol]) -> bool {
        if sequence.len() > self.max_length {
            return false;
        }
        if self.exceeds_repetition(sequence) {
            return false;
        }
        self.automaton.run(sequence)
    }

    /// [`Solver::solve`] on event names.
    pub fn solve_events<S: AsRef<str>>(&self, sequence: &[S]) -> Result<bool> {
        let sequence = self.alphabet.encode(sequence)?;
        Ok(self.solve(&sequence))
    }

    /// Can `sequence` be continued into a valid sequence?
    ///
    /// Candidates for the next event are the labels of the outgoing transitions
    /// of the state reached by `sequence`, in transition order, each range
    /// expanded from low to high. The search is depth-first and stops at the
    /// first valid continuation. Results are memoized in `cache`.
    pub fn is_extendable(&self, sequence: &[Symbol], cache: &mut ExtendabilityCache) -> bool {
        if let Some(result) = cache.get(sequence) {
            return result;
        }
        let result = self.search_extension(sequence, cache);
        cache.insert(sequence, result);
        result
    }

    /// [`Solver::is_extendable`] on event names.
    pub fn is_extendable_events<S: AsRef<str>>(&self, sequence: &[S], cache: &mut ExtendabilityCache) -> Result<bool> {
        let sequence = self.alphabet.encode(sequence)?;
        Ok(self.is_extendable(&sequence, cache))
    }

    /// Valid or extendable: the qualifier used by both generation phases.
    pub fn is_promising(&self, sequence: &[Symbol], cache: &mut ExtendabilityCache) -> bool {
        self.solve(sequence) || self.is_extendable(sequence, cache)
    }

    fn search_extension(&self, sequence: &[Symbol], cache: &mut ExtendabilityCache) -> bool {
        // Looks one event ahead, so the sequence must leave room for it.
        if sequence.len() >= self.max_length {
            return false;
        }
        if self.exceeds_repetition(sequence) {
            return false;
        }
        let Some(state) = self.automaton.state_after(sequence) else {
            return false;
        };

        let candidates: Vec<Symbol> = self
            .automaton
            .transitions(state)
            .iter()
            .flat_map(|t| t.range.symbols())
            .collect();

        let last = sequence.len();
        let mut extended = sequence.to_vec();
        extended.push(Symbol::MIN);
        for symbol in candidates {
            extended[last] = symbol;
            if self.solve(&extended) || self.is_extendable(&extended, cache) {
                return true;
            }
        }
        false
    }
}
