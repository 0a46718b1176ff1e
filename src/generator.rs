//! Test sequence generation.
//!
//! Each round builds one sequence in two phases:
//!
//! 1. **Starting phase.** The first uncovered target that is valid or extendable
//!    is adopted as it is. Otherwise a breadth-first search starts from all
//!    targets (the full set, not just the uncovered ones) and returns the first
//!    candidate that covers some uncovered target and is valid or extendable.
//!    Candidates that cover nothing but are extendable get one child per event,
//!    in alphabet order.
//! 2. **Extension phase.** While the sequence is extendable, append the event
//!    whose extension covers strictly the most uncovered targets among the
//!    valid-or-extendable extensions; ties go to the first event in alphabet
//!    order. The phase also stops as soon as every target is covered and the
//!    sequence is valid.
//!
//! Rounds repeat until no target is left uncovered, or until a starting phase
//! finds nothing: the remaining targets are then unreachable under the limits
//! and the constraint, and are reported as such in [`Generation::uncovered`].

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::alphabet::Alphabet;
use crate::ast::Constraint;
use crate::cache::ExtendabilityCache;
use crate::config::Config;
use crate::error::Result;
use crate::solver::Solver;
use crate::targets::TargetSet;
use crate::types::Symbol;

/// Run statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub num_sequences: usize,
    pub total_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
    pub starting_time: Duration,
    pub extension_time: Duration,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_size: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sequences, total length {}, length min/avg/max {}/{:.2}/{}, starting {:.3}s, extension {:.3}s, cache {} entries ({} hits, {} misses)",
            self.num_sequences,
            self.total_length,
            self.min_length,
            self.avg_length,
            self.max_length,
            self.starting_time.as_secs_f64(),
            self.extension_time.as_secs_f64(),
            self.cache_size,
            self.cache_hits,
            self.cache_misses
        )
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Generated sequences, in generation order.
    pub sequences: Vec<Vec<String>>,
    /// Targets no sequence could cover; empty on full success.
    pub uncovered: Vec<Vec<String>>,
    /// Number of targets after the repetition filter.
    pub num_targets: usize,
    pub stats: Stats,
}

impl Generation {
    /// Are all targets covered?
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Greedy generator over one solver and one target set.
#[derive(Debug)]
pub struct Generator {
    solver: Solver,
    targets: TargetSet,
    uncovered: BTreeSet<usize>,
    cache: ExtendabilityCache,
    sequences: Vec<Vec<Symbol>>,
    starting_time: Duration,
    extension_time: Duration,
}

impl Generator {
    pub fn new(solver: Solver, targets: TargetSet) -> Self {
        let uncovered = (0..targets.len()).collect();
        Self {
            solver,
            targets,
            uncovered,
            cache: ExtendabilityCache::new(),
            sequences: Vec::new(),
            starting_time: Duration::ZERO,
            extension_time: Duration::ZERO,
        }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn cache(&self) -> &ExtendabilityCache {
        &self.cache
    }

    /// Sequences generated so far.
    pub fn sequences(&self) -> &[Vec<Symbol>] {
        &self.sequences
    }

    /// Targets not covered yet, in enumeration order.
    pub fn uncovered(&self) -> impl Iterator<Item = &[Symbol]> {
        self.uncovered.iter().map(|&i| self.targets.get(i))
    }

    pub fn num_uncovered(&self) -> usize {
        self.uncovered.len()
    }

    fn symbols(&self) -> Vec<Symbol> {
        self.solver.alphabet().symbols().collect()
    }

    /// Indices of the currently uncovered targets covered by `sequence`.
    fn newly_covered(&self, sequence: &[Symbol]) -> Vec<usize> {
        self.targets
            .covered_by(sequence, self.uncovered.iter().copied())
            .collect()
    }

    /// Finds a sequence to start from, or `None` if no uncovered target is reachable.
    pub fn starting_phase(&mut self) -> Option<Vec<Symbol>> {
        let adopted = self
            .uncovered
            .iter()
            .copied()
            .find(|&i| self.solver.is_promising(self.targets.get(i), &mut self.cache));
        if let Some(i) = adopted {
            // Only the adopted target is removed here. A target of length t
            // covers no other target of length t.
            self.uncovered.remove(&i);
            let sequence = self.targets.get(i).to_vec();
            debug!("adopted target {:?} as starting sequence", sequence);
            return Some(sequence);
        }

        let symbols = self.symbols();
        let mut queue: VecDeque<Vec<Symbol>> = self.targets.iter().map(|t| t.to_vec()).collect();
        let mut explored = 0usize;
        while let Some(candidate) = queue.pop_front() {
            explored += 1;
            let covered = self.newly_covered(&candidate);
            if !covered.is_empty() {
                if self.solver.is_promising(&candidate, &mut self.cache) {
                    for i in &covered {
                        self.uncovered.remove(i);
                    }
                    debug!(
                        "found starting sequence {:?} covering {} targets after {} candidates",
                        candidate,
                        covered.len(),
                        explored
                    );
                    return Some(candidate);
                }
            } else if self.solver.is_extendable(&candidate, &mut self.cache) {
                for &s in &symbols {
                    let mut child = Vec::with_capacity(candidate.len() + 1);
                    child.extend_from_slice(&candidate);
                    child.push(s);
                    queue.push_back(child);
                }
            }
        }

        debug!("no starting sequence after {} candidates", explored);
        None
    }

    /// Greedily extends `sequence` until it is complete.
    ///
    /// # Panics
    ///
    /// Panics if an extendable sequence has no valid or extendable one-event extension.
    pub fn extension_phase(&mut self, mut sequence: Vec<Symbol>) -> Vec<Symbol> {
        let symbols = self.symbols();
        loop {
            if self.uncovered.is_empty() && self.solver.solve(&sequence) {
                break;
            }
            if !self.solver.is_extendable(&sequence, &mut self.cache) {
                break;
            }

            let mut best: Option<(Vec<Symbol>, Vec<usize>)> = None;
            for &s in &symbols {
                let mut extended = sequence.clone();
                extended.push(s);
                let covered = self.newly_covered(&extended);
                let improves = match &best {
                    None => true,
                    Some((_, best_covered)) => covered.len() > best_covered.len(),
                };
                if improves && self.solver.is_promising(&extended, &mut self.cache) {
                    best = Some((extended, covered));
                }
            }

            let Some((extended, covered)) = best else {
                panic!("extendable sequence {:?} has no valid or extendable extension", sequence);
            };
            for i in &covered {
                self.uncovered.remove(i);
            }
            debug!("extended to {:?}, {} newly covered", extended, covered.len());
            sequence = extended;
        }
        sequence
    }

    /// Runs rounds until every target is covered or no starting sequence is left.
    pub fn run(mut self) -> Generation {
        info!(
            "generating for {} targets, max repetition {}, max length {}",
            self.targets.len(),
            self.solver.max_repetition(),
            self.solver.max_length()
        );

        while !self.uncovered.is_empty() {
            debug!("{} targets uncovered", self.uncovered.len());

            let start_time = Instant::now();
            let start = self.starting_phase();
            self.starting_time += start_time.elapsed();
            let Some(start) = start else {
                warn!(
                    "{} targets are uncoverable under the given constraints",
                    self.uncovered.len()
                );
                break;
            };

            let start_time = Instant::now();
            let sequence = self.extension_phase(start);
            self.extension_time += start_time.elapsed();

            debug!("generated {:?}", sequence);
            self.sequences.push(sequence);
        }

        let generation = self.finish();
        info!("generation finished: {}", generation.stats);
        generation
    }

    fn finish(self) -> Generation {
        let lengths: Vec<usize> = self.sequences.iter().map(|s| s.len()).collect();
        let total_length: usize = lengths.iter().sum();
        let stats = Stats {
            num_sequences: lengths.len(),
            total_length,
            min_length: lengths.iter().copied().min().unwrap_or(0),
            max_length: lengths.iter().copied().max().unwrap_or(0),
            avg_length: if lengths.is_empty() {
                0.0
            } else {
                total_length as f64 / lengths.len() as f64
            },
            starting_time: self.starting_time,
            extension_time: self.extension_time,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            cache_size: self.cache.len(),
        };

        let alphabet = self.solver.alphabet();
        Generation {
            sequences: self.sequences.iter().map(|s| alphabet.decode(s)).collect(),
            uncovered: self.uncovered().map(|t| alphabet.decode(t)).collect(),
            num_targets: self.targets.len(),
            stats,
        }
    }
}

/// Compiles `constraint`, enumerates the targets and runs the generator.
///
/// # Examples
///
/// ```
/// use seqcov_rs::alphabet::Alphabet;
/// use seqcov_rs::ast::Constraint;
/// use seqcov_rs::config::Config;
/// use seqcov_rs::generator::generate;
///
/// let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
/// // every c is preceded by some a
/// let constraint = Constraint::general_right(Constraint::event("a"), Constraint::event("c"));
///
/// let generation = generate(&alphabet, &constraint, Config::new(2, 2, 6).unwrap()).unwrap();
/// assert!(generation.is_complete());
/// for sequence in &generation.sequences {
///     let first_c = sequence.iter().position(|e| e == "c");
///     let first_a = sequence.iter().position(|e| e == "a");
///     if let Some(c) = first_c {
///         assert!(first_a.unwrap() < c);
///     }
/// }
/// ```
pub fn generate(alphabet: &Alphabet, constraint: &Constraint, config: Config) -> Result<Generation> {
    let solver = Solver::new(alphabet, constraint, config)?;
    let targets = TargetSet::from_config(alphabet, &config);
    Ok(Generator::new(solver, targets).run())
}
