//! Target subsequences: the t-way coverage goals.

use num_bigint::BigUint;

use crate::alphabet::Alphabet;
use crate::config::Config;
use crate::types::Symbol;

/// All `n^t` tuples over `0..n`, as a mixed-radix counter.
///
/// The rightmost digit moves fastest; the enumeration ends when the leftmost
/// digit carries over.
#[derive(Debug, Clone)]
pub struct Tuples {
    n: usize,
    digits: Vec<usize>,
    exhausted: bool,
}

impl Tuples {
    pub fn new(n: usize, t: usize) -> Self {
        Self {
            n,
            digits: vec![0; t],
            exhausted: n == 0,
        }
    }
}

impl Iterator for Tuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.digits.clone();

        let mut pos = self.digits.len();
        loop {
            if pos == 0 {
                self.exhausted = true;
                break;
            }
            pos -= 1;
            self.digits[pos] += 1;
            if self.digits[pos] < self.n {
                break;
            }
            self.digits[pos] = 0;
        }

        Some(current)
    }
}

/// Is `target` an order-preserving, not necessarily contiguous, subsequence of `sequence`?
///
/// Each element of `target` is matched against the first occurrence in what
/// remains of `sequence` after the previous match.
pub fn is_covered(sequence: &[Symbol], target: &[Symbol]) -> bool {
    if sequence.len() < target.len() {
        return false;
    }
    let mut rest = sequence;
    for s in target {
        match rest.iter().position(|x| x == s) {
            Some(i) => rest = &rest[i + 1..],
            None => return false,
        }
    }
    true
}

/// The immutable set of t-way targets, in enumeration order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TargetSet {
    strength: usize,
    targets: Vec<Vec<Symbol>>,
}

impl TargetSet {
    /// Enumerates all `t`-tuples over the alphabet in which no event occurs
    /// more than `max_repetition` times.
    pub fn enumerate(alphabet: &Alphabet, strength: usize, max_repetition: usize) -> Self {
        let symbols: Vec<Symbol> = alphabet.symbols().collect();
        let targets = Tuples::new(symbols.len(), strength)
            .filter(|digits| within_repetition(digits, max_repetition))
            .map(|digits| digits.into_iter().map(|d| symbols[d]).collect())
            .collect();
        Self { strength, targets }
    }

    pub fn from_config(alphabet: &Alphabet, config: &Config) -> Self {
        Self::enumerate(alphabet, config.strength, config.max_repetition)
    }

    /// Size of the unfiltered target space, `n^t`.
    pub fn space_size(n: usize, t: usize) -> BigUint {
        BigUint::from(n).pow(t as u32)
    }

    pub fn strength(&self) -> usize {
        self.strength
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> &[Symbol] {
        &self.targets[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Symbol]> {
        self.targets.iter().map(|t| t.as_slice())
    }

    /// Indices of the targets covered by `sequence`, among `candidates`.
    pub fn covered_by<'a>(&'a self, sequence: &'a [Symbol], candidates: impl IntoIterator<Item = usize> + 'a) -> impl Iterator<Item = usize> + 'a {
        candidates
            .into_iter()
            .filter(move |&i| is_covered(sequence, &self.targets[i]))
    }
}

fn within_repetition(digits: &[usize], max_repetition: usize) -> bool {
    digits
        .iter()
        .all(|d| digits.iter().filter(|&x| x == d).count() <= max_repetition)
}
