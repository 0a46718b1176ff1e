//! Symbol ranges and symbol sets.
//!
//! Transition labels are inclusive [`SymbolRange`]s. A [`SymbolSet`] is a
//! normalized union of ranges (sorted, disjoint, non-adjacent) and supports the
//! boolean algebra needed to complete and complement automata. The universe of
//! a `SymbolSet` is the whole symbol space `[Symbol::MIN, Symbol::MAX]`; the
//! alphabet-relative view is obtained with [`SymbolSet::clip`].

use std::collections::BTreeSet;
use std::fmt;

use crate::types::Symbol;

/// Inclusive range of symbols `[lo, hi]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SymbolRange {
    pub lo: Symbol,
    pub hi: Symbol,
}

impl SymbolRange {
    /// Creates the range `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn new(lo: Symbol, hi: Symbol) -> Self {
        assert!(lo <= hi, "Empty range [{}, {}]", lo, hi);
        SymbolRange { lo, hi }
    }

    /// Range containing a single symbol.
    pub fn single(symbol: Symbol) -> Self {
        SymbolRange { lo: symbol, hi: symbol }
    }

    /// The whole symbol space.
    pub fn full() -> Self {
        SymbolRange {
            lo: Symbol::MIN,
            hi: Symbol::MAX,
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.lo <= symbol && symbol <= self.hi
    }

    /// Number of symbols in the range.
    pub fn len(&self) -> u64 {
        self.hi.code() as u64 - self.lo.code() as u64 + 1
    }

    /// Ranges are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Intersection with `[lo, hi]`, if not empty.
    pub fn clip(&self, lo: Symbol, hi: Symbol) -> Option<Self> {
        let a = self.lo.max(lo);
        let b = self.hi.min(hi);
        if a <= b {
            Some(SymbolRange { lo: a, hi: b })
        } else {
            None
        }
    }

    /// Symbols of the range, low to high.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> {
        (self.lo.code()..=self.hi.code()).map(Symbol::new)
    }
}

impl fmt::Display for SymbolRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{}", self.lo.code())
        } else {
            write!(f, "{}-{}", self.lo.code(), self.hi.code())
        }
    }
}

/// A set of symbols represented as a list of disjoint ranges.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct SymbolSet {
    // invariant: ranges are disjoint, sorted, non-adjacent
    ranges: Vec<SymbolRange>,
}

impl SymbolSet {
    /// The empty set.
    pub fn empty() -> Self {
        SymbolSet { ranges: Vec::new() }
    }

    /// The whole symbol space.
    pub fn full() -> Self {
        SymbolSet {
            ranges: vec![SymbolRange::full()],
        }
    }

    /// Creates a set from a list of ranges.
    /// The ranges do not need to be sorted or disjoint; they will be normalized.
    pub fn from_ranges(ranges: impl IntoIterator<Item = SymbolRange>) -> Self {
        let mut ranges: Vec<SymbolRange> = ranges.into_iter().collect();
        ranges.sort_unstable();
        let mut out = Vec::<SymbolRange>::with_capacity(ranges.len());
        for r in ranges {
            if let Some(last) = out.last_mut() {
                if r.lo.code() as u64 <= last.hi.code() as u64 + 1 {
                    if r.hi > last.hi {
                        last.hi = r.hi;
                    }
                    continue;
                }
            }
            out.push(r);
        }
        SymbolSet { ranges: out }
    }

    /// Creates a set from individual symbols.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self::from_ranges(symbols.into_iter().map(SymbolRange::single))
    }

    pub fn ranges(&self) -> &[SymbolRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        let mut lo = 0usize;
        let mut hi = self.ranges.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let r = self.ranges[mid];
            if symbol < r.lo {
                hi = mid;
            } else if symbol > r.hi {
                lo = mid + 1;
            } else {
                return true;
            }
        }
        false
    }

    /// Intersection.
    pub fn and(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        let mut i = 0usize;
        let mut j = 0usize;
        while i < self.ranges.len() && j < other.ranges.len() {
            let a = self.ranges[i];
            let b = other.ranges[j];
            if let Some(r) = a.clip(b.lo, b.hi) {
                out.push(r);
            }
            if a.hi < b.hi {
                i += 1;
            } else {
                j += 1;
            }
        }
        SymbolSet::from_ranges(out)
    }

    /// Union.
    pub fn or(&self, other: &Self) -> Self {
        SymbolSet::from_ranges(self.ranges.iter().chain(other.ranges.iter()).copied())
    }

    /// Complement with respect to the whole symbol space.
    pub fn not(&self) -> Self {
        let mut out = Vec::new();
        let mut cur = Symbol::MIN.code() as u64;
        for r in &self.ranges {
            if cur < r.lo.code() as u64 {
                out.push(SymbolRange::new(Symbol::new(cur as u32), Symbol::new(r.lo.code() - 1)));
            }
            cur = r.hi.code() as u64 + 1;
        }
        if cur <= Symbol::MAX.code() as u64 {
            out.push(SymbolRange::new(Symbol::new(cur as u32), Symbol::MAX));
        }
        SymbolSet { ranges: out }
    }

    /// Restriction to `[lo, hi]`.
    pub fn clip(&self, lo: Symbol, hi: Symbol) -> Self {
        SymbolSet {
            ranges: self.ranges.iter().filter_map(|r| r.clip(lo, hi)).collect(),
        }
    }

    /// Symbols of the set, low to high.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.ranges.iter().flat_map(|r| r.symbols())
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}

/// Splits the union of `labels` into disjoint atomic ranges.
///
/// Every input label is exactly a union of returned atoms, so a construction
/// that iterates over the atoms sees each label either entirely or not at all.
/// Atoms are returned in ascending order.
pub fn atoms(labels: impl IntoIterator<Item = SymbolRange>) -> Vec<SymbolRange> {
    let labels: Vec<SymbolRange> = labels.into_iter().collect();
    if labels.is_empty() {
        return Vec::new();
    }

    let mut boundaries: BTreeSet<u64> = BTreeSet::new();
    for r in &labels {
        boundaries.insert(r.lo.code() as u64);
        boundaries.insert(r.hi.code() as u64 + 1);
    }
    let covered = SymbolSet::from_ranges(labels);

    let boundaries: Vec<u64> = boundaries.into_iter().collect();
    let mut out = Vec::new();
    for w in boundaries.windows(2) {
        let lo = Symbol::new(w[0] as u32);
        let hi = Symbol::new((w[1] - 1) as u32);
        if covered.contains(lo) {
            out.push(SymbolRange::new(lo, hi));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn r(lo: u32, hi: u32) -> SymbolRange {
        SymbolRange::new(Symbol::new(lo), Symbol::new(hi))
    }

    #[test]
    fn test_from_ranges_normalizes() {
        let set = SymbolSet::from_ranges([r(5, 7), r(0, 1), r(2, 3), r(6, 9)]);
        assert_eq!(set.ranges(), &[r(0, 3), r(5, 9)]);
    }

    #[test]
    fn test_and_or() {
        let a = SymbolSet::from_ranges([r(0, 4), r(8, 10)]);
        let b = SymbolSet::from_ranges([r(3, 9)]);
        assert_eq!(a.and(&b).ranges(), &[r(3, 4), r(8, 9)]);
        assert_eq!(a.or(&b).ranges(), &[r(0, 10)]);
    }

    #[test]
    fn test_not() {
        let a = SymbolSet::from_ranges([r(2, 4)]);
        let na = a.not();
        assert_eq!(na.ranges(), &[r(0, 1), SymbolRange::new(Symbol::new(5), Symbol::MAX)]);
        assert_eq!(na.not(), a);
        assert!(SymbolSet::full().not().is_empty());
        assert_eq!(SymbolSet::empty().not(), SymbolSet::full());
    }

    #[test]
    fn test_clip() {
        let a = SymbolSet::full();
        assert_eq!(a.clip(Symbol::new(0), Symbol::new(2)).ranges(), &[r(0, 2)]);
        let b = SymbolSet::from_ranges([r(0, 1), r(5, 9)]);
        assert_eq!(b.clip(Symbol::new(1), Symbol::new(6)).ranges(), &[r(1, 1), r(5, 6)]);
    }

    #[test]
    fn test_contains() {
        let a = SymbolSet::from_symbols([Symbol::new(1), Symbol::new(3)]);
        assert!(a.contains(Symbol::new(1)));
        assert!(!a.contains(Symbol::new(2)));
        assert!(a.contains(Symbol::new(3)));
        assert_eq!(a.symbols().collect::<Vec<_>>(), vec![Symbol::new(1), Symbol::new(3)]);
    }

    #[test]
    fn test_atoms() {
        let atoms = atoms([r(0, 5), r(3, 8), r(10, 10)]);
        assert_eq!(atoms, vec![r(0, 2), r(3, 5), r(6, 8), r(10, 10)]);
    }

    #[test]
    fn test_atoms_full_space() {
        let atoms = atoms([SymbolRange::full(), r(0, 0)]);
        assert_eq!(atoms, vec![r(0, 0), SymbolRange::new(Symbol::new(1), Symbol::MAX)]);
    }
}
