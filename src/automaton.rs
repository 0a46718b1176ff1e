//! Finite automata over symbol ranges.
//!
//! An [`Automaton`] is a set of states (indexed by [`StateId`]), one initial
//! state, a subset of accepting states, and transitions labeled by inclusive
//! [`SymbolRange`]s. Automata may be nondeterministic (e.g. right after
//! [`Automaton::concatenate`]); [`Automaton::determinize`] and
//! [`Automaton::minimize`] bring them back to deterministic form.
//!
//! Operations are split over several modules, all as `impl Automaton` blocks:
//!
//! - this module: construction, membership ([`Automaton::run`]), concatenation,
//!   completion, complement and alphabet restriction,
//! - [`determinize`][crate::determinize]: subset construction,
//! - [`minimize`][crate::minimize]: canonical minimization,
//! - [`product`][crate::product]: intersection and union,
//! - [`dot`][crate::dot]: Graphviz export.
//!
//! # Complement and the alphabet
//!
//! Transitions only mention symbols of the alphabet, but the symbol space is
//! larger. Complementing naively would make the result accept every string
//! containing an undeclared symbol. [`Automaton::complement`] therefore always
//! restricts its result to `[min(alphabet), max(alphabet)]`.
//!
//! # Examples
//!
//! ```
//! use seqcov_rs::alphabet::Alphabet;
//! use seqcov_rs::automaton::Automaton;
//! use seqcov_rs::range::SymbolSet;
//!
//! let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
//! let a = alphabet.symbol("a").unwrap();
//! let b = alphabet.symbol("b").unwrap();
//!
//! // "a" followed by anything
//! let only_a = Automaton::symbol(&SymbolSet::from_symbols([a]));
//! let any = Automaton::any_star(&alphabet);
//! let starts_with_a = only_a.concatenate(&any).minimize();
//!
//! assert!(starts_with_a.run(&[a, b, b]));
//! assert!(!starts_with_a.run(&[b, a]));
//!
//! let not_starting_with_a = starts_with_a.complement(&alphabet).minimize();
//! assert!(not_starting_with_a.run(&[b, a]));
//! assert!(not_starting_with_a.run(&[]));
//! ```

use std::collections::VecDeque;

use log::debug;

use crate::alphabet::Alphabet;
use crate::range::{SymbolRange, SymbolSet};
use crate::types::{StateId, Symbol};

/// A transition to `target`, taken on any symbol of `range`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Transition {
    pub range: SymbolRange,
    pub target: StateId,
}

/// Finite automaton with range-labeled transitions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Automaton {
    pub(crate) initial: StateId,
    pub(crate) accepting: Vec<bool>,
    pub(crate) transitions: Vec<Vec<Transition>>,
    pub(crate) deterministic: bool,
}

impl Default for Automaton {
    fn default() -> Self {
        Automaton::new()
    }
}

impl Automaton {
    /// Creates an automaton with a single non-accepting initial state and no
    /// transitions (the empty language).
    pub fn new() -> Self {
        Automaton {
            initial: StateId::new(0),
            accepting: vec![false],
            transitions: vec![Vec::new()],
            deterministic: true,
        }
    }

    /// Automaton accepting exactly the one-symbol strings over `set`.
    ///
    /// Two states: the initial one (non-accepting) and an accepting target,
    /// connected by one transition per range of `set`.
    pub fn symbol(set: &SymbolSet) -> Self {
        let mut a = Automaton::new();
        let target = a.add_state(true);
        for &range in set.ranges() {
            a.add_transition(a.initial, range, target);
        }
        a
    }

    /// Automaton accepting every string over the alphabet (`ANY*`):
    /// one accepting state with a self-loop on every symbol.
    pub fn any_star(alphabet: &Alphabet) -> Self {
        let mut a = Automaton::new();
        a.accepting[0] = true;
        let range = SymbolRange::new(alphabet.min_symbol(), alphabet.max_symbol());
        a.add_transition(a.initial, range, a.initial);
        a
    }

    /// Adds a new state.
    /// Returns the ID of the new state.
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        let id = StateId::new(self.accepting.len());
        self.accepting.push(accepting);
        self.transitions.push(Vec::new());
        id
    }

    /// Adds a transition `from --range--> to`.
    ///
    /// Clears the deterministic flag if `range` overlaps another transition of `from`.
    pub fn add_transition(&mut self, from: StateId, range: SymbolRange, to: StateId) {
        let overlaps = self.transitions[from.index()]
            .iter()
            .any(|t| t.range.clip(range.lo, range.hi).is_some());
        if overlaps {
            self.deterministic = false;
        }
        self.transitions[from.index()].push(Transition { range, target: to });
    }

    pub fn set_accepting(&mut self, state: StateId, accepting: bool) {
        self.accepting[state.index()] = accepting;
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn num_states(&self) -> usize {
        self.accepting.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.iter().map(|ts| ts.len()).sum()
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting[state.index()]
    }

    /// Outgoing transitions of `state`, in label order for canonical automata.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        &self.transitions[state.index()]
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.num_states()).map(StateId::new)
    }

    /// Deterministic step: the target of the first transition of `state` on `symbol`.
    pub fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions[state.index()]
            .iter()
            .find(|t| t.range.contains(symbol))
            .map(|t| t.target)
    }

    /// Replays `input` from the initial state.
    ///
    /// Returns `None` as soon as a symbol has no matching transition.
    ///
    /// # Panics
    ///
    /// Panics if the automaton is not deterministic.
    pub fn state_after(&self, input: &[Symbol]) -> Option<StateId> {
        assert!(self.deterministic, "state_after requires a deterministic automaton");
        let mut cur = self.initial;
        for &s in input {
            cur = self.step(cur, s)?;
        }
        Some(cur)
    }

    /// Membership test.
    ///
    /// Deterministic automata are simulated along their single path, rejecting
    /// on the first symbol without a matching transition. Nondeterministic
    /// automata are simulated on state sets.
    pub fn run(&self, input: &[Symbol]) -> bool {
        if self.deterministic {
            return match self.state_after(input) {
                Some(q) => self.is_accepting(q),
                None => false,
            };
        }

        let mut current = vec![false; self.num_states()];
        current[self.initial.index()] = true;
        for &s in input {
            let mut next = vec![false; self.num_states()];
            let mut any = false;
            for (q, _) in current.iter().enumerate().filter(|(_, &on)| on) {
                for t in &self.transitions[q] {
                    if t.range.contains(s) {
                        next[t.target.index()] = true;
                        any = true;
                    }
                }
            }
            if !any {
                return false;
            }
            current = next;
        }
        current.iter().zip(&self.accepting).any(|(&on, &acc)| on && acc)
    }

    /// Concatenation `self · other`.
    ///
    /// Every accepting state of `self` gets a copy of the outgoing transitions of
    /// `other`'s initial state, and stays accepting only if `other` accepts the
    /// empty string. The result is in general nondeterministic.
    pub fn concatenate(&self, other: &Automaton) -> Automaton {
        let offset = self.num_states();
        let shift = |t: &Transition| Transition {
            range: t.range,
            target: StateId::new(t.target.index() + offset),
        };

        let mut out = self.clone();
        out.deterministic = self.deterministic && other.deterministic;
        for q in 0..other.num_states() {
            out.accepting.push(other.accepting[q]);
            out.transitions.push(other.transitions[q].iter().map(shift).collect());
        }

        let other_initial = other.initial.index();
        let epsilon = other.accepting[other_initial];
        for q in 0..offset {
            if self.accepting[q] {
                for t in &other.transitions[other_initial] {
                    let t = shift(t);
                    out.add_transition(StateId::new(q), t.range, t.target);
                }
                out.accepting[q] = epsilon;
            }
        }

        debug!(
            "concatenate: {} + {} states -> {} states",
            self.num_states(),
            other.num_states(),
            out.num_states()
        );
        out
    }

    /// Makes the automaton total on `[lo, hi]`.
    ///
    /// Adds a non-accepting sink state and routes every symbol of `[lo, hi]`
    /// without a transition to it. Requires a deterministic automaton.
    pub fn complete_within(&self, lo: Symbol, hi: Symbol) -> Automaton {
        let mut out = if self.deterministic { self.clone() } else { self.determinize() };
        let domain = SymbolSet::from_ranges([SymbolRange::new(lo, hi)]);

        let mut missing: Vec<(usize, SymbolSet)> = Vec::new();
        for (q, ts) in out.transitions.iter().enumerate() {
            let defined = SymbolSet::from_ranges(ts.iter().map(|t| t.range));
            let gap = domain.and(&defined.not());
            if !gap.is_empty() {
                missing.push((q, gap));
            }
        }

        if !missing.is_empty() {
            let sink = out.add_state(false);
            out.transitions[sink.index()].push(Transition {
                range: SymbolRange::new(lo, hi),
                target: sink,
            });
            for (q, gap) in missing {
                for &range in gap.ranges() {
                    out.transitions[q].push(Transition { range, target: sink });
                }
                out.transitions[q].sort();
            }
        }
        out
    }

    /// Is every state total on `[lo, hi]`?
    pub fn is_total_within(&self, lo: Symbol, hi: Symbol) -> bool {
        let domain = SymbolSet::from_ranges([SymbolRange::new(lo, hi)]);
        self.transitions.iter().all(|ts| {
            let defined = SymbolSet::from_ranges(ts.iter().map(|t| t.range));
            domain.and(&defined) == domain
        })
    }

    /// Complement over the whole symbol space, *without* alphabet restriction.
    ///
    /// The result accepts every string containing a symbol outside the
    /// alphabet. Use [`Automaton::complement`] unless that is what you want.
    pub fn complement_unrestricted(&self) -> Automaton {
        let mut out = self.complete_within(Symbol::MIN, Symbol::MAX);
        for a in &mut out.accepting {
            *a = !*a;
        }
        out
    }

    /// Complement relative to the alphabet.
    ///
    /// Complements over the whole symbol space, then clips every label to
    /// `[min(alphabet), max(alphabet)]` (see [`Automaton::restrict`]). The
    /// restriction is part of the operation, not an optional cleanup.
    pub fn complement(&self, alphabet: &Alphabet) -> Automaton {
        let out = self
            .complement_unrestricted()
            .restrict(alphabet.min_symbol(), alphabet.max_symbol());
        debug!("complement: {} -> {} states", self.num_states(), out.num_states());
        out
    }

    /// Clone of the automaton with every label clipped to `[lo, hi]`.
    /// Transitions whose label lies entirely outside are dropped.
    pub fn restrict(&self, lo: Symbol, hi: Symbol) -> Automaton {
        let transitions = self
            .transitions
            .iter()
            .map(|ts| {
                ts.iter()
                    .filter_map(|t| {
                        t.range.clip(lo, hi).map(|range| Transition {
                            range,
                            target: t.target,
                        })
                    })
                    .collect()
            })
            .collect();
        Automaton {
            initial: self.initial,
            accepting: self.accepting.clone(),
            transitions,
            deterministic: self.deterministic,
        }
    }

    /// States reachable from the initial state.
    pub(crate) fn reachable(&self) -> Vec<bool> {
        let mut seen = vec![false; self.num_states()];
        let mut queue = VecDeque::from([self.initial]);
        seen[self.initial.index()] = true;
        while let Some(q) = queue.pop_front() {
            for t in &self.transitions[q.index()] {
                if !seen[t.target.index()] {
                    seen[t.target.index()] = true;
                    queue.push_back(t.target);
                }
            }
        }
        seen
    }

    /// States from which an accepting state is reachable.
    pub(crate) fn live(&self) -> Vec<bool> {
        let n = self.num_states();
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (q, ts) in self.transitions.iter().enumerate() {
            for t in ts {
                preds[t.target.index()].push(q);
            }
        }
        let mut live = self.accepting.clone();
        let mut queue: VecDeque<usize> = (0..n).filter(|&q| live[q]).collect();
        while let Some(q) = queue.pop_front() {
            for &p in &preds[q] {
                if !live[p] {
                    live[p] = true;
                    queue.push_back(p);
                }
            }
        }
        live
    }

    /// Does the automaton accept no string at all?
    pub fn is_empty(&self) -> bool {
        self.reachable()
            .iter()
            .zip(&self.accepting)
            .all(|(&reached, &accepting)| !(reached && accepting))
    }

    /// Language equality.
    pub fn is_equivalent(&self, other: &Automaton) -> bool {
        self.minimize() == other.minimize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn abc() -> Alphabet {
        Alphabet::new(["a", "b", "c"]).unwrap()
    }

    fn sym(code: u32) -> Symbol {
        Symbol::new(code)
    }

    #[test]
    fn test_empty_automaton() {
        let a = Automaton::new();
        assert!(a.is_empty());
        assert!(!a.run(&[]));
        assert!(!a.run(&[sym(0)]));
    }

    #[test]
    fn test_symbol_automaton() {
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(0), sym(2)]));
        assert_eq!(a.num_states(), 2);
        assert!(a.run(&[sym(0)]));
        assert!(a.run(&[sym(2)]));
        assert!(!a.run(&[sym(1)]));
        assert!(!a.run(&[]));
        assert!(!a.run(&[sym(0), sym(0)]));
    }

    #[test]
    fn test_any_star() {
        let any = Automaton::any_star(&abc());
        assert!(any.run(&[]));
        assert!(any.run(&[sym(2), sym(0), sym(1)]));
        assert!(!any.run(&[sym(3)]));
    }

    #[test]
    fn test_concatenate() {
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(0)]));
        let b = Automaton::symbol(&SymbolSet::from_symbols([sym(1)]));
        let ab = a.concatenate(&b);
        assert!(ab.run(&[sym(0), sym(1)]));
        assert!(!ab.run(&[sym(0)]));
        assert!(!ab.run(&[sym(1)]));
        assert!(!ab.run(&[sym(0), sym(1), sym(1)]));
    }

    #[test]
    fn test_concatenate_with_nullable_right() {
        let alphabet = abc();
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(0)]));
        let a_any = a.concatenate(&Automaton::any_star(&alphabet));
        assert!(a_any.run(&[sym(0)]));
        assert!(a_any.run(&[sym(0), sym(2), sym(2)]));
        assert!(!a_any.run(&[sym(1), sym(0)]));

        let any_a = Automaton::any_star(&alphabet).concatenate(&a);
        assert!(!any_a.is_deterministic());
        assert!(any_a.run(&[sym(1), sym(0)]));
        assert!(any_a.run(&[sym(0), sym(0)]));
        assert!(!any_a.run(&[sym(0), sym(1)]));
    }

    #[test]
    fn test_complement_is_restricted_to_alphabet() {
        let alphabet = abc();
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(0)]));

        let naive = a.complement_unrestricted();
        assert!(naive.run(&[sym(7)]));

        let not_a = a.complement(&alphabet);
        assert!(not_a.run(&[]));
        assert!(!not_a.run(&[sym(0)]));
        assert!(not_a.run(&[sym(1)]));
        assert!(not_a.run(&[sym(0), sym(0)]));
        assert!(!not_a.run(&[sym(3)]));
        assert!(!not_a.run(&[sym(1), sym(99)]));
        assert!(not_a.is_total_within(alphabet.min_symbol(), alphabet.max_symbol()));
    }

    #[test]
    fn test_restrict_drops_outside_labels() {
        let mut a = Automaton::new();
        let q = a.add_state(true);
        a.add_transition(a.initial(), SymbolRange::new(sym(5), sym(9)), q);
        a.add_transition(a.initial(), SymbolRange::new(sym(1), sym(6)), q);
        let r = a.restrict(sym(0), sym(3));
        assert_eq!(r.transitions(r.initial()).len(), 1);
        assert_eq!(r.transitions(r.initial())[0].range, SymbolRange::new(sym(1), sym(3)));
    }

    #[test]
    fn test_complete_within() {
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(1)]));
        assert!(!a.is_total_within(sym(0), sym(2)));
        let c = a.complete_within(sym(0), sym(2));
        assert!(c.is_total_within(sym(0), sym(2)));
        assert_eq!(c.num_states(), 3);
        assert!(c.run(&[sym(1)]));
        assert!(!c.run(&[sym(0)]));
    }

    #[test]
    fn test_state_after() {
        let alphabet = abc();
        let a = Automaton::symbol(&SymbolSet::from_symbols([sym(0)]))
            .concatenate(&Automaton::any_star(&alphabet))
            .minimize();
        assert!(a.state_after(&[sym(1)]).is_none());
        let q = a.state_after(&[sym(0), sym(1)]).unwrap();
        assert!(a.is_accepting(q));
    }
}
