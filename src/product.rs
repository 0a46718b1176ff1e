//! Intersection and union by product construction.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::automaton::{Automaton, Transition};
use crate::range::atoms;
use crate::types::StateId;

impl Automaton {
    /// Intersection: accepts the strings accepted by both automata.
    pub fn intersect(&self, other: &Automaton) -> Automaton {
        let out = self.product(other, |a, b| a && b, false);
        debug!(
            "intersect: {} x {} -> {} states",
            self.num_states(),
            other.num_states(),
            out.num_states()
        );
        out
    }

    /// Union: accepts the strings accepted by either automaton.
    pub fn union(&self, other: &Automaton) -> Automaton {
        let out = self.product(other, |a, b| a || b, true);
        debug!(
            "union: {} x {} -> {} states",
            self.num_states(),
            other.num_states(),
            out.num_states()
        );
        out
    }

    /// Product over reachable state pairs.
    ///
    /// A side without a transition on some atom moves to the implicit sink
    /// (`None`). Pairs with one sink component are only explored when
    /// `keep_half_dead` is set, which union needs and intersection does not.
    fn product<F>(&self, other: &Automaton, accept_op: F, keep_half_dead: bool) -> Automaton
    where
        F: Fn(bool, bool) -> bool,
    {
        let left = self.determinize();
        let right = other.determinize();

        let atoms = atoms(
            left.transitions
                .iter()
                .chain(right.transitions.iter())
                .flatten()
                .map(|t| t.range),
        );

        type Pair = (Option<StateId>, Option<StateId>);
        let start: Pair = (Some(left.initial), Some(right.initial));
        let mut pairs: Vec<Pair> = vec![start];
        let mut index: HashMap<Pair, StateId> = HashMap::from([(start, StateId::new(0))]);
        let mut transitions: Vec<Vec<Transition>> = vec![Vec::new()];
        let mut queue = VecDeque::from([StateId::new(0)]);

        while let Some(id) = queue.pop_front() {
            let (p, q) = pairs[id.index()];
            for &atom in &atoms {
                let t1 = p.and_then(|p| left.step(p, atom.lo));
                let t2 = q.and_then(|q| right.step(q, atom.lo));
                let next = match (t1, t2) {
                    (None, None) => continue,
                    (Some(_), Some(_)) => (t1, t2),
                    _ if keep_half_dead => (t1, t2),
                    _ => continue,
                };
                let target = match index.get(&next) {
                    Some(&t) => t,
                    None => {
                        let t = StateId::new(pairs.len());
                        index.insert(next, t);
                        pairs.push(next);
                        transitions.push(Vec::new());
                        queue.push_back(t);
                        t
                    }
                };
                transitions[id.index()].push(Transition { range: atom, target });
            }
        }

        let accepting = pairs
            .iter()
            .map(|&(p, q)| {
                let a = p.map_or(false, |p| left.is_accepting(p));
                let b = q.map_or(false, |q| right.is_accepting(q));
                accept_op(a, b)
            })
            .collect();

        Automaton {
            initial: StateId::new(0),
            accepting,
            transitions,
            deterministic: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::alphabet::Alphabet;
    use crate::range::SymbolSet;
    use crate::types::Symbol;

    fn s(code: u32) -> Symbol {
        Symbol::new(code)
    }

    /// Strings over {a,b,c} containing `code` somewhere.
    fn contains(alphabet: &Alphabet, code: u32) -> Automaton {
        Automaton::any_star(alphabet)
            .concatenate(&Automaton::symbol(&SymbolSet::from_symbols([s(code)])))
            .concatenate(&Automaton::any_star(alphabet))
            .minimize()
    }

    #[test]
    fn test_intersect() {
        let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
        let both = contains(&alphabet, 0).intersect(&contains(&alphabet, 1));
        assert!(both.run(&[s(1), s(2), s(0)]));
        assert!(!both.run(&[s(0), s(0)]));
        assert!(!both.run(&[s(1)]));
        assert!(!both.run(&[]));
    }

    #[test]
    fn test_union() {
        let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
        let a = Automaton::symbol(&SymbolSet::from_symbols([s(0)]));
        let bb = Automaton::symbol(&SymbolSet::from_symbols([s(1)]))
            .concatenate(&Automaton::symbol(&SymbolSet::from_symbols([s(1)])));
        let either = a.union(&bb);
        assert!(either.run(&[s(0)]));
        assert!(either.run(&[s(1), s(1)]));
        assert!(!either.run(&[s(1)]));
        assert!(!either.run(&[s(0), s(1), s(1)]));

        let any = Automaton::any_star(&alphabet);
        assert!(any.union(&either).is_equivalent(&any));
    }

    #[test]
    fn test_intersect_with_empty() {
        let alphabet = Alphabet::new(["a", "b"]).unwrap();
        let any = Automaton::any_star(&alphabet);
        assert!(any.intersect(&Automaton::new()).is_empty());
        assert!(any.union(&Automaton::new()).is_equivalent(&any));
    }
}
