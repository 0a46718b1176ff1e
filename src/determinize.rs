//! Subset construction.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::automaton::{Automaton, Transition};
use crate::range::atoms;
use crate::types::StateId;

impl Automaton {
    /// Equivalent deterministic automaton.
    ///
    /// Labels are first split into disjoint atoms, so that each atom either
    /// fits a transition label entirely or misses it. Subsets are then explored
    /// breadth-first from `{initial}`; only reachable subsets become states, and
    /// the empty subset is never materialized (missing transitions reject).
    pub fn determinize(&self) -> Automaton {
        if self.deterministic {
            return self.clone();
        }

        let atoms = atoms(self.transitions.iter().flatten().map(|t| t.range));
        let n = self.num_states();

        // reach[q][i] = targets of `q` on atom `i`
        let mut reach: Vec<Vec<Vec<StateId>>> = vec![vec![Vec::new(); atoms.len()]; n];
        for q in 0..n {
            for t in &self.transitions[q] {
                for (i, atom) in atoms.iter().enumerate() {
                    if t.range.contains(atom.lo) && !reach[q][i].contains(&t.target) {
                        reach[q][i].push(t.target);
                    }
                }
            }
        }

        let successor = |set: &[StateId], i: usize| -> Vec<StateId> {
            let mut out: Vec<StateId> = Vec::new();
            for &q in set {
                for &t in &reach[q.index()][i] {
                    if !out.contains(&t) {
                        out.push(t);
                    }
                }
            }
            out.sort_unstable();
            out
        };

        let mut subsets: Vec<Vec<StateId>> = vec![vec![self.initial]];
        let mut index: HashMap<Vec<StateId>, StateId> = HashMap::new();
        index.insert(vec![self.initial], StateId::new(0));
        let mut transitions: Vec<Vec<Transition>> = vec![Vec::new()];
        let mut queue = VecDeque::from([StateId::new(0)]);

        while let Some(id) = queue.pop_front() {
            let set = subsets[id.index()].clone();
            for (i, &atom) in atoms.iter().enumerate() {
                let next = successor(&set, i);
                if next.is_empty() {
                    continue;
                }
                let target = match index.get(&next) {
                    Some(&t) => t,
                    None => {
                        let t = StateId::new(subsets.len());
                        index.insert(next.clone(), t);
                        subsets.push(next);
                        transitions.push(Vec::new());
                        queue.push_back(t);
                        t
                    }
                };
                transitions[id.index()].push(Transition { range: atom, target });
            }
        }

        let accepting = subsets
            .iter()
            .map(|set| set.iter().any(|q| self.accepting[q.index()]))
            .collect();

        debug!("determinize: {} -> {} states", n, subsets.len());

        Automaton {
            initial: StateId::new(0),
            accepting,
            transitions,
            deterministic: true,
        }
    }
}
