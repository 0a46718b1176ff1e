//! Canonical minimization.
//!
//! [`Automaton::minimize`] returns the unique trimmed minimal DFA of the
//! language, with a canonical state numbering and maximal transition labels.
//! Two minimized automata are therefore structurally equal (`==`) if and only
//! if they accept the same language, which is what [`Automaton::is_equivalent`]
//! relies on.
//!
//! The steps are:
//!
//! 1. determinize,
//! 2. drop states that are unreachable or cannot reach an accepting state,
//! 3. refine the partition `{accepting, non-accepting}` until every block agrees
//!    on the target block of each atom,
//! 4. build the quotient, merging adjacent atoms with the same target block,
//! 5. renumber states in breadth-first order from the initial state,
//!    following transitions in label order.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::automaton::{Automaton, Transition};
use crate::range::{atoms, SymbolRange};
use crate::types::StateId;

impl Automaton {
    /// Canonical minimal equivalent automaton.
    ///
    /// The result is deterministic and trimmed: it has no dead states, so it is
    /// not total. The empty language is represented by a single non-accepting
    /// state without transitions.
    pub fn minimize(&self) -> Automaton {
        let dfa = self.determinize();
        let n = dfa.num_states();

        let reachable = dfa.reachable();
        let live = dfa.live();
        let keep: Vec<bool> = (0..n).map(|q| reachable[q] && live[q]).collect();
        if !keep[dfa.initial.index()] {
            debug!("minimize: {} states -> empty language", n);
            return Automaton::new();
        }

        let step = |q: usize, atom: &SymbolRange| -> Option<usize> {
            dfa.transitions[q]
                .iter()
                .find(|t| t.range.contains(atom.lo))
                .map(|t| t.target.index())
                .filter(|&t| keep[t])
        };

        let states: Vec<usize> = (0..n).filter(|&q| keep[q]).collect();
        let atoms = atoms(
            states
                .iter()
                .flat_map(|&q| dfa.transitions[q].iter())
                .filter(|t| keep[t.target.index()])
                .map(|t| t.range),
        );

        // Partition refinement: block ids are dense indices into `0..num_blocks`.
        let mut block: Vec<usize> = vec![usize::MAX; n];
        for &q in &states {
            block[q] = dfa.accepting[q] as usize;
        }
        let mut num_blocks = 0;
        loop {
            let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let mut refined: Vec<usize> = vec![usize::MAX; n];
            for &q in &states {
                let signature: Vec<Option<usize>> =
                    atoms.iter().map(|atom| step(q, atom).map(|t| block[t])).collect();
                let next_id = signatures.len();
                refined[q] = *signatures.entry((block[q], signature)).or_insert(next_id);
            }
            let count = signatures.len();
            block = refined;
            if count == num_blocks {
                break;
            }
            num_blocks = count;
        }

        // Quotient transitions, with maximal labels.
        let mut representative: Vec<usize> = vec![usize::MAX; num_blocks];
        for &q in &states {
            if representative[block[q]] == usize::MAX {
                representative[block[q]] = q;
            }
        }
        let mut quotient: Vec<Vec<(SymbolRange, usize)>> = vec![Vec::new(); num_blocks];
        for (b, &q) in representative.iter().enumerate() {
            let edges = &mut quotient[b];
            for atom in &atoms {
                let Some(t) = step(q, atom) else { continue };
                let target = block[t];
                match edges.last_mut() {
                    Some((range, last))
                        if *last == target && range.hi.code() as u64 + 1 == atom.lo.code() as u64 =>
                    {
                        range.hi = atom.hi;
                    }
                    _ => edges.push((*atom, target)),
                }
            }
        }

        // Canonical numbering.
        let start = block[dfa.initial.index()];
        let mut order: Vec<usize> = vec![usize::MAX; num_blocks];
        let mut visited: Vec<usize> = Vec::with_capacity(num_blocks);
        let mut queue = VecDeque::from([start]);
        order[start] = 0;
        visited.push(start);
        while let Some(b) = queue.pop_front() {
            for &(_, t) in &quotient[b] {
                if order[t] == usize::MAX {
                    order[t] = visited.len();
                    visited.push(t);
                    queue.push_back(t);
                }
            }
        }

        let accepting = visited.iter().map(|&b| dfa.accepting[representative[b]]).collect();
        let transitions = visited
            .iter()
            .map(|&b| {
                quotient[b]
                    .iter()
                    .map(|&(range, t)| Transition {
                        range,
                        target: StateId::new(order[t]),
                    })
                    .collect()
            })
            .collect();

        debug!("minimize: {} -> {} states", n, visited.len());

        Automaton {
            initial: StateId::new(0),
            accepting,
            transitions,
            deterministic: true,
        }
    }
}
