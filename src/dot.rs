//! Automaton to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **States** are circles labeled with their [`StateId`], accepting states are double circles
//! - **The initial state** is pointed to by an arrow from an invisible source node
//! - **Edges** are labeled with event names when an [`Alphabet`] is given,
//!   and with symbol ranges otherwise
//!
//! # Examples
//!
//! ```
//! use seqcov_rs::alphabet::Alphabet;
//! use seqcov_rs::automaton::Automaton;
//!
//! let alphabet = Alphabet::new(["Open", "Close"]).unwrap();
//! let any = Automaton::any_star(&alphabet);
//!
//! let dot = any.to_dot(Some(&alphabet)).unwrap();
//! assert!(dot.contains("Open,Close"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::range::SymbolRange;
use crate::types::{StateId, Symbol};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for non-accepting states (default: "circle")
    pub state_shape: &'static str,
    /// Shape for accepting states (default: "doublecircle")
    pub accepting_shape: &'static str,
    /// Graph direction (default: "LR")
    pub rankdir: &'static str,
    /// Merge all transitions between the same pair of states into one edge (default: true)
    pub merge_edges: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            state_shape: "circle",
            accepting_shape: "doublecircle",
            rankdir: "LR",
            merge_edges: true,
        }
    }
}

impl Automaton {
    /// Converts the automaton to DOT format.
    pub fn to_dot(&self, alphabet: Option<&Alphabet>) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(alphabet, &DotConfig::default())
    }

    /// Converts the automaton to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, alphabet: Option<&Alphabet>, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "init [shape=point, style=invis];")?;

        for q in self.states() {
            let shape = if self.is_accepting(q) {
                config.accepting_shape
            } else {
                config.state_shape
            };
            writeln!(dot, "{} [shape={}, label=\"{}\"];", q.index(), shape, q)?;
        }
        writeln!(dot, "init -> {};", self.initial().index())?;

        for q in self.states() {
            if config.merge_edges {
                let mut grouped: Vec<(StateId, Vec<SymbolRange>)> = Vec::new();
                for t in self.transitions(q) {
                    match grouped.iter_mut().find(|(target, _)| *target == t.target) {
                        Some((_, ranges)) => ranges.push(t.range),
                        None => grouped.push((t.target, vec![t.range])),
                    }
                }
                for (target, ranges) in grouped {
                    let label = ranges.iter().map(|&r| range_label(r, alphabet)).collect::<Vec<_>>().join(",");
                    writeln!(dot, "{} -> {} [label=\"{}\"];", q.index(), target.index(), label)?;
                }
            } else {
                for t in self.transitions(q) {
                    writeln!(
                        dot,
                        "{} -> {} [label=\"{}\"];",
                        q.index(),
                        t.target.index(),
                        range_label(t.range, alphabet)
                    )?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

/// Event names for the part of `range` inside the alphabet, raw codes for the rest.
fn range_label(range: SymbolRange, alphabet: Option<&Alphabet>) -> String {
    let Some(alphabet) = alphabet else {
        return range.to_string();
    };
    let (min, max) = (alphabet.min_symbol(), alphabet.max_symbol());
    let mut parts: Vec<String> = Vec::new();
    if range.lo < min {
        let hi = range.hi.min(Symbol::new(min.code() - 1));
        parts.push(SymbolRange::new(range.lo, hi).to_string());
    }
    if let Some(inside) = range.clip(min, max) {
        parts.extend(inside.symbols().map(|s| alphabet.event(s).to_string()));
    }
    if range.hi > max {
        let lo = range.lo.max(Symbol::new(max.code() + 1));
        parts.push(SymbolRange::new(lo, range.hi).to_string());
    }
    parts.join(",")
}
