//! Compilation of constraints into automata.
//!
//! Leaves become [`Automaton::symbol`] automata; `&&`, `||`, `.` and `!` map to
//! intersection, union, concatenation and complement. The sequencing operators
//! are derived from `ANY*` (written `U` below) and the alphabet-restricted
//! complement `¬`:
//!
//! | Operator    | Formula                  |
//! |-------------|--------------------------|
//! | `_ B`       | `U·B·U`                  |
//! | `B -+ C`    | `¬(¬(U·B) · C·U)`        |
//! | `B +- C`    | `¬(U·B · ¬(C·U))`        |
//! | `B ~ C`     | `¬(U·B · C·U)`           |
//! | `B ...+ C`  | `¬(¬(U·B·U) · C·U)`      |
//! | `B +... C`  | `¬(U·B · ¬(U·C·U))`      |
//! | `B .~. C`   | `¬(U·B·U · C·U)`         |
//!
//! Every intermediate automaton is minimized before it is composed further.

use log::debug;

use crate::alphabet::Alphabet;
use crate::ast::{BinaryOp, Constraint, UnaryOp};
use crate::automaton::Automaton;
use crate::error::{Error, Result};
use crate::range::SymbolSet;

/// Compiles constraints over a fixed alphabet.
#[derive(Debug, Clone)]
pub struct Compiler<'a> {
    alphabet: &'a Alphabet,
    any: Automaton,
}

impl<'a> Compiler<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            any: Automaton::any_star(alphabet).minimize(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.alphabet
    }

    /// Compiles `constraint` into a minimized automaton.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownEvent`] if the constraint mentions an event outside the alphabet,
    /// - [`Error::EmptyEventSet`] for an event set without events.
    pub fn compile(&self, constraint: &Constraint) -> Result<Automaton> {
        let automaton = match constraint {
            Constraint::Event(e) => {
                let symbol = self.alphabet.symbol(e)?;
                Automaton::symbol(&SymbolSet::from_symbols([symbol]))
            }
            Constraint::EventSet(events) => {
                if events.is_empty() {
                    return Err(Error::EmptyEventSet);
                }
                let symbols = events.iter().map(|e| self.alphabet.symbol(e)).collect::<Result<Vec<_>>>()?;
                Automaton::symbol(&SymbolSet::from_symbols(symbols))
            }
            Constraint::Unary(op, a) => {
                let a = self.compile(a)?;
                match op {
                    UnaryOp::Not => self.not(&a),
                    UnaryOp::Always => self.always(&a),
                }
            }
            Constraint::Binary(op, b, c) => {
                let b = self.compile(b)?;
                let c = self.compile(c)?;
                match op {
                    BinaryOp::And => b.intersect(&c),
                    BinaryOp::Or => b.union(&c),
                    BinaryOp::Concat => b.concatenate(&c),
                    BinaryOp::ImmediateRight => self.immediate_right(&b, &c),
                    BinaryOp::ImmediateLeft => self.immediate_left(&b, &c),
                    BinaryOp::ImmediateNever => self.immediate_never(&b, &c),
                    BinaryOp::GeneralRight => self.general_right(&b, &c),
                    BinaryOp::GeneralLeft => self.general_left(&b, &c),
                    BinaryOp::GeneralNever => self.general_never(&b, &c),
                }
            }
        };
        let automaton = automaton.minimize();
        debug!(
            "compiled {} into {} states, {} transitions",
            constraint,
            automaton.num_states(),
            automaton.num_transitions()
        );
        Ok(automaton)
    }

    /// Compiles `events` as a sequence, e.g. for checking a single trace.
    pub fn compile_events<S: AsRef<str>>(&self, events: &[S]) -> Result<Automaton> {
        let mut out = Automaton::new();
        out.set_accepting(out.initial(), true);
        for e in events {
            let symbol = self.alphabet.symbol(e.as_ref())?;
            out = out.concatenate(&Automaton::symbol(&SymbolSet::from_symbols([symbol]))).minimize();
        }
        Ok(out)
    }

    fn cat(&self, a: &Automaton, b: &Automaton) -> Automaton {
        a.concatenate(b).minimize()
    }

    fn not(&self, a: &Automaton) -> Automaton {
        a.complement(self.alphabet).minimize()
    }

    /// `U·B`
    fn ends_with(&self, b: &Automaton) -> Automaton {
        self.cat(&self.any, b)
    }

    /// `B·U`
    fn starts_with(&self, b: &Automaton) -> Automaton {
        self.cat(b, &self.any)
    }

    /// `U·B·U`
    fn always(&self, b: &Automaton) -> Automaton {
        self.starts_with(&self.ends_with(b))
    }

    /// `¬(¬(U·B) · C·U)`
    fn immediate_right(&self, b: &Automaton, c: &Automaton) -> Automaton {
        let not_ending_with_b = self.not(&self.ends_with(b));
        self.not(&self.cat(&not_ending_with_b, &self.starts_with(c)))
    }

    /// `¬(U·B · ¬(C·U))`
    fn immediate_left(&self, b: &Automaton, c: &Automaton) -> Automaton {
        let not_starting_with_c = self.not(&self.starts_with(c));
        self.not(&self.cat(&self.ends_with(b), &not_starting_with_c))
    }

    /// `¬(U·B · C·U)`
    fn immediate_never(&self, b: &Automaton, c: &Automaton) -> Automaton {
        self.not(&self.cat(&self.ends_with(b), &self.starts_with(c)))
    }

    /// `¬(¬(U·B·U) · C·U)`
    fn general_right(&self, b: &Automaton, c: &Automaton) -> Automaton {
        let no_b = self.not(&self.always(b));
        self.not(&self.cat(&no_b, &self.starts_with(c)))
    }

    /// `¬(U·B · ¬(U·C·U))`
    fn general_left(&self, b: &Automaton, c: &Automaton) -> Automaton {
        let no_c = self.not(&self.always(c));
        self.not(&self.cat(&self.ends_with(b), &no_c))
    }

    /// `¬(U·B·U · C·U)`
    fn general_never(&self, b: &Automaton, c: &Automaton) -> Automaton {
        self.not(&self.cat(&self.always(b), &self.starts_with(c)))
    }
}
