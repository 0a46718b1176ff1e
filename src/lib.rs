//! # seqcov-rs: t-way sequence coverage under sequencing constraints
//!
//! **`seqcov-rs`** generates small sets of event sequences for testing stateful
//! systems. The generated set achieves **t-way sequence coverage**: every
//! ordered tuple of `t` events (repetition allowed) appears, in order but not
//! necessarily contiguously, in some generated sequence. Every sequence
//! respects a maximum length, a per-event repetition limit, and a
//! *sequencing constraint*: a temporal rule over events such as
//! "every `Read` happens after an `Open` that was not `Close`d since".
//!
//! ## How it works
//!
//! Sequencing constraints are compiled into finite automata. The operators
//! (`_`, `+-`, `-+`, `~`, `+...`, `...+`, `.~.`) reduce to concatenation and
//! complement around `ANY*`, and the common operators (`&&`, `||`, `.`, `!`)
//! map to intersection, union, concatenation and complement. Automata are
//! kept in a canonical minimal form, so equal languages give equal automata.
//!
//! The generator then builds sequences one by one: it picks a starting
//! sequence (an uncovered target directly, or the first hit of a breadth-first
//! search), and greedily extends it with the event that covers the most
//! uncovered targets while the sequence can still be completed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use seqcov_rs::alphabet::Alphabet;
//! use seqcov_rs::ast::Constraint;
//! use seqcov_rs::config::Config;
//! use seqcov_rs::generator::generate;
//!
//! let alphabet = Alphabet::new(["Open", "Read", "Write", "Close"]).unwrap();
//!
//! let open = Constraint::event("Open");
//! let close = Constraint::event("Close");
//! let constraint = Constraint::all([
//!     // Read, Write and Close need an earlier Open
//!     Constraint::general_right(open.clone(), Constraint::set(["Close", "Read", "Write"])),
//!     // ... of a file that is still open
//!     Constraint::immediate_right(
//!         Constraint::always(open.clone()) & Constraint::general_never(open.clone(), close.clone()),
//!         Constraint::set(["Read", "Write", "Close"]),
//!     ),
//!     // and everything is eventually closed
//!     Constraint::general_left(Constraint::set(["Open", "Read", "Write"]), close),
//! ])
//! .unwrap();
//!
//! let generation = generate(&alphabet, &constraint, Config::new(2, 2, 8).unwrap()).unwrap();
//! assert!(generation.is_complete());
//! for sequence in &generation.sequences {
//!     assert_eq!(sequence.first().unwrap(), "Open");
//!     assert_eq!(sequence.last().unwrap(), "Close");
//! }
//! ```
//!
//! ## Core Components
//!
//! - **[`automaton`]**: range-labeled finite automata, with [`determinize`], [`minimize`] and [`product`].
//! - **[`compiler`]**: constraint AST ([`ast`]) to automaton.
//! - **[`solver`]**: validity and extendability of sequences.
//! - **[`targets`]**: t-way targets and the coverage predicate.
//! - **[`generator`]**: the two-phase generation loop.

pub mod alphabet;
pub mod ast;
pub mod automaton;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod determinize;
pub mod dot;
pub mod error;
pub mod generator;
pub mod minimize;
pub mod product;
pub mod range;
pub mod solver;
pub mod targets;
pub mod types;

pub use generator::generate;
