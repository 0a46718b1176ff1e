//! Sequencing operator semantics.
//!
//! Tests cover every operator on accepted/rejected sequences, nested operands,
//! equivalence laws between operators, and alphabet-restricted complement.

use seqcov_rs::alphabet::Alphabet;
use seqcov_rs::ast::Constraint;
use seqcov_rs::automaton::Automaton;
use seqcov_rs::compiler::Compiler;
use seqcov_rs::types::Symbol;

fn ev(name: &str) -> Constraint {
    Constraint::event(name)
}

fn set(names: &[&str]) -> Constraint {
    Constraint::set(names.iter().copied())
}

fn compile(alphabet: &Alphabet, constraint: &Constraint) -> Automaton {
    Compiler::new(alphabet).compile(constraint).unwrap()
}

fn assert_accepts(alphabet: &Alphabet, constraint: &Constraint, accepted: &[&[&str]], rejected: &[&[&str]]) {
    let automaton = compile(alphabet, constraint);
    for &seq in accepted {
        assert!(automaton.run(&alphabet.encode(seq).unwrap()), "{} should accept {:?}", constraint, seq);
    }
    for &seq in rejected {
        assert!(!automaton.run(&alphabet.encode(seq).unwrap()), "{} should reject {:?}", constraint, seq);
    }
}

fn abc() -> Alphabet {
    Alphabet::new(["a", "b", "c"]).unwrap()
}

// ─── Single Operators ──────────────────────────────────────────────────────────

#[test]
fn general_right() {
    assert_accepts(
        &abc(),
        &Constraint::general_right(ev("a"), ev("c")),
        &[&["a", "b", "c", "c"]],
        &[&["b", "c", "a", "b", "c", "c"]],
    );
}

#[test]
fn general_left() {
    assert_accepts(
        &abc(),
        &Constraint::general_left(ev("a"), ev("c")),
        &[&["c"], &["a", "c"], &["a", "c", "c"], &["a", "c", "c", "c"], &["a", "a", "c"], &["a", "b", "c"], &["a", "c", "b"]],
        &[&["a"], &["a", "c", "a", "b"]],
    );
}

#[test]
fn general_never() {
    assert_accepts(
        &abc(),
        &Constraint::general_never(ev("a"), ev("c")),
        &[&["c"], &["a", "a", "b"], &["b", "b", "c"]],
        &[&["a", "a", "b", "c"]],
    );
}

#[test]
fn immediate_never() {
    assert_accepts(
        &abc(),
        &Constraint::immediate_never(ev("a"), ev("c")),
        &[&["c"], &["a", "a", "b"], &["b", "b", "c"], &["a", "a", "b", "c"]],
        &[&["a", "c"]],
    );
}

#[test]
fn general_right_with_block_operand() {
    // (a.a.a) ...+ b
    let aaa = Constraint::concat(Constraint::concat(ev("a"), ev("a")), ev("a"));
    assert_accepts(
        &abc(),
        &Constraint::general_right(aaa, ev("b")),
        &[&["a"], &["a", "a"], &["a", "a", "a"], &["a", "a", "a", "b"], &["a", "a", "a", "a", "b"], &["a", "a", "a", "c", "b"]],
        &[&["b"], &["a", "a", "b"], &["a", "c", "a", "a", "b"]],
    );
}

// ─── Nested Operands ───────────────────────────────────────────────────────────

#[test]
fn nested_immediate_right_after_general_never() {
    // (_ a && a .~. b) -+ c
    let c = Constraint::immediate_right(Constraint::always(ev("a")) & Constraint::general_never(ev("a"), ev("b")), ev("c"));
    assert!(c.is_nested());
    assert_accepts(
        &abc(),
        &c,
        &[&["a"], &["b"], &["a", "c", "b"], &["a", "c", "c"], &["a", "b", "a", "c"]],
        &[&["c"], &["a", "b", "c"], &["a", "c", "b", "c"]],
    );
}

#[test]
fn nested_immediate_right_after_general_left() {
    // (_ a && a +... b) -+ c
    let c = Constraint::immediate_right(Constraint::always(ev("a")) & Constraint::general_left(ev("a"), ev("b")), ev("c"));
    assert_accepts(
        &abc(),
        &c,
        &[&["a", "b", "c", "c"]],
        &[&["a", "b", "a", "c"], &["a", "b", "c", "a", "c"], &["a", "c", "b", "c"]],
    );
}

#[test]
fn nested_immediate_left() {
    // (_ a && a .~. {b,c}) +- c
    let c = Constraint::immediate_left(Constraint::always(ev("a")) & Constraint::general_never(ev("a"), set(&["b", "c"])), ev("c"));
    assert_accepts(
        &abc(),
        &c,
        &[&["b"], &["c"], &["a", "c"], &["a", "c", "c"], &["a", "c", "b"], &["a", "c", "a", "c"]],
        &[&["a"], &["a", "b"], &["a", "b", "c"], &["a", "c", "a"], &["a", "c", "a", "b"]],
    );
}

#[test]
fn nested_immediate_left_with_two_conditions() {
    // (_ a && a +... b && a .~. c) +- c
    let lhs = Constraint::always(ev("a")) & Constraint::general_left(ev("a"), ev("b")) & Constraint::general_never(ev("a"), ev("c"));
    let c = Constraint::immediate_left(lhs, ev("c"));
    assert_accepts(
        &abc(),
        &c,
        &[&["a", "c"], &["a", "b", "c"], &["a", "a", "b", "c"], &["a", "b", "c", "c"]],
        &[&["a", "b"], &["a", "b", "a"], &["a", "b", "b", "c"]],
    );
}

#[test]
fn conjunction_of_nested_operators() {
    // c +... a && (_ c && c .~. a) ~ c && (_ c && c .~. a) -+ a
    let pending = || Constraint::always(ev("c")) & Constraint::general_never(ev("c"), ev("a"));
    let c = Constraint::all([
        Constraint::general_left(ev("c"), ev("a")),
        Constraint::immediate_never(pending(), ev("c")),
        Constraint::immediate_right(pending(), ev("a")),
    ])
    .unwrap();
    assert_accepts(&abc(), &c, &[&["c", "b", "a"]], &[&["c"], &["c", "a", "c"], &["c", "c", "a", "b"]]);
}

#[test]
fn regular_language_as_constraint() {
    // _ a && {b,c} +... a && {a,b} .~. a  is  c*a
    let c = Constraint::always(ev("a")) & Constraint::general_left(set(&["b", "c"]), ev("a")) & Constraint::general_never(set(&["a", "b"]), ev("a"));
    assert_accepts(&abc(), &c, &[&["a"], &["c", "c", "a"]], &[&["c", "a", "c"], &["c", "c", "a", "b"]]);

    let alphabet = abc();
    let c_star_a = Compiler::new(&alphabet)
        .compile(&Constraint::concat(!Constraint::always(set(&["a", "b"])), ev("a")))
        .unwrap();
    assert_eq!(compile(&alphabet, &c), c_star_a);
}

#[test]
fn request_response_protocol() {
    // (_ req && req ~ _ {abt,rsp}) -+ {abt,rsp} && req +- (_ {abt,rsp} && _ req ~ {abt,rsp})
    let alphabet = Alphabet::new(["req", "abt", "rsp", "others"]).unwrap();
    let reply = || set(&["abt", "rsp"]);
    let c = Constraint::immediate_right(Constraint::always(ev("req")) & Constraint::immediate_never(ev("req"), Constraint::always(reply())), reply())
        & Constraint::immediate_left(ev("req"), Constraint::always(reply()) & Constraint::immediate_never(Constraint::always(ev("req")), reply()));
    assert_accepts(
        &alphabet,
        &c,
        &[
            &["others"],
            &["req", "others", "rsp"],
            &["req", "others", "abt"],
            &["req", "abt", "req", "others", "rsp"],
        ],
        &[
            &["others", "abt", "req", "rsp"],
            &["req", "abt", "rsp"],
            &["req", "req", "rsp"],
            &["others", "abt", "req", "rsp", "rsp"],
            &["others", "req", "others"],
        ],
    );
}

// ─── Equivalence Laws ──────────────────────────────────────────────────────────

fn abcd() -> Alphabet {
    Alphabet::new(["a", "b", "c", "d"]).unwrap()
}

#[test]
fn immediate_left_to_always_is_general_left() {
    let alphabet = abcd();
    let lhs = Constraint::immediate_left(set(&["a", "b"]), Constraint::always(set(&["b", "c"])));
    let rhs = Constraint::general_left(set(&["a", "b"]), set(&["b", "c"]));
    assert_eq!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
}

#[test]
fn always_immediate_right_is_general_right() {
    let alphabet = abcd();
    let lhs = Constraint::immediate_right(Constraint::always(set(&["a", "b"])), set(&["b", "c"]));
    let rhs = Constraint::general_right(set(&["a", "b"]), set(&["b", "c"]));
    assert_eq!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
}

#[test]
fn always_immediate_never_is_general_never() {
    let alphabet = abcd();
    let lhs = Constraint::immediate_never(Constraint::always(set(&["a", "b"])), set(&["b", "c"]));
    let rhs = Constraint::general_never(set(&["a", "b"]), set(&["b", "c"]));
    assert_eq!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
}

#[test]
fn event_set_is_union() {
    let alphabet = abcd();
    let lhs = Constraint::immediate_left(ev("a"), set(&["b", "c"]));
    let rhs = Constraint::immediate_left(ev("a"), ev("b") | ev("c"));
    assert_eq!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
}

#[test]
fn negated_block_is_immediate_never() {
    let alphabet = Alphabet::new(["Open", "Read", "Write", "Close"]).unwrap();
    let lhs = !Constraint::always(Constraint::concat(set(&["Close"]), set(&["Read", "Write", "Close"])));
    let rhs = Constraint::immediate_never(set(&["Close"]), set(&["Read", "Write", "Close"]));
    assert_eq!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
    assert!(compile(&alphabet, &lhs).is_equivalent(&compile(&alphabet, &rhs)));
}

#[test]
fn different_operators_are_not_equal() {
    let alphabet = abcd();
    let lhs = Constraint::immediate_left(ev("a"), ev("b"));
    let rhs = Constraint::general_left(ev("a"), ev("b"));
    assert_ne!(compile(&alphabet, &lhs), compile(&alphabet, &rhs));
}

// ─── Compilation Properties ────────────────────────────────────────────────────

#[test]
fn compilation_is_idempotent() {
    let alphabet = abcd();
    let c = Constraint::immediate_right(Constraint::always(ev("a")) & Constraint::general_never(ev("a"), ev("d")), set(&["b", "c"]));
    let first = compile(&alphabet, &c);
    let second = compile(&alphabet, &c);
    assert_eq!(first, second);
    assert_eq!(first.minimize(), first);
}

#[test]
fn complement_never_accepts_foreign_symbols() {
    let alphabet = abc();
    let not_a = compile(&alphabet, &!ev("a"));
    let foreign = Symbol::new(3);
    assert!(not_a.run(&[]));
    assert!(not_a.run(&alphabet.encode(&["b", "c", "a"]).unwrap()));
    assert!(!not_a.run(&[foreign]));
    assert!(!not_a.run(&[Symbol::new(1), foreign]));
    assert!(!not_a.run(&[Symbol::MAX]));
    for q in not_a.states() {
        for t in not_a.transitions(q) {
            assert!(t.range.hi <= alphabet.max_symbol());
        }
    }
}

#[test]
fn double_negation() {
    let alphabet = abc();
    let c = Constraint::general_right(ev("a"), ev("c"));
    assert_eq!(compile(&alphabet, &!!c.clone()), compile(&alphabet, &c));
}

#[test]
fn contradiction_is_empty() {
    let alphabet = abc();
    let c = Constraint::always(ev("a")) & !Constraint::always(ev("a"));
    let automaton = compile(&alphabet, &c);
    assert!(automaton.is_empty());
    assert_eq!(automaton, Automaton::new());
}

#[test]
fn large_alphabet() {
    let names: Vec<String> = (0..40).map(|i| format!("e{}", i)).collect();
    let alphabet = Alphabet::new(names).unwrap();
    let c = Constraint::general_right(ev("e0"), ev("e39"));
    let automaton = compile(&alphabet, &c);
    assert!(automaton.run(&alphabet.encode(&["e0", "e39"]).unwrap()));
    assert!(!automaton.run(&alphabet.encode(&["e5", "e39"]).unwrap()));
    assert!(automaton.run(&alphabet.encode(&["e38", "e27"]).unwrap()));
}
