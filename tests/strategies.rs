#![allow(dead_code)]

use ltre::{list, sym, var, Atom, Term};
use proptest::prelude::*;

// Small alphabets so generated facts and patterns collide often.
const PREDICATES: &[&str] = &["p", "q", "r"];
const CONSTANTS: &[&str] = &["a", "b", "c"];
const VARIABLES: &[&str] = &["?x", "?y", "?z"];

/// Generate a constant atom: a small integer or a symbol.
pub fn arb_atom() -> impl Strategy<Value = Atom> {
    prop_oneof![
        (-3_i64..=3).prop_map(Atom::Int),
        prop::sample::select(CONSTANTS).prop_map(Atom::from),
    ]
}

/// Generate a ground term of bounded depth.
pub fn arb_ground_term() -> impl Strategy<Value = Term> {
    arb_atom()
        .prop_map(Term::Atom)
        .prop_recursive(3, 12, 3, |inner| {
            prop::collection::vec(inner, 0..=3).prop_map(Term::Compound)
        })
}

/// Generate a term that may contain variables anywhere.
pub fn arb_pattern() -> impl Strategy<Value = Term> {
    prop_oneof![
        3 => arb_atom().prop_map(Term::Atom),
        2 => prop::sample::select(VARIABLES).prop_map(var),
    ]
    .prop_recursive(3, 12, 3, |inner| {
        prop::collection::vec(inner, 0..=3).prop_map(Term::Compound)
    })
}

/// Generate a flat fact such as `(p a 1)`.
pub fn arb_fact() -> impl Strategy<Value = Term> {
    (
        prop::sample::select(PREDICATES),
        prop::collection::vec(arb_atom(), 1..=2),
    )
        .prop_map(|(pred, args)| {
            list(std::iter::once(sym(pred)).chain(args.into_iter().map(Term::Atom)))
        })
}

/// Generate a flat clause such as `(p ?x a)`.
pub fn arb_clause() -> impl Strategy<Value = Term> {
    let arg = prop_oneof![
        arb_atom().prop_map(Term::Atom),
        prop::sample::select(VARIABLES).prop_map(var),
    ];
    (
        prop::sample::select(PREDICATES),
        prop::collection::vec(arg, 1..=2),
    )
        .prop_map(|(pred, args)| list(std::iter::once(sym(pred)).chain(args)))
}

/// Generate a trigger of one to three flat clauses.
pub fn arb_trigger_clauses() -> impl Strategy<Value = Vec<Term>> {
    prop::collection::vec(arb_clause(), 1..=3)
}
