use crate::{Bindings, Term};

/// Compute the most general bindings that make `a` and `b` structurally
/// equal, extending `bindings`.
///
/// Returns `None` when the terms cannot be unified. The input bindings are
/// never modified; a successful result is a new binding set. There is no
/// occurs check.
#[must_use]
pub fn unify(a: &Term, b: &Term, bindings: &Bindings) -> Option<Bindings> {
    let a = bindings.resolve(a);
    let b = bindings.resolve(b);

    match (a, b) {
        (Term::Var(x), Term::Var(y)) if x == y => Some(bindings.clone()),
        (Term::Var(x), other) | (other, Term::Var(x)) => Some(bindings.bind(x, other.clone())),
        (Term::Atom(x), Term::Atom(y)) => (x == y).then(|| bindings.clone()),
        (Term::Compound(xs), Term::Compound(ys)) => {
            if xs.len() != ys.len() {
                return None;
            }
            xs.iter()
                .zip(ys)
                .try_fold(bindings.clone(), |acc, (x, y)| unify(x, y, &acc))
        }
        _ => None,
    }
}

/// Unify a tuple of facts against the clauses of a trigger, position by
/// position. A length mismatch is treated as a failed match.
#[must_use]
pub fn unify_all(facts: &[&Term], clauses: &[Term], bindings: &Bindings) -> Option<Bindings> {
    if facts.len() != clauses.len() {
        return None;
    }
    facts
        .iter()
        .zip(clauses)
        .try_fold(bindings.clone(), |acc, (fact, clause)| unify(fact, clause, &acc))
}
