use std::fmt;

use super::Term;

/// Variable bindings produced by unification.
///
/// Backed by a persistent map: [`bind`](Self::bind) returns a new set and
/// leaves the receiver untouched, so every unification attempt works on its
/// own copy and clones are cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: im::HashMap<String, Term>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The term a variable is directly bound to, if any.
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.values.get(var)
    }

    /// A new binding set with `var` bound to `term`.
    #[must_use]
    pub fn bind(&self, var: &str, term: Term) -> Self {
        Self {
            values: self.values.update(var.to_owned(), term),
        }
    }

    /// Follow variable-to-variable links until reaching a non-variable or an
    /// unbound variable.
    #[must_use]
    pub fn resolve<'a>(&'a self, mut term: &'a Term) -> &'a Term {
        while let Term::Var(name) = term {
            match self.values.get(name) {
                Some(next) => term = next,
                None => break,
            }
        }
        term
    }

    /// Replace every bound variable in `term` with its value, through every
    /// level of nesting. Unbound variables are left in place.
    #[must_use]
    pub fn substitute(&self, term: &Term) -> Term {
        match self.resolve(term) {
            Term::Compound(items) => {
                Term::Compound(items.iter().map(|t| self.substitute(t)).collect())
            }
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate bindings sorted by variable name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        let mut pairs: Vec<(&str, &Term)> =
            self.values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter()
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, term)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {term}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, sym, var};

    #[test]
    fn bind_leaves_original_untouched() {
        let empty = Bindings::new();
        let one = empty.bind("?x", sym("a"));
        assert!(empty.is_empty());
        assert_eq!(one.get("?x"), Some(&sym("a")));
    }

    #[test]
    fn resolve_follows_chains() {
        let b = Bindings::new()
            .bind("?x", var("?y"))
            .bind("?y", sym("end"));
        assert_eq!(b.resolve(&var("?x")), &sym("end"));
        assert_eq!(b.resolve(&var("?z")), &var("?z"));
    }

    #[test]
    fn substitute_reaches_nested_compounds() {
        let b = Bindings::new().bind("?x", sym("ok"));
        let body = list([
            sym("assert!"),
            list([sym("deep"), list([sym("deeper"), var("?x")])]),
        ]);
        assert_eq!(
            b.substitute(&body),
            list([
                sym("assert!"),
                list([sym("deep"), list([sym("deeper"), sym("ok")])]),
            ])
        );
    }

    #[test]
    fn substitute_resolves_bound_values_recursively() {
        let b = Bindings::new()
            .bind("?pair", list([var("?a"), var("?b")]))
            .bind("?a", sym("one"));
        assert_eq!(
            b.substitute(&var("?pair")),
            list([sym("one"), var("?b")])
        );
    }

    #[test]
    fn display_is_sorted() {
        let b = Bindings::new().bind("?y", sym("2")).bind("?x", sym("1"));
        assert_eq!(b.to_string(), "{?x: 1, ?y: 2}");
    }
}
