use std::fmt;
use std::str::FromStr;

use super::Atom;

/// A node in a rule program: an atom, a pattern variable, or a compound of
/// sub-terms.
///
/// Ground terms (no [`Term::Var`] anywhere) are facts; everything else is a
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(Atom),
    /// A pattern variable. The name keeps its marker, e.g. `?x`.
    Var(String),
    Compound(Vec<Term>),
}

impl Term {
    /// True when no variable occurs anywhere in the term.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Atom(_) => true,
            Term::Var(_) => false,
            Term::Compound(items) => items.iter().all(Term::is_ground),
        }
    }

    /// Variable names in order of first occurrence, depth first.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_vars(self, &mut out);
        out
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Term::Atom(Atom::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_compound(&self) -> Option<&[Term]> {
        match self {
            Term::Compound(items) => Some(items),
            _ => None,
        }
    }
}

fn collect_vars<'a>(term: &'a Term, out: &mut Vec<&'a str>) {
    match term {
        Term::Atom(_) => {}
        Term::Var(name) => {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        Term::Compound(items) => {
            for item in items {
                collect_vars(item, out);
            }
        }
    }
}

impl From<Atom> for Term {
    fn from(a: Atom) -> Self {
        Term::Atom(a)
    }
}

impl From<i64> for Term {
    fn from(v: i64) -> Self {
        Term::Atom(Atom::Int(v))
    }
}

impl From<f64> for Term {
    fn from(v: f64) -> Self {
        Term::Atom(Atom::Float(v))
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Term::Compound(items)
    }
}

impl FromStr for Term {
    type Err = crate::parse::ParseError;

    /// Parse exactly one term using the default `?` variable marker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_term(s)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, "{a}"),
            Term::Var(name) => write!(f, "{name}"),
            Term::Compound(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A constant symbol term.
#[must_use]
pub fn sym(name: &str) -> Term {
    Term::Atom(Atom::Symbol(name.to_owned()))
}

/// A pattern variable. Pass the name as written, marker included: `var("?x")`.
#[must_use]
pub fn var(name: &str) -> Term {
    Term::Var(name.to_owned())
}

/// A compound term.
#[must_use]
pub fn list(items: impl IntoIterator<Item = Term>) -> Term {
    Term::Compound(items.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_detection_recurses() {
        let fact = list([sym("not"), list([sym("not"), sym("ok")])]);
        assert!(fact.is_ground());

        let pattern = list([sym("not"), list([sym("not"), var("?x")])]);
        assert!(!pattern.is_ground());
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let t = list([sym("p"), var("?b"), list([var("?a"), var("?b")])]);
        assert_eq!(t.variables(), vec!["?b", "?a"]);
    }

    #[test]
    fn display_nested() {
        let t = list([
            sym("implies"),
            var("?a"),
            list([sym("f"), Term::from(1_i64), Term::from(2.0_f64)]),
        ]);
        assert_eq!(t.to_string(), "(implies ?a (f 1 2.0))");
    }

    #[test]
    fn display_empty_compound() {
        assert_eq!(list([]).to_string(), "()");
    }

    #[test]
    fn accessors() {
        assert_eq!(sym("rain").as_symbol(), Some("rain"));
        assert_eq!(var("?x").as_symbol(), None);
        assert_eq!(list([sym("a")]).as_compound().map(<[Term]>::len), Some(1));
    }
}
