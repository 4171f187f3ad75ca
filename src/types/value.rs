use std::fmt;

use super::{Atom, Term};

/// Result of evaluating a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value, e.g. from `assert!` or a `when` whose test failed.
    Nil,
    /// Outcome of a comparison primitive.
    Bool(bool),
    Term(Term),
}

impl Value {
    /// `Nil`, `false`, zero and the empty compound are false; everything else
    /// is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Term(Term::Atom(Atom::Int(v))) => *v != 0,
            Value::Term(Term::Atom(Atom::Float(v))) => *v != 0.0,
            Value::Term(Term::Compound(items)) => !items.is_empty(),
            Value::Term(_) => true,
        }
    }

    #[must_use]
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Value::Term(t) => Some(t),
            _ => None,
        }
    }

    /// The numeric atom inside this value, if it holds one.
    #[must_use]
    pub fn as_number(&self) -> Option<&Atom> {
        match self {
            Value::Term(Term::Atom(a)) if a.is_number() => Some(a),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Term> for Value {
    fn from(t: Term) -> Self {
        Value::Term(t)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Term(Term::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Term(Term::from(v))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Term(t) => write!(f, "{t}"),
        }
    }
}
