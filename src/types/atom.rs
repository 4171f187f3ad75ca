use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Comparison operators available to rule bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// An indivisible constant: a number or a symbolic name.
///
/// Equality is structural: `Int(1)` and `Float(1.0)` are different atoms, and
/// floats compare by bit pattern so atoms can be hashed into the index. Use
/// [`Atom::compare`] for numeric-aware comparison.
#[derive(Debug, Clone)]
pub enum Atom {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A constant symbol such as `rain` or `implies`.
    Symbol(String),
}

impl Atom {
    /// Compare this atom to another using the given operator.
    /// Returns `None` for incompatible types (e.g. a number against a symbol).
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Atom) -> Option<bool> {
        let ord = self.partial_cmp_atom(other)?;
        Some(match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Gte => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Lte => ord != Ordering::Greater,
        })
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Atom::Int(_) | Atom::Float(_))
    }

    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp_atom(&self, other: &Atom) -> Option<Ordering> {
        match (self, other) {
            (Atom::Int(a), Atom::Int(b)) => a.partial_cmp(b),
            (Atom::Float(a), Atom::Float(b)) => a.partial_cmp(b),
            (Atom::Int(a), Atom::Float(b)) => (*a as f64).partial_cmp(b),
            (Atom::Float(a), Atom::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Atom::Symbol(a), Atom::Symbol(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::Int(a), Atom::Int(b)) => a == b,
            (Atom::Float(a), Atom::Float(b)) => a.to_bits() == b.to_bits(),
            (Atom::Symbol(a), Atom::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Atom::Int(v) => v.hash(state),
            Atom::Float(v) => v.to_bits().hash(state),
            Atom::Symbol(v) => v.hash(state),
        }
    }
}

impl From<i64> for Atom {
    fn from(v: i64) -> Self {
        Atom::Int(v)
    }
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Atom::Float(v)
    }
}

impl From<&str> for Atom {
    fn from(v: &str) -> Self {
        Atom::Symbol(v.to_owned())
    }
}

impl From<String> for Atom {
    fn from(v: String) -> Self {
        Atom::Symbol(v)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(v) => write!(f, "{v}"),
            // Whole floats keep their decimal point so they read back as floats.
            Atom::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            // `inf` and `NaN` can only come from arithmetic and read back as symbols.
            Atom::Float(v) => write!(f, "{v}"),
            Atom::Symbol(v) => write!(f, "{v}"),
        }
    }
}
