use std::fmt;
use std::sync::Arc;

use super::error::EngineError;
use super::{Bindings, Term};
use crate::index::DbClassId;

/// Identity of a rule. Assigned from a monotonic counter; the first rule is `#1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) u64);

impl RuleId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a fact in the store, in assertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(pub(crate) usize);

impl FactId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One clause of one rule, as stored in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ClauseRef {
    pub(crate) rule: RuleId,
    pub(crate) clause: usize,
}

/// A conjunctive match condition: one or more patterns matched jointly
/// against a tuple of facts of the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    clauses: Vec<Term>,
}

impl Trigger {
    /// A trigger with a single clause.
    #[must_use]
    pub fn single(pattern: Term) -> Self {
        Self {
            clauses: vec![pattern],
        }
    }

    /// A trigger made of several clauses.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyTrigger`] when `clauses` is empty.
    pub fn all(clauses: Vec<Term>) -> Result<Self, EngineError> {
        if clauses.is_empty() {
            return Err(EngineError::EmptyTrigger);
        }
        Ok(Self { clauses })
    }

    /// Interpret a trigger as written in a `(rule ...)` form: a non-empty
    /// compound whose elements are all compounds lists several clauses;
    /// anything else is a single clause.
    #[must_use]
    pub fn from_term(term: Term) -> Self {
        match term {
            Term::Compound(items)
                if !items.is_empty() && items.iter().all(|t| matches!(t, Term::Compound(_))) =>
            {
                Self { clauses: items }
            }
            other => Self::single(other),
        }
    }

    #[must_use]
    pub fn clauses(&self) -> &[Term] {
        &self.clauses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Never true for a trigger built through the constructors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl From<Term> for Trigger {
    fn from(pattern: Term) -> Self {
        Trigger::single(pattern)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.clauses.as_slice() {
            [only] => write!(f, "{only}"),
            many => {
                write!(f, "(")?;
                for (i, clause) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{clause}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A stored production rule.
///
/// Created by [`Engine::add_rule`](super::Engine::add_rule) or by a
/// `(rule ...)` form and never modified or removed afterwards. The
/// environment is the binding set that was active when the rule was created;
/// it seeds every unification against the rule's trigger.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) id: RuleId,
    pub(crate) trigger: Trigger,
    pub(crate) body: Arc<[Term]>,
    pub(crate) environment: Bindings,
    pub(crate) dbclasses: Vec<DbClassId>,
}

impl Rule {
    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    #[must_use]
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    #[must_use]
    pub fn body(&self) -> &[Term] {
        &self.body
    }

    #[must_use]
    pub fn environment(&self) -> &Bindings {
        &self.environment
    }

    /// The index buckets holding this rule's clauses, one per clause.
    #[must_use]
    pub fn dbclasses(&self) -> &[DbClassId] {
        &self.dbclasses
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {} {}", self.id, self.trigger)?;
        for form in self.body.iter() {
            write!(f, " {form}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, sym, var};

    #[test]
    fn from_term_single_clause() {
        let t = Trigger::from_term(list([sym("implies"), var("?a"), var("?c")]));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn from_term_nested_single_clause() {
        // (not (not ?x)) has a symbol head, so it stays one clause.
        let t = Trigger::from_term(list([sym("not"), list([sym("not"), var("?x")])]));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn from_term_multi_clause() {
        let t = Trigger::from_term(list([
            list([sym("p"), var("?x")]),
            list([sym("q"), var("?x")]),
        ]));
        assert_eq!(t.len(), 2);
        assert_eq!(t.to_string(), "((p ?x) (q ?x))");
    }

    #[test]
    fn from_term_bare_variable() {
        let t = Trigger::from_term(var("?ante"));
        assert_eq!(t.clauses(), &[var("?ante")]);
    }

    #[test]
    fn empty_trigger_rejected() {
        assert!(matches!(Trigger::all(vec![]), Err(EngineError::EmptyTrigger)));
    }
}
