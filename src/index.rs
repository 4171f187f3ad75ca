//! The DBClass table: buckets of facts and rule clauses keyed by structural
//! signature.
//!
//! A fact and a rule clause are candidates for each other only when their
//! signatures are compatible, i.e. equal once variables are treated as
//! wildcards. Buckets are keyed by exact signature; a lookup merges every
//! compatible bucket.

use std::collections::HashMap;
use std::fmt;

use crate::types::{ClauseRef, FactId};
use crate::{Atom, Term};

/// Shape of one top-level element of a compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A variable; matches any shape.
    Wild,
    Atom(Atom),
    /// A nested compound of the given arity.
    Compound(usize),
}

impl Shape {
    fn of(term: &Term) -> Self {
        match term {
            Term::Var(_) => Shape::Wild,
            Term::Atom(a) => Shape::Atom(a.clone()),
            Term::Compound(items) => Shape::Compound(items.len()),
        }
    }

    fn compatible(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Wild, _) | (_, Shape::Wild) => true,
            (a, b) => a == b,
        }
    }
}

/// Structural key of a fact or pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signature {
    /// A bare variable; compatible with everything.
    Wild,
    Atom(Atom),
    Compound(Vec<Shape>),
}

impl Signature {
    /// Derive the signature of a term from its top-level structure.
    #[must_use]
    pub fn of(term: &Term) -> Self {
        match term {
            Term::Var(_) => Signature::Wild,
            Term::Atom(a) => Signature::Atom(a.clone()),
            Term::Compound(items) => Signature::Compound(items.iter().map(Shape::of).collect()),
        }
    }

    /// Wildcard-tolerant equality.
    #[must_use]
    pub fn compatible(&self, other: &Signature) -> bool {
        match (self, other) {
            (Signature::Wild, _) | (_, Signature::Wild) => true,
            (Signature::Atom(a), Signature::Atom(b)) => a == b,
            (Signature::Compound(a), Signature::Compound(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.compatible(y))
            }
            _ => false,
        }
    }

    fn group(&self) -> Group {
        match self {
            Signature::Wild => Group::Wild,
            Signature::Atom(_) => Group::Atom,
            Signature::Compound(shapes) => Group::Compound(shapes.len()),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Wild => write!(f, "_"),
            Signature::Atom(a) => write!(f, "{a}"),
            Signature::Compound(shapes) => {
                write!(f, "(")?;
                for (i, shape) in shapes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match shape {
                        Shape::Wild => write!(f, "_")?,
                        Shape::Atom(a) => write!(f, "{a}")?,
                        Shape::Compound(n) => write!(f, "/{n}")?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}

/// Coarse partition of signatures; only buckets in a compatible group are
/// scanned on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Group {
    Wild,
    Atom,
    Compound(usize),
}

/// Handle to a bucket in a [`DbClassTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DbClassId(usize);

/// One bucket: the facts and rule clauses sharing a signature.
#[derive(Debug, Clone)]
pub struct DbClass {
    signature: Signature,
    facts: Vec<FactId>,
    clauses: Vec<ClauseRef>,
}

impl DbClass {
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[must_use]
    pub fn facts(&self) -> &[FactId] {
        &self.facts
    }

    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// All buckets of an engine.
///
/// Insertion is the only mutation. Lookups read the live buckets, so they
/// always see every earlier insertion.
#[derive(Debug, Clone, Default)]
pub struct DbClassTable {
    classes: Vec<DbClass>,
    positions: HashMap<Signature, DbClassId>,
    groups: HashMap<Group, Vec<DbClassId>>,
}

impl DbClassTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bucket for an exact signature, created on first use.
    fn class_for(&mut self, signature: Signature) -> DbClassId {
        if let Some(&id) = self.positions.get(&signature) {
            return id;
        }
        let id = DbClassId(self.classes.len());
        self.groups.entry(signature.group()).or_default().push(id);
        self.positions.insert(signature.clone(), id);
        self.classes.push(DbClass {
            signature,
            facts: Vec::new(),
            clauses: Vec::new(),
        });
        id
    }

    pub(crate) fn insert_fact(&mut self, signature: Signature, fact: FactId) -> DbClassId {
        let id = self.class_for(signature);
        self.classes[id.0].facts.push(fact);
        id
    }

    pub(crate) fn insert_clause(&mut self, signature: Signature, clause: ClauseRef) -> DbClassId {
        let id = self.class_for(signature);
        self.classes[id.0].clauses.push(clause);
        id
    }

    /// Facts from every bucket compatible with `signature`, in assertion order.
    #[must_use]
    pub fn lookup_facts(&self, signature: &Signature) -> Vec<FactId> {
        let mut out: Vec<FactId> = self
            .compatible(signature)
            .flat_map(|class| class.facts.iter().copied())
            .collect();
        out.sort_unstable();
        out
    }

    /// Rule clauses from every bucket compatible with `signature`, ordered by
    /// rule creation then clause position.
    #[must_use]
    pub(crate) fn lookup_clauses(&self, signature: &Signature) -> Vec<ClauseRef> {
        let mut out: Vec<ClauseRef> = self
            .compatible(signature)
            .flat_map(|class| class.clauses.iter().copied())
            .collect();
        out.sort_unstable();
        out
    }

    #[must_use]
    pub fn get(&self, id: DbClassId) -> Option<&DbClass> {
        self.classes.get(id.0)
    }

    /// The bucket holding exactly this signature, if one exists.
    #[must_use]
    pub fn find(&self, signature: &Signature) -> Option<&DbClass> {
        self.positions.get(signature).and_then(|&id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DbClass> {
        self.classes.iter()
    }

    fn compatible<'a>(&'a self, signature: &'a Signature) -> impl Iterator<Item = &'a DbClass> {
        let groups: Vec<Group> = match signature.group() {
            // A wildcard could sit in any group.
            Group::Wild => self.groups.keys().copied().collect(),
            g => vec![g, Group::Wild],
        };
        groups
            .into_iter()
            .filter_map(|g| self.groups.get(&g))
            .flatten()
            .map(|&id| &self.classes[id.0])
            .filter(move |class| class.signature.compatible(signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleId;
    use crate::{list, sym, var};

    #[test]
    fn signature_of_compound() {
        let sig = Signature::of(&list([sym("implies"), var("?a"), list([sym("x")])]));
        assert_eq!(
            sig,
            Signature::Compound(vec![
                Shape::Atom(Atom::from("implies")),
                Shape::Wild,
                Shape::Compound(1),
            ])
        );
        assert_eq!(sig.to_string(), "(implies _ /1)");
    }

    #[test]
    fn signatures_differ_for_distinct_structure() {
        let a = Signature::of(&list([sym("p"), sym("a")]));
        let b = Signature::of(&list([sym("p"), sym("b")]));
        let c = Signature::of(&list([sym("p"), sym("a"), sym("b")]));
        let d = Signature::of(&sym("p"));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn wildcards_are_compatible() {
        let pattern = Signature::of(&list([sym("p"), var("?x")]));
        let fact = Signature::of(&list([sym("p"), sym("a")]));
        let other = Signature::of(&list([sym("q"), sym("a")]));
        assert!(pattern.compatible(&fact));
        assert!(fact.compatible(&pattern));
        assert!(!pattern.compatible(&other));
        assert!(Signature::Wild.compatible(&other));
    }

    #[test]
    fn nested_arity_must_match() {
        let pattern = Signature::of(&list([sym("not"), list([sym("not"), var("?x")])]));
        let good = Signature::of(&list([sym("not"), list([sym("not"), sym("ok")])]));
        let bad = Signature::of(&list([sym("not"), list([sym("ok")])]));
        assert!(pattern.compatible(&good));
        assert!(!pattern.compatible(&bad));
    }

    #[test]
    fn lookup_merges_compatible_buckets_in_order() {
        let mut table = DbClassTable::new();
        table.insert_fact(Signature::of(&list([sym("p"), sym("b")])), FactId(1));
        table.insert_fact(Signature::of(&list([sym("p"), sym("a")])), FactId(0));
        table.insert_fact(Signature::of(&list([sym("q"), sym("a")])), FactId(2));
        table.insert_fact(Signature::of(&list([sym("p"), sym("a")])), FactId(3));

        let hits = table.lookup_facts(&Signature::of(&list([sym("p"), var("?x")])));
        assert_eq!(hits, vec![FactId(0), FactId(1), FactId(3)]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn wildcard_clause_found_from_any_fact() {
        let mut table = DbClassTable::new();
        let clause = ClauseRef {
            rule: RuleId(1),
            clause: 0,
        };
        table.insert_clause(Signature::of(&var("?ante")), clause);

        assert_eq!(table.lookup_clauses(&Signature::of(&sym("rain"))), vec![clause]);
        assert_eq!(
            table.lookup_clauses(&Signature::of(&list([sym("a"), sym("b")]))),
            vec![clause]
        );
    }

    #[test]
    fn facts_and_clauses_kept_apart() {
        let mut table = DbClassTable::new();
        let sig = Signature::of(&list([sym("p"), sym("a")]));
        let id = table.insert_fact(sig.clone(), FactId(0));
        let same = table.insert_clause(
            sig.clone(),
            ClauseRef {
                rule: RuleId(1),
                clause: 0,
            },
        );
        assert_eq!(id, same);
        let class = table.find(&sig).unwrap();
        assert_eq!(class.facts(), &[FactId(0)]);
        assert_eq!(class.clause_count(), 1);
    }

    #[test]
    fn empty_lookup_is_empty() {
        let table = DbClassTable::new();
        assert!(table.lookup_facts(&Signature::of(&sym("nothing"))).is_empty());
        assert!(table.is_empty());
    }
}
