use std::sync::Arc;

use super::{Bindings, RuleId, Term};

/// A matched rule waiting to fire: the rule's body and the bindings that
/// made its trigger match.
#[derive(Debug, Clone)]
pub struct AgendaEntry {
    pub(crate) rule: RuleId,
    pub(crate) body: Arc<[Term]>,
    pub(crate) bindings: Bindings,
}

impl AgendaEntry {
    #[must_use]
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    #[must_use]
    pub fn body(&self) -> &[Term] {
        &self.body
    }

    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

/// Last-in, first-out queue of pending firings.
///
/// The most recently discovered match fires first, so facts asserted by a
/// firing are chased depth first before older siblings.
#[derive(Debug, Default)]
pub struct Agenda {
    stack: Vec<AgendaEntry>,
}

impl Agenda {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AgendaEntry) {
        self.stack.push(entry);
    }

    pub fn pop(&mut self) -> Option<AgendaEntry> {
        self.stack.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
