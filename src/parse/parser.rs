use crate::Term;

/// Every top-level form read from a program text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub forms: Vec<Term>,
}
