mod driver;
mod error;
mod evaluate;
pub mod index;
pub mod join;
pub mod parse;
mod types;
pub mod unify;

pub use error::LtreError;
pub use evaluate::{ArithOp, Primitive};
pub use types::{
    list, sym, var, Agenda, AgendaEntry, Atom, Bindings, CompareOp, DrainReport, Engine,
    EngineConfig, EngineError, FactId, Rule, RuleId, Term, Trigger, Value,
};
