mod agenda;
mod atom;
mod bindings;
mod config;
mod drain_report;
mod engine;
mod error;
mod rule;
mod term;
mod value;

pub use agenda::{Agenda, AgendaEntry};
pub use atom::{Atom, CompareOp};
pub use bindings::Bindings;
pub use config::EngineConfig;
pub use drain_report::DrainReport;
pub use engine::Engine;
pub use error::EngineError;
pub(crate) use rule::ClauseRef;
pub use rule::{FactId, Rule, RuleId, Trigger};
pub use term::{list, sym, var, Term};
pub use value::Value;
