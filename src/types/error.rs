use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot assert non-ground fact '{fact}'")]
    NonGroundFact { fact: String },

    #[error("a rule trigger needs at least one clause")]
    EmptyTrigger,

    #[error("malformed '{form}' form: {reason}")]
    MalformedForm { form: String, reason: String },

    #[error("'{head}' is not a procedure")]
    NotCallable { head: String },

    #[error("'{op}' cannot be applied to {args}")]
    TypeMismatch { op: String, args: String },

    #[error("'{op}' expects {expected} arguments, got {found}")]
    Arity {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("division by zero in '{op}'")]
    DivisionByZero { op: String },

    #[error("integer overflow in '{op}'")]
    Overflow { op: String },
}
