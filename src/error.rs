use thiserror::Error;

use crate::parse::ParseError;
use crate::EngineError;

/// Unified error type covering reading, evaluation, and I/O.
///
/// Returned by the program entry points
/// [`Engine::run_program()`](crate::Engine::run_program),
/// [`Engine::from_program()`](crate::Engine::from_program) and
/// [`Engine::load_file()`](crate::Engine::load_file).
#[derive(Debug, Error)]
pub enum LtreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
