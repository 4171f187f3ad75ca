mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::Program;

use crate::Term;

/// Read every top-level form of a program, treating symbols that start with
/// `?` as variables.
///
/// # Errors
///
/// Returns [`ParseError`] on an unclosed list, a stray `)`, an integer that
/// does not fit in `i64` or a float literal that overflows to infinity.
pub fn parse(input: &str) -> Result<Program, ParseError> {
    parse_with(input, '?')
}

/// Like [`parse`], with `marker` as the variable prefix.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a sequence of well-formed terms.
pub fn parse_with(input: &str, marker: char) -> Result<Program, ParseError> {
    use winnow::Parser;
    let program = grammar::parse_program
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))?;
    Ok(Program {
        forms: program
            .forms
            .into_iter()
            .map(|form| grammar::mark_variables(form, marker))
            .collect(),
    })
}

/// Read exactly one term.
///
/// # Errors
///
/// Returns [`ParseError`] on empty input, malformed input, or anything left
/// over after the term.
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    use winnow::Parser;
    grammar::parse_single
        .parse(input)
        .map(|term| grammar::mark_variables(term, '?'))
        .map_err(|e| ParseError::new(e.to_string()))
}
