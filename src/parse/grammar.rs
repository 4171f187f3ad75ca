use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, delimited, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::{Atom, Term};

use super::parser::Program;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            (';', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Atoms ------------------------------------------------------------------

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | ';')
}

fn token<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| !is_delimiter(c)).parse_next(input)
}

fn is_sign(c: char) -> bool {
    c == '-' || c == '+'
}

/// Optional sign followed only by digits.
fn is_integer(tok: &str) -> bool {
    let digits = tok.strip_prefix(is_sign).unwrap_or(tok);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Starts the way a number does: a digit, or a sign or point followed by one.
/// Keeps words like `inf` and `nan` symbols.
fn starts_numeric(tok: &str) -> bool {
    let rest = tok.strip_prefix(is_sign).unwrap_or(tok);
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    rest.starts_with(|c: char| c.is_ascii_digit())
}

fn atom(input: &mut &str) -> ModalResult<Atom> {
    let tok = token
        .context(StrContext::Expected(StrContextValue::Description("atom")))
        .parse_next(input)?;
    if is_integer(tok) {
        let i: i64 = tok
            .parse()
            .map_err(|_| ErrMode::from_input(input).cut())?;
        return Ok(Atom::Int(i));
    }
    if starts_numeric(tok) {
        if let Ok(f) = tok.parse::<f64>() {
            if !f.is_finite() {
                return Err(ErrMode::from_input(input).cut());
            }
            return Ok(Atom::Float(f));
        }
    }
    Ok(Atom::Symbol(tok.to_owned()))
}

// -- Terms ------------------------------------------------------------------

fn compound(input: &mut &str) -> ModalResult<Vec<Term>> {
    preceded(
        '(',
        cut_err((
            repeat(0.., term),
            ws,
            ')'.context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
        )),
    )
    .map(|(items, (), _): (Vec<Term>, (), char)| items)
    .parse_next(input)
}

fn term(input: &mut &str) -> ModalResult<Term> {
    ws.parse_next(input)?;
    alt((compound.map(Term::Compound), atom.map(Term::Atom)))
        .context(StrContext::Expected(StrContextValue::Description("term")))
        .parse_next(input)
}

/// Replace every symbol that starts with `marker` by a variable.
pub(super) fn mark_variables(term: Term, marker: char) -> Term {
    match term {
        Term::Atom(Atom::Symbol(name)) if name.starts_with(marker) => Term::Var(name),
        Term::Compound(items) => Term::Compound(
            items
                .into_iter()
                .map(|item| mark_variables(item, marker))
                .collect(),
        ),
        other => other,
    }
}

// -- Top-level parsers ------------------------------------------------------

pub fn parse_program(input: &mut &str) -> ModalResult<Program> {
    let forms: Vec<Term> = repeat(0.., term).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(Program { forms })
}

pub fn parse_single(input: &mut &str) -> ModalResult<Term> {
    delimited(ws, term, ws).parse_next(input)
}
