//! Common parser combinators for query text

use sift_ast::DynamicValue;
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{cut_err, opt};
use winnow::error::StrContext;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

pub(crate) type Input<'a> = &'a str;
pub(crate) type PResult<T> = ModalResult<T>;

/// Skip whitespace
pub(crate) fn ws(input: &mut Input<'_>) -> PResult<()> {
    multispace0.void().parse_next(input)
}

/// Consume `expected` if it is the next character
pub(crate) fn eat(input: &mut Input<'_>, mut expected: char) -> bool {
    let result: PResult<char> = expected.parse_next(input);
    result.is_ok()
}

/// Consume optional whitespace followed by `:`, restoring the input on failure
pub(crate) fn separator(input: &mut Input<'_>) -> bool {
    let checkpoint = *input;
    let result: PResult<()> = (ws, ':').void().parse_next(input);
    if result.is_err() {
        *input = checkpoint;
    }
    result.is_ok()
}

/// A path-like token: identifier characters and dots
pub(crate) fn field<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '.').parse_next(input)
}

/// Text of an unquoted list element, up to the next `,` or `]`
pub(crate) fn list_item<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_till(0.., [',', ']']).parse_next(input)
}

/// A single- or double-quoted string with backslash escapes
pub(crate) fn quoted(input: &mut Input<'_>) -> PResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut out = String::new();
    loop {
        let ch = cut_err(any)
            .context(StrContext::Label("closing quote"))
            .parse_next(input)?;
        match ch {
            c if c == quote => return Ok(out),
            '\\' => {
                let escaped = cut_err(any)
                    .context(StrContext::Label("escape sequence"))
                    .parse_next(input)?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            }
            c => out.push(c),
        }
    }
}

/// A decimal number with optional sign, fraction and exponent
pub(crate) fn number<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        opt(one_of(['+', '-'])),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

/// Classify an unquoted literal.
///
/// `null`, `true` and `false` are matched ignoring ASCII case; anything that
/// is not a number or one of those keywords is text.
pub(crate) fn classify_bare(text: &str) -> DynamicValue {
    if text.eq_ignore_ascii_case("null") {
        DynamicValue::Null
    } else if text.eq_ignore_ascii_case("true") {
        DynamicValue::Boolean(true)
    } else if text.eq_ignore_ascii_case("false") {
        DynamicValue::Boolean(false)
    } else if number.parse(text).is_ok() {
        DynamicValue::number(text)
    } else {
        DynamicValue::text(text)
    }
}
