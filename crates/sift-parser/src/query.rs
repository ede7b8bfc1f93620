//! Query text parser: splits the text into clauses and parses each one

use crate::clause::parse_clause;
use crate::{ParseMode, ParseResult};
use sift_ast::Spanned;
use sift_diagnostics::{SiftError, SourceLocation, Span};

/// Clause separator
pub const CLAUSE_SEPARATOR: char = ';';

/// Split query text into trimmed, non-empty clause spans.
///
/// Separators inside quotes or brackets do not end a clause. A quote only
/// opens a string where a value may start, so `O'Brien` stays bare text.
pub fn split_clauses(query: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;
    // Last non-whitespace character outside a string
    let mut prev: Option<char> = None;

    for (i, ch) in query.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if matches!(prev, None | Some(':' | '[' | ',' | CLAUSE_SEPARATOR)) => {
                quote = Some(ch);
            }
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            CLAUSE_SEPARATOR if depth == 0 => {
                push_trimmed(query, start, i, &mut spans);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
        if !ch.is_whitespace() {
            prev = Some(ch);
        }
    }
    push_trimmed(query, start, query.len(), &mut spans);
    spans
}

fn push_trimmed(query: &str, start: usize, end: usize, spans: &mut Vec<Span>) {
    let piece = &query[start..end];
    let trimmed = piece.trim_start();
    let lead = piece.len() - trimmed.len();
    let trimmed = trimmed.trim_end();
    if !trimmed.is_empty() {
        spans.push(Span::new(start + lead, start + lead + trimmed.len()));
    }
}

/// Parse query text with the given mode
pub fn parse_with_mode(query: &str, mode: ParseMode) -> ParseResult {
    let mut result = ParseResult::default();

    for (index, span) in split_clauses(query).into_iter().enumerate() {
        let text = span.slice(query);
        match parse_clause(text) {
            Ok(descriptor) => result.descriptors.push(Spanned::new(descriptor, span)),
            Err(err) => {
                let location = SourceLocation::from_span(err.span.shifted(span.start), query);
                result.errors.push(SiftError::malformed_at(
                    err.code,
                    index,
                    text,
                    err.message,
                    location,
                ));
                if mode == ParseMode::Fast {
                    break;
                }
            }
        }
    }

    result
}
