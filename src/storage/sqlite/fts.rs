//! FTS5 match expressions for relevance queries.
//!
//! Every keyword becomes an FTS5 string literal, so operators and column
//! filters typed into configuration (`NOT`, `-`, `:`, `^`, parentheses) are
//! matched as text instead of being parsed as query syntax. Prefix keywords
//! get the `*` after the closing quote.

use crate::models::{Keyword, KeywordSet};

/// Builds `"k1" OR "k2"* OR ...` from a keyword set.
///
/// Returns `None` for an empty set, which callers treat as "no filter".
#[must_use]
pub fn build_match_expression(keywords: &KeywordSet) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }

    // Each term becomes ~term.len() + 7 chars ("term"* OR )
    let estimated_len = keywords.iter().map(|k| k.term().len() + 7).sum::<usize>();
    let mut expression = String::with_capacity(estimated_len);
    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 {
            expression.push_str(" OR ");
        }
        push_term(&mut expression, keyword);
    }
    Some(expression)
}

fn push_term(out: &mut String, keyword: &Keyword) {
    out.push('"');
    for c in keyword.term().chars() {
        if c == '"' {
            out.push_str("\"\"");
        } else {
            out.push(c);
        }
    }
    out.push('"');
    if keyword.is_prefix() {
        out.push('*');
    }
}
