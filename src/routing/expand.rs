//! `expand` query parameter rewriting.
//!
//! # Responsibilities
//! - Find the caller's `expand` value in a raw query string
//! - Merge the required expansion into it
//! - Splice the result back into the query
//!
//! # Design Decisions
//! - Operates on the raw query text; values are never percent-decoded
//! - The splice is a literal replacement of the first `expand=<value>`
//!   occurrence, not a structured rebuild. An unrelated key that ends in
//!   `expand` (e.g. `otherexpand=`) with the same value is hit first.

/// Query key rewritten by the gateway.
pub const EXPAND_KEY: &str = "expand";

/// Expansion every forwarded request must carry.
pub const CARDS_COLLECTION: &str = "cards(collection)";

/// The caller's `expand` value: the first `expand=` pair, taken verbatim.
///
/// An empty value is treated as absent.
pub fn caller_expand(query: &str) -> Option<&str> {
    query
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == EXPAND_KEY).then_some(value)
        })
        .filter(|value| !value.is_empty())
}

/// The `expand` value to forward given what the caller sent.
pub fn effective_expand(caller: Option<&str>, required: &str) -> String {
    match caller {
        None => required.to_string(),
        Some(value) if value.contains(required) => value.to_string(),
        Some(value) => format!("{value},{required}"),
    }
}

/// Rewrite `query` (without the leading `?`) so its `expand` value contains
/// `required`.
pub fn merge_expand(query: &str, required: &str) -> String {
    let caller = caller_expand(query);
    let effective = effective_expand(caller, required);

    match caller {
        None if query.is_empty() => format!("{EXPAND_KEY}={effective}"),
        None => format!("{query}&{EXPAND_KEY}={effective}"),
        Some(original) => query.replacen(
            &format!("{EXPAND_KEY}={original}"),
            &format!("{EXPAND_KEY}={effective}"),
            1,
        ),
    }
}
