//! Encoding of multi-value columns.
//!
//! `groups` and `features` are stored as comma-delimited text. This is the
//! only place that knows about it; everything above the store works with
//! `Vec<String>`.

/// Split a stored list column. NULL and the empty string both decode to an
/// empty list; other values are split on `,` verbatim, duplicates included.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None | Some("") => Vec::new(),
        Some(s) => s.split(',').map(str::to_owned).collect(),
    }
}

/// Encode a list for storage.
pub fn join_list(items: &[String]) -> String {
    items.join(",")
}
