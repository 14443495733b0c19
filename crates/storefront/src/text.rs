//! Text shortening helpers for product cards and cart lines.

/// Marker appended to shortened text.
pub const ELLIPSIS: &str = "...";

/// Longest description shown on a product card, in characters.
pub const DESCRIPTION_LIMIT: usize = 120;

/// Shorten a title to its first word followed by `" ..."`.
///
/// This always drops everything after the first whitespace character, even
/// for short titles.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    let first = title.split(char::is_whitespace).next().unwrap_or_default();
    format!("{first} {ELLIPSIS}")
}

/// Cut a description down to [`DESCRIPTION_LIMIT`] characters.
///
/// Descriptions at or under the limit are returned unchanged.
#[must_use]
pub fn truncate_desc(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!(
            "{}{ELLIPSIS}",
            description.get(..cut).unwrap_or(description)
        ),
        None => description.to_owned(),
    }
}
