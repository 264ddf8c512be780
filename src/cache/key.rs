//! Cache key construction.

/// Separator placed between key parts.
pub const KEY_DELIMITER: &str = ":";

/// Joins key parts with `:` in the order given.
///
/// Parts are not escaped: `["a:b", "c"]` and `["a", "b:c"]` produce the same key.
pub fn build_key<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(KEY_DELIMITER)
}
