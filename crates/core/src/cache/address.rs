//! Address canonicalization for cache keys.

/// Normalize an address into its cache key.
///
/// Trims surrounding whitespace, collapses internal whitespace runs to a
/// single space and lowercases the result. The ASCII information separators
/// `\x1c`..=`\x1f` also count as whitespace.
pub fn canonicalize_address(address: &str) -> String {
    address
        .split(is_separator)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
