//! Random short alias generation.
//!
//! Produces collision-resistant identifiers from a 64-character URL-safe
//! alphabet. At 8 characters this gives 64^8 (~2.8e14) possible aliases,
//! making collisions at production volumes negligible.

/// URL-safe alphabet: alphanumerics plus `-` and `_`.
///
/// Exactly 64 entries so a random byte maps to a character with a simple
/// 6-bit mask, keeping the distribution uniform.
const ALIAS_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generates a random URL-safe alias of the requested length.
///
/// Entropy comes from the OS random number generator. Pure aside from the
/// randomness source; no I/O, no shared state.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_alias(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|b| ALIAS_ALPHABET[(b & 0x3F) as usize] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_alias_has_requested_length() {
        assert_eq!(generate_alias(8).len(), 8);
        assert_eq!(generate_alias(21).len(), 21);
    }

    #[test]
    fn test_generate_alias_empty_length() {
        assert_eq!(generate_alias(0), "");
    }

    #[test]
    fn test_generate_alias_url_safe_characters() {
        let alias = generate_alias(64);
        assert!(
            alias
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_alias_produces_unique_values() {
        let mut aliases = HashSet::new();

        for _ in 0..1000 {
            aliases.insert(generate_alias(8));
        }

        assert_eq!(aliases.len(), 1000);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<u8> = ALIAS_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 64);
    }
}
