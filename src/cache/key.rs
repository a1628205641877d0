//! Deterministic cache key generation
//!
//! Fingerprints arbitrary structured input into a fixed-length hex key so that
//! every call site deriving a key from the same compound descriptor (e.g. a
//! normalized request) lands on the same cache entry.

use super::errors::{CacheError, CacheResult};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Generate a collision-resistant cache key from any serializable source.
///
/// The source is canonicalized as JSON (object keys sorted) and digested with
/// SHA-256, so structurally equal inputs always produce the same key
/// regardless of field declaration order.
pub fn generate_key<T: Serialize + ?Sized>(source: &T) -> CacheResult<String> {
    let value = serde_json::to_value(source)
        .map_err(|e| CacheError::Serialization(format!("cache key source: {e}")))?;
    Ok(hex::encode(Sha256::digest(value.to_string().as_bytes())))
}

/// Key for a missing source value: the digest of the canonical serialization
/// of the empty string.
pub fn default_key() -> String {
    hex::encode(Sha256::digest(b"\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_same_input_same_key() {
        let descriptor = json!({"path": "/catalog/42", "locale": "de_DE"});
        assert_eq!(
            generate_key(&descriptor).unwrap(),
            generate_key(&descriptor).unwrap()
        );
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let a = json!({"locale": "de_DE", "path": "/catalog/42"});
        let b = json!({"path": "/catalog/42", "locale": "de_DE"});
        assert_eq!(generate_key(&a).unwrap(), generate_key(&b).unwrap());
    }

    #[test]
    fn test_different_inputs_differ() {
        let a = json!({"path": "/catalog/42"});
        let b = json!({"path": "/catalog/43"});
        assert_ne!(generate_key(&a).unwrap(), generate_key(&b).unwrap());
    }

    #[test]
    fn test_key_is_fixed_length_hex() {
        let key = generate_key(&json!([1, 2, 3])).unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_default_key_matches_empty_string_source() {
        assert_eq!(default_key(), generate_key("").unwrap());
    }

    #[test]
    fn test_nested_structures_are_supported() {
        let nested = json!({"filters": {"size": ["s", "m"], "color": null}, "page": 2});
        assert_eq!(generate_key(&nested).unwrap().len(), 64);
    }

    proptest! {
        #[test]
        fn prop_deterministic(source in "\\PC*") {
            prop_assert_eq!(generate_key(&source).unwrap(), generate_key(&source).unwrap());
        }

        #[test]
        fn prop_distinct_strings_distinct_keys(a in "\\PC{1,64}", b in "\\PC{1,64}") {
            prop_assume!(a != b);
            prop_assert_ne!(generate_key(&a).unwrap(), generate_key(&b).unwrap());
        }
    }
}
