//! crates/bo_io/src/hasher.rs
//!
//! SHA-256 digests and content ids for result artifacts.
//!
//! - Ids derive from canonical bytes (`canonical_json`), so two documents with
//!   the same content share an id regardless of field order.
//! - Hex digests are lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of `value`.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// `<PREFIX>:<hex>`, e.g. `CMP:…` for comparisons and `TOP:…` for rankings.
pub fn content_id<T: Serialize + ?Sized>(prefix: &str, value: &T) -> IoResult<String> {
    Ok(format!("{prefix}:{}", sha256_canonical(value)?))
}

/// Accepts `<PREFIX>:<64 lowercase hex>`.
pub fn is_content_id(prefix: &str, id: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(|h| h.len() == 64 && h.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_is_lowercase_sha256() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn ids_ignore_key_order() {
        #[derive(Serialize)]
        struct Doc {
            winner: &'static str,
            day_code: &'static str,
        }
        let a = content_id("CMP", &Doc { winner: "M2", day_code: "DAY1" }).unwrap();
        let b = content_id("CMP", &json!({"day_code": "DAY1", "winner": "M2"})).unwrap();
        assert_eq!(a, b);
        assert!(is_content_id("CMP", &a));
        assert!(!is_content_id("TOP", &a));
        assert!(!is_content_id("CMP", "CMP:ABC"));
    }
}
