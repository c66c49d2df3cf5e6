//! crates/bo_io/src/lib.rs
//! I/O crate for the box-office engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - `wire` / `loader`: the three JSON feeds (heroes, towns by territory,
//!   collections) and their conversion into `bo_core` entities.
//! - `source`: the async `CollectionSource` boundary plus file and in-memory
//!   implementations.
//! - `canonical_json` / `hasher`: result artifacts and their content ids.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for bo_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync, ...)
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors with a JSON Pointer to the offending node.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing-related errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Feed content that parses but breaks an invariant.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; loaders enrich it where they can.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod source;
pub mod wire;

pub use source::{CollectionSource, FileSource, MemorySource};

pub mod prelude {
    pub use crate::{IoError, IoResult};
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{content_id, sha256_hex};
    pub use crate::source::{CollectionSource, FileSource, MemorySource};
}
