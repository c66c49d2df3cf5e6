//! bo_pipeline: orchestration surface (bootstrap → select → fetch → engine → document).
//!
//! Engines stay in `bo_algo` and all JSON / hashing goes through `bo_io`. This
//! crate owns the glue: the selection state, the concurrent catalog bootstrap,
//! and the two query pipelines that produce identified result documents.

#![forbid(unsafe_code)]

use thiserror::Error;

use bo_core::ValidationError;

pub mod bootstrap;
pub mod compare;
pub mod run_record;
pub mod selection;
pub mod top;

pub use bootstrap::{load_catalog, Session};
pub use compare::{run_compare, CellDoc, ColumnDoc, ComparisonDoc, WinnerDoc};
pub use run_record::{build_run_record, ArtifactRef, RunRecordDoc};
pub use selection::{Action, CompareRequest, SelectionState};
pub use top::{run_top_movies, RankEntryDoc, RankingDoc, TopMoviesRequest, TownTopDoc};

/// Engine identifiers (baked by the build system in real deployments).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Identifiers of this library build.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "bo".to_string(),
        name: "bo_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: "dev".to_string(),
    }
}

/// Single error surface for the pipelines.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller precondition; never corrected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The data source failed or returned nothing usable. Retryable.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Artifact I/O.
    #[error("io: {0}")]
    Io(String),

    /// Document assembly (serialization, hashing).
    #[error("build: {0}")]
    Build(String),
}

impl From<bo_io::IoError> for PipelineError {
    fn from(e: bo_io::IoError) -> Self {
        use bo_io::IoError;
        match e {
            IoError::Path(m) => PipelineError::Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => PipelineError::Build(format!("json {pointer}: {msg}")),
            IoError::Hash(m) => PipelineError::Build(format!("hash: {m}")),
            IoError::Invalid(m) => PipelineError::Build(format!("invalid: {m}")),
        }
    }
}

/// A failed fetch from the data source.
pub(crate) fn unavailable(what: &str, e: bo_io::IoError) -> PipelineError {
    log::warn!("{what} fetch failed: {e}");
    PipelineError::DataUnavailable(format!("{what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_land_in_stable_buckets() {
        let p: PipelineError = bo_io::IoError::Path("denied".into()).into();
        assert!(matches!(p, PipelineError::Io(ref m) if m == "path: denied"));
        let h: PipelineError = bo_io::IoError::Hash("x".into()).into();
        assert!(matches!(h, PipelineError::Build(_)));
        let v: PipelineError = ValidationError::NoMoviesSelected.into();
        assert_eq!(v.to_string(), "no movies selected");
    }
}
