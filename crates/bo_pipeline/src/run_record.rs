//! Run record: which engine produced which artifacts from which feeds.
//!
//! No timestamps; the same inputs and outputs always yield the same `RUN:` id.

use serde::{Deserialize, Serialize};

use bo_io::hasher;

use crate::{EngineMeta, PipelineError};

pub const RUN_ID_PREFIX: &str = "RUN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// File name (inputs) or artifact kind (outputs).
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub sha256: String,
}

impl ArtifactRef {
    pub fn input(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self { name: name.into(), id: None, sha256: hasher::sha256_hex(bytes) }
    }

    pub fn output(name: impl Into<String>, id: impl Into<String>, canonical_bytes: &[u8]) -> Self {
        Self { name: name.into(), id: Some(id.into()), sha256: hasher::sha256_hex(canonical_bytes) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunBody {
    pub engine: EngineMeta,
    /// `compare` or `top`.
    pub command: String,
    pub inputs: Vec<ArtifactRef>,
    pub outputs: Vec<ArtifactRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecordDoc {
    pub id: String,
    #[serde(flatten)]
    pub body: RunBody,
}

pub fn build_run_record(
    engine: EngineMeta,
    command: &str,
    inputs: Vec<ArtifactRef>,
    outputs: Vec<ArtifactRef>,
) -> Result<RunRecordDoc, PipelineError> {
    let body = RunBody { engine, command: command.to_string(), inputs, outputs };
    let id = hasher::content_id(RUN_ID_PREFIX, &body)?;
    Ok(RunRecordDoc { id, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_identifiers;

    #[test]
    fn run_id_depends_only_on_content() {
        let inputs = vec![ArtifactRef::input("heroes.json", b"[]")];
        let outputs = vec![ArtifactRef::output("comparison", "CMP:abc", b"{}")];
        let a = build_run_record(engine_identifiers(), "compare", inputs.clone(), outputs.clone()).unwrap();
        let b = build_run_record(engine_identifiers(), "compare", inputs.clone(), outputs.clone()).unwrap();
        assert_eq!(a.id, b.id);
        assert!(bo_io::hasher::is_content_id(RUN_ID_PREFIX, &a.id));

        let c = build_run_record(engine_identifiers(), "top", inputs, outputs).unwrap();
        assert_ne!(a.id, c.id);
    }
}
