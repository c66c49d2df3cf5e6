//! JSON rendering of report models (field order follows struct layout).

use serde::Serialize;

use crate::ReportError;

/// Pretty JSON for a report model, newline-terminated.
pub fn render_json<M: Serialize>(model: &M) -> Result<String, ReportError> {
    let mut s = serde_json::to_string_pretty(model).map_err(|e| ReportError::Serialize(e.to_string()))?;
    s.push('\n');
    Ok(s)
}
