//! bo_report/src/lib.rs: pure offline presentation model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply result documents already in memory.
//! - Amount strings come from `bo_core::format`; absent cells render as `—`.
//! - Stable section order and field names.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod model;
#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;

pub use model::{
    build_comparison_report, build_ranking_report, filter_towns, showing_label, CellView,
    ComparisonReport, MovieHeader, RankLine, RankingReport, TownCard, TownRow, WinnerBadge,
};
#[cfg(feature = "render_html")]
pub use render_html::{render_comparison_html, render_ranking_html};
#[cfg(feature = "render_json")]
pub use render_json::render_json;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}
