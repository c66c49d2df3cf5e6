//! bo_core: core types, day-code vocabulary, absent-aware figures and formatting.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`bo_io`, `bo_algo`, `bo_pipeline`, `bo_report`, `bo_cli`).
//!
//! - Catalog tokens: `MovieCode`, `HeroCode`, `TerritoryKey`, `TownName`
//! - Reporting checkpoints: `DayCode` (union of both vocabularies + unrecognized)
//! - Figures: `Figure = Option<Lakhs>`; absent is never coerced to zero
//! - Entities: `Movie`, `Hero`, `TerritoryMap`, `Catalog`, `DayFeed`
//! - Deterministic ordering helpers and currency formatting (lakh / crore)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod amount;
pub mod day;
pub mod determinism;
pub mod entities;
pub mod errors;
pub mod format;
pub mod ids;

pub use amount::{Figure, Lakhs, LAKHS_PER_CRORE};
pub use day::DayCode;
pub use entities::{
    Catalog, CollectionsFeed, DayFeed, Hero, Movie, MovieFigures, MovieInfo, TerritoryMap,
    TerritoryScope,
};
pub use errors::ValidationError;
pub use format::{format_amount, format_lakhs};
pub use ids::{HeroCode, IdError, MovieCode, TerritoryKey, TownName};
