// crates/bo_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure aggregation engines. No I/O, no clocks, no RNG.
//!
//! - `comparison`: movie × town matrix with totals, town maxima and a winner
//! - `ranking`: per-town top-N by collected amount

pub use bo_core::{
    DayCode, Figure, Lakhs, MovieCode, TownName, ValidationError,
};

pub mod comparison;
pub mod ranking;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use comparison::{compare, Comparison, FigureLookup, LookupFn, MovieColumn};
pub use ranking::{rank_top_n, top_entries, validate_limit, RankEntry, RankingFeed, TownRanking, TownTop};
