//! Presentation model: every string a viewer shows, already formatted.
//!
//! The comparison table is laid out town-major (one row per town, one cell per
//! movie) with a totals row and a winner badge. The ranking view is a list of
//! town cards, optionally narrowed by a town search.

use serde::Serialize;

use bo_core::format::{format_amount, format_lakhs, territory_label};
use bo_pipeline::{ComparisonDoc, RankingDoc, TownTopDoc};

/* ------------------------------- Comparison ------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieHeader {
    pub movie_code: String,
    pub title: String,
    pub hero_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellView {
    pub text: String,
    pub highest: bool,
    pub absent: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TownRow {
    pub town: String,
    pub cells: Vec<CellView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinnerBadge {
    pub title: String,
    pub total: String,
    pub tied: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub id: String,
    pub day_code: String,
    pub day_label: String,
    pub scope_label: String,
    pub movie_count: usize,
    pub town_count: usize,
    pub movies: Vec<MovieHeader>,
    pub rows: Vec<TownRow>,
    pub totals: Vec<String>,
    pub winner: WinnerBadge,
}

pub fn build_comparison_report(doc: &ComparisonDoc) -> ComparisonReport {
    let b = &doc.body;

    let movies = b
        .columns
        .iter()
        .map(|c| MovieHeader {
            movie_code: c.movie_code.to_string(),
            title: c.title.clone(),
            hero_name: c.hero_name.clone(),
        })
        .collect();

    let rows = b
        .towns
        .iter()
        .enumerate()
        .map(|(ti, town)| TownRow {
            town: town.to_string(),
            cells: b
                .columns
                .iter()
                .map(|c| {
                    let cell = c.cells.get(ti);
                    let amount = cell.and_then(|x| x.amount);
                    CellView {
                        text: format_amount(amount),
                        highest: cell.map(|x| x.is_highest).unwrap_or(false),
                        absent: amount.is_none(),
                    }
                })
                .collect(),
        })
        .collect();

    ComparisonReport {
        id: doc.id.clone(),
        day_code: b.day_code.to_string(),
        day_label: b.day_code.label(),
        scope_label: match &b.territory {
            Some(k) => territory_label(k),
            None => "All territories".to_string(),
        },
        movie_count: b.movie_count,
        town_count: b.town_count,
        movies,
        rows,
        totals: b.columns.iter().map(|c| format_amount(Some(c.total))).collect(),
        winner: WinnerBadge {
            title: b.winner.title.clone(),
            total: format_amount(Some(b.winner.total)),
            tied: b.winner.tied,
        },
    }
}

/* --------------------------------- Ranking -------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankLine {
    pub rank: usize,
    pub title: String,
    pub hero_name: String,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TownCard {
    pub town: String,
    pub entries: Vec<RankLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingReport {
    pub id: String,
    pub day_code: String,
    pub day_label: String,
    pub limit: usize,
    pub search: String,
    pub shown: usize,
    pub total_towns: usize,
    pub showing: String,
    pub towns: Vec<TownCard>,
}

/// Towns whose name contains `search` (case-insensitive); blank keeps all.
pub fn filter_towns<'a>(towns: &'a [TownTopDoc], search: &str) -> Vec<&'a TownTopDoc> {
    let needle = search.trim().to_lowercase();
    towns
        .iter()
        .filter(|t| needle.is_empty() || t.town.as_str().to_lowercase().contains(&needle))
        .collect()
}

pub fn showing_label(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} towns")
}

pub fn build_ranking_report(doc: &RankingDoc, search: &str) -> RankingReport {
    let b = &doc.body;
    let shown = filter_towns(&b.towns, search);

    let towns: Vec<TownCard> = shown
        .iter()
        .map(|t| TownCard {
            town: t.town.to_string(),
            entries: t
                .entries
                .iter()
                .map(|e| RankLine {
                    rank: e.rank,
                    title: e.title.clone(),
                    hero_name: e.hero_name.clone(),
                    amount: format_lakhs(e.total),
                })
                .collect(),
        })
        .collect();

    RankingReport {
        id: doc.id.clone(),
        day_code: b.day_code.to_string(),
        day_label: b.day_code.label(),
        limit: b.limit,
        search: search.trim().to_string(),
        shown: towns.len(),
        total_towns: b.towns.len(),
        showing: showing_label(towns.len(), b.towns.len()),
        towns,
    }
}
