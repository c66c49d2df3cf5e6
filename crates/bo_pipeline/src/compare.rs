//! Compare pipeline: request → scope resolution → day feed → matrix → document.

use serde::{Deserialize, Serialize};

use bo_algo::comparison::{compare, Comparison};
use bo_core::{
    Catalog, DayCode, DayFeed, Figure, Lakhs, MovieCode, TerritoryKey, TerritoryScope, TownName,
    ValidationError,
};
use bo_io::{hasher, CollectionSource};

use crate::selection::CompareRequest;
use crate::{unavailable, PipelineError};

pub const COMPARISON_ID_PREFIX: &str = "CMP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDoc {
    pub town: TownName,
    /// Lakhs; `null` when nothing was recorded.
    pub amount: Figure,
    pub is_highest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDoc {
    pub movie_code: MovieCode,
    pub title: String,
    pub hero_name: String,
    pub cells: Vec<CellDoc>,
    pub total: Lakhs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerDoc {
    pub movie_code: MovieCode,
    pub title: String,
    pub total: Lakhs,
    /// Another movie has the same total; the earlier one in the request won.
    pub tied: bool,
}

/// Everything a comparison shows, minus its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBody {
    pub day_code: DayCode,
    pub territory: Option<TerritoryKey>,
    pub towns: Vec<TownName>,
    /// Per town, parallel to `towns`.
    pub town_max: Vec<Figure>,
    pub columns: Vec<ColumnDoc>,
    pub winner: WinnerDoc,
    pub movie_count: usize,
    pub town_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDoc {
    /// `CMP:<sha256 of the canonical body>`
    pub id: String,
    #[serde(flatten)]
    pub body: ComparisonBody,
}

/// Towns for a request: the explicit selection, else the territory's towns,
/// else the whole universe. Selected towns outside the territory are dropped.
pub fn resolve_towns(catalog: &Catalog, req: &CompareRequest) -> Vec<TownName> {
    match (&req.towns, &req.territory) {
        (Some(towns), Some(key)) => {
            let members = catalog.territories.towns_of(key);
            towns.iter().filter(|t| members.contains(t)).cloned().collect()
        }
        (Some(towns), None) => towns.clone(),
        (None, Some(key)) => catalog.territories.towns_in(&TerritoryScope::Territory(key.clone())),
        (None, None) => catalog.territories.all_towns(),
    }
}

pub async fn run_compare(
    source: &dyn CollectionSource,
    catalog: &Catalog,
    req: &CompareRequest,
) -> Result<ComparisonDoc, PipelineError> {
    if req.movie_codes.is_empty() {
        return Err(ValidationError::NoMoviesSelected.into());
    }
    if let Some(unknown) = req.movie_codes.iter().find(|m| !catalog.knows_movie(m)) {
        return Err(ValidationError::UnknownMovie(unknown.clone()).into());
    }

    let towns = resolve_towns(catalog, req);
    let feed = fetch_day(source, &req.day_code).await?;

    log::debug!(
        "compare: {} movies x {} towns on {}",
        req.movie_codes.len(),
        towns.len(),
        req.day_code
    );
    let cmp = compare(&req.movie_codes, &towns, &feed)?;
    let body = build_body(catalog, req, &cmp);
    let id = hasher::content_id(COMPARISON_ID_PREFIX, &body)?;

    log::info!("comparison {id}: winner {}", body.winner.movie_code);
    Ok(ComparisonDoc { id, body })
}

/// Feed for `day`; an unrecognized or unrecorded day is an empty feed.
pub(crate) async fn fetch_day(source: &dyn CollectionSource, day: &DayCode) -> Result<DayFeed, PipelineError> {
    if !day.is_known() {
        log::warn!("day code {day} is not recognized; treating as no data");
        return Ok(DayFeed::default());
    }
    let feed = source
        .fetch_collections(day)
        .await
        .map_err(|e| unavailable("collections", e))?;
    Ok(feed.unwrap_or_default())
}

fn build_body(catalog: &Catalog, req: &CompareRequest, cmp: &Comparison) -> ComparisonBody {
    let columns: Vec<ColumnDoc> = cmp
        .columns
        .iter()
        .enumerate()
        .map(|(mi, col)| {
            let (title, hero_name) = match catalog.movie(&col.movie_code) {
                Some(info) => (info.title, info.hero_name),
                None => (col.movie_code.to_string(), String::new()),
            };
            let cells = cmp
                .collections(col)
                .enumerate()
                .map(|(ti, (town, amount))| CellDoc {
                    town: town.clone(),
                    amount,
                    is_highest: cmp.is_highest(mi, ti),
                })
                .collect();
            ColumnDoc { movie_code: col.movie_code.clone(), title, hero_name, cells, total: col.total }
        })
        .collect();

    let w = &columns[cmp.winner];
    let winner = WinnerDoc {
        movie_code: w.movie_code.clone(),
        title: w.title.clone(),
        total: w.total,
        tied: cmp.winner_tied,
    };

    ComparisonBody {
        day_code: req.day_code.clone(),
        territory: req.territory.clone(),
        movie_count: columns.len(),
        town_count: cmp.towns.len(),
        towns: cmp.towns.clone(),
        town_max: cmp.town_max.clone(),
        columns,
        winner,
    }
}
