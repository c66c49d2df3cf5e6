//! Top-movies pipeline: day feed → per-town top-N → document.

use serde::{Deserialize, Serialize};

use bo_algo::ranking::{rank_top_n, validate_limit, RankingFeed, TownRanking};
use bo_core::{Catalog, DayCode, DayFeed, Lakhs, MovieCode, TownName};
use bo_io::{hasher, CollectionSource};

use crate::compare::fetch_day;
use crate::PipelineError;

pub const RANKING_ID_PREFIX: &str = "TOP";
pub const DEFAULT_LIMIT: usize = 10;
/// Limits the ranking view offers. Any positive limit is accepted.
pub const OFFERED_LIMITS: [usize; 4] = [5, 10, 15, 20];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMoviesRequest {
    pub day_code: DayCode,
    pub limit: usize,
}

impl Default for TopMoviesRequest {
    fn default() -> Self {
        Self { day_code: DayCode::Day1, limit: DEFAULT_LIMIT }
    }
}

impl TopMoviesRequest {
    /// Missing fields fall back to `DAY1` / `10`; a non-positive limit fails.
    pub fn new(day_code: Option<DayCode>, limit: Option<i64>) -> Result<Self, PipelineError> {
        let d = Self::default();
        Ok(Self {
            day_code: day_code.unwrap_or(d.day_code),
            limit: match limit {
                Some(l) => validate_limit(l)?,
                None => d.limit,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntryDoc {
    /// 1-based.
    pub rank: usize,
    pub movie_code: MovieCode,
    pub title: String,
    pub hero_name: String,
    pub total: Lakhs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownTopDoc {
    pub town: TownName,
    pub entries: Vec<RankEntryDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingBody {
    pub day_code: DayCode,
    pub limit: usize,
    pub towns: Vec<TownTopDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingDoc {
    /// `TOP:<sha256 of the canonical body>`
    pub id: String,
    #[serde(flatten)]
    pub body: RankingBody,
}

/// Territory town order first, then any feed-only towns in feed order.
struct ScopedFeed<'a> {
    towns: Vec<TownName>,
    feed: &'a DayFeed,
}

impl<'a> ScopedFeed<'a> {
    fn new(catalog: &Catalog, feed: &'a DayFeed) -> Self {
        let mut towns = catalog.territories.all_towns();
        for t in feed.towns() {
            if !towns.contains(&t) {
                towns.push(t);
            }
        }
        Self { towns, feed }
    }
}

impl RankingFeed for ScopedFeed<'_> {
    fn towns(&self) -> Vec<TownName> {
        self.towns.clone()
    }

    fn entries(&self, _day: &DayCode, town: &TownName) -> Vec<(MovieCode, Lakhs)> {
        self.feed.entries_for(town)
    }
}

pub async fn run_top_movies(
    source: &dyn CollectionSource,
    catalog: &Catalog,
    req: &TopMoviesRequest,
) -> Result<RankingDoc, PipelineError> {
    let feed = fetch_day(source, &req.day_code).await?;
    let ranking = rank_top_n(&req.day_code, req.limit, &ScopedFeed::new(catalog, &feed))?;

    let body = build_body(catalog, ranking);
    let id = hasher::content_id(RANKING_ID_PREFIX, &body)?;
    log::info!("ranking {id}: {} towns, top {}", body.towns.len(), body.limit);
    Ok(RankingDoc { id, body })
}

fn build_body(catalog: &Catalog, ranking: TownRanking) -> RankingBody {
    let towns = ranking
        .towns
        .into_iter()
        .map(|tt| TownTopDoc {
            town: tt.town,
            entries: tt
                .entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| {
                    let (title, hero_name) = match catalog.movie(&e.movie_code) {
                        Some(info) => (info.title, info.hero_name),
                        None => (e.movie_code.to_string(), String::new()),
                    };
                    RankEntryDoc { rank: i + 1, movie_code: e.movie_code, title, hero_name, total: e.total }
                })
                .collect(),
        })
        .collect();

    RankingBody { day_code: ranking.day_code, limit: ranking.limit, towns }
}
