//! Per-town top-N ranking (deterministic; stable for equal amounts).
//!
//! Contract:
//! - Towns are processed independently and reported in feed order; the engine
//!   never re-sorts towns.
//! - Within a town, entries are sorted descending by amount with a stable sort,
//!   so equal amounts keep their feed order; then truncated to `limit`.
//! - A town with no entries is still reported, with an empty list.
//! - An unrecognized day code is "no data": every town reported empty.

use bo_core::determinism::cmp_amount_desc;

use crate::{DayCode, Lakhs, MovieCode, TownName, ValidationError};

/// Raw per-town figures for ranking.
pub trait RankingFeed {
    /// Towns to report, in feed order.
    fn towns(&self) -> Vec<TownName>;
    /// Present `(movie, amount)` pairs for `town` on `day`, in feed order.
    fn entries(&self, day: &DayCode, town: &TownName) -> Vec<(MovieCode, Lakhs)>;
}

impl RankingFeed for bo_core::CollectionsFeed {
    fn towns(&self) -> Vec<TownName> {
        let mut out: Vec<TownName> = Vec::new();
        for t in self.days.iter().flat_map(|(_, f)| f.towns()) {
            if !out.contains(&t) {
                out.push(t);
            }
        }
        out
    }

    fn entries(&self, day: &DayCode, town: &TownName) -> Vec<(MovieCode, Lakhs)> {
        self.day(day).map(|f| f.entries_for(town)).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankEntry {
    pub movie_code: MovieCode,
    pub total: Lakhs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TownTop {
    pub town: TownName,
    pub entries: Vec<RankEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TownRanking {
    pub day_code: DayCode,
    pub limit: usize,
    /// Feed order.
    pub towns: Vec<TownTop>,
}

impl TownRanking {
    pub fn town(&self, name: &TownName) -> Option<&TownTop> {
        self.towns.iter().find(|t| &t.town == name)
    }
}

/// Signed limit as received from a caller; `<= 0` is rejected.
pub fn validate_limit(limit: i64) -> Result<usize, ValidationError> {
    if limit <= 0 {
        return Err(ValidationError::NonPositiveLimit(limit));
    }
    usize::try_from(limit).map_err(|_| ValidationError::NonPositiveLimit(limit))
}

/// Stable descending sort, then truncate.
pub fn top_entries(entries: Vec<(MovieCode, Lakhs)>, limit: usize) -> Vec<RankEntry> {
    let mut v: Vec<RankEntry> = entries
        .into_iter()
        .map(|(movie_code, total)| RankEntry { movie_code, total })
        .collect();
    v.sort_by(|a, b| cmp_amount_desc(a.total, b.total));
    v.truncate(limit);
    v
}

pub fn rank_top_n<F>(day: &DayCode, limit: usize, feed: &F) -> Result<TownRanking, ValidationError>
where
    F: RankingFeed + ?Sized,
{
    if limit == 0 {
        return Err(ValidationError::NonPositiveLimit(0));
    }

    let towns = feed
        .towns()
        .into_iter()
        .map(|town| {
            let entries = if day.is_known() {
                top_entries(feed.entries(day, &town), limit)
            } else {
                Vec::new()
            };
            TownTop { town, entries }
        })
        .collect();

    Ok(TownRanking { day_code: day.clone(), limit, towns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_core::{CollectionsFeed, DayFeed, MovieFigures};

    fn mc(s: &str) -> MovieCode { s.parse().unwrap() }
    fn town(s: &str) -> TownName { s.parse().unwrap() }

    fn row(movie: &str, figs: &[(&str, Option<f64>)]) -> MovieFigures {
        MovieFigures {
            movie_code: mc(movie),
            figures: figs.iter().map(|(t, v)| (town(t), *v)).collect(),
        }
    }

    fn feed() -> CollectionsFeed {
        CollectionsFeed {
            days: vec![(
                DayCode::Day1,
                DayFeed {
                    rows: vec![
                        row("A", &[("Vizag", Some(10.0)), ("Nellore", Some(4.0))]),
                        row("B", &[("Vizag", Some(30.0)), ("Nellore", None)]),
                        row("C", &[("Vizag", Some(10.0)), ("Guntur", None)]),
                        row("D", &[("Vizag", Some(20.0))]),
                    ],
                },
            )],
        }
    }

    fn codes(t: &TownTop) -> Vec<&str> {
        t.entries.iter().map(|e| e.movie_code.as_str()).collect()
    }

    #[test]
    fn sorts_desc_stable_and_truncates() {
        let r = rank_top_n(&DayCode::Day1, 3, &feed()).unwrap();
        let vizag = r.town(&town("Vizag")).unwrap();
        assert_eq!(codes(vizag), vec!["B", "D", "A"]);

        let all = rank_top_n(&DayCode::Day1, 10, &feed()).unwrap();
        assert_eq!(codes(all.town(&town("Vizag")).unwrap()), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn fewer_than_limit_and_empty_towns_are_kept() {
        let r = rank_top_n(&DayCode::Day1, 5, &feed()).unwrap();
        let names: Vec<&str> = r.towns.iter().map(|t| t.town.as_str()).collect();
        assert_eq!(names, vec!["Vizag", "Nellore", "Guntur"]);
        assert_eq!(codes(r.town(&town("Nellore")).unwrap()), vec!["A"]);
        assert!(r.town(&town("Guntur")).unwrap().entries.is_empty());
    }

    #[test]
    fn unknown_or_missing_day_means_no_data() {
        let unknown: DayCode = "DAY9".parse().unwrap();
        let r = rank_top_n(&unknown, 5, &feed()).unwrap();
        assert_eq!(r.towns.len(), 3);
        assert!(r.towns.iter().all(|t| t.entries.is_empty()));

        let missing = rank_top_n(&DayCode::Week1, 5, &feed()).unwrap();
        assert!(missing.towns.iter().all(|t| t.entries.is_empty()));
    }

    #[test]
    fn limit_must_be_positive() {
        assert_eq!(rank_top_n(&DayCode::Day1, 0, &feed()), Err(ValidationError::NonPositiveLimit(0)));
        assert_eq!(validate_limit(0), Err(ValidationError::NonPositiveLimit(0)));
        assert_eq!(validate_limit(-3), Err(ValidationError::NonPositiveLimit(-3)));
        assert_eq!(validate_limit(15), Ok(15));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_exceeds_limit_non_increasing_and_stable(
            amounts in proptest::collection::vec(0u8..6, 0..25),
            limit in 1usize..12,
        ) {
            let entries: Vec<(MovieCode, Lakhs)> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| (format!("M{i:02}").parse().unwrap(), f64::from(*a)))
                .collect();

            let out = top_entries(entries.clone(), limit);
            prop_assert!(out.len() <= limit);
            prop_assert_eq!(out.len(), entries.len().min(limit));

            for w in out.windows(2) {
                prop_assert!(w[0].total >= w[1].total);
                if w[0].total == w[1].total {
                    // Zero-padded codes sort like feed positions.
                    prop_assert!(w[0].movie_code < w[1].movie_code);
                }
            }
        }
    }
}
