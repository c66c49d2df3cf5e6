//! Catalog entities (heroes, movies, territories) and raw collection feeds.
//!
//! Everything here is request- or session-scoped; nothing is persisted.
//! Ordered collections keep the order the feed delivered them in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::amount::{Figure, Lakhs};
use crate::day::DayCode;
use crate::ids::{HeroCode, MovieCode, TerritoryKey, TownName};

/* ---------------------------------- Catalog --------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Movie {
    pub movie_code: MovieCode,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hero {
    pub hero_code: HeroCode,
    pub hero_name: String,
    pub movies: Vec<Movie>,
}

impl Hero {
    pub fn movie_codes(&self) -> impl Iterator<Item = &MovieCode> + '_ {
        self.movies.iter().map(|m| &m.movie_code)
    }
}

/// A movie with its hero resolved (what result documents display).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MovieInfo {
    pub movie_code: MovieCode,
    pub title: String,
    pub hero_code: HeroCode,
    pub hero_name: String,
}

/// Active geographic scope: every territory, or a single one.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerritoryScope {
    #[default]
    All,
    Territory(TerritoryKey),
}

impl TerritoryScope {
    /// `None` for `All`.
    pub fn key(&self) -> Option<&TerritoryKey> {
        match self {
            TerritoryScope::All => None,
            TerritoryScope::Territory(k) => Some(k),
        }
    }
}

/// Territory key → ordered town names, in feed order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TerritoryMap {
    entries: Vec<(TerritoryKey, Vec<TownName>)>,
}

impl TerritoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a territory. A repeated key extends the existing town list.
    pub fn push(&mut self, key: TerritoryKey, towns: Vec<TownName>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.extend(towns),
            None => self.entries.push((key, towns)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &TerritoryKey> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TerritoryKey, &[TownName])> + '_ {
        self.entries.iter().map(|(k, t)| (k, t.as_slice()))
    }

    /// Towns of one territory; an unknown key has none.
    pub fn towns_of(&self, key: &TerritoryKey) -> &[TownName] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, t)| t.as_slice())
            .unwrap_or(&[])
    }

    /// The town universe: every territory's towns flattened in territory order.
    /// Territory sets are disjoint by construction, so no de-duplication.
    pub fn all_towns(&self) -> Vec<TownName> {
        self.entries.iter().flat_map(|(_, t)| t.iter().cloned()).collect()
    }

    pub fn towns_in(&self, scope: &TerritoryScope) -> Vec<TownName> {
        match scope {
            TerritoryScope::All => self.all_towns(),
            TerritoryScope::Territory(k) => self.towns_of(k).to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TerritoryKey, Vec<TownName>)> for TerritoryMap {
    fn from_iter<I: IntoIterator<Item = (TerritoryKey, Vec<TownName>)>>(iter: I) -> Self {
        let mut m = TerritoryMap::new();
        for (k, t) in iter {
            m.push(k, t);
        }
        m
    }
}

/// Heroes with their movies plus the territory map; loaded once per session.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Catalog {
    pub heroes: Vec<Hero>,
    pub territories: TerritoryMap,
}

impl Catalog {
    pub fn hero(&self, code: &HeroCode) -> Option<&Hero> {
        self.heroes.iter().find(|h| &h.hero_code == code)
    }

    pub fn movie(&self, code: &MovieCode) -> Option<MovieInfo> {
        self.heroes.iter().find_map(|h| {
            h.movies.iter().find(|m| &m.movie_code == code).map(|m| MovieInfo {
                movie_code: m.movie_code.clone(),
                title: m.title.clone(),
                hero_code: h.hero_code.clone(),
                hero_name: h.hero_name.clone(),
            })
        })
    }

    #[inline]
    pub fn knows_movie(&self, code: &MovieCode) -> bool {
        self.heroes.iter().any(|h| h.movie_codes().any(|c| c == code))
    }
}

/* ------------------------------- Raw collections ------------------------------ */

/// One movie's per-town figures for a single checkpoint, in feed order.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieFigures {
    pub movie_code: MovieCode,
    pub figures: Vec<(TownName, Figure)>,
}

impl MovieFigures {
    /// Missing town and explicit null are both absent.
    pub fn figure(&self, town: &TownName) -> Figure {
        self.figures.iter().find(|(t, _)| t == town).and_then(|(_, f)| *f)
    }
}

/// Raw figures for one checkpoint. Row order is the feed order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DayFeed {
    pub rows: Vec<MovieFigures>,
}

impl DayFeed {
    /// Figure for (movie, town). The first row for a movie wins.
    pub fn figure(&self, movie: &MovieCode, town: &TownName) -> Figure {
        self.rows
            .iter()
            .find(|r| &r.movie_code == movie)
            .and_then(|r| r.figure(town))
    }

    /// Present `(movie, amount)` pairs for one town, in feed order.
    pub fn entries_for(&self, town: &TownName) -> Vec<(MovieCode, Lakhs)> {
        let mut out: Vec<(MovieCode, Lakhs)> = Vec::new();
        for row in &self.rows {
            if out.iter().any(|(m, _)| m == &row.movie_code) {
                continue;
            }
            if let Some(v) = row.figure(town) {
                out.push((row.movie_code.clone(), v));
            }
        }
        out
    }

    /// Towns in order of first appearance across rows.
    pub fn towns(&self) -> Vec<TownName> {
        let mut out: Vec<TownName> = Vec::new();
        for (t, _) in self.rows.iter().flat_map(|r| r.figures.iter()) {
            if !out.contains(t) {
                out.push(t.clone());
            }
        }
        out
    }
}

/// Every checkpoint's feed, keyed by day code in feed order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CollectionsFeed {
    pub days: Vec<(DayCode, DayFeed)>,
}

impl CollectionsFeed {
    pub fn day(&self, day: &DayCode) -> Option<&DayFeed> {
        self.days.iter().find(|(d, _)| d == day).map(|(_, f)| f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town(s: &str) -> TownName { s.parse().unwrap() }
    fn key(s: &str) -> TerritoryKey { s.parse().unwrap() }
    fn mc(s: &str) -> MovieCode { s.parse().unwrap() }

    fn territories() -> TerritoryMap {
        [
            (key("NIZAM"), vec![town("Hyderabad"), town("Warangal")]),
            (key("TAMIL_NADU"), vec![town("Chennai")]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn universe_is_flattened_in_territory_order() {
        let m = territories();
        let all: Vec<String> = m.all_towns().into_iter().map(String::from).collect();
        assert_eq!(all, vec!["Hyderabad", "Warangal", "Chennai"]);
        assert_eq!(m.towns_of(&key("TAMIL_NADU")).len(), 1);
        assert!(m.towns_of(&key("CEDED")).is_empty());
        assert_eq!(m.towns_in(&TerritoryScope::Territory(key("NIZAM"))).len(), 2);
    }

    #[test]
    fn catalog_resolves_movie_hero() {
        let cat = Catalog {
            heroes: vec![Hero {
                hero_code: "H1".parse().unwrap(),
                hero_name: "Hero One".into(),
                movies: vec![Movie { movie_code: mc("M1"), title: "First".into() }],
            }],
            territories: territories(),
        };
        let info = cat.movie(&mc("M1")).unwrap();
        assert_eq!(info.hero_name, "Hero One");
        assert!(cat.knows_movie(&mc("M1")));
        assert!(!cat.knows_movie(&mc("M9")));
    }

    #[test]
    fn day_feed_keeps_null_and_missing_absent() {
        let feed = DayFeed {
            rows: vec![
                MovieFigures {
                    movie_code: mc("M1"),
                    figures: vec![(town("Hyderabad"), Some(120.0)), (town("Chennai"), None)],
                },
                MovieFigures {
                    movie_code: mc("M2"),
                    figures: vec![(town("Chennai"), Some(0.0))],
                },
            ],
        };
        assert_eq!(feed.figure(&mc("M1"), &town("Hyderabad")), Some(120.0));
        assert_eq!(feed.figure(&mc("M1"), &town("Chennai")), None);
        assert_eq!(feed.figure(&mc("M2"), &town("Hyderabad")), None);
        assert_eq!(feed.entries_for(&town("Chennai")), vec![(mc("M2"), 0.0)]);
        let towns: Vec<String> = feed.towns().into_iter().map(String::from).collect();
        assert_eq!(towns, vec!["Hyderabad", "Chennai"]);
    }
}
