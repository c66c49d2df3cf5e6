//! Loader: decode the three feeds from JSON bytes into `bo_core` entities.
//!
//! Feed order is preserved everywhere. Structural problems are reported with a
//! JSON Pointer to the offending node. Absent figures (`null` or a missing town)
//! are data, not errors.

use std::collections::BTreeSet;
use std::path::Path;

use bo_core::{
    CollectionsFeed, DayCode, DayFeed, Figure, Hero, HeroCode, Movie, MovieCode, MovieFigures,
    TerritoryKey, TerritoryMap, TownName,
};
use serde_json::{Map, Value};

use crate::wire::{CollectionRowWire, CollectionsWire, HeroWire, TownsByTerritoryWire};
use crate::{IoError, IoResult};

/// Feeds larger than this are rejected before parsing.
pub const MAX_FEED_BYTES: u64 = 32 * 1024 * 1024;

pub const HEROES_FILE: &str = "heroes.json";
pub const TOWNS_FILE: &str = "towns_by_territory.json";
pub const COLLECTIONS_FILE: &str = "collections.json";

// ----------------------------- Heroes -----------------------------

pub fn parse_heroes(bytes: &[u8]) -> IoResult<Vec<Hero>> {
    let wire: Vec<HeroWire> = serde_json::from_slice(bytes)?;
    heroes_from_wire(wire)
}

pub fn heroes_from_wire(wire: Vec<HeroWire>) -> IoResult<Vec<Hero>> {
    let mut seen_heroes: BTreeSet<HeroCode> = BTreeSet::new();
    let mut seen_movies: BTreeSet<MovieCode> = BTreeSet::new();
    let mut out = Vec::with_capacity(wire.len());

    for (hi, h) in wire.into_iter().enumerate() {
        let hero_code: HeroCode = h
            .hero_code
            .parse()
            .map_err(|e| json_err(format!("/{hi}/heroCode"), format!("{e}: {:?}", h.hero_code)))?;
        if !seen_heroes.insert(hero_code.clone()) {
            return Err(json_err(format!("/{hi}/heroCode"), format!("duplicate hero code {hero_code}")));
        }

        let mut movies = Vec::with_capacity(h.movies.len());
        for (mi, m) in h.movies.into_iter().enumerate() {
            let ptr = format!("/{hi}/movies/{mi}/movieCode");
            let movie_code: MovieCode = m
                .movie_code
                .parse()
                .map_err(|e| json_err(ptr.clone(), format!("{e}: {:?}", m.movie_code)))?;
            if !seen_movies.insert(movie_code.clone()) {
                return Err(json_err(ptr, format!("duplicate movie code {movie_code}")));
            }
            movies.push(Movie { movie_code, title: m.title });
        }

        out.push(Hero { hero_code, hero_name: h.hero_name, movies });
    }
    Ok(out)
}

// ----------------------------- Territories -----------------------------

pub fn parse_territories(bytes: &[u8]) -> IoResult<TerritoryMap> {
    let wire: TownsByTerritoryWire = serde_json::from_slice(bytes)?;
    territories_from_wire(&wire)
}

/// Territories keep their key order; a town may belong to one territory only.
pub fn territories_from_wire(wire: &TownsByTerritoryWire) -> IoResult<TerritoryMap> {
    let mut map = TerritoryMap::new();
    let mut seen_towns: BTreeSet<TownName> = BTreeSet::new();

    for (k, v) in wire {
        let base = format!("/{}", ptr_escape(k));
        let key: TerritoryKey = k.parse().map_err(|e| json_err(base.clone(), format!("{e}: {k:?}")))?;
        let arr = v
            .as_array()
            .ok_or_else(|| json_err(base.clone(), "expected an array of town names"))?;

        let mut towns = Vec::with_capacity(arr.len());
        for (ti, t) in arr.iter().enumerate() {
            let ptr = format!("{base}/{ti}");
            let s = t.as_str().ok_or_else(|| json_err(ptr.clone(), "expected a string"))?;
            let town: TownName = s.parse().map_err(|e| json_err(ptr.clone(), format!("{e}: {s:?}")))?;
            if !seen_towns.insert(town.clone()) {
                return Err(json_err(ptr, format!("town {town} listed in more than one territory")));
            }
            towns.push(town);
        }
        map.push(key, towns);
    }
    Ok(map)
}

// ----------------------------- Collections -----------------------------

pub fn parse_collections(bytes: &[u8]) -> IoResult<CollectionsFeed> {
    let wire: CollectionsWire = serde_json::from_slice(bytes)?;
    collections_from_wire(&wire)
}

pub fn collections_from_wire(wire: &CollectionsWire) -> IoResult<CollectionsFeed> {
    let mut days: Vec<(DayCode, DayFeed)> = Vec::with_capacity(wire.len());

    for (k, v) in wire {
        let base = format!("/{}", ptr_escape(k));
        let day: DayCode = k.parse().map_err(|e| json_err(base.clone(), format!("{e}")))?;
        if days.iter().any(|(d, _)| *d == day) {
            return Err(json_err(base, format!("day {day} appears more than once")));
        }
        let rows: Vec<CollectionRowWire> = serde_json::from_value(v.clone())
            .map_err(|e| json_err(base.clone(), e.to_string()))?;
        days.push((day, day_feed_from_rows(&base, rows)?));
    }
    Ok(CollectionsFeed { days })
}

fn day_feed_from_rows(base: &str, rows: Vec<CollectionRowWire>) -> IoResult<DayFeed> {
    let mut out = Vec::with_capacity(rows.len());
    for (ri, r) in rows.into_iter().enumerate() {
        let movie_code: MovieCode = r
            .movie_code
            .parse()
            .map_err(|e| json_err(format!("{base}/{ri}/movieCode"), format!("{e}: {:?}", r.movie_code)))?;
        let figures = figures_from_wire(&format!("{base}/{ri}/collections"), &r.collections)?;
        out.push(MovieFigures { movie_code, figures });
    }
    Ok(DayFeed { rows: out })
}

fn figures_from_wire(base: &str, m: &Map<String, Value>) -> IoResult<Vec<(TownName, Figure)>> {
    let mut out = Vec::with_capacity(m.len());
    for (t, v) in m {
        let ptr = format!("{base}/{}", ptr_escape(t));
        let town: TownName = t.parse().map_err(|e| json_err(ptr.clone(), format!("{e}: {t:?}")))?;
        let fig: Figure = match v {
            Value::Null => None,
            Value::Number(n) => {
                let x = n.as_f64().ok_or_else(|| json_err(ptr.clone(), "number out of range"))?;
                if !x.is_finite() || x < 0.0 {
                    return Err(IoError::Invalid(format!("{ptr}: collection must be a non-negative amount (got {x})")));
                }
                Some(x)
            }
            _ => return Err(json_err(ptr, "expected a number or null")),
        };
        out.push((town, fig));
    }
    Ok(out)
}

// ----------------------------- Files -----------------------------

/// Read a feed file, refusing anything over `MAX_FEED_BYTES`.
pub async fn read_feed_bytes(path: &Path) -> IoResult<Vec<u8>> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if meta.len() > MAX_FEED_BYTES {
        return Err(IoError::Invalid(format!(
            "{}: feed is {} bytes (limit {MAX_FEED_BYTES})",
            path.display(),
            meta.len()
        )));
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}

// ----------------------------- Helpers -----------------------------

fn json_err(pointer: impl Into<String>, msg: impl Into<String>) -> IoError {
    IoError::Json { pointer: pointer.into(), msg: msg.into() }
}

/// RFC 6901 token escaping.
fn ptr_escape(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
