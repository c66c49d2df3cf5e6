//! On-wire shapes of the three feeds (camelCase, as the data service emits them).
//!
//! Object-keyed feeds are kept as `serde_json::Map` so their key order
//! (territory order, day order, town order) survives deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieWire {
    pub movie_code: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroWire {
    pub hero_code: String,
    #[serde(default)]
    pub hero_name: String,
    #[serde(default)]
    pub movies: Vec<MovieWire>,
}

/// `{"NIZAM": ["Hyderabad", ...], ...}`
pub type TownsByTerritoryWire = Map<String, Value>;

/// One movie's figures for a day: town → amount in lakhs, or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRowWire {
    pub movie_code: String,
    #[serde(default)]
    pub collections: Map<String, Value>,
}

/// `{"DAY1": [row, ...], ...}`
pub type CollectionsWire = Map<String, Value>;
