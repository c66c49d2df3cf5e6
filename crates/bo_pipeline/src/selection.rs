//! Selection state: which movies, which territory and towns, which day.
//!
//! The state is an immutable record; every user action produces a new record
//! through `SelectionState::apply`. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use bo_core::{
    Catalog, DayCode, HeroCode, MovieCode, TerritoryKey, TerritoryMap, TerritoryScope, TownName,
    ValidationError,
};

/// A user action on the selection form.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ToggleMovie(MovieCode),
    ToggleHeroGroup(HeroCode),
    /// Expand a hero's movie list; the same hero again collapses it.
    ExpandHero(HeroCode),
    SetTerritory(TerritoryScope),
    ToggleTown(TownName),
    SelectAllTowns,
    SetSearch(String),
    SetDayCode(DayCode),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SelectionState {
    /// Ordered, unique.
    pub movies: Vec<MovieCode>,
    pub territory: TerritoryScope,
    /// Ordered, unique. May hold towns from a previously chosen territory.
    pub towns: Vec<TownName>,
    pub search: String,
    pub expanded_hero: Option<HeroCode>,
    pub day_code: DayCode,
}

/// Normalized compare query handed to the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub movie_codes: Vec<MovieCode>,
    /// `None`: let the pipeline resolve its own default scope.
    pub towns: Option<Vec<TownName>>,
    /// `None` for all territories.
    pub territory: Option<TerritoryKey>,
    pub day_code: DayCode,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after `action`. `self` is left untouched.
    pub fn apply(&self, catalog: &Catalog, action: Action) -> SelectionState {
        let mut next = self.clone();
        match action {
            Action::ToggleMovie(code) => {
                if catalog.knows_movie(&code) {
                    toggle(&mut next.movies, code);
                }
            }
            Action::ToggleHeroGroup(hero) => {
                if let Some(h) = catalog.hero(&hero) {
                    let codes: Vec<MovieCode> = h.movie_codes().cloned().collect();
                    if !codes.is_empty() {
                        // Decided on the state before the batch.
                        let all_selected = codes.iter().all(|c| self.movies.contains(c));
                        if all_selected {
                            next.movies.retain(|m| !codes.contains(m));
                        } else {
                            for c in codes {
                                if !next.movies.contains(&c) {
                                    next.movies.push(c);
                                }
                            }
                        }
                    }
                }
            }
            Action::ExpandHero(hero) => {
                next.expanded_hero = match &self.expanded_hero {
                    Some(h) if *h == hero => None,
                    _ => Some(hero),
                };
            }
            Action::SetTerritory(scope) => next.territory = scope,
            Action::ToggleTown(town) => toggle(&mut next.towns, town),
            Action::SelectAllTowns => {
                let current = self.current_towns(&catalog.territories);
                let all_selected = current.iter().all(|t| self.towns.contains(t));
                next.towns = if all_selected { Vec::new() } else { current };
            }
            Action::SetSearch(text) => next.search = text,
            Action::SetDayCode(day) => next.day_code = day,
        }
        next
    }

    /// Town universe of the active scope.
    pub fn current_towns(&self, territories: &TerritoryMap) -> Vec<TownName> {
        territories.towns_in(&self.territory)
    }

    /// `current_towns` narrowed by the search text (case-insensitive substring).
    pub fn filtered_towns(&self, territories: &TerritoryMap) -> Vec<TownName> {
        filter_by_search(self.current_towns(territories), &self.search)
    }

    pub fn is_movie_selected(&self, code: &MovieCode) -> bool {
        self.movies.contains(code)
    }

    pub fn is_town_selected(&self, town: &TownName) -> bool {
        self.towns.contains(town)
    }

    pub fn build_request(&self) -> Result<CompareRequest, ValidationError> {
        if self.movies.is_empty() {
            return Err(ValidationError::NoMoviesSelected);
        }
        Ok(CompareRequest {
            movie_codes: self.movies.clone(),
            towns: (!self.towns.is_empty()).then(|| self.towns.clone()),
            territory: self.territory.key().cloned(),
            day_code: self.day_code.clone(),
        })
    }
}

/// Keep towns whose name contains `needle`, ignoring case. Blank keeps all.
pub fn filter_by_search(towns: Vec<TownName>, needle: &str) -> Vec<TownName> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return towns;
    }
    towns
        .into_iter()
        .filter(|t| t.as_str().to_lowercase().contains(&needle))
        .collect()
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, item: T) {
    match set.iter().position(|x| *x == item) {
        Some(i) => {
            set.remove(i);
        }
        None => set.push(item),
    }
}
