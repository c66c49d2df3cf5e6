//! Comparison matrix (deterministic; order-independent totals).
//!
//! Contract:
//! - Movie codes are de-duplicated, first occurrence kept; duplicates never
//!   double-count.
//! - Each (movie, town) cell is looked up once; an unresolved lookup stays
//!   absent, never zero.
//! - Total = sum of present cells; a movie with no present cell totals `0.0`.
//! - Town maximum = largest present cell across movies; an all-absent town has
//!   none. A cell is "highest" only if it equals the maximum and the maximum
//!   is strictly positive.
//! - Winner = strictly greatest total. Ties go to the movie that appears first
//!   in the input list.

use bo_core::amount::{max_present, sum_present};
use bo_core::determinism::dedup_first;

use crate::{Figure, Lakhs, MovieCode, TownName, ValidationError};

/// Source of raw figures for the matrix.
pub trait FigureLookup {
    fn figure(&self, movie: &MovieCode, town: &TownName) -> Figure;
}

/// Adapter for closures.
pub struct LookupFn<F>(pub F);

impl<F> FigureLookup for LookupFn<F>
where
    F: Fn(&MovieCode, &TownName) -> Figure,
{
    #[inline]
    fn figure(&self, movie: &MovieCode, town: &TownName) -> Figure {
        (self.0)(movie, town)
    }
}

impl FigureLookup for bo_core::DayFeed {
    #[inline]
    fn figure(&self, movie: &MovieCode, town: &TownName) -> Figure {
        bo_core::DayFeed::figure(self, movie, town)
    }
}

/// One movie's row of cells (parallel to `Comparison::towns`) and its total.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieColumn {
    pub movie_code: MovieCode,
    pub cells: Vec<Figure>,
    pub total: Lakhs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub towns: Vec<TownName>,
    pub columns: Vec<MovieColumn>,
    /// Per town (parallel to `towns`): largest present figure.
    pub town_max: Vec<Figure>,
    /// Index into `columns`.
    pub winner: usize,
    /// True iff another movie shares the winning total.
    pub winner_tied: bool,
}

impl Comparison {
    pub fn winner(&self) -> &MovieColumn {
        &self.columns[self.winner]
    }

    pub fn column(&self, movie: &MovieCode) -> Option<&MovieColumn> {
        self.columns.iter().find(|c| &c.movie_code == movie)
    }

    fn town_index(&self, town: &TownName) -> Option<usize> {
        self.towns.iter().position(|t| t == town)
    }

    /// Cell value; absent for unknown movie or town.
    pub fn collection(&self, movie: &MovieCode, town: &TownName) -> Figure {
        let ti = self.town_index(town)?;
        self.column(movie).and_then(|c| c.cells[ti])
    }

    pub fn highest_in(&self, town: &TownName) -> Figure {
        self.town_index(town).and_then(|ti| self.town_max[ti])
    }

    /// Highlight rule for cell (`movie_idx`, `town_idx`).
    pub fn is_highest(&self, movie_idx: usize, town_idx: usize) -> bool {
        let cell = self.columns.get(movie_idx).and_then(|c| c.cells.get(town_idx)).copied().flatten();
        let max = self.town_max.get(town_idx).copied().flatten();
        match (cell, max) {
            (Some(v), Some(m)) => v == m && m > 0.0,
            _ => false,
        }
    }

    /// Per-town mapping of one column.
    pub fn collections<'a>(&'a self, col: &'a MovieColumn) -> impl Iterator<Item = (&'a TownName, Figure)> + 'a {
        self.towns.iter().zip(col.cells.iter().copied())
    }
}

/// Build the comparison matrix for `movie_codes` × `towns`.
pub fn compare<L>(
    movie_codes: &[MovieCode],
    towns: &[TownName],
    figures: &L,
) -> Result<Comparison, ValidationError>
where
    L: FigureLookup + ?Sized,
{
    let movies = dedup_first(movie_codes);
    if movies.is_empty() {
        return Err(ValidationError::NoMoviesSelected);
    }

    let columns: Vec<MovieColumn> = movies
        .into_iter()
        .map(|movie_code| {
            let cells: Vec<Figure> = towns.iter().map(|t| figures.figure(&movie_code, t)).collect();
            let total = sum_present(cells.iter().copied());
            MovieColumn { movie_code, cells, total }
        })
        .collect();

    let town_max: Vec<Figure> = (0..towns.len())
        .map(|ti| max_present(columns.iter().map(|c| c.cells[ti])))
        .collect();

    let (winner, winner_tied) = pick_winner(&columns);

    Ok(Comparison {
        towns: towns.to_vec(),
        columns,
        town_max,
        winner,
        winner_tied,
    })
}

/// First index holding the greatest total, plus whether any later column ties it.
fn pick_winner(columns: &[MovieColumn]) -> (usize, bool) {
    let mut best = 0usize;
    for (i, c) in columns.iter().enumerate().skip(1) {
        if c.total > columns[best].total {
            best = i;
        }
    }
    let top = columns[best].total;
    let tied = columns.iter().enumerate().any(|(i, c)| i != best && c.total == top);
    (best, tied)
}


#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn cell() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (0u32..100_000).prop_map(|c| Some(f64::from(c) / 100.0))]
    }

    fn matrix() -> impl Strategy<Value = (usize, usize, Vec<Option<f64>>)> {
        (1usize..6, 0usize..8).prop_flat_map(|(m, t)| {
            (Just(m), Just(t), proptest::collection::vec(cell(), m * t))
        })
    }

    fn fixture(m: usize, t: usize) -> (Vec<MovieCode>, Vec<TownName>) {
        let movies = (0..m).map(|i| format!("M{i}").parse().unwrap()).collect();
        let towns = (0..t).map(|i| format!("Town {i}").parse().unwrap()).collect();
        (movies, towns)
    }

    fn cell_at(cells: &[Option<f64>], t: usize, movie: &MovieCode, town: &TownName) -> Figure {
        let mi: usize = movie.as_str()[1..].parse().unwrap();
        let ti: usize = town.as_str()[5..].parse().unwrap();
        cells[mi * t + ti]
    }

    proptest! {
        #[test]
        fn totals_are_sums_of_present_cells_and_ignore_town_order(
            (m, t, cells) in matrix(),
            seed in any::<u64>(),
        ) {
            let (movies, towns) = fixture(m, t);
            let look = LookupFn(|mv: &MovieCode, tw: &TownName| cell_at(&cells, t, mv, tw));

            let a = compare(&movies, &towns, &look).unwrap();

            let mut shuffled = towns.clone();
            if !shuffled.is_empty() {
                let k = (seed % shuffled.len() as u64) as usize;
                shuffled.rotate_left(k);
                shuffled.reverse();
            }
            let b = compare(&movies, &shuffled, &look).unwrap();

            for (mi, col) in a.columns.iter().enumerate() {
                let expected = bo_core::amount::sum_present((0..t).map(|ti| cells[mi * t + ti]));
                prop_assert_eq!(col.total.to_bits(), expected.to_bits());
                prop_assert_eq!(col.total.to_bits(), b.columns[mi].total.to_bits());
            }
            prop_assert_eq!(a.winner, b.winner);
        }

        #[test]
        fn winner_has_the_greatest_total_and_no_earlier_tie(
            (m, t, cells) in matrix(),
        ) {
            let (movies, towns) = fixture(m, t);
            let look = LookupFn(|mv: &MovieCode, tw: &TownName| cell_at(&cells, t, mv, tw));
            let cmp = compare(&movies, &towns, &look).unwrap();
            let w = cmp.winner().total;
            prop_assert!(cmp.columns.iter().all(|c| c.total <= w));
            prop_assert!(cmp.columns[..cmp.winner].iter().all(|c| c.total < w));
        }
    }
}
