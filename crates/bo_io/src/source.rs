//! Collection data source boundary.
//!
//! The engine never talks to a transport directly: it pulls the catalog and raw
//! per-day figures through `CollectionSource`, then aggregates locally.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bo_core::{CollectionsFeed, DayCode, DayFeed, Hero, TerritoryMap};

use crate::loader::{self, COLLECTIONS_FILE, HEROES_FILE, TOWNS_FILE};
use crate::{IoError, IoResult};

/// Supplier of heroes, territories and raw collections.
///
/// Implementations must be `Send + Sync`; the two catalog fetches are issued
/// concurrently.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Heroes with their movies, in feed order.
    async fn fetch_heroes_with_movies(&self) -> IoResult<Vec<Hero>>;

    /// Territory key → ordered towns, in feed order.
    async fn fetch_towns_by_territory(&self) -> IoResult<TerritoryMap>;

    /// Raw per-(movie, town) figures for one checkpoint.
    /// `Ok(None)` when the checkpoint has no data.
    async fn fetch_collections(&self, day: &DayCode) -> IoResult<Option<DayFeed>>;
}

/* ---------------------------------- Files ---------------------------------- */

/// Directory holding `heroes.json`, `towns_by_territory.json` and
/// `collections.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of the three feeds, in load order.
    pub fn feed_paths(&self) -> [PathBuf; 3] {
        [
            self.root.join(HEROES_FILE),
            self.root.join(TOWNS_FILE),
            self.root.join(COLLECTIONS_FILE),
        ]
    }
}

#[async_trait]
impl CollectionSource for FileSource {
    async fn fetch_heroes_with_movies(&self) -> IoResult<Vec<Hero>> {
        let path = self.root.join(HEROES_FILE);
        let bytes = loader::read_feed_bytes(&path).await?;
        let heroes = loader::parse_heroes(&bytes).map_err(|e| at_file(&path, e))?;
        log::debug!("loaded {} heroes from {}", heroes.len(), path.display());
        Ok(heroes)
    }

    async fn fetch_towns_by_territory(&self) -> IoResult<TerritoryMap> {
        let path = self.root.join(TOWNS_FILE);
        let bytes = loader::read_feed_bytes(&path).await?;
        let map = loader::parse_territories(&bytes).map_err(|e| at_file(&path, e))?;
        log::debug!("loaded {} territories from {}", map.len(), path.display());
        Ok(map)
    }

    async fn fetch_collections(&self, day: &DayCode) -> IoResult<Option<DayFeed>> {
        let path = self.root.join(COLLECTIONS_FILE);
        let bytes = loader::read_feed_bytes(&path).await?;
        let mut feed = loader::parse_collections(&bytes).map_err(|e| at_file(&path, e))?;
        let found = feed
            .days
            .iter()
            .position(|(d, _)| d == day)
            .map(|i| feed.days.swap_remove(i).1);
        if found.is_none() {
            log::info!("no collections recorded for {day} in {}", path.display());
        }
        Ok(found)
    }
}

fn at_file(path: &Path, e: IoError) -> IoError {
    match e {
        IoError::Json { pointer, msg } => IoError::Json {
            pointer,
            msg: format!("{}: {msg}", path.display()),
        },
        IoError::Invalid(msg) => IoError::Invalid(format!("{}: {msg}", path.display())),
        other => other,
    }
}

/* --------------------------------- Memory --------------------------------- */

/// In-memory source for tests and embedding. Clones share state.
#[derive(Clone, Default)]
pub struct MemorySource {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    heroes: Vec<Hero>,
    territories: TerritoryMap,
    collections: CollectionsFeed,
    /// When set, every fetch fails with this message.
    outage: Option<String>,
}

impl MemorySource {
    pub fn new(heroes: Vec<Hero>, territories: TerritoryMap, collections: CollectionsFeed) -> Self {
        Self {
            data: Arc::new(RwLock::new(MemoryData {
                heroes,
                territories,
                collections,
                outage: None,
            })),
        }
    }

    /// Replace one day's feed (or add it).
    pub fn put_day(&self, day: DayCode, feed: DayFeed) -> IoResult<()> {
        let mut d = self.write()?;
        match d.collections.days.iter_mut().find(|(k, _)| *k == day) {
            Some((_, f)) => *f = feed,
            None => d.collections.days.push((day, feed)),
        }
        Ok(())
    }

    /// Simulate the data service going away (`Some`) or coming back (`None`).
    pub fn set_outage(&self, reason: Option<&str>) -> IoResult<()> {
        self.write()?.outage = reason.map(str::to_owned);
        Ok(())
    }

    fn read(&self) -> IoResult<std::sync::RwLockReadGuard<'_, MemoryData>> {
        let d = self
            .data
            .read()
            .map_err(|_| IoError::Path("memory source lock poisoned".into()))?;
        if let Some(reason) = &d.outage {
            return Err(IoError::Path(format!("source unavailable: {reason}")));
        }
        Ok(d)
    }

    fn write(&self) -> IoResult<std::sync::RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| IoError::Path("memory source lock poisoned".into()))
    }
}

#[async_trait]
impl CollectionSource for MemorySource {
    async fn fetch_heroes_with_movies(&self) -> IoResult<Vec<Hero>> {
        Ok(self.read()?.heroes.clone())
    }

    async fn fetch_towns_by_territory(&self) -> IoResult<TerritoryMap> {
        Ok(self.read()?.territories.clone())
    }

    async fn fetch_collections(&self, day: &DayCode) -> IoResult<Option<DayFeed>> {
        Ok(self.read()?.collections.day(day).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEROES: &str = r#"[{"heroCode":"H1","heroName":"One","movies":[{"movieCode":"M1","title":"First"}]}]"#;
    const TOWNS: &str = r#"{"NIZAM":["Hyderabad"],"TAMIL_NADU":["Chennai"]}"#;
    const COLLECTIONS: &str = r#"{"DAY1":[{"movieCode":"M1","collections":{"Hyderabad":120.5}}]}"#;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HEROES_FILE), HEROES).unwrap();
        std::fs::write(dir.path().join(TOWNS_FILE), TOWNS).unwrap();
        std::fs::write(dir.path().join(COLLECTIONS_FILE), COLLECTIONS).unwrap();
        dir
    }

    #[tokio::test]
    async fn file_source_reads_all_three_feeds() {
        let dir = data_dir();
        let src = FileSource::new(dir.path());

        let heroes = src.fetch_heroes_with_movies().await.unwrap();
        assert_eq!(heroes[0].movies[0].title, "First");

        let towns = src.fetch_towns_by_territory().await.unwrap();
        assert_eq!(towns.len(), 2);

        let d1 = src.fetch_collections(&DayCode::Day1).await.unwrap().unwrap();
        assert_eq!(d1.rows.len(), 1);
        assert!(src.fetch_collections(&DayCode::Closing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_source_names_the_broken_file() {
        let dir = data_dir();
        std::fs::write(dir.path().join(TOWNS_FILE), r#"{"NIZAM":"Hyderabad"}"#).unwrap();
        let err = FileSource::new(dir.path()).fetch_towns_by_territory().await.unwrap_err();
        match err {
            IoError::Json { pointer, msg } => {
                assert_eq!(pointer, "/NIZAM");
                assert!(msg.contains(TOWNS_FILE));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn memory_source_outage_and_updates() {
        let src = MemorySource::default();
        assert!(src.fetch_collections(&DayCode::Day2).await.unwrap().is_none());

        src.put_day(DayCode::Day2, DayFeed::default()).unwrap();
        assert!(src.fetch_collections(&DayCode::Day2).await.unwrap().is_some());

        src.set_outage(Some("maintenance")).unwrap();
        assert!(src.fetch_heroes_with_movies().await.is_err());
        src.set_outage(None).unwrap();
        assert!(src.fetch_heroes_with_movies().await.unwrap().is_empty());
    }
}
