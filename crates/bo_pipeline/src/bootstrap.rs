//! Catalog bootstrap: heroes and territories are fetched concurrently and
//! joined before the selection form can offer towns.

use bo_core::{Catalog, TownName};
use bo_io::CollectionSource;

use crate::selection::SelectionState;
use crate::{unavailable, PipelineError};

/// Whether the catalog has arrived yet.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Session {
    #[default]
    Loading,
    Ready(Catalog),
}

impl Session {
    /// Bootstrap a session from `source`.
    pub async fn open(source: &dyn CollectionSource) -> Result<Session, PipelineError> {
        load_catalog(source).await.map(Session::Ready)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Session::Ready(_))
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            Session::Loading => None,
            Session::Ready(c) => Some(c),
        }
    }

    /// Towns available to `selection`; `None` while loading.
    pub fn current_towns(&self, selection: &SelectionState) -> Option<Vec<TownName>> {
        self.catalog().map(|c| selection.current_towns(&c.territories))
    }
}

/// Fetch heroes and territories concurrently. An empty heroes list or an
/// empty territory map means the service has nothing to offer yet.
pub async fn load_catalog(source: &dyn CollectionSource) -> Result<Catalog, PipelineError> {
    let (heroes, territories) = tokio::try_join!(
        async {
            source
                .fetch_heroes_with_movies()
                .await
                .map_err(|e| unavailable("heroes", e))
        },
        async {
            source
                .fetch_towns_by_territory()
                .await
                .map_err(|e| unavailable("territories", e))
        },
    )?;

    if heroes.is_empty() {
        return Err(PipelineError::DataUnavailable("no heroes available".into()));
    }
    if territories.is_empty() {
        return Err(PipelineError::DataUnavailable("no territories available".into()));
    }

    log::info!(
        "catalog ready: {} heroes, {} movies, {} territories, {} towns",
        heroes.len(),
        heroes.iter().map(|h| h.movies.len()).sum::<usize>(),
        territories.len(),
        territories.all_towns().len()
    );
    Ok(Catalog { heroes, territories })
}
