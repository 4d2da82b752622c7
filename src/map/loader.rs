use std::{future::Future, sync::Arc};

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::library::MapAssets;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to load {url}: {reason}")]
    Asset { url: String, reason: String },
}

/// Puts the map library's assets into the page
pub trait AssetInjector {
    type Library;

    /// The library if something already put it in the page
    fn existing(&self) -> Option<Self::Library>;
    fn inject_stylesheet(&self, href: &str) -> impl Future<Output = Result<(), LoadError>> + Send;
    fn inject_script(
        &self,
        src: &str,
    ) -> impl Future<Output = Result<Self::Library, LoadError>> + Send;
}

/// Loads the map library once and hands the same handle to every caller.
/// Concurrent callers wait on the load already in flight. A failed load is not
/// remembered, so the next caller tries again.
pub struct MapLoader<I: AssetInjector> {
    injector: I,
    assets: MapAssets,
    library: OnceCell<Arc<I::Library>>,
}

impl<I: AssetInjector> MapLoader<I> {
    pub fn new(injector: I, assets: MapAssets) -> Self {
        Self {
            injector,
            assets,
            library: OnceCell::new(),
        }
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn loaded(&self) -> Option<Arc<I::Library>> {
        self.library.get().cloned()
    }

    #[instrument(skip(self), fields(script = %self.assets.script_url))]
    pub async fn ensure_loaded(&self) -> Result<Arc<I::Library>, LoadError> {
        self.library
            .get_or_try_init(|| async {
                if let Some(library) = self.injector.existing() {
                    debug!("map library already present");
                    return Ok::<_, LoadError>(Arc::new(library));
                }
                info!("injecting map library assets");
                self.injector
                    .inject_stylesheet(&self.assets.stylesheet_url)
                    .await?;
                let library = self.injector.inject_script(&self.assets.script_url).await?;
                info!("map library loaded");
                Ok::<_, LoadError>(Arc::new(library))
            })
            .await
            .map(Arc::clone)
    }
}
