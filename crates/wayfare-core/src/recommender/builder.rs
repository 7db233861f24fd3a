//! Builder for creating and configuring Recommender instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Recommender;
use crate::{
    db::Database,
    error::{Result, WayfareError},
    generation::Generator,
};

/// Builder for creating and configuring Recommender instances.
#[derive(Clone, Default)]
pub struct RecommenderBuilder {
    database_path: Option<PathBuf>,
    generator: Option<Arc<dyn Generator>>,
}

impl RecommenderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wayfare/wayfare.db` or `~/.local/share/wayfare/wayfare.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the service that produces city plans.
    ///
    /// Without one, every operation except
    /// [`recommend`](Recommender::recommend) works.
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Builds the configured recommender instance.
    ///
    /// # Errors
    ///
    /// Returns `WayfareError::FileSystem` if the database directory cannot be
    /// created and `WayfareError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Recommender> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WayfareError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(WayfareError::join)??;

        Ok(Recommender::new(db_path, self.generator))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wayfare")
            .place_data_file("wayfare.db")
            .map_err(|e| WayfareError::XdgDirectory(e.to_string()))
    }
}
