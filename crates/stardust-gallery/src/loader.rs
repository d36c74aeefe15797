//! Catalog loading with explicit loading / ready / failed states.

use thiserror::Error;
use tracing::{error, info};

use stardust_platform::ProjectSource;

use crate::model::ProjectCatalog;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to fetch project data: {0}")]
    Fetch(String),
    #[error("failed to parse project data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the gallery panel shows. An error replaces the whole grid; there is
/// never a partial render.
#[derive(Debug, Clone)]
pub enum GalleryState {
    Loading,
    Ready(ProjectCatalog),
    Failed(String),
}

pub fn load_catalog(source: &dyn ProjectSource) -> Result<ProjectCatalog, GalleryError> {
    let text = source
        .fetch()
        .map_err(|err| GalleryError::Fetch(err.to_string()))?;
    let catalog: ProjectCatalog = serde_json::from_str(&text)?;
    info!(projects = catalog.projects.len(), "project catalog loaded");
    Ok(catalog)
}

/// State-machine form consumed by the UI.
pub fn fetch_state(source: &dyn ProjectSource) -> GalleryState {
    match load_catalog(source) {
        Ok(catalog) => GalleryState::Ready(catalog),
        Err(err) => {
            error!("gallery load failed: {err}");
            GalleryState::Failed(err.to_string())
        }
    }
}
