//! Project gallery: catalog model, loading states, and queries.

pub mod loader;
pub mod model;
pub mod source;

pub use loader::{fetch_state, load_catalog, GalleryError, GalleryState};
pub use model::{
    BadgeKind, Project, ProjectCatalog, ProjectLinks, ProjectStat, ProjectStatus, StatusKind,
    Technology,
};
pub use source::{FsProjectSource, StaticProjectSource};
