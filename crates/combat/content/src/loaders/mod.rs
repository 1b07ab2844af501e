//! Content loaders for reading combat data from files.
//!
//! Every loader has a `load(path)` entry point for data directories and a
//! `parse(text)` entry point shared with the compiled-in [`embedded`] content.

pub mod abilities;
pub mod bestiary;
pub mod config;
pub mod embedded;
pub mod factory;
pub mod items;
pub mod monsters;

pub use abilities::{AbilityCatalog, AbilityLoader};
pub use bestiary::Bestiary;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemLoader};
pub use monsters::{MonsterCatalog, MonsterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
