//! Data-driven combat content and loaders.
//!
//! This crate houses the shipped ability, item and monster catalogs and the
//! loaders that read them from RON/TOML data files:
//! - Ability catalogs (RON)
//! - Item catalogs (RON)
//! - Monster templates (RON), spawned through a [`Bestiary`]
//! - Combat balance configuration (TOML)
//!
//! The default catalogs are compiled in, so a runtime can start without a
//! data directory. Content never mutates combat state; it only builds it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityCatalog, AbilityLoader, Bestiary, ConfigLoader, ContentFactory, ItemCatalog,
    ItemLoader, LoadResult, MonsterCatalog, MonsterLoader, embedded,
};
