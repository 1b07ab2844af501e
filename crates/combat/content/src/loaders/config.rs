//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_overrides_only_given_keys() {
        let config = ConfigLoader::parse(
            r#"
            enemy_damage_percent = 100

            [flee]
            max_bp = 9500
            "#,
        )
        .unwrap();

        let defaults = CombatConfig::default();
        assert_eq!(config.enemy_damage_percent, 100);
        assert_eq!(config.flee.max_bp, 9_500);
        assert_eq!(config.flee.base_bp, defaults.flee.base_bp);
        assert_eq!(config.player_damage_percent, defaults.player_damage_percent);
        assert_eq!(config.parry, defaults.parry);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }
}
