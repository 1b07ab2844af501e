//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use combat_content::{Bestiary, ContentFactory, embedded};
use combat_core::CombatConfig;
use tracing::debug;

use crate::api::{Result, RuntimeError};

/// Settings the runtime needs before it can start an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Base seed for every encounter of the session.
    pub seed: u64,
    /// Content directory; `None` uses the compiled-in content.
    pub data_dir: Option<PathBuf>,
    /// Log directory; `None` uses the platform cache directory.
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl RuntimeConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            data_dir: None,
            log_dir: None,
            session_id: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Base encounter seed (default: random)
    /// - `COMBAT_DATA_DIR` - Content directory (default: embedded content)
    /// - `COMBAT_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `COMBAT_SESSION_ID` - Session name for the log subdirectory
    pub fn from_env() -> Self {
        let seed = read_env::<u64>("COMBAT_SEED").unwrap_or_else(rand::random);
        let mut config = Self::new(seed);

        config.data_dir = read_env::<PathBuf>("COMBAT_DATA_DIR");
        config.log_dir = read_env::<PathBuf>("COMBAT_LOG_DIR");
        config.session_id = env::var("COMBAT_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        config
    }

    /// Balance settings and bestiary from `data_dir`, or the compiled-in
    /// content when no directory is configured.
    pub fn load_content(&self) -> Result<(CombatConfig, Bestiary)> {
        let loaded = match &self.data_dir {
            Some(dir) => {
                debug!(data_dir = %dir.display(), "loading content directory");
                let factory = ContentFactory::new(dir);
                factory
                    .load_config()
                    .and_then(|config| Ok((config, factory.load_bestiary()?)))
            }
            None => embedded::config().and_then(|config| Ok((config, embedded::bestiary()?))),
        };
        loaded.map_err(RuntimeError::Content)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
