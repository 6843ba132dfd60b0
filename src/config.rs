use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Settings read from `config.ron` in the user configuration directory.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retries: usize,
    pub timeout_secs: u64,
    pub cache: Option<PathBuf>,
}

impl Config {
    pub async fn load() -> Result<Self, anywho::Error> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };

        if !fs::try_exists(&path).await? {
            log::debug!("No configuration found at {}", path.display());
            return Ok(Self::default());
        }

        log::info!("Loading configuration: {}", path.display());

        Self::parse(&fs::read_to_string(path).await?)
    }

    pub fn parse(contents: &str) -> Result<Self, anywho::Error> {
        Ok(ron::from_str(contents)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retries: 2,
            timeout_secs: 3,
            cache: dirs::cache_dir().map(|cache| cache.join("dexter")),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("dexter").join("config.ron"))
}
