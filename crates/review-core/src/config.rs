use crate::error::{Result, ReviewError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Request header carrying the viewer identity, set by the fronting proxy.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
    /// Identity used when the header is absent. Leave unset in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

fn default_identity_header() -> String {
    "x-remote-user".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
            default_user: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default = "default_proposals_file")]
    pub proposals_file: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

fn default_proposals_file() -> String {
    paths::PROPOSALS_FILE.to_string()
}

fn default_data_file() -> String {
    paths::DATA_FILE.to_string()
}

impl Config {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            name: name.into(),
            proposals_file: default_proposals_file(),
            data_file: default_data_file(),
            server: ServerConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ReviewError::NotInitialized);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), content.as_bytes())
    }

    pub fn proposals_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.proposals_file)
    }

    pub fn data_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.data_file)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_not_initialized() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ReviewError::NotInitialized)
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::new("gsoc-2017");
        config.server.default_user = Some("mentor".to_string());
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn minimal_yaml_gets_defaults() {
        let config: Config = serde_yaml::from_str("name: board\n").unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.proposals_file, ".review/proposals.json");
        assert_eq!(config.data_file, ".review/data.json");
        assert_eq!(config.server.identity_header, "x-remote-user");
        assert!(config.server.default_user.is_none());
    }

    #[test]
    fn data_path_resolves_against_root() {
        let config = Config::new("board");
        assert_eq!(
            config.data_path(Path::new("/srv/board")),
            PathBuf::from("/srv/board/.review/data.json")
        );
    }
}
