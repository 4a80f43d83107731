use review_core::config::Config;
use review_core::order::ProposalOrderCache;
use review_core::store::{FileLogStore, LogStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub store: Arc<dyn LogStore>,
    /// Board ordering for this server process. Reset via `POST /api/board/reload`.
    pub order: Arc<ProposalOrderCache>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config, store: Arc<dyn LogStore>) -> Self {
        Self {
            root,
            config: Arc::new(config),
            store,
            order: Arc::new(ProposalOrderCache::new()),
        }
    }

    /// Read `.review/config.yaml` under `root` and open the configured data file.
    pub fn load(root: PathBuf) -> review_core::Result<Self> {
        let config = Config::load(&root)?;
        let store = Arc::new(FileLogStore::new(config.data_path(&root)));
        Ok(Self::new(root, config, store))
    }

    pub fn proposals_path(&self) -> PathBuf {
        self.config.proposals_path(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_core::store::MemoryLogStore;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(
            PathBuf::from("/tmp/test"),
            Config::new("test"),
            Arc::new(MemoryLogStore::new()),
        );
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
        assert_eq!(
            state.proposals_path(),
            PathBuf::from("/tmp/test/.review/proposals.json")
        );
        assert!(state.order.is_empty());
    }

    #[test]
    fn load_requires_init() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            AppState::load(dir.path().to_path_buf()),
            Err(review_core::ReviewError::NotInitialized)
        ));
    }
}
