pub mod act;
pub mod board;
pub mod init;
pub mod serve;
pub mod show;

use anyhow::Context;
use review_core::config::Config;
use review_core::proposal::{self, Proposal};
use review_core::store::FileLogStore;
use std::path::Path;

/// Loaded project: config plus the data store it points at.
pub struct Project {
    pub config: Config,
    pub store: FileLogStore,
}

impl Project {
    pub fn open(root: &Path) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load .review/config.yaml")?;
        let store = FileLogStore::new(config.data_path(root));
        Ok(Self { config, store })
    }

    /// Look up a proposal by id, including ignored ones.
    pub fn proposal(&self, root: &Path, id: &str) -> anyhow::Result<Proposal> {
        let all = proposal::load_all(&self.config.proposals_path(root))
            .context("failed to read proposals")?;
        all.into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| review_core::ReviewError::ProposalNotFound(id.to_string()).into())
    }
}

pub fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{m:.2}")).unwrap_or_else(|| "-".to_string())
}
