use crate::error::{Result, ReviewError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const REVIEW_DIR: &str = ".review";
pub const CONFIG_FILE: &str = ".review/config.yaml";
pub const PROPOSALS_FILE: &str = ".review/proposals.json";
pub const DATA_FILE: &str = ".review/data.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn review_dir(root: &Path) -> PathBuf {
    root.join(REVIEW_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured file path. Relative paths are taken from `root`.
pub fn resolve(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

// ---------------------------------------------------------------------------
// Proposal id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-]*$").unwrap())
}

/// Proposal ids appear in URLs; keep them to a safe alphabet.
pub fn validate_proposal_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 128 || !id_re().is_match(id) {
        return Err(ReviewError::InvalidProposalId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
