//! Last-write-wins rating reconciliation.

use crate::action::{Action, ActionLog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// RatingView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub author: String,
    pub score: f64,
}

/// Current ratings of one proposal: at most one entry per author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingView {
    pub entries: Vec<RatingEntry>,
    /// `None` means "no rating yet". Never read it as zero.
    pub mean: Option<f64>,
}

impl RatingView {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The viewer's current score, if they have one.
    pub fn rating_by(&self, viewer: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.author == viewer)
            .map(|e| e.score)
    }

    /// `"alice (4), bob (5)"`, the tooltip shown next to the mean.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} ({})", e.author, e.score))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Reduce a log to each author's latest rating.
///
/// Scans newest-first and keeps the first rating-bearing record per author;
/// authors whose kept record is a retraction drop out. Entries come out
/// most-recent-first.
pub fn reconcile(log: &ActionLog) -> RatingView {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for record in log.records().iter().rev() {
        if !record.action.is_rating() || !seen.insert(record.author.as_str()) {
            continue;
        }
        if let Action::SetRating { score } = record.action {
            entries.push(RatingEntry {
                author: record.author.clone(),
                score,
            });
        }
    }

    let mean = mean(&entries);
    RatingView { entries, mean }
}

/// Shorthand for `reconcile(log).mean`.
pub fn mean_rating(log: &ActionLog) -> Option<f64> {
    reconcile(log).mean
}

fn mean(entries: &[RatingEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|e| e.score).sum();
    Some(total / entries.len() as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
