//! Board assembly: group proposals, attach reconciled views, order them.

use crate::action::ActionLog;
use crate::comment::{self, CommentItem};
use crate::order::{ProposalOrderCache, SortKey};
use crate::proposal::Proposal;
use crate::rating::{self, RatingView};
use crate::store::LogMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket for proposals without a subcategory.
pub const OTHER_GROUP: &str = "other";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProposalCard {
    pub proposal: Proposal,
    pub ratings: RatingView,
    /// The viewer's own current score.
    pub viewer_rating: Option<f64>,
    pub comments: Vec<CommentItem>,
    pub sort_key: SortKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalGroup {
    pub name: String,
    pub proposals: Vec<ProposalCard>,
}

impl ProposalGroup {
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// The group a proposal is listed under. Subcategories are taken verbatim;
/// a missing or empty one, or a literal `other`, lands in [`OTHER_GROUP`].
pub fn group_name(proposal: &Proposal) -> &str {
    match proposal.subcategory.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => OTHER_GROUP,
    }
}

/// Reconcile one proposal's log into a card for `viewer`.
pub fn card(proposal: &Proposal, log: &ActionLog, sort_key: SortKey, viewer: Option<&str>) -> ProposalCard {
    let ratings = rating::reconcile(log);
    let comments = comment::reconcile(log);
    ProposalCard {
        proposal: proposal.clone(),
        viewer_rating: viewer.and_then(|v| ratings.rating_by(v)),
        comments: comments.for_viewer(viewer),
        ratings,
        sort_key,
    }
}

/// Group `proposals` by subcategory (groups in name order) and order each
/// group by frozen sort key. The sort is stable, so equal keys keep input
/// order. Proposals with no log are treated as having an empty one.
pub fn aggregate(
    proposals: &[Proposal],
    logs: &LogMap,
    cache: &ProposalOrderCache,
    viewer: Option<&str>,
) -> Vec<ProposalGroup> {
    let empty = ActionLog::new();
    let mut groups: BTreeMap<&str, Vec<ProposalCard>> = BTreeMap::new();

    for proposal in proposals {
        let log = logs.get(&proposal.id).unwrap_or(&empty);
        let key = cache.key_for(&proposal.id, log);
        groups
            .entry(group_name(proposal))
            .or_default()
            .push(card(proposal, log, key, viewer));
    }

    groups
        .into_iter()
        .map(|(name, mut cards)| {
            cards.sort_by_key(|c| c.sort_key);
            ProposalGroup {
                name: name.to_string(),
                proposals: cards,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
