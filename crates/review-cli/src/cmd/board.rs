use crate::output::{print_json, print_table};
use anyhow::Context;
use review_core::aggregate::aggregate;
use review_core::order::ProposalOrderCache;
use review_core::proposal;
use review_core::store::LogStore;
use std::path::Path;

use super::{format_mean, Project};

/// Print every visible proposal, grouped by subcategory and ordered by mean
/// rating as of this invocation.
pub fn run(root: &Path, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let project = Project::open(root)?;
    let proposals = proposal::load_visible(&project.config.proposals_path(root))
        .context("failed to read proposals")?;
    let logs = project.store.load_all().context("failed to read action logs")?;
    tracing::debug!(proposals = proposals.len(), logs = logs.len(), "building board");

    let order = ProposalOrderCache::new();
    let groups = aggregate(&proposals, &logs, &order, user);

    if json {
        return print_json(&groups);
    }

    if groups.is_empty() {
        println!("No proposals.");
        return Ok(());
    }

    for group in &groups {
        println!("Proposals for {} ({})", group.name, group.len());
        let rows = group
            .proposals
            .iter()
            .map(|card| {
                vec![
                    card.proposal.id.clone(),
                    card.proposal.student.display_name.clone(),
                    card.proposal.title.clone(),
                    format_mean(card.ratings.mean),
                    card.ratings.len().to_string(),
                    card.comments.len().to_string(),
                    card.viewer_rating
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        print_table(
            &["ID", "STUDENT", "TITLE", "MEAN", "RATINGS", "COMMENTS", "YOURS"],
            rows,
        );
        println!();
    }
    Ok(())
}
