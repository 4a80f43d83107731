use crate::output::print_json;
use review_core::store::LogStore;
use review_core::{comment, paths, rating};
use std::path::Path;

use super::{format_mean, Project};

pub fn run(root: &Path, id: &str, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    paths::validate_proposal_id(id)?;
    let project = Project::open(root)?;
    let proposal = project.proposal(root, id)?;
    let log = project.store.load(id)?;

    let ratings = rating::reconcile(&log);
    let comments = comment::reconcile(&log);
    let items = comments.for_viewer(user);

    if json {
        return print_json(&serde_json::json!({
            "proposal": proposal,
            "ratings": ratings,
            "viewer_rating": user.and_then(|u| ratings.rating_by(u)),
            "comments": items,
        }));
    }

    println!("{}: {}", proposal.student.display_name, proposal.title);
    if !proposal.summary.is_empty() {
        println!("{}", proposal.summary);
    }
    if let Some(url) = proposal.proposal_url() {
        println!("  proposal: {url}");
    }
    match proposal.pdf_url() {
        Some(url) => println!("  pdf:      {url}"),
        None => println!("  pdf:      unavailable"),
    }

    println!();
    if ratings.is_empty() {
        println!("No ratings yet.");
    } else {
        println!(
            "Mean {} from {} rating(s): {}",
            format_mean(ratings.mean),
            ratings.len(),
            ratings.summary()
        );
    }

    println!();
    if items.is_empty() {
        println!("No comments.");
    }
    for item in &items {
        let marker = if item.removable { "  (removable)" } else { "" };
        println!("{}: {}{marker}", item.comment.author, item.comment.text);
    }
    Ok(())
}
