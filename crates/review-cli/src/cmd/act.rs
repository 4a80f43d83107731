use crate::output::print_json;
use anyhow::bail;
use review_core::action::ActionRecord;
use review_core::identity::{require_user, FixedIdentity};
use review_core::store::LogStore;
use review_core::{comment, paths, rating};
use std::path::Path;

use super::{format_mean, Project};

/// One thing a reviewer can do to a proposal.
#[derive(Debug, Clone)]
pub enum Act {
    Rate(f64),
    Retract,
    Comment(String),
    Uncomment,
}

pub fn run(root: &Path, id: &str, user: Option<&str>, act: Act, json: bool) -> anyhow::Result<()> {
    let author = require_user(&FixedIdentity(user.map(str::to_string)))?;
    paths::validate_proposal_id(id)?;
    let project = Project::open(root)?;
    project.proposal(root, id)?;

    let current = project.store.load(id)?;
    let record = match act {
        Act::Rate(score) => {
            if !score.is_finite() {
                bail!("rating must be a finite number");
            }
            ActionRecord::rate(&author, score)
        }
        Act::Retract => {
            if rating::reconcile(&current).rating_by(&author).is_none() {
                bail!("'{author}' has no rating on {id} to retract");
            }
            ActionRecord::retract(&author)
        }
        Act::Comment(text) => {
            if text.trim().is_empty() {
                bail!("comment text is empty");
            }
            ActionRecord::comment(&author, text)
        }
        Act::Uncomment => {
            let view = comment::reconcile(&current);
            if !view.len().checked_sub(1).is_some_and(|last| view.is_removable(last, &author)) {
                bail!("only your own comment can be removed, and only while it is the latest on {id}");
            }
            ActionRecord::delete_comment(&author)
        }
    };

    let log = project.store.append(id, record)?;
    tracing::debug!(proposal = id, author = %author, len = log.len(), "appended action");

    if json {
        return print_json(&log);
    }

    let ratings = rating::reconcile(&log);
    let comments = comment::reconcile(&log);
    println!(
        "{id}: mean {} from {} rating(s), {} comment(s)",
        format_mean(ratings.mean),
        ratings.len(),
        comments.len()
    );
    Ok(())
}
