use crate::action::{Action, ActionLog};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LiveComment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveComment {
    pub author: String,
    pub text: String,
    /// Arrival index of the originating record in the log.
    pub position: usize,
}

// ---------------------------------------------------------------------------
// CommentView
// ---------------------------------------------------------------------------

/// Live comments of one proposal in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub comments: Vec<LiveComment>,
}

/// A live comment annotated for a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItem {
    #[serde(flatten)]
    pub comment: LiveComment,
    pub removable: bool,
}

impl CommentView {
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn last(&self) -> Option<&LiveComment> {
        self.comments.last()
    }

    /// Whether `viewer` may remove the comment at `index`. Only the last live
    /// comment is ever removable, and only by its author.
    pub fn is_removable(&self, index: usize, viewer: &str) -> bool {
        index + 1 == self.comments.len() && self.comments[index].author == viewer
    }

    /// Annotate every comment with removability for `viewer`. An anonymous
    /// viewer can remove nothing.
    pub fn for_viewer(&self, viewer: Option<&str>) -> Vec<CommentItem> {
        self.comments
            .iter()
            .enumerate()
            .map(|(i, c)| CommentItem {
                comment: c.clone(),
                removable: viewer.is_some_and(|v| self.is_removable(i, v)),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Replay a log into its live comment list.
///
/// A delete removes the tail of the live list, and only when the tail was
/// written by the deleting author. A delete aimed at an older comment, or
/// arriving while the list is empty, does nothing.
pub fn reconcile(log: &ActionLog) -> CommentView {
    let mut live: Vec<LiveComment> = Vec::new();

    for (position, record) in log.iter().enumerate() {
        match &record.action {
            Action::AddComment { text } => live.push(LiveComment {
                author: record.author.clone(),
                text: text.clone(),
                position,
            }),
            Action::DeleteComment => {
                if live.last().is_some_and(|tail| tail.author == record.author) {
                    live.pop();
                }
            }
            Action::SetRating { .. } | Action::RetractRating => {}
        }
    }

    CommentView { comments: live }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRecord;

    fn log(records: Vec<ActionRecord>) -> ActionLog {
        records.into()
    }

    fn texts(view: &CommentView) -> Vec<(&str, &str)> {
        view.comments
            .iter()
            .map(|c| (c.author.as_str(), c.text.as_str()))
            .collect()
    }

    #[test]
    fn empty_log_has_no_comments() {
        assert!(reconcile(&ActionLog::new()).is_empty());
    }

    #[test]
    fn author_deletes_own_tail_comment() {
        let view = reconcile(&log(vec![
            ActionRecord::comment("a", "hi"),
            ActionRecord::delete_comment("a"),
        ]));
        assert!(view.is_empty());
    }

    #[test]
    fn delete_behind_someone_elses_comment_is_noop() {
        let view = reconcile(&log(vec![
            ActionRecord::comment("a", "hi"),
            ActionRecord::comment("b", "yo"),
            ActionRecord::delete_comment("a"),
        ]));
        assert_eq!(texts(&view), vec![("a", "hi"), ("b", "yo")]);
    }

    #[test]
    fn delete_on_empty_list_is_noop() {
        let view = reconcile(&log(vec![
            ActionRecord::delete_comment("a"),
            ActionRecord::comment("a", "first"),
        ]));
        assert_eq!(texts(&view), vec![("a", "first")]);
    }

    #[test]
    fn repeated_deletes_unwind_own_comments() {
        let view = reconcile(&log(vec![
            ActionRecord::comment("b", "one"),
            ActionRecord::comment("a", "two"),
            ActionRecord::comment("a", "three"),
            ActionRecord::delete_comment("a"),
            ActionRecord::delete_comment("a"),
            ActionRecord::delete_comment("a"),
        ]));
        assert_eq!(texts(&view), vec![("b", "one")]);
    }

    #[test]
    fn positions_are_log_indices() {
        let view = reconcile(&log(vec![
            ActionRecord::rate("a", 5.0),
            ActionRecord::comment("a", "hi"),
            ActionRecord::comment("b", "gone"),
            ActionRecord::delete_comment("b"),
            ActionRecord::comment("c", "hey"),
        ]));
        let positions: Vec<_> = view.comments.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 4]);
    }

    #[test]
    fn only_tail_is_removable_and_only_by_author() {
        let view = reconcile(&log(vec![
            ActionRecord::comment("a", "hi"),
            ActionRecord::comment("b", "yo"),
        ]));
        let for_b = view.for_viewer(Some("b"));
        assert!(!for_b[0].removable);
        assert!(for_b[1].removable);
        assert!(view.for_viewer(Some("a")).iter().all(|c| !c.removable));
    }

    #[test]
    fn anonymous_viewer_removes_nothing() {
        let view = reconcile(&log(vec![ActionRecord::comment("", "blank author")]));
        assert!(view.is_removable(0, ""));
        assert!(view.for_viewer(None).iter().all(|c| !c.removable));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let l = log(vec![
            ActionRecord::comment("a", "x"),
            ActionRecord::comment("b", "y"),
            ActionRecord::delete_comment("b"),
        ]);
        assert_eq!(reconcile(&l), reconcile(&l));
    }
}
