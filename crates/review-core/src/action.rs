//! Action records and the per-proposal action log.
//!
//! A log is an append-only sequence of [`ActionRecord`]s; the index of a
//! record in the log is its arrival order. Every record names its author and
//! carries exactly one [`Action`].
//!
//! On disk and over HTTP a record travels as a [`WireRecord`]: an object with
//! a `user` key (`author` is accepted on input), optional `rating` (number,
//! or `false` to retract), `comment` and `deleteComment` fields. One wire object may carry several fields at once;
//! it expands into actions in the order rating, comment, delete.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetRating { score: f64 },
    RetractRating,
    AddComment { text: String },
    DeleteComment,
}

impl Action {
    /// True for actions that participate in rating reconciliation.
    pub fn is_rating(&self) -> bool {
        matches!(self, Action::SetRating { .. } | Action::RetractRating)
    }
}

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub author: String,
    pub action: Action,
}

impl ActionRecord {
    pub fn new(author: impl Into<String>, action: Action) -> Self {
        Self {
            author: author.into(),
            action,
        }
    }

    pub fn rate(author: impl Into<String>, score: f64) -> Self {
        Self::new(author, Action::SetRating { score })
    }

    pub fn retract(author: impl Into<String>) -> Self {
        Self::new(author, Action::RetractRating)
    }

    pub fn comment(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(author, Action::AddComment { text: text.into() })
    }

    pub fn delete_comment(author: impl Into<String>) -> Self {
        Self::new(author, Action::DeleteComment)
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The author-less part of a wire record. This is also the body a client
/// posts when appending; the server attaches the author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_comment: Option<bool>,
}

impl ActionBody {
    /// Expand into typed actions. Fields that do not describe a valid action
    /// (a `true` or string rating, an empty comment, `deleteComment: false`)
    /// are dropped.
    pub fn actions(&self) -> Vec<Action> {
        let mut out = Vec::new();
        match &self.rating {
            Some(Value::Number(n)) => {
                if let Some(score) = n.as_f64().filter(|s| s.is_finite()) {
                    out.push(Action::SetRating { score });
                }
            }
            Some(Value::Bool(false)) => out.push(Action::RetractRating),
            _ => {}
        }
        if let Some(text) = self.comment.as_deref().filter(|t| !t.is_empty()) {
            out.push(Action::AddComment {
                text: text.to_string(),
            });
        }
        if self.delete_comment == Some(true) {
            out.push(Action::DeleteComment);
        }
        out
    }

    /// Attach an author and expand into records.
    pub fn into_records(self, author: &str) -> Vec<ActionRecord> {
        self.actions()
            .into_iter()
            .map(|action| ActionRecord::new(author, action))
            .collect()
    }
}

impl From<&Action> for ActionBody {
    fn from(action: &Action) -> Self {
        match action {
            Action::SetRating { score } => ActionBody {
                rating: Some(score_to_json(*score)),
                ..Default::default()
            },
            Action::RetractRating => ActionBody {
                rating: Some(Value::Bool(false)),
                ..Default::default()
            },
            Action::AddComment { text } => ActionBody {
                comment: Some(text.clone()),
                ..Default::default()
            },
            Action::DeleteComment => ActionBody {
                delete_comment: Some(true),
                ..Default::default()
            },
        }
    }
}

// Whole scores are written as integers so star ratings stay `4`, not `4.0`.
fn score_to_json(score: f64) -> Value {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        Value::from(score as i64)
    } else {
        Value::from(score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    #[serde(rename = "user", alias = "author")]
    pub author: String,
    #[serde(flatten)]
    pub body: ActionBody,
}

impl From<&ActionRecord> for WireRecord {
    fn from(record: &ActionRecord) -> Self {
        WireRecord {
            author: record.author.clone(),
            body: ActionBody::from(&record.action),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionLog
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence of records for one proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WireRecord>", into = "Vec<WireRecord>")]
pub struct ActionLog {
    records: Vec<ActionRecord>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionRecord> {
        self.records.iter()
    }

    /// Append a record at the end of the log.
    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    /// Project stored wire objects into a log. Objects that are not a wire
    /// record (no author, not an object) contribute nothing.
    pub fn from_wire_values(values: impl IntoIterator<Item = Value>) -> Self {
        values
            .into_iter()
            .filter_map(|value| serde_json::from_value::<WireRecord>(value).ok())
            .flat_map(|wire| wire.body.into_records(&wire.author))
            .collect()
    }
}

impl From<Vec<ActionRecord>> for ActionLog {
    fn from(records: Vec<ActionRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ActionRecord> for ActionLog {
    fn from_iter<I: IntoIterator<Item = ActionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a ActionRecord;
    type IntoIter = std::slice::Iter<'a, ActionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<WireRecord>> for ActionLog {
    fn from(wire: Vec<WireRecord>) -> Self {
        wire.into_iter()
            .flat_map(|w| w.body.into_records(&w.author))
            .collect()
    }
}

impl From<ActionLog> for Vec<WireRecord> {
    fn from(log: ActionLog) -> Self {
        log.records.iter().map(WireRecord::from).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
