//! Proposal records as published by the program site.
//!
//! Layout:
//!   .review/proposals.json  : `{ "results": [ ...proposals ] }`
//!
//! Only the fields the review board uses are typed; everything else is kept
//! in `extra` so the file round-trips unchanged.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

pub const SITE_URL: &str = "https://summerofcode.withgoogle.com";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Numeric ids from the site are normalized to strings.
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub student: Student,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_pdf_url: Option<String>,
    #[serde(default)]
    pub ignored: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Proposal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            subcategory: None,
            student: Student::default(),
            organization: None,
            completed_pdf_url: None,
            ignored: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Dashboard page for this proposal, when the organization is known.
    pub fn proposal_url(&self) -> Option<String> {
        self.organization.as_ref().map(|org| {
            format!(
                "{SITE_URL}/dashboard/organization/{}/proposal/{}/",
                org.id, self.id
            )
        })
    }

    /// Final PDF, when one was uploaded.
    pub fn pdf_url(&self) -> Option<String> {
        self.completed_pdf_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("{SITE_URL}{u}"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalsFile {
    #[serde(default)]
    pub results: Vec<Proposal>,
}

fn flexible_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load every proposal from `path`, including ignored ones. A missing or
/// blank file yields an empty list.
pub fn load_all(path: &Path) -> Result<Vec<Proposal>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: ProposalsFile = serde_json::from_str(&content)?;
    Ok(file.results)
}

/// Proposals that are not marked `ignored`, in file order.
pub fn load_visible(path: &Path) -> Result<Vec<Proposal>> {
    Ok(visible(load_all(path)?))
}

pub fn visible(proposals: Vec<Proposal>) -> Vec<Proposal> {
    proposals.into_iter().filter(|p| !p.ignored).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "results": [
            {
                "id": 4711,
                "title": "Faster parser",
                "abstract": "Rewrite the tokenizer",
                "subcategory": "compiler",
                "student": { "display_name": "Ada" },
                "organization": { "id": 42 },
                "completed_pdf_url": "/media/4711.pdf",
                "tags": ["perf"]
            },
            { "id": "x-1", "title": "Skip me", "ignored": true }
        ]
    }"#;

    #[test]
    fn parses_numeric_and_string_ids() {
        let file: ProposalsFile = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(file.results[0].id, "4711");
        assert_eq!(file.results[1].id, "x-1");
        assert_eq!(file.results[0].student.display_name, "Ada");
        assert_eq!(file.results[0].summary, "Rewrite the tokenizer");
    }

    #[test]
    fn unknown_fields_round_trip() {
        let file: ProposalsFile = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(&file.results[0]).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["perf"]));
        assert_eq!(json["abstract"], "Rewrite the tokenizer");
    }

    #[test]
    fn external_links() {
        let file: ProposalsFile = serde_json::from_str(SAMPLE).unwrap();
        let p = &file.results[0];
        assert_eq!(
            p.proposal_url().as_deref(),
            Some("https://summerofcode.withgoogle.com/dashboard/organization/42/proposal/4711/")
        );
        assert_eq!(
            p.pdf_url().as_deref(),
            Some("https://summerofcode.withgoogle.com/media/4711.pdf")
        );
        assert!(file.results[1].pdf_url().is_none());
        assert!(file.results[1].proposal_url().is_none());
    }

    #[test]
    fn load_visible_filters_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let all = load_all(&path).unwrap();
        let shown = load_visible(&path).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "4711");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_all(&dir.path().join("nope.json")).unwrap().is_empty());
    }
}
