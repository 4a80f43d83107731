//! Action log storage.
//!
//! Layout:
//!   .review/data.json  : `{ "<proposal id>": [ ...wire records ] }`
//!
//! The store only appends. Existing wire objects are kept exactly as written,
//! including ones that carry no action; they are projected into an
//! [`ActionLog`] on read. Reconciliation never writes back.

use crate::action::{ActionLog, ActionRecord, WireRecord};
use crate::error::Result;
use crate::io;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub type LogMap = BTreeMap<String, ActionLog>;

// ---------------------------------------------------------------------------
// LogStore
// ---------------------------------------------------------------------------

pub trait LogStore: Send + Sync {
    /// Every proposal's log, keyed by proposal id.
    fn load_all(&self) -> Result<LogMap>;

    /// Append `records` to one proposal's log in order and return the full
    /// updated log.
    fn append_many(&self, proposal_id: &str, records: Vec<ActionRecord>) -> Result<ActionLog>;

    /// One proposal's log; empty if nothing was recorded yet.
    fn load(&self, proposal_id: &str) -> Result<ActionLog> {
        Ok(self.load_all()?.remove(proposal_id).unwrap_or_default())
    }

    fn append(&self, proposal_id: &str, record: ActionRecord) -> Result<ActionLog> {
        self.append_many(proposal_id, vec![record])
    }
}

// ---------------------------------------------------------------------------
// FileLogStore
// ---------------------------------------------------------------------------

/// Each proposal's wire objects as they appear in the data file.
type Document = BTreeMap<String, Vec<Value>>;

/// JSON document on disk, rewritten atomically on every append.
#[derive(Debug)]
pub struct FileLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        io::atomic_write(&self.path, content.as_bytes())
    }
}

impl LogStore for FileLogStore {
    fn load_all(&self) -> Result<LogMap> {
        Ok(self
            .read()?
            .into_iter()
            .map(|(id, raw)| (id, ActionLog::from_wire_values(raw)))
            .collect())
    }

    fn append_many(&self, proposal_id: &str, records: Vec<ActionRecord>) -> Result<ActionLog> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.read()?;
        let raw = doc.entry(proposal_id.to_string()).or_default();
        let added = records.len();
        for record in &records {
            raw.push(serde_json::to_value(WireRecord::from(record))?);
        }
        let updated = ActionLog::from_wire_values(raw.clone());
        self.write(&doc)?;
        tracing::debug!(
            proposal = proposal_id,
            added,
            total = updated.len(),
            "appended to action log"
        );
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// MemoryLogStore
// ---------------------------------------------------------------------------

/// In-process store for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    logs: Mutex<LogMap>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(logs: LogMap) -> Self {
        Self {
            logs: Mutex::new(logs),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogMap> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogStore for MemoryLogStore {
    fn load_all(&self) -> Result<LogMap> {
        Ok(self.lock().clone())
    }

    fn append_many(&self, proposal_id: &str, records: Vec<ActionRecord>) -> Result<ActionLog> {
        let mut logs = self.lock();
        let log = logs.entry(proposal_id.to_string()).or_default();
        for record in records {
            log.push(record);
        }
        Ok(log.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileLogStore::new(dir.path().join("data.json"));
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.load("p1").unwrap().is_empty());
    }

    #[test]
    fn append_returns_full_log_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = FileLogStore::new(dir.path().join("data.json"));
        store.append("p1", ActionRecord::rate("a", 3.0)).unwrap();
        let log = store.append("p1", ActionRecord::comment("b", "nice")).unwrap();
        assert_eq!(log.len(), 2);

        let reopened = FileLogStore::new(dir.path().join("data.json"));
        assert_eq!(reopened.load("p1").unwrap(), log);
    }

    #[test]
    fn reads_original_data_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"12": [{"user": "a", "rating": 4}, {"user": "b", "comment": "hm"}]}"#,
        )
        .unwrap();
        let store = FileLogStore::new(&path);
        let logs = store.load_all().unwrap();
        assert_eq!(
            logs["12"].records(),
            &[ActionRecord::rate("a", 4.0), ActionRecord::comment("b", "hm")]
        );
    }

    #[test]
    fn append_keeps_existing_records_as_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let seed = serde_json::json!({
            "7": [
                {"user": "a", "rating": 4, "comment": "ok"},
                {"user": "b"},
                {"user": "c", "rating": null},
                {"rating": 5}
            ]
        });
        std::fs::write(&path, seed.to_string()).unwrap();

        let store = FileLogStore::new(&path);
        let log = store.append("7", ActionRecord::comment("d", "x")).unwrap();

        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let stored = on_disk["7"].as_array().unwrap();
        assert_eq!(stored.len(), 5);
        assert_eq!(&stored[..4], &seed["7"].as_array().unwrap()[..]);
        assert_eq!(stored[4], serde_json::json!({"user": "d", "comment": "x"}));

        assert_eq!(
            log.records(),
            &[
                ActionRecord::rate("a", 4.0),
                ActionRecord::comment("a", "ok"),
                ActionRecord::comment("d", "x"),
            ]
        );
        assert_eq!(store.load("7").unwrap(), log);
    }

    #[test]
    fn append_leaves_other_proposals_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let other = serde_json::json!([{"user": "a", "rating": 3, "deleteComment": true}]);
        std::fs::write(&path, serde_json::json!({"1": other.clone()}).to_string()).unwrap();

        FileLogStore::new(&path)
            .append("2", ActionRecord::rate("b", 1.0))
            .unwrap();

        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["1"], other);
        assert_eq!(on_disk["2"], serde_json::json!([{"user": "b", "rating": 1}]));
    }

    #[test]
    fn append_many_keeps_order() {
        let store = MemoryLogStore::new();
        let log = store
            .append_many(
                "p1",
                vec![ActionRecord::rate("a", 1.0), ActionRecord::retract("a")],
            )
            .unwrap();
        assert_eq!(
            log.records(),
            &[ActionRecord::rate("a", 1.0), ActionRecord::retract("a")]
        );
        assert_eq!(store.load("p1").unwrap(), log);
    }

    #[test]
    fn logs_are_independent_per_proposal() {
        let store = MemoryLogStore::new();
        store.append("p1", ActionRecord::rate("a", 5.0)).unwrap();
        store.append("p2", ActionRecord::rate("a", 1.0)).unwrap();
        let logs = store.load_all().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs["p1"].len(), 1);
    }
}
