//! JSON snapshots of fetched items.
//!
//! A snapshot records where the items came from and when, so that filter and
//! search can be run later without going back to the API.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::items::Item;
use crate::pager::FetchedItems;

/// Items saved to disk along with their provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Endpoint the items were fetched from.
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    /// `total` reported by the API at fetch time.
    pub total: u64,
    pub items: Vec<Item>,
}

impl ItemSnapshot {
    pub fn new(source: impl Into<String>, items: Vec<Item>) -> Self {
        let total = items.len() as u64;
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            total,
            items,
        }
    }

    /// Build a snapshot from a completed page walk.
    pub fn from_fetched(source: impl Into<String>, fetched: FetchedItems) -> Self {
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            total: fetched.total,
            items: fetched.items,
        }
    }
}

/// Write `snapshot` as pretty JSON, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &ItemSnapshot) -> FetchResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), items = snapshot.items.len(), "Snapshot written");
    Ok(())
}

/// Read a snapshot written by [`write_snapshot`].
pub fn read_snapshot(path: &Path) -> FetchResult<ItemSnapshot> {
    let content = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::items::{ItemKind, Task, TaskStatus};
    use chrono::TimeZone;

    fn task(id: u64) -> Item {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Item::Task(Task {
            id,
            title: format!("Task {id}"),
            description: Some("carry over".to_string()),
            status: TaskStatus::Completed,
            due_date: None,
            tags: vec!["ops".to_string()],
            created_at: stamp,
            updated_at: stamp,
        })
    }

    #[test]
    fn test_write_then_read_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("items.json");
        let snapshot = ItemSnapshot::new("https://api.example.com/items", vec![task(1), task(2)]);

        write_snapshot(&path, &snapshot).expect("write should succeed");
        let loaded = read_snapshot(&path).expect("read should succeed");

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.total, 2);
        assert!(loaded.items.iter().all(|i| i.kind() == ItemKind::Task));
    }

    #[test]
    fn test_unrecognized_status_survives_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("items.json");
        let mut blocked = task(7);
        if let Item::Task(ref mut t) = blocked {
            t.status = TaskStatus::from("blocked".to_string());
        }

        write_snapshot(&path, &ItemSnapshot::new("http://localhost/items", vec![blocked]))
            .expect("write should succeed");
        let raw = std::fs::read_to_string(&path).expect("read raw");
        assert!(raw.contains(r#""status": "blocked""#));

        let loaded = read_snapshot(&path).expect("read should succeed");
        match &loaded.items[0] {
            Item::Task(t) => assert_eq!(t.status.as_str(), "blocked"),
            other => panic!("expected task, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_from_fetched_keeps_reported_total() {
        let fetched = FetchedItems {
            items: vec![task(1)],
            total: 3,
            pages_fetched: 1,
            request_ids: vec!["req-1".to_string()],
        };
        let snapshot = ItemSnapshot::from_fetched("http://localhost/items", fetched);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = read_snapshot(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").expect("write fixture");
        assert!(matches!(read_snapshot(&path), Err(FetchError::Json(_))));
    }
}
