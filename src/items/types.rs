//! Item and page types returned by the items API.
//!
//! An [`Item`] is a tagged union: the JSON `type` field selects which of the
//! three record shapes follows. Pages wrap items with pagination metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{FetchError, FetchResult};

/// Value of `status` on a usable page.
pub const STATUS_SUCCESS: &str = "success";

/// Discriminant of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Event,
    Meeting,
    Task,
}

impl ItemKind {
    /// All kinds, in declaration order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Event, ItemKind::Meeting, ItemKind::Task];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Event => "event",
            ItemKind::Meeting => "meeting",
            ItemKind::Task => "task",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no known item kind.
#[derive(Debug, Error)]
#[error("Unknown item kind '{0}': expected event, meeting, or task")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" => Ok(ItemKind::Event),
            "meeting" => Ok(ItemKind::Meeting),
            "task" => Ok(ItemKind::Task),
            _ => Err(UnknownItemKind(s.to_string())),
        }
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A scheduled meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    /// Start time as sent by the server, e.g. `"14:30"`.
    pub time: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Progress code of a [`Task`].
///
/// Codes this client does not recognize are kept verbatim in
/// [`TaskStatus::Other`], so re-serializing a task writes back exactly what the
/// server sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    /// Any other code, as received.
    Other(String),
}

impl TaskStatus {
    /// Wire form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TaskStatus::Other(_))
    }
}

impl From<String> for TaskStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "pending" => TaskStatus::Pending,
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Other(code),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A to-do entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One record from the items API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Event(Event),
    Meeting(Meeting),
    Task(Task),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Event(_) => ItemKind::Event,
            Item::Meeting(_) => ItemKind::Meeting,
            Item::Task(_) => ItemKind::Task,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Item::Event(e) => e.id,
            Item::Meeting(m) => m.id,
            Item::Task(t) => t.id,
        }
    }

    /// The event name, or the meeting/task title.
    pub fn heading(&self) -> &str {
        match self {
            Item::Event(e) => &e.name,
            Item::Meeting(m) => &m.title,
            Item::Task(t) => &t.title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Item::Event(e) => e.description.as_deref(),
            Item::Meeting(m) => m.description.as_deref(),
            Item::Task(t) => t.description.as_deref(),
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Item::Event(e) => &e.tags,
            Item::Meeting(m) => &m.tags,
            Item::Task(t) => &t.tags,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Item::Event(e) => e.created_at,
            Item::Meeting(m) => m.created_at,
            Item::Task(t) => t.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Item::Event(e) => e.updated_at,
            Item::Meeting(m) => m.updated_at,
            Item::Task(t) => t.updated_at,
        }
    }

    /// Text fields that keyword search looks at: the heading, the
    /// description if set, then each tag. Locations, attendees and status
    /// codes are not searched.
    pub fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.heading()];
        fields.extend(self.description());
        fields.extend(self.tags().iter().map(String::as_str));
        fields
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.id(), self.kind(), self.heading())?;
        match self {
            Item::Event(e) => write!(f, " ({})", e.date),
            Item::Meeting(m) => write!(f, " ({} {})", m.date, m.time),
            Item::Task(t) => write!(f, " ({})", t.status),
        }
    }
}

/// Pagination metadata attached to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-indexed page number.
    pub page: u32,
    pub per_page: u32,
    /// Total items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub pages: u32,
}

impl Pagination {
    /// Page count implied by `total` and `per_page`.
    pub fn expected_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// Whether no page follows this one.
    pub fn is_last_page(&self) -> bool {
        self.page >= self.pages
    }

    /// Checks the metadata is self-consistent.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidResponse` describing the first problem found.
    pub fn validate(&self) -> FetchResult<()> {
        if self.per_page == 0 {
            return Err(FetchError::InvalidResponse(
                "pagination reports per_page = 0".to_string(),
            ));
        }

        if self.page == 0 {
            return Err(FetchError::InvalidResponse(
                "pagination reports page 0; pages are 1-indexed".to_string(),
            ));
        }

        let expected = self.expected_pages();
        if u64::from(self.pages) != expected {
            return Err(FetchError::InvalidResponse(format!(
                "pagination reports {} pages but total {} / per_page {} needs {}",
                self.pages, self.total, self.per_page, expected
            )));
        }

        if self.page > self.pages.max(1) {
            return Err(FetchError::InvalidResponse(format!(
                "page {} is past the last page {}",
                self.page, self.pages
            )));
        }

        Ok(())
    }
}

/// One page of the items API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub status: String,
    pub pagination: Pagination,
    pub request_id: String,
    #[serde(default)]
    pub data: Vec<Item>,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Checks that this is a usable answer to a request for `requested_page`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidResponse` if the status is not success,
    /// the pagination metadata is inconsistent, or a different page came back.
    pub fn validate(&self, requested_page: u32) -> FetchResult<()> {
        if !self.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "page {} (request {}) reported status '{}'",
                requested_page, self.request_id, self.status
            )));
        }

        self.pagination.validate()?;

        if self.pagination.page != requested_page {
            return Err(FetchError::InvalidResponse(format!(
                "requested page {} but received page {}",
                requested_page, self.pagination.page
            )));
        }

        Ok(())
    }
}
