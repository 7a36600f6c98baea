//! Domain records and query types.
//!
//! These are the shapes the API serializes; field names follow the wire
//! convention (`camelCase`, dates as `YYYY-MM-DD`, timestamps as RFC 3339).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Progress state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started yet
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl TaskStatus {
    /// Parse the wire representation (`todo` / `inprogress` / `done`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// A project grouping tasks by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    /// Person in charge (team member name, soft reference)
    pub pic: String,
    /// Owning project name (soft reference)
    pub project: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw task creation input; validated by the service.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub description: Option<String>,
    pub pic: Option<String>,
    pub project: Option<String>,
    /// Due date as `YYYY-MM-DD`
    pub due_date: Option<String>,
}

/// Raw member creation/update input; validated by the service.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Task list filter. `None` (or the sentinel `"all"`, resolved by the
/// service) means no constraint on that axis.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact match on project name
    pub project: Option<String>,
    /// Exact match on assignee name
    pub pic: Option<String>,
    /// Case-insensitive substring match on description
    pub search: Option<String>,
}

/// One page of records plus pagination totals.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }
}

/// Per-status task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: u64,
    pub inprogress: u64,
    pub done: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.todo + self.inprogress + self.done
    }
}

/// Aggregate counters for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: u64,
    pub todo: u64,
    pub inprogress: u64,
    pub done: u64,
    pub total_projects: u64,
    pub total_members: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_values() {
        assert_eq!(TaskStatus::parse("todo"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("inprogress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("Done"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::<u8> {
            data: vec![],
            total: 11,
            page: 1,
            limit: 5,
        };
        assert_eq!(page.total_pages(), 3);

        let empty = Page::<u8> {
            data: vec![],
            total: 0,
            page: 1,
            limit: 5,
        };
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: Uuid::nil(),
            description: "Design API".into(),
            pic: "Alice".into(),
            project: "Apollo".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: TaskStatus::Todo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2025-01-01");
        assert_eq!(json["status"], "todo");
        assert!(json.get("createdAt").is_some());
    }
}
