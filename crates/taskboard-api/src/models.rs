//! Request/response DTOs for the REST API.
//!
//! Domain records ([`Project`], [`Task`], [`TeamMember`]) serialize directly;
//! the types here cover request bodies, query strings, and envelope shapes.
//! Create/update bodies keep every field optional so that missing input
//! reaches the service and comes back as a 400 with the proper message
//! instead of a deserialization rejection.

use serde::{Deserialize, Serialize};
use taskboard_service::domain::{Page, Project, Task, TeamMember};
use utoipa::{IntoParams, ToSchema};

/// Body for `POST /api/projects`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    /// Project name (required, trimmed, unique)
    pub name: Option<String>,
}

/// Body for `POST /api/tasks`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub description: Option<String>,
    /// Person in charge (team member name)
    pub pic: Option<String>,
    /// Owning project name
    pub project: Option<String>,
    /// Due date, `YYYY-MM-DD`
    pub due_date: Option<String>,
}

/// Body for `PUT /api/tasks/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskStatusRequest {
    /// One of `todo`, `inprogress`, `done`
    pub status: Option<String>,
}

/// Body for `POST /api/members` and `PUT /api/members/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MemberRequest {
    pub name: Option<String>,
    /// Member role/title
    pub role: Option<String>,
}

/// Query string for project and member listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// `all=true` returns the full list sorted by name (no pagination)
    pub all: Option<bool>,
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 5, capped at 100)
    pub limit: Option<u64>,
}

/// Query string for task listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TaskListQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 10, capped at 100)
    pub limit: Option<u64>,
    /// Exact project name, or `all`
    pub project: Option<String>,
    /// Exact assignee name, or `all`
    pub pic: Option<String>,
    /// Case-insensitive substring match on description
    pub search: Option<String>,
}

/// Pagination envelope accompanying paginated listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(),
        }
    }
}

/// Project listing response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectList {
    pub data: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Task listing response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskList {
    pub data: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Member listing response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberList {
    pub data: Vec<TeamMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Confirmation body for successful deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body; `message` is user-facing copy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
