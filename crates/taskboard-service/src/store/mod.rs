//! Persistence seam for the board service.
//!
//! [`sea::SeaOrmStore`] is the production implementation; [`memory::MemoryStore`]
//! backs the local-only test harness and the service unit tests. Both must
//! agree on ordering, uniqueness, and pagination semantics.

pub mod memory;
pub mod sea;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Project, StatusCounts, Task, TaskFilter, TaskStatus, TeamMember};
use crate::error::StoreError;

/// Persistence operations the service needs. Records arrive fully formed
/// (id and timestamps generated by the service); stores only persist and
/// query.
#[async_trait]
pub trait Store: Send + Sync {
    // ===== Projects =====

    /// Insert a project. Fails with [`StoreError::Conflict`] on a duplicate
    /// name (exact match).
    async fn insert_project(&self, project: Project) -> Result<Project, StoreError>;

    /// All projects, sorted by name ascending (dropdown population).
    async fn all_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// One page of projects sorted by creation time descending, plus the
    /// total count. `page` is 1-based.
    async fn project_page(&self, page: u64, limit: u64)
        -> Result<(Vec<Project>, u64), StoreError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Returns whether a row was deleted.
    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count_projects(&self) -> Result<u64, StoreError>;

    // ===== Tasks =====

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError>;

    /// One page of tasks matching the filter, sorted by creation time
    /// descending, plus the total matching count.
    async fn task_page(
        &self,
        filter: &TaskFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), StoreError>;

    /// Replace only the status (and `updated_at`) of the given task.
    /// Returns the updated record, or `None` if the id is unknown.
    async fn set_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Delete every task whose `project` field equals the given name.
    /// Returns the number of deleted rows.
    async fn delete_tasks_for_project(&self, project: &str) -> Result<u64, StoreError>;

    async fn count_tasks_by_status(&self) -> Result<StatusCounts, StoreError>;

    // ===== Team members =====

    async fn insert_member(&self, member: TeamMember) -> Result<TeamMember, StoreError>;

    /// All members, sorted by name ascending.
    async fn all_members(&self) -> Result<Vec<TeamMember>, StoreError>;

    async fn member_page(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<TeamMember>, u64), StoreError>;

    /// Replace name and role together. `None` if the id is unknown;
    /// [`StoreError::Conflict`] if the new name belongs to another record.
    async fn update_member(
        &self,
        id: Uuid,
        name: String,
        role: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TeamMember>, StoreError>;

    async fn delete_member(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count_members(&self) -> Result<u64, StoreError>;
}
