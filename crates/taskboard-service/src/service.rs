//! The board service: validation, uniqueness, cascade delete, pagination,
//! and event fan-out over a pluggable [`Store`].

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    DashboardStats, NewMember, NewTask, Page, Project, Task, TaskFilter, TaskStatus, TeamMember,
};
use crate::error::{ServiceError, StoreError};
use crate::events::{BoardEvent, NoticeKind, Notifier};
use crate::messages;
use crate::store::Store;

/// Default page size for projects and members
pub const DEFAULT_PAGE_LIMIT: u64 = 5;
/// Default page size for tasks
pub const DEFAULT_TASK_PAGE_LIMIT: u64 = 10;
/// Upper bounds on client-supplied pagination values. Keeps the
/// `page * limit` offset computed by the stores within u64.
pub const MAX_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE: u64 = 1_000_000;

/// Resolve a filter value: absence and the sentinel `"all"` both mean
/// "no constraint".
fn filter_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "all")
}

fn required(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct BoardService {
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    deletion_code: String,
}

impl BoardService {
    pub fn new(
        store: Arc<dyn Store>,
        notifier: Arc<dyn Notifier>,
        deletion_code: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            deletion_code: deletion_code.into(),
        }
    }

    /// Destructive operations require the shared deletion code, supplied by
    /// the caller in the `x-auth-code` header.
    fn authorize(&self, auth_code: Option<&str>) -> Result<(), ServiceError> {
        match auth_code {
            Some(code) if code == self.deletion_code => Ok(()),
            _ => Err(ServiceError::Unauthorized(messages::UNAUTHORIZED.into())),
        }
    }

    // ===== Projects =====

    pub async fn create_project(&self, name: &str) -> Result<Project, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation(messages::PROJECT_NAME_EMPTY.into()));
        }

        let now = Utc::now();
        let record = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        let created = self.store.insert_project(record).await.map_err(|err| {
            match err {
                StoreError::Conflict => {
                    ServiceError::Conflict(messages::PROJECT_NAME_TAKEN.into())
                }
                other => other.into(),
            }
        })?;

        info!(project = %created.name, "Project created");
        self.notifier.publish(BoardEvent::ProjectsChanged);
        self.notifier.notify(
            format!("Proyek baru ditambahkan: {}", created.name),
            NoticeKind::Success,
        );
        Ok(created)
    }

    /// Full project list sorted by name, for dropdown population.
    pub async fn list_all_projects(&self) -> Result<Vec<Project>, ServiceError> {
        Ok(self.store.all_projects().await?)
    }

    pub async fn list_projects(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Page<Project>, ServiceError> {
        let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let (data, total) = self.store.project_page(page, limit).await?;
        Ok(Page {
            data,
            total,
            page,
            limit,
        })
    }

    /// Delete a project and every task referencing it by name. The two store
    /// calls are sequential, dependents first; there is no transaction
    /// spanning them.
    pub async fn delete_project(
        &self,
        id: Uuid,
        auth_code: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.authorize(auth_code)?;

        let project = self
            .store
            .find_project(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(messages::PROJECT_NOT_FOUND.into()))?;

        let removed = self.store.delete_tasks_for_project(&project.name).await?;
        if !self.store.delete_project(id).await? {
            // The cascade already ran; an orphaned delete here means the
            // project vanished between the two calls.
            warn!(project = %project.name, "Project disappeared mid-delete");
            return Err(ServiceError::NotFound(messages::PROJECT_NOT_FOUND.into()));
        }

        info!(project = %project.name, tasks_removed = removed, "Project deleted");
        self.notifier.publish(BoardEvent::TasksChanged);
        self.notifier.publish(BoardEvent::ProjectsChanged);
        self.notifier.notify(
            format!("Proyek \"{}\" dan tugas terkaitnya dihapus.", project.name),
            NoticeKind::Info,
        );
        Ok(())
    }

    // ===== Tasks =====

    pub async fn create_task(&self, input: NewTask) -> Result<Task, ServiceError> {
        let (description, pic, project, due_date) = match (
            required(input.description.as_ref()),
            required(input.pic.as_ref()),
            required(input.project.as_ref()),
            required(input.due_date.as_ref()),
        ) {
            (Some(d), Some(p), Some(pr), Some(due)) => (d, p, pr, due),
            _ => {
                return Err(ServiceError::Validation(
                    messages::TASK_FIELDS_REQUIRED.into(),
                ))
            }
        };

        let due_date = NaiveDate::parse_from_str(&due_date, "%Y-%m-%d")
            .map_err(|_| ServiceError::Validation(messages::TASK_DATA_INVALID.into()))?;

        let now = Utc::now();
        let record = Task {
            id: Uuid::new_v4(),
            description,
            pic,
            project,
            due_date,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        };
        let created = self.store.insert_task(record).await?;

        debug!(task = %created.id, project = %created.project, "Task created");
        self.notifier.publish(BoardEvent::TasksChanged);
        self.notifier.notify(
            format!("Tugas baru ditambahkan: {}", created.description),
            NoticeKind::Success,
        );
        Ok(created)
    }

    pub async fn list_tasks(
        &self,
        project: Option<String>,
        pic: Option<String>,
        search: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Page<Task>, ServiceError> {
        let filter = TaskFilter {
            project: filter_value(project),
            pic: filter_value(pic),
            search: search.filter(|s| !s.trim().is_empty()),
        };
        let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
        let limit = limit.unwrap_or(DEFAULT_TASK_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let (data, total) = self.store.task_page(&filter, page, limit).await?;
        Ok(Page {
            data,
            total,
            page,
            limit,
        })
    }

    pub async fn update_task_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Task, ServiceError> {
        let status = TaskStatus::parse(status)
            .ok_or_else(|| ServiceError::Validation(messages::TASK_STATUS_INVALID.into()))?;

        let updated = self
            .store
            .set_task_status(id, status, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::NotFound(messages::TASK_NOT_FOUND.into()))?;

        debug!(task = %updated.id, status = ?updated.status, "Task status updated");
        self.notifier.publish(BoardEvent::TasksChanged);
        self.notifier.notify(
            format!("Status tugas diperbarui: {}", updated.description),
            NoticeKind::Info,
        );
        Ok(updated)
    }

    pub async fn delete_task(&self, id: Uuid, auth_code: Option<&str>) -> Result<(), ServiceError> {
        self.authorize(auth_code)?;

        if !self.store.delete_task(id).await? {
            return Err(ServiceError::NotFound(messages::TASK_NOT_FOUND.into()));
        }

        info!(task = %id, "Task deleted");
        self.notifier.publish(BoardEvent::TasksChanged);
        self.notifier
            .notify("Tugas dihapus.".into(), NoticeKind::Info);
        Ok(())
    }

    // ===== Team members =====

    pub async fn create_member(&self, input: NewMember) -> Result<TeamMember, ServiceError> {
        let (name, role) = match (required(input.name.as_ref()), required(input.role.as_ref())) {
            (Some(name), Some(role)) => (name, role),
            _ => {
                return Err(ServiceError::Validation(
                    messages::MEMBER_FIELDS_REQUIRED.into(),
                ))
            }
        };

        let now = Utc::now();
        let record = TeamMember {
            id: Uuid::new_v4(),
            name,
            role,
            created_at: now,
            updated_at: now,
        };
        let created = self.store.insert_member(record).await.map_err(|err| {
            match err {
                StoreError::Conflict => ServiceError::Conflict(messages::MEMBER_NAME_TAKEN.into()),
                other => other.into(),
            }
        })?;

        info!(member = %created.name, role = %created.role, "Member created");
        self.notifier.publish(BoardEvent::MembersChanged);
        self.notifier.notify(
            format!("Anggota baru: {} ({})", created.name, created.role),
            NoticeKind::Success,
        );
        Ok(created)
    }

    pub async fn list_all_members(&self) -> Result<Vec<TeamMember>, ServiceError> {
        Ok(self.store.all_members().await?)
    }

    pub async fn list_members(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Page<TeamMember>, ServiceError> {
        let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        let (data, total) = self.store.member_page(page, limit).await?;
        Ok(Page {
            data,
            total,
            page,
            limit,
        })
    }

    pub async fn update_member(
        &self,
        id: Uuid,
        input: NewMember,
    ) -> Result<TeamMember, ServiceError> {
        let (name, role) = match (required(input.name.as_ref()), required(input.role.as_ref())) {
            (Some(name), Some(role)) => (name, role),
            _ => {
                return Err(ServiceError::Validation(
                    messages::MEMBER_FIELDS_REQUIRED.into(),
                ))
            }
        };

        let updated = self
            .store
            .update_member(id, name, role, Utc::now())
            .await
            .map_err(|err| match err {
                StoreError::Conflict => {
                    ServiceError::Conflict(messages::MEMBER_NAME_IN_USE.into())
                }
                other => other.into(),
            })?
            .ok_or_else(|| ServiceError::NotFound(messages::MEMBER_NOT_FOUND.into()))?;

        info!(member = %updated.name, "Member updated");
        self.notifier.publish(BoardEvent::MembersChanged);
        self.notifier.notify(
            format!("Data anggota {} diperbarui.", updated.name),
            NoticeKind::Info,
        );
        Ok(updated)
    }

    pub async fn delete_member(
        &self,
        id: Uuid,
        auth_code: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.authorize(auth_code)?;

        if !self.store.delete_member(id).await? {
            return Err(ServiceError::NotFound(messages::MEMBER_NOT_FOUND.into()));
        }

        // No cascade: tasks keep referencing the deleted member by name.
        info!(member = %id, "Member deleted");
        self.notifier.publish(BoardEvent::MembersChanged);
        self.notifier
            .notify("Anggota dihapus.".into(), NoticeKind::Info);
        Ok(())
    }

    // ===== Dashboard =====

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError> {
        let counts = self.store.count_tasks_by_status().await?;
        Ok(DashboardStats {
            total: counts.total(),
            todo: counts.todo,
            inprogress: counts.inprogress,
            done: counts.done,
            total_projects: self.store.count_projects().await?,
            total_members: self.store.count_members().await?,
        })
    }
}
