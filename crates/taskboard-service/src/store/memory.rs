//! In-memory store.
//!
//! Drop-in replacement for the SeaORM store with the same observable
//! semantics. Backs the `--store memory` server mode (the descendant of the
//! old localStorage-only test harness) and the service unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Project, StatusCounts, Task, TaskFilter, TaskStatus, TeamMember};
use crate::error::StoreError;
use crate::store::Store;

#[derive(Default)]
struct Collections {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    members: Vec<TeamMember>,
}

/// Volatile store over plain vectors behind one RwLock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T: Clone>(mut sorted_desc: Vec<T>, page: u64, limit: u64) -> (Vec<T>, u64) {
    let total = sorted_desc.len() as u64;
    // page * limit can exceed u64 for attacker-supplied query values; any
    // saturated offset is past the end anyway.
    let skip = usize::try_from(page.saturating_sub(1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let data = if skip >= sorted_desc.len() {
        Vec::new()
    } else {
        sorted_desc.drain(skip..).take(limit as usize).collect()
    };
    (data, total)
}

fn matches(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(project) = &filter.project {
        if &task.project != project {
            return false;
        }
    }
    if let Some(pic) = &filter.pic {
        if &task.pic != pic {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        if !task
            .description
            .to_lowercase()
            .contains(&search.to_lowercase())
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_project(&self, project: Project) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.projects.iter().any(|p| p.name == project.name) {
            return Err(StoreError::Conflict);
        }
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn all_projects(&self) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let mut projects = inner.projects.clone();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    async fn project_page(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Project>, u64), StoreError> {
        let inner = self.inner.read().await;
        let mut projects = inner.projects.clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(projects, page, limit))
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.projects.len();
        inner.projects.retain(|p| p.id != id);
        Ok(inner.projects.len() < before)
    }

    async fn count_projects(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.projects.len() as u64)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn task_page(
        &self,
        filter: &TaskFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), StoreError> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| matches(t, filter))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(tasks, page, limit))
    }

    async fn set_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                task.updated_at = updated_at;
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        Ok(inner.tasks.len() < before)
    }

    async fn delete_tasks_for_project(&self, project: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.project != project);
        Ok((before - inner.tasks.len()) as u64)
    }

    async fn count_tasks_by_status(&self) -> Result<StatusCounts, StoreError> {
        let inner = self.inner.read().await;
        let mut counts = StatusCounts::default();
        for task in &inner.tasks {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.inprogress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        Ok(counts)
    }

    async fn insert_member(&self, member: TeamMember) -> Result<TeamMember, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.members.iter().any(|m| m.name == member.name) {
            return Err(StoreError::Conflict);
        }
        inner.members.push(member.clone());
        Ok(member)
    }

    async fn all_members(&self) -> Result<Vec<TeamMember>, StoreError> {
        let inner = self.inner.read().await;
        let mut members = inner.members.clone();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    async fn member_page(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<TeamMember>, u64), StoreError> {
        let inner = self.inner.read().await;
        let mut members = inner.members.clone();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(members, page, limit))
    }

    async fn update_member(
        &self,
        id: Uuid,
        name: String,
        role: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TeamMember>, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.members.iter().any(|m| m.name == name && m.id != id) {
            return Err(StoreError::Conflict);
        }
        match inner.members.iter_mut().find(|m| m.id == id) {
            Some(member) => {
                member.name = name;
                member.role = role;
                member.updated_at = updated_at;
                Ok(Some(member.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_member(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.members.len();
        inner.members.retain(|m| m.id != id);
        Ok(inner.members.len() < before)
    }

    async fn count_members(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.members.len() as u64)
    }
}
