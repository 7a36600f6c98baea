//! SeaORM-backed store (SQLite or Postgres).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use taskboard_db::entities::{project, task, team_member};

use crate::domain::{Project, StatusCounts, Task, TaskFilter, TaskStatus, TeamMember};
use crate::error::StoreError;
use crate::store::Store;

/// Store over a SeaORM [`DatabaseConnection`]. Uniqueness is enforced by the
/// unique indexes created in the initial migration and surfaces as
/// [`StoreError::Conflict`].
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn status_to_db(status: TaskStatus) -> task::TaskStatus {
    match status {
        TaskStatus::Todo => task::TaskStatus::Todo,
        TaskStatus::InProgress => task::TaskStatus::InProgress,
        TaskStatus::Done => task::TaskStatus::Done,
    }
}

fn status_from_db(status: task::TaskStatus) -> TaskStatus {
    match status {
        task::TaskStatus::Todo => TaskStatus::Todo,
        task::TaskStatus::InProgress => TaskStatus::InProgress,
        task::TaskStatus::Done => TaskStatus::Done,
    }
}

fn project_from(model: project::Model) -> Project {
    Project {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn task_from(model: task::Model) -> Task {
    Task {
        id: model.id,
        description: model.description,
        pic: model.pic,
        project: model.project,
        due_date: model.due_date,
        status: status_from_db(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn member_from(model: team_member::Model) -> TeamMember {
    TeamMember {
        id: model.id,
        name: model.name,
        role: model.role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn task_condition(filter: &TaskFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(ref name) = filter.project {
        condition = condition.add(task::Column::Project.eq(name));
    }
    if let Some(ref pic) = filter.pic {
        condition = condition.add(task::Column::Pic.eq(pic));
    }
    if let Some(ref search) = filter.search {
        // LIKE over lowered text keeps the match case-insensitive on both
        // SQLite and Postgres.
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col(task::Column::Description)))
                .like(format!("%{}%", search.to_lowercase())),
        );
    }
    condition
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn insert_project(&self, record: Project) -> Result<Project, StoreError> {
        let model = project::ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        Ok(project_from(model.insert(&self.db).await?))
    }

    async fn all_projects(&self) -> Result<Vec<Project>, StoreError> {
        let models = project::Entity::find()
            .order_by_asc(project::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(project_from).collect())
    }

    async fn project_page(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Project>, u64), StoreError> {
        let paginator = project::Entity::find()
            .order_by_desc(project::Column::CreatedAt)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(project_from).collect(), total))
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let model = project::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(project_from))
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = project::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_projects(&self) -> Result<u64, StoreError> {
        Ok(project::Entity::find().count(&self.db).await?)
    }

    async fn insert_task(&self, record: Task) -> Result<Task, StoreError> {
        let model = task::ActiveModel {
            id: Set(record.id),
            description: Set(record.description),
            pic: Set(record.pic),
            project: Set(record.project),
            due_date: Set(record.due_date),
            status: Set(status_to_db(record.status)),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        Ok(task_from(model.insert(&self.db).await?))
    }

    async fn task_page(
        &self,
        filter: &TaskFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), StoreError> {
        let paginator = task::Entity::find()
            .filter(task_condition(filter))
            .order_by_desc(task::Column::CreatedAt)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(task_from).collect(), total))
    }

    async fn set_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, StoreError> {
        let Some(model) = task::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: task::ActiveModel = model.into();
        active.status = Set(status_to_db(status));
        active.updated_at = Set(updated_at);
        Ok(Some(task_from(active.update(&self.db).await?)))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = task::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_tasks_for_project(&self, name: &str) -> Result<u64, StoreError> {
        let res = task::Entity::delete_many()
            .filter(task::Column::Project.eq(name))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn count_tasks_by_status(&self) -> Result<StatusCounts, StoreError> {
        let count = |status: task::TaskStatus| {
            task::Entity::find()
                .filter(task::Column::Status.eq(status))
                .count(&self.db)
        };
        Ok(StatusCounts {
            todo: count(task::TaskStatus::Todo).await?,
            inprogress: count(task::TaskStatus::InProgress).await?,
            done: count(task::TaskStatus::Done).await?,
        })
    }

    async fn insert_member(&self, record: TeamMember) -> Result<TeamMember, StoreError> {
        let model = team_member::ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            role: Set(record.role),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        Ok(member_from(model.insert(&self.db).await?))
    }

    async fn all_members(&self) -> Result<Vec<TeamMember>, StoreError> {
        let models = team_member::Entity::find()
            .order_by_asc(team_member::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(member_from).collect())
    }

    async fn member_page(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<TeamMember>, u64), StoreError> {
        let paginator = team_member::Entity::find()
            .order_by_desc(team_member::Column::CreatedAt)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(member_from).collect(), total))
    }

    async fn update_member(
        &self,
        id: Uuid,
        name: String,
        role: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TeamMember>, StoreError> {
        let Some(model) = team_member::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: team_member::ActiveModel = model.into();
        active.name = Set(name);
        active.role = Set(role);
        active.updated_at = Set(updated_at);
        Ok(Some(member_from(active.update(&self.db).await?)))
    }

    async fn delete_member(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = team_member::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_members(&self) -> Result<u64, StoreError> {
        Ok(team_member::Entity::find().count(&self.db).await?)
    }
}
