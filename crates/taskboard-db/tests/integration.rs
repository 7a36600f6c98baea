//! Integration tests for taskboard-db
//!
//! Tests entity operations with a real SQLite in-memory database

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use taskboard_db::entities::{project, task, team_member};
use taskboard_db::{connect, migrate};
use uuid::Uuid;

/// Helper to create a test database
async fn setup_test_db() -> sea_orm::DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

fn project_model(name: &str) -> project::ActiveModel {
    let now = Utc::now();
    project::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn task_model(description: &str, pic: &str, project: &str) -> task::ActiveModel {
    let now = Utc::now();
    task::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(description.to_string()),
        pic: Set(pic.to_string()),
        project: Set(project.to_string()),
        due_date: Set(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        status: Set(task::TaskStatus::Todo),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_and_read_project() {
    let db = setup_test_db().await;

    let inserted = project_model("Apollo")
        .insert(&db)
        .await
        .expect("Failed to insert project");
    assert_eq!(inserted.name, "Apollo");

    let found = project::Entity::find_by_id(inserted.id)
        .one(&db)
        .await
        .expect("Failed to query")
        .expect("Project not found");
    assert_eq!(found.name, "Apollo");
}

#[tokio::test]
async fn test_project_name_unique_constraint() {
    let db = setup_test_db().await;

    project_model("Apollo").insert(&db).await.expect("first insert");
    let err = project_model("Apollo")
        .insert(&db)
        .await
        .expect_err("duplicate name must be rejected");

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    // Case-different duplicates are allowed (uniqueness is exact-match).
    project_model("apollo")
        .insert(&db)
        .await
        .expect("case-different name is a distinct project");
}

#[tokio::test]
async fn test_member_name_unique_constraint() {
    let db = setup_test_db().await;
    let now = Utc::now();

    let member = team_member::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Alice".to_string()),
        role: Set("BE".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    member.insert(&db).await.expect("first insert");

    let dup = team_member::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Alice".to_string()),
        role: Set("FE".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let err = dup.insert(&db).await.expect_err("duplicate member name");
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_task_defaults_and_status_roundtrip() {
    let db = setup_test_db().await;

    let inserted = task_model("Design API", "Alice", "Apollo")
        .insert(&db)
        .await
        .expect("Failed to insert task");
    assert_eq!(inserted.status, task::TaskStatus::Todo);

    let mut active: task::ActiveModel = inserted.into();
    active.status = Set(task::TaskStatus::Done);
    let updated = active.update(&db).await.expect("Failed to update");
    assert_eq!(updated.status, task::TaskStatus::Done);

    let found = task::Entity::find_by_id(updated.id)
        .one(&db)
        .await
        .expect("query")
        .expect("task exists");
    assert_eq!(found.status, task::TaskStatus::Done);
}

#[tokio::test]
async fn test_delete_tasks_by_project_name() {
    let db = setup_test_db().await;

    task_model("a", "Alice", "Apollo").insert(&db).await.unwrap();
    task_model("b", "Bob", "Apollo").insert(&db).await.unwrap();
    task_model("c", "Alice", "Gemini").insert(&db).await.unwrap();

    let res = task::Entity::delete_many()
        .filter(task::Column::Project.eq("Apollo"))
        .exec(&db)
        .await
        .expect("delete_many");
    assert_eq!(res.rows_affected, 2);

    let remaining = task::Entity::find().all(&db).await.expect("query");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].project, "Gemini");
}

#[tokio::test]
async fn test_task_pagination_ordering() {
    let db = setup_test_db().await;

    for i in 0..12 {
        let mut model = task_model(&format!("task {i}"), "Alice", "Apollo");
        // Spread creation times so the ordering is deterministic.
        model.created_at = Set(Utc::now() + chrono::Duration::seconds(i));
        model.insert(&db).await.unwrap();
    }

    let paginator = task::Entity::find()
        .order_by_desc(task::Column::CreatedAt)
        .paginate(&db, 10);

    assert_eq!(paginator.num_items().await.unwrap(), 12);

    let first_page = paginator.fetch_page(0).await.unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].description, "task 11");

    let second_page = paginator.fetch_page(1).await.unwrap();
    assert_eq!(second_page.len(), 2);
}
