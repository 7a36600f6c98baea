//! Service-level tests over the in-memory store.

use std::sync::Arc;

use taskboard_service::{
    BoardEvent, BoardService, BroadcastNotifier, MemoryStore, NewMember, NewTask, NoopNotifier,
    ServiceError, TaskStatus,
};
use uuid::Uuid;

const CODE: &str = "LSKK2025";

fn service() -> BoardService {
    BoardService::new(Arc::new(MemoryStore::new()), Arc::new(NoopNotifier), CODE)
}

fn new_task(description: &str, pic: &str, project: &str) -> NewTask {
    NewTask {
        description: Some(description.to_string()),
        pic: Some(pic.to_string()),
        project: Some(project.to_string()),
        due_date: Some("2025-01-01".to_string()),
    }
}

fn new_member(name: &str, role: &str) -> NewMember {
    NewMember {
        name: Some(name.to_string()),
        role: Some(role.to_string()),
    }
}

// ===== Projects =====

#[tokio::test]
async fn create_project_trims_and_returns_record() {
    let svc = service();
    let project = svc.create_project("  Apollo  ").await.unwrap();
    assert_eq!(project.name, "Apollo");
    assert!(!project.id.is_nil());
}

#[tokio::test]
async fn create_project_rejects_empty_name() {
    let svc = service();
    let err = svc.create_project("   ").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.to_string(), "Nama proyek tidak boleh kosong.");
}

#[tokio::test]
async fn duplicate_project_name_conflicts_exact_match_only() {
    let svc = service();
    svc.create_project("Apollo").await.unwrap();

    let err = svc.create_project("Apollo").await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Nama proyek sudah ada.");

    // Case-different duplicates coexist; uniqueness is exact-match.
    svc.create_project("apollo").await.unwrap();
}

#[tokio::test]
async fn project_listing_modes_and_pagination() {
    let svc = service();
    for name in ["Charlie", "alpha", "Bravo"] {
        svc.create_project(name).await.unwrap();
    }

    // "all" mode sorts by name ascending (byte order).
    let all = svc.list_all_projects().await.unwrap();
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bravo", "Charlie", "alpha"]);

    // Paginated mode: newest first, default limit 5.
    let page = svc.list_projects(None, None).await.unwrap();
    assert_eq!(page.limit, 5);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages(), 1);
    assert_eq!(page.data[0].name, "Bravo");

    let page2 = svc.list_projects(Some(2), Some(2)).await.unwrap();
    assert_eq!(page2.data.len(), 1);
    assert_eq!(page2.total_pages(), 2);

    // A page past the end is empty but keeps the totals.
    let beyond = svc.list_projects(Some(9), Some(2)).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.total, 3);
}

#[tokio::test]
async fn huge_page_and_limit_values_yield_an_empty_page() {
    let svc = service();
    svc.create_project("Apollo").await.unwrap();
    svc.create_task(new_task("a", "Alice", "Apollo")).await.unwrap();

    // page * limit exceeds u64; the computed offset must not overflow.
    let projects = svc
        .list_projects(Some(u64::MAX), Some(u64::MAX))
        .await
        .unwrap();
    assert!(projects.data.is_empty());
    assert_eq!(projects.total, 1);

    let tasks = svc
        .list_tasks(None, None, None, Some(u64::MAX), Some(u64::MAX))
        .await
        .unwrap();
    assert!(tasks.data.is_empty());
    assert_eq!(tasks.total, 1);
}

#[tokio::test]
async fn delete_project_cascades_by_name() {
    let svc = service();
    let apollo = svc.create_project("Apollo").await.unwrap();
    svc.create_project("Gemini").await.unwrap();
    svc.create_task(new_task("a", "Alice", "Apollo")).await.unwrap();
    svc.create_task(new_task("b", "Bob", "Apollo")).await.unwrap();
    svc.create_task(new_task("c", "Alice", "Gemini")).await.unwrap();

    svc.delete_project(apollo.id, Some(CODE)).await.unwrap();

    let apollo_tasks = svc
        .list_tasks(Some("Apollo".into()), None, None, None, None)
        .await
        .unwrap();
    assert_eq!(apollo_tasks.total, 0);

    // Other projects' tasks are untouched.
    let gemini_tasks = svc
        .list_tasks(Some("Gemini".into()), None, None, None, None)
        .await
        .unwrap();
    assert_eq!(gemini_tasks.total, 1);
}

#[tokio::test]
async fn delete_requires_exact_auth_code() {
    let svc = service();
    let project = svc.create_project("Apollo").await.unwrap();
    svc.create_task(new_task("a", "Alice", "Apollo")).await.unwrap();

    for code in [None, Some("wrong"), Some("lskk2025")] {
        let err = svc.delete_project(project.id, code).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    // Nothing was mutated by the failed attempts.
    assert_eq!(svc.list_projects(None, None).await.unwrap().total, 1);
    assert_eq!(
        svc.list_tasks(None, None, None, None, None).await.unwrap().total,
        1
    );
}

#[tokio::test]
async fn delete_unknown_project_is_not_found() {
    let svc = service();
    let err = svc
        .delete_project(Uuid::new_v4(), Some(CODE))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

// ===== Tasks =====

#[tokio::test]
async fn create_task_defaults_to_todo() {
    let svc = service();
    let task = svc
        .create_task(new_task("Design API", "Alice", "Apollo"))
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.due_date.to_string(), "2025-01-01");
}

#[tokio::test]
async fn create_task_requires_all_fields() {
    let svc = service();
    let mut input = new_task("Design API", "Alice", "Apollo");
    input.pic = Some("  ".to_string());
    let err = svc.create_task(input).await.unwrap_err();
    assert_eq!(err.to_string(), "Semua field wajib diisi.");

    let mut input = new_task("Design API", "Alice", "Apollo");
    input.due_date = None;
    let err = svc.create_task(input).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn create_task_rejects_malformed_due_date() {
    let svc = service();
    let mut input = new_task("Design API", "Alice", "Apollo");
    input.due_date = Some("01/01/2025".to_string());
    let err = svc.create_task(input).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Data tidak valid atau terjadi kesalahan server."
    );
}

#[tokio::test]
async fn task_filters_and_search() {
    let svc = service();
    svc.create_task(new_task("Design API", "Alice", "Apollo")).await.unwrap();
    svc.create_task(new_task("Write docs", "Bob", "Apollo")).await.unwrap();
    svc.create_task(new_task("Deploy API gateway", "Alice", "Gemini")).await.unwrap();

    // "all" sentinel means no filter.
    let page = svc
        .list_tasks(Some("all".into()), Some("all".into()), None, None, None)
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.limit, 10);

    let apollo = svc
        .list_tasks(Some("Apollo".into()), None, None, None, None)
        .await
        .unwrap();
    assert_eq!(apollo.total, 2);
    assert!(apollo.data.iter().all(|t| t.project == "Apollo"));

    let alice = svc
        .list_tasks(None, Some("Alice".into()), None, None, None)
        .await
        .unwrap();
    assert_eq!(alice.total, 2);

    // Substring search is case-insensitive.
    let api = svc
        .list_tasks(None, None, Some("api".into()), None, None)
        .await
        .unwrap();
    assert_eq!(api.total, 2);

    let combined = svc
        .list_tasks(Some("Apollo".into()), Some("Alice".into()), Some("API".into()), None, None)
        .await
        .unwrap();
    assert_eq!(combined.total, 1);
    assert_eq!(combined.data[0].description, "Design API");
}

#[tokio::test]
async fn status_transitions_are_unrestricted() {
    let svc = service();
    let task = svc
        .create_task(new_task("Design API", "Alice", "Apollo"))
        .await
        .unwrap();

    let done = svc.update_task_status(task.id, "done").await.unwrap();
    assert_eq!(done.status, TaskStatus::Done);
    // done is not terminal
    let back = svc.update_task_status(task.id, "todo").await.unwrap();
    assert_eq!(back.status, TaskStatus::Todo);
    let wip = svc.update_task_status(task.id, "inprogress").await.unwrap();
    assert_eq!(wip.status, TaskStatus::InProgress);

    // Only the status changed.
    assert_eq!(wip.description, task.description);
    assert_eq!(wip.due_date, task.due_date);
    assert_eq!(wip.created_at, task.created_at);
}

#[tokio::test]
async fn invalid_status_leaves_task_unchanged() {
    let svc = service();
    let task = svc
        .create_task(new_task("Design API", "Alice", "Apollo"))
        .await
        .unwrap();

    let err = svc.update_task_status(task.id, "finished").await.unwrap_err();
    assert_eq!(err.to_string(), "Status tidak valid.");

    let page = svc.list_tasks(None, None, None, None, None).await.unwrap();
    assert_eq!(page.data[0].status, TaskStatus::Todo);
}

#[tokio::test]
async fn update_status_of_unknown_task_is_not_found() {
    let svc = service();
    let err = svc
        .update_task_status(Uuid::new_v4(), "done")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Tugas tidak ditemukan.");
}

// ===== Members =====

#[tokio::test]
async fn member_crud_and_conflicts() {
    let svc = service();
    let alice = svc.create_member(new_member("Alice", "BE")).await.unwrap();

    let err = svc
        .create_member(new_member("Alice", "Mobile"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Nama anggota sudah ada.");

    let bob = svc.create_member(new_member("Bob", "FE")).await.unwrap();

    // Renaming onto another member's name conflicts...
    let err = svc
        .update_member(bob.id, new_member("Alice", "FE"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Nama anggota tersebut sudah digunakan.");

    // ...but keeping your own name is fine.
    let updated = svc
        .update_member(alice.id, new_member("Alice", "Lead"))
        .await
        .unwrap();
    assert_eq!(updated.role, "Lead");

    let err = svc
        .update_member(bob.id, NewMember { name: Some("Bob".into()), role: None })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Nama dan Jabatan wajib diisi.");
}

#[tokio::test]
async fn deleting_member_does_not_touch_tasks() {
    let svc = service();
    let alice = svc.create_member(new_member("Alice", "BE")).await.unwrap();
    svc.create_task(new_task("Design API", "Alice", "Apollo")).await.unwrap();

    svc.delete_member(alice.id, Some(CODE)).await.unwrap();

    let tasks = svc
        .list_tasks(None, Some("Alice".into()), None, None, None)
        .await
        .unwrap();
    assert_eq!(tasks.total, 1);
}

// ===== Dashboard =====

#[tokio::test]
async fn dashboard_stats_add_up() {
    let svc = service();
    svc.create_project("Apollo").await.unwrap();
    svc.create_member(new_member("Alice", "BE")).await.unwrap();

    let a = svc.create_task(new_task("a", "Alice", "Apollo")).await.unwrap();
    let b = svc.create_task(new_task("b", "Alice", "Apollo")).await.unwrap();
    svc.create_task(new_task("c", "Alice", "Apollo")).await.unwrap();
    svc.update_task_status(a.id, "done").await.unwrap();
    svc.update_task_status(b.id, "inprogress").await.unwrap();

    let stats = svc.dashboard_stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.todo, 1);
    assert_eq!(stats.inprogress, 1);
    assert_eq!(stats.done, 1);
    assert_eq!(stats.total_projects, 1);
    assert_eq!(stats.total_members, 1);
    assert_eq!(stats.total, stats.todo + stats.inprogress + stats.done);
}

// ===== Fan-out =====

#[tokio::test]
async fn mutations_fan_out_changed_then_notification() {
    let notifier = Arc::new(BroadcastNotifier::new(16));
    let svc = BoardService::new(Arc::new(MemoryStore::new()), notifier.clone(), CODE);
    let mut rx = notifier.subscribe();

    svc.create_task(new_task("Design API", "Alice", "Apollo"))
        .await
        .unwrap();

    assert!(matches!(rx.try_recv().unwrap(), BoardEvent::TasksChanged));
    match rx.try_recv().unwrap() {
        BoardEvent::Notification { message, .. } => {
            assert!(message.contains("Design API"));
        }
        other => panic!("expected notification, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_mutations_publish_nothing() {
    let notifier = Arc::new(BroadcastNotifier::new(16));
    let svc = BoardService::new(Arc::new(MemoryStore::new()), notifier.clone(), CODE);
    let mut rx = notifier.subscribe();

    svc.create_project("  ").await.unwrap_err();
    svc.delete_task(Uuid::new_v4(), Some("wrong")).await.unwrap_err();

    assert!(rx.try_recv().is_err());
}
