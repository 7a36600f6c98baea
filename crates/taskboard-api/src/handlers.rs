use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{sse::Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info};
use uuid::Uuid;

use taskboard_service::domain::{DashboardStats, NewMember, NewTask, Project, Task, TeamMember};
use taskboard_service::{messages, ServiceError};

use crate::models::*;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Translate a service error to its HTTP shape. Internal causes are logged
/// and replaced by a generic message.
fn service_error(err: ServiceError) -> ApiError {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Internal(cause) => {
            error!(error = %cause, "Unhandled service error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: messages::SERVER_ERROR.to_string(),
                }),
            );
        }
    };
    (
        status,
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
}

fn not_found(message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

/// Deletion authorization code, read from the `x-auth-code` header.
fn auth_code(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-auth-code").and_then(|v| v.to_str().ok())
}

/// Record ids are UUIDs; anything else cannot resolve to a record.
fn parse_id(raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| not_found(message))
}

// ========== Projects ==========

/// List projects (full sorted list with `all=true`, paginated otherwise)
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ListQuery),
    responses(
        (status = 200, description = "List of projects", body = ProjectList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProjectList>, ApiError> {
    debug!("Listing projects: {:?}", query);

    if query.all.unwrap_or(false) {
        let data = state
            .service
            .list_all_projects()
            .await
            .map_err(service_error)?;
        return Ok(Json(ProjectList {
            data,
            pagination: None,
        }));
    }

    let page = state
        .service
        .list_projects(query.page, query.limit)
        .await
        .map_err(service_error)?;
    Ok(Json(ProjectList {
        pagination: Some(Pagination::from_page(&page)),
        data: page.data,
    }))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Missing or empty name", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let created = state
        .service
        .create_project(body.name.as_deref().unwrap_or(""))
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a project and all tasks referencing it by name
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("x-auth-code" = String, Header, description = "Deletion authorization code")
    ),
    responses(
        (status = 200, description = "Project and its tasks deleted", body = MessageResponse),
        (status = 401, description = "Wrong or missing authorization code", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("Deleting project: {}", id);

    let id = parse_id(&id, messages::PROJECT_NOT_FOUND)?;
    state
        .service
        .delete_project(id, auth_code(&headers))
        .await
        .map_err(service_error)?;
    Ok(Json(MessageResponse {
        message: messages::PROJECT_DELETED.to_string(),
    }))
}

// ========== Tasks ==========

/// List tasks with filtering and pagination
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "List of tasks", body = TaskList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<TaskList>, ApiError> {
    debug!("Listing tasks with filters: {:?}", query);

    let page = state
        .service
        .list_tasks(
            query.project,
            query.pic,
            query.search,
            query.page,
            query.limit,
        )
        .await
        .map_err(service_error)?;
    Ok(Json(TaskList {
        pagination: Some(Pagination::from_page(&page)),
        data: page.data,
    }))
}

/// Create a task (status always starts at `todo`)
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing field or malformed due date", body = ErrorResponse)
    ),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = state
        .service
        .create_task(NewTask {
            description: body.description,
            pic: body.pic,
            project: body.project,
            due_date: body.due_date,
        })
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Change a task's status
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 400, description = "Invalid status value", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "tasks"
)]
pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id, messages::TASK_NOT_FOUND)?;
    let updated = state
        .service
        .update_task_status(id, body.status.as_deref().unwrap_or(""))
        .await
        .map_err(service_error)?;
    Ok(Json(updated))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = String, Path, description = "Task ID"),
        ("x-auth-code" = String, Header, description = "Deletion authorization code")
    ),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 401, description = "Wrong or missing authorization code", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("Deleting task: {}", id);

    let id = parse_id(&id, messages::TASK_NOT_FOUND)?;
    state
        .service
        .delete_task(id, auth_code(&headers))
        .await
        .map_err(service_error)?;
    Ok(Json(MessageResponse {
        message: messages::TASK_DELETED.to_string(),
    }))
}

// ========== Team members ==========

/// List members (full sorted list with `all=true`, paginated otherwise)
#[utoipa::path(
    get,
    path = "/api/members",
    params(ListQuery),
    responses(
        (status = 200, description = "List of members", body = MemberList),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MemberList>, ApiError> {
    debug!("Listing members: {:?}", query);

    if query.all.unwrap_or(false) {
        let data = state
            .service
            .list_all_members()
            .await
            .map_err(service_error)?;
        return Ok(Json(MemberList {
            data,
            pagination: None,
        }));
    }

    let page = state
        .service
        .list_members(query.page, query.limit)
        .await
        .map_err(service_error)?;
    Ok(Json(MemberList {
        pagination: Some(Pagination::from_page(&page)),
        data: page.data,
    }))
}

/// Add a team member
#[utoipa::path(
    post,
    path = "/api/members",
    request_body = MemberRequest,
    responses(
        (status = 201, description = "Member created", body = TeamMember),
        (status = 400, description = "Missing name or role", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MemberRequest>,
) -> Result<(StatusCode, Json<TeamMember>), ApiError> {
    let created = state
        .service
        .create_member(NewMember {
            name: body.name,
            role: body.role,
        })
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a member's name and role together
#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(("id" = String, Path, description = "Member ID")),
    request_body = MemberRequest,
    responses(
        (status = 200, description = "Updated member", body = TeamMember),
        (status = 400, description = "Missing name or role", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 409, description = "Name used by another member", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<MemberRequest>,
) -> Result<Json<TeamMember>, ApiError> {
    let id = parse_id(&id, messages::MEMBER_NOT_FOUND)?;
    let updated = state
        .service
        .update_member(
            id,
            NewMember {
                name: body.name,
                role: body.role,
            },
        )
        .await
        .map_err(service_error)?;
    Ok(Json(updated))
}

/// Remove a team member (tasks keep referencing the name)
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(
        ("id" = String, Path, description = "Member ID"),
        ("x-auth-code" = String, Header, description = "Deletion authorization code")
    ),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 401, description = "Wrong or missing authorization code", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    tag = "members"
)]
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("Deleting member: {}", id);

    let id = parse_id(&id, messages::MEMBER_NOT_FOUND)?;
    state
        .service
        .delete_member(id, auth_code(&headers))
        .await
        .map_err(service_error)?;
    Ok(Json(MessageResponse {
        message: messages::MEMBER_DELETED.to_string(),
    }))
}

// ========== Dashboard & system ==========

/// Aggregate task/project/member counts
#[utoipa::path(
    get,
    path = "/api/dashboard-stats",
    responses(
        (status = 200, description = "Aggregate counters", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state
        .service
        .dashboard_stats()
        .await
        .map_err(service_error)?;
    Ok(Json(stats))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server-Sent Events stream for the realtime variant. Every mutation pushes
/// a `*_changed` signal plus a notification payload; clients re-fetch on the
/// former and toast the latter.
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let Some(realtime) = &state.realtime else {
        return Err(not_found("Realtime tidak diaktifkan."));
    };

    info!("SSE client connected");
    let rx = realtime.subscribe();

    // Lagged receivers and serialization misses are skipped, not fatal:
    // delivery is best-effort.
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let event = result.ok()?;
        let json = serde_json::to_string(&event).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
