//! HTTP layer: routes, DTOs, OpenAPI docs, the SSE stream, and the embedded
//! front-end. No business logic lives here; handlers parse parameters, call
//! the [`BoardService`], and translate error kinds to status codes.

pub mod handlers;
pub mod models;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Response, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use taskboard_service::{BoardService, BroadcastNotifier};

#[derive(RustEmbed)]
#[folder = "../../webapps/board/dist"]
struct BoardAssets;

/// Application state shared across handlers
pub struct AppState {
    pub service: BoardService,
    /// Present only in the realtime variant; `/api/events` 404s otherwise.
    pub realtime: Option<Arc<BroadcastNotifier>>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "REST API for the team task board",
        contact(
            name = "Taskboard Team",
            email = "team@taskboard.io"
        )
    ),
    paths(
        handlers::list_projects,
        handlers::create_project,
        handlers::delete_project,
        handlers::list_tasks,
        handlers::create_task,
        handlers::update_task_status,
        handlers::delete_task,
        handlers::list_members,
        handlers::create_member,
        handlers::update_member,
        handlers::delete_member,
        handlers::dashboard_stats,
        handlers::health_check,
    ),
    components(
        schemas(
            taskboard_service::domain::Project,
            taskboard_service::domain::Task,
            taskboard_service::domain::TeamMember,
            taskboard_service::domain::TaskStatus,
            taskboard_service::domain::DashboardStats,
            models::CreateProjectRequest,
            models::CreateTaskRequest,
            models::UpdateTaskStatusRequest,
            models::MemberRequest,
            models::Pagination,
            models::ProjectList,
            models::TaskList,
            models::MemberList,
            models::MessageResponse,
            models::ErrorResponse,
            models::HealthResponse,
        )
    ),
    tags(
        (name = "projects", description = "Project management endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "members", description = "Team member management endpoints"),
        (name = "dashboard", description = "Aggregate counters"),
        (name = "system", description = "System health endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS (for development against a separately served front-end)
    pub enable_cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(
        config: ApiServerConfig,
        service: BoardService,
        realtime: Option<Arc<BroadcastNotifier>>,
    ) -> Self {
        let state = Arc::new(AppState { service, realtime });
        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let api_router = Router::new()
            .route(
                "/api/projects",
                get(handlers::list_projects).post(handlers::create_project),
            )
            .route(
                "/api/projects/{id}",
                axum::routing::delete(handlers::delete_project),
            )
            .route(
                "/api/tasks",
                get(handlers::list_tasks).post(handlers::create_task),
            )
            .route(
                "/api/tasks/{id}",
                axum::routing::put(handlers::update_task_status).delete(handlers::delete_task),
            )
            .route(
                "/api/members",
                get(handlers::list_members).post(handlers::create_member),
            )
            .route(
                "/api/members/{id}",
                axum::routing::put(handlers::update_member).delete(handlers::delete_member),
            )
            .route("/api/dashboard-stats", get(handlers::dashboard_stats))
            .route("/api/health", get(handlers::health_check))
            .route("/api/events", get(handlers::events_stream))
            .with_state(self.state.clone());

        // SwaggerUi automatically creates a route for /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router)
            .fallback(serve_board);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            // No cookies or per-user auth; the deletion code travels in a
            // custom header, so it must be allowed explicitly.
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-auth-code"),
                ])
                .allow_origin(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}

/// Serve static files from the embedded board front-end
async fn serve_board(req: axum::extract::Request) -> impl IntoResponse {
    let path = req.uri().path();
    let path = path.trim_start_matches('/');

    if let Some(content) = BoardAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let mut response = Response::new(Body::from(content.data.to_vec()));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(mime.as_ref()).unwrap_or(HeaderValue::from_static("text/plain")),
        );
        return response;
    }

    // If not found and not an API route, serve index.html (SPA fallback)
    if !path.starts_with("api") && !path.starts_with("swagger-ui") {
        if let Some(content) = BoardAssets::get("index.html") {
            let mut response = Response::new(Body::from(content.data.to_vec()));
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
            return response;
        }
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not Found"))
        .unwrap_or_default()
}
