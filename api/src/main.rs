//! Built API Server
//!
//! Tracks construction projects for their owners: schedule and budget, the
//! tasks and materials inside each project, the costs incurred against it,
//! and an activity log of every action and failed call.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    init_db, SqlActivityLogRepository, SqlCostEntryRepository, SqlCredentialRepository,
    SqlMaterialRepository, SqlProjectRepository, SqlTaskRepository, SqlUserRepository,
};
use app::{
    ActivityService, AuthService, MaterialService, ProjectService, TaskService, UserService,
};
use auth::TokenIssuer;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqlUserRepository, SqlProjectRepository>>,
    pub project_service: Arc<
        ProjectService<
            SqlProjectRepository,
            SqlUserRepository,
            SqlCostEntryRepository,
            SqlActivityLogRepository,
        >,
    >,
    pub task_service:
        Arc<TaskService<SqlTaskRepository, SqlProjectRepository, SqlActivityLogRepository>>,
    pub material_service:
        Arc<MaterialService<SqlMaterialRepository, SqlProjectRepository, SqlActivityLogRepository>>,
    pub activity_service: Arc<ActivityService<SqlActivityLogRepository>>,
    pub auth_service:
        Arc<AuthService<SqlUserRepository, SqlCredentialRepository, SqlActivityLogRepository>>,
    pub tokens: TokenIssuer,
    pub config: Config,
}

impl AppState {
    /// Wire repositories and services over one database connection
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        // Create adapters
        let user_repo = Arc::new(SqlUserRepository::new(db.clone()));
        let credential_repo = Arc::new(SqlCredentialRepository::new(db.clone()));
        let project_repo = Arc::new(SqlProjectRepository::new(db.clone()));
        let task_repo = Arc::new(SqlTaskRepository::new(db.clone()));
        let material_repo = Arc::new(SqlMaterialRepository::new(db.clone()));
        let cost_repo = Arc::new(SqlCostEntryRepository::new(db.clone()));
        let activity_repo = Arc::new(SqlActivityLogRepository::new(db));

        let tokens = TokenIssuer::from_config(&config);

        // Create application services
        let activity_service = Arc::new(ActivityService::new(activity_repo));

        let user_service = Arc::new(UserService::new(user_repo.clone(), project_repo.clone()));

        let project_service = Arc::new(ProjectService::new(
            project_repo.clone(),
            user_repo.clone(),
            cost_repo,
            activity_service.clone(),
        ));

        let task_service = Arc::new(TaskService::new(
            task_repo,
            project_repo.clone(),
            activity_service.clone(),
        ));

        let material_service = Arc::new(MaterialService::new(
            material_repo,
            project_repo,
            activity_service.clone(),
        ));

        let auth_service = Arc::new(
            AuthService::new(
                user_repo,
                credential_repo,
                activity_service.clone(),
                tokens.clone(),
            )
            .with_hash_cost(config.bcrypt_cost),
        );

        Self {
            user_service,
            project_service,
            task_service,
            material_service,
            activity_service,
            auth_service,
            tokens,
            config,
        }
    }
}

/// Register a route under both `path` and `path/`
fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        // Credentials rule out a literal wildcard, so echo the caller's origin
        AllowOrigin::mirror_request()
    } else {
        let list: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full router with its middleware stack
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Auth routes
    let mut auth_routes = Router::new();
    auth_routes = route_both(auth_routes, "/login", post(handlers::login));
    auth_routes = route_both(auth_routes, "/signup", post(handlers::signup));

    if state.config.auth_rate_limit {
        // Rate limiting config: 2 req/sec sustained, burst of 5
        // Uses PeerIpKeyExtractor to get client IP from socket connection
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(2)
                .burst_size(5)
                .finish()
                .context("Failed to build governor config")?,
        );
        auth_routes = auth_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let mut api = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Users
        .route("/user/:id", get(handlers::get_user))
        // Projects
        .route(
            "/project/:id",
            get(handlers::get_project)
                .patch(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route("/project/:id/financials", get(handlers::get_financials))
        .route("/project/:id/costs", post(handlers::add_cost))
        // Tasks
        .route(
            "/task/:id",
            get(handlers::get_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        )
        // Materials
        .route(
            "/material/:id",
            get(handlers::get_material)
                .patch(handlers::update_material)
                .delete(handlers::delete_material),
        )
        // Activity log (read-only)
        .route("/activity_log/:id", get(handlers::get_activity_log));

    api = route_both(api, "/user", post(handlers::create_user));
    api = route_both(
        api,
        "/project",
        get(handlers::list_projects).post(handlers::create_project),
    );
    api = route_both(
        api,
        "/task",
        get(handlers::list_tasks).post(handlers::create_task),
    );
    api = route_both(
        api,
        "/material",
        get(handlers::list_materials).post(handlers::create_material),
    );

    let app = api
        .merge(auth_routes)
        .fallback(handlers::not_found)
        // Middleware (last added runs first)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::record_failures,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::identity_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.backend_cors_origins))
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,built_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Built API...");

    // Load configuration
    let config = Config::from_env();
    if config.uses_default_keys() {
        tracing::warn!("SECRET_KEY or REFRESH_KEY not set, using the built-in default");
    }

    // Connect to the database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    init_db(&db).await.context("Failed to create schema")?;
    tracing::info!("Database ready");

    let port = config.port;
    let state = AppState::new(db, config);
    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
