//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{DashboardService, LeadService, ManagerService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, employer_middleware, AuthState};

use super::modules::{auth, dashboard, health, leads, managers};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::me,
        // Leads
        leads::handlers::list_leads,
        leads::handlers::get_lead,
        leads::handlers::create_lead,
        leads::handlers::update_lead,
        leads::handlers::delete_lead,
        // Managers
        managers::handlers::list_managers,
        managers::handlers::update_manager,
        managers::handlers::delete_manager,
        // Dashboard
        dashboard::handlers::lead_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserInfo,
            // Leads
            leads::dto::LeadResponse,
            leads::dto::ManagerRefDto,
            leads::dto::CreateLeadRequest,
            leads::dto::UpdateLeadRequest,
            // Managers
            managers::dto::ManagerResponse,
            managers::dto::UpdateManagerRequest,
            // Dashboard
            dashboard::dto::DashboardStatsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Server health check endpoints"),
        (name = "auth", description = "User authentication: login (JWT), current account"),
        (name = "leads", description = "Lead CRUD with role-based visibility"),
        (name = "managers", description = "Manager account administration (employer-only)"),
        (name = "dashboard", description = "Aggregate lead statistics (employer-only)"),
    ),
    info(
        title = "Lead CRM API",
        version = "1.0.0",
        description = "REST API for role-based lead management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let lead_service = Arc::new(LeadService::new(repos.clone()));
    let manager_service = Arc::new(ManagerService::new(repos.clone()));
    let dashboard_service = Arc::new(DashboardService::new(repos.clone()));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::me))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Lead routes (any authenticated user; services enforce per-resource
    // ownership behind the shared token check)
    let lead_routes = Router::new()
        .route(
            "/",
            get(leads::handlers::list_leads).post(leads::handlers::create_lead),
        )
        .route(
            "/{id}",
            get(leads::handlers::get_lead)
                .put(leads::handlers::update_lead)
                .delete(leads::handlers::delete_lead),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(leads::LeadsState {
            leads: lead_service,
        });

    // Manager routes (employer-only)
    let manager_routes = Router::new()
        .route("/", get(managers::handlers::list_managers))
        .route(
            "/{id}",
            put(managers::handlers::update_manager).delete(managers::handlers::delete_manager),
        )
        .layer(middleware::from_fn(employer_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(managers::ManagersState {
            managers: manager_service,
        });

    // Dashboard routes (employer-only)
    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::handlers::lead_stats))
        .layer(middleware::from_fn(employer_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(dashboard::DashboardState {
            dashboard: dashboard_service,
        });

    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Leads
        .nest("/api/v1/leads", lead_routes)
        // Managers
        .nest("/api/v1/managers", manager_routes)
        // Dashboard
        .nest("/api/v1/dashboard", dashboard_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
