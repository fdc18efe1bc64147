//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthUsecases, CompanyUsecases};
use crate::domain::CredentialService;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::auth::{self, AuthHandlerState};
use crate::interfaces::http::modules::companies::{self, CompanyState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// Everything the routes need, built once at startup.
/// Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub companies: Arc<dyn CompanyUsecases>,
    pub auth: Arc<dyn AuthUsecases>,
    pub credentials: Arc<dyn CredentialService>,
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for CompanyState {
    fn from_ref(s: &ApiState) -> Self {
        CompanyState {
            companies: Arc::clone(&s.companies),
        }
    }
}

impl FromRef<ApiState> for AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        AuthHandlerState {
            auth: Arc::clone(&s.auth),
            credentials: Arc::clone(&s.credentials),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        AuthState {
            auth: Arc::clone(&s.auth),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

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
                        .description(Some("Token from /register or /signin"))
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
        health::health_check,
        auth::register,
        auth::sign_in,
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::delete_company,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            auth::RegisterRequest,
            auth::SignInRequest,
            auth::TokenResponse,
            companies::CompanyRequest,
            companies::CompanyResponse,
            companies::CompanyIdResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Authentication", description = "Registration and sign in (JWT)"),
        (name = "Companies", description = "Company records; mutations need a bearer token"),
    ),
    info(
        title = "Companies Service API",
        version = "1.0.0",
        description = "CRUD over companies with token-gated mutations and change events",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is given.
pub fn create_api_router(state: ApiState, prometheus: Option<PrometheusHandle>) -> Router {
    let auth_layer = middleware::from_fn_with_state(AuthState::from_ref(&state), auth_middleware);

    let company_routes = Router::new()
        .route(
            "/companies",
            get(companies::list_companies)
                .merge(post(companies::create_company).route_layer(auth_layer.clone())),
        )
        .route(
            "/companies/{id}",
            get(companies::get_company).merge(
                patch(companies::update_company)
                    .delete(companies::delete_company)
                    .route_layer(auth_layer),
            ),
        );

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/signin", post(auth::sign_in));

    let mut router = Router::new()
        .route("/healthz", get(health::health_check))
        .merge(company_routes)
        .merge(auth_routes)
        .with_state(state);

    if let Some(handle) = prometheus {
        router = router.route(
            "/metrics",
            get(prometheus_metrics).with_state(MetricsState { handle }),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
