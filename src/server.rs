//! Reusable companies service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, event bus, REST API, metrics, and graceful
//! shutdown. The CLI binary and the integration tests both build on it.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{
    create_event_bus, spawn_event_logger, AuthUsecase, AuthUsecases, CompanyService,
    CompanyUsecase, CompanyUsecases, EventService, SharedEventBus, UserService,
};
use crate::config::AppConfig;
use crate::domain::CredentialService;
use crate::infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryCompanyRepository,
    InMemoryUserRepository, JwtConfig, JwtCredentialService, SeaOrmCompanyRepository,
    SeaOrmUserRepository,
};
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── Wiring ─────────────────────────────────────────────────────────

/// Wire stores, services and usecases.
///
/// With a connection the SeaORM stores are used; without one the service
/// runs on the in-memory stores and `/healthz` reports the database as
/// disabled.
pub fn build_state(
    config: &AppConfig,
    db: Option<DatabaseConnection>,
    event_bus: SharedEventBus,
) -> ApiState {
    let credentials: Arc<dyn CredentialService> = Arc::new(JwtCredentialService::new(
        JwtConfig::new(
            config.security.jwt_secret.clone(),
            config.security.token_ttl_minutes,
            config.security.issuer.clone(),
        ),
        config.security.bcrypt_cost,
    ));
    let event_service = Arc::new(EventService::new(event_bus));

    let (companies, auth): (Arc<dyn CompanyUsecases>, Arc<dyn AuthUsecases>) = match &db {
        Some(conn) => (
            Arc::new(CompanyUsecase::new(
                Arc::new(CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(
                    conn.clone(),
                )))),
                event_service,
            )),
            Arc::new(AuthUsecase::new(
                Arc::new(UserService::new(Arc::new(SeaOrmUserRepository::new(conn.clone())))),
                Arc::clone(&credentials),
            )),
        ),
        None => (
            Arc::new(CompanyUsecase::new(
                Arc::new(CompanyService::new(Arc::new(InMemoryCompanyRepository::new()))),
                event_service,
            )),
            Arc::new(AuthUsecase::new(
                Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new()))),
                Arc::clone(&credentials),
            )),
        ),
    };

    ApiState {
        companies,
        auth,
        credentials,
        db,
        started_at: Arc::new(Instant::now()),
    }
}

/// Router over the given storage, without binding a socket.
pub fn build_app(
    config: &AppConfig,
    db: Option<DatabaseConnection>,
    event_bus: SharedEventBus,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    create_api_router(build_state(config, db, event_bus), prometheus)
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use companies_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// In-process event bus every company change is published on.
    pub event_bus: SharedEventBus,
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    logger_task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Validate the configuration
    /// 2. Install the Prometheus recorder (when enabled)
    /// 3. Connect to the database and run migrations
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting companies service...");

        // ── Prometheus metrics recorder ────────────────────────
        let prometheus_handle = if app_cfg.metrics.enabled {
            Some(install_recorder()?)
        } else {
            None
        };

        // ── Database ───────────────────────────────────────────
        let db = if app_cfg.database.uses_memory_stores() {
            warn!("database.url is \"memory\": records live in process memory only");
            None
        } else {
            let db_config = DatabaseConfig {
                url: app_cfg.database.url.clone(),
                max_connections: app_cfg.database.max_connections,
            };
            let db = init_database(&db_config).await?;

            if opts.auto_migrate {
                info!("Running database migrations...");
                run_migrations(&db).await?;
                info!("Migrations completed");
            }
            Some(db)
        };

        // ── Event Bus ──────────────────────────────────────────
        let event_bus = create_event_bus(app_cfg.events.capacity);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let logger_task = app_cfg
            .events
            .log_events
            .then(|| spawn_event_logger(&event_bus, shutdown_signal.clone()));

        // ── REST API server ────────────────────────────────────
        let api_router = build_app(&app_cfg, db.clone(), event_bus.clone(), prometheus_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            event_bus,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
            logger_task,
        })
    }

    /// Address the listener actually bound, useful with port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let Self {
            db,
            shutdown,
            api_task,
            logger_task,
            ..
        } = self;

        let finished = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                if let Some(task) = logger_task {
                    let _ = task.await;
                }
            })
            .await;
        if !finished {
            warn!("Shutdown timeout elapsed with requests still in flight");
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Companies service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down companies service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the API server task is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialise the tracing subscriber from `[logging]`.
///
/// `RUST_LOG` takes precedence over `logging.level` when set.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };
    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MEMORY_STORE_URL;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".into();
        config.security.jwt_secret = "server-test".into();
        config.security.bcrypt_cost = 4;
        config.metrics.enabled = false;
        config
    }

    #[tokio::test]
    async fn start_rejects_invalid_config() {
        let mut config = config();
        config.security.jwt_secret.clear();
        let result = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: true,
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn start_and_shutdown() {
        let handle = ServerHandle::start(ServerOptions {
            config: config(),
            auto_migrate: true,
        })
        .await
        .unwrap();

        assert_ne!(handle.local_addr().port(), 0);
        assert!(handle.is_running());

        let signal = handle.shutdown_signal();
        handle.shutdown().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn start_on_memory_stores() {
        let mut config = config();
        config.database.url = MEMORY_STORE_URL.into();
        let handle = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: true,
        })
        .await
        .unwrap();

        assert!(handle.db.is_none());
        handle.shutdown().await;
    }
}
