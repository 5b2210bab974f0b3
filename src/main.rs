//! Lead CRM service entry point
//!
//! REST API server for role-based lead management.
//! Reads configuration from TOML file (~/.config/crm-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use lead_crm::config::AppConfig;
use lead_crm::infrastructure::crypto::jwt::JwtConfig;
use lead_crm::infrastructure::database::migrator::Migrator;
use lead_crm::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CRM_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Lead CRM service...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "crm-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Create default employer account if no users exist
    create_default_employer(&db, &app_cfg).await;

    let repos: Arc<dyn lead_crm::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Create REST API router
    let app = create_api_router(repos, db.clone(), jwt_config);

    // Start REST API server with graceful shutdown
    let addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }

    info!("Lead CRM service shutdown complete");
    Ok(())
}

/// Create a default employer account if the user table is empty
async fn create_default_employer(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use lead_crm::infrastructure::crypto::password::hash_password;
    use lead_crm::infrastructure::database::entities::user::{self, UserRole};
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);

    if users_count == 0 {
        info!("Creating default employer account...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash employer password: {}", e);
                return;
            }
        };

        let employer = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(app_cfg.admin.name.clone()),
            email: Set(app_cfg.admin.email.clone()),
            password_hash: Set(password_hash),
            role: Set(UserRole::Employer),
            created_at: Set(chrono::Utc::now()),
            updated_at: Set(chrono::Utc::now()),
        };

        match employer.insert(db).await {
            Ok(_) => {
                info!("Default employer created: {}", app_cfg.admin.email);
                warn!("Please change the default password immediately!");
            }
            Err(e) => {
                error!("Failed to create employer account: {}", e);
            }
        }
    }
}
