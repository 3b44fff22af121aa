//! SSO Service Library
//!
//! Registers users, verifies credentials and issues access tokens signed
//! with the secret of the requesting client app. Exposed over gRPC and
//! backed by SQLite.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod service;
pub mod storage;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{error, info, info_span};

use crate::config::SsoServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::infra::Database;
use crate::service::Authenticator;
use crate::storage::SqliteStorage;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &SsoServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            if status.iter().all(|(_, applied)| *applied) {
                info!("No migrations to apply");
            }
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Run the gRPC server until Ctrl-C.
pub async fn run_server(config: SsoServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate().inspect_err(|e| error!(error = %e, "invalid configuration"))?;

    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let storage = Arc::new(SqliteStorage::new(db.get_connection()));
    let auth_service = Arc::new(Authenticator::new(
        info_span!("sso", env = ?config.env),
        storage.clone(),
        storage.clone(),
        storage,
        config.auth_settings(),
    ));

    let grpc_service = AuthGrpcService::new(auth_service);

    let addr: SocketAddr = config.service.addr().parse()?;
    info!(%addr, "SSO service listening");

    Server::builder()
        .timeout(config.request_timeout())
        .add_service(proto::AuthServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("SSO service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
