//! SSO Service - gRPC server for registration and login.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use common::Env;
use sso_service_lib::config::SsoServiceConfig;
use sso_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "sso-service")]
#[command(about = "Identity service issuing per-app access tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        /// Bind host, overriding AUTH_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overriding AUTH_SERVICE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = SsoServiceConfig::from_env();

    init_tracing(config.env);
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            sso_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            sso_service_lib::run_migrations(&config, migrate_action).await?;
        }
    }

    Ok(())
}

/// Initialize tracing for the deployment environment; `RUST_LOG` wins.
fn init_tracing(env: Env) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| env.default_log_level().into());
    let registry = tracing_subscriber::registry().with(filter);

    if env.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_are_optional_overrides() {
        let cli = Cli::try_parse_from(["sso-service", "serve", "--port", "50051"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(50051));
            }
            Commands::Migrate { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_serve_flags_ignore_environment() {
        std::env::set_var("AUTH_SERVICE_HOST", "10.0.0.1");
        std::env::set_var("AUTH_SERVICE_PORT", "50052");

        let cli = Cli::try_parse_from(["sso-service", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, None);
            }
            Commands::Migrate { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_migrate_subcommands() {
        let cli = Cli::try_parse_from(["sso-service", "migrate", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                action: MigrateCommands::Status
            }
        ));
    }
}
