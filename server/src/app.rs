//! Core application

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, SystemCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::{MarketRepository, SqliteService};
use crate::domain::markets::{MarketService, import_file, market_filter_spec};
use crate::domain::query::FilterSpec;
use crate::utils::terminal::confirm;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<SqliteService>,
    pub markets: Arc<MarketService>,
    pub filter_spec: Arc<FilterSpec>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::System {
                command: system_cmd,
            }) => Self::handle_system_command(system_cmd),
            Some(Commands::Import { file }) => {
                let app = Self::init(&cli_config).await?;
                let result = app.import(&file).await;
                app.shutdown.shutdown().await;
                result
            }
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config).await?;
                Self::start_server(app).await
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init().await?;

        let database = Arc::new(
            SqliteService::init(&storage, config.database.max_connections)
                .await
                .context("Failed to initialize database")?,
        );
        let filter_spec =
            Arc::new(market_filter_spec().context("Invalid market filter definition")?);

        let repository: Arc<dyn MarketRepository> = Arc::new(database.clone());
        let markets = Arc::new(MarketService::new(repository));
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
            markets,
            filter_spec,
        })
    }

    async fn import(&self, file: &Path) -> Result<()> {
        println!("Importing markets from {}", file.display());

        let summary = import_file(file, self.markets.as_ref())
            .await
            .with_context(|| format!("Failed to import {}", file.display()))?;

        println!(
            "Imported {} rows: {} created, {} already existed, {} failed",
            summary.total(),
            summary.created,
            summary.skipped,
            summary.failed
        );
        Ok(())
    }

    fn handle_system_command(cmd: SystemCommands) -> Result<()> {
        match cmd {
            SystemCommands::Prune { yes } => Self::prune_data(yes),
        }
    }

    fn prune_data(skip_confirm: bool) -> Result<()> {
        let data_dir = AppStorage::resolve_data_dir();

        if !data_dir.exists() {
            println!(
                "Nothing to prune. Data directory does not exist: {}",
                data_dir.display()
            );
            return Ok(());
        }

        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        println!("This will permanently delete the local data directory:");
        println!("  {}", data_dir.display());
        println!();
        println!("Stop the server first: the market database lives in this directory.");

        if !skip_confirm && !confirm("Continue?")? {
            println!("Aborted.");
            return Ok(());
        }

        std::fs::remove_dir_all(&data_dir)
            .with_context(|| format!("Failed to delete data directory: {}", data_dir.display()))?;
        println!("Pruned: {}", data_dir.display());
        Ok(())
    }

    fn init_logging(debug: bool) {
        let env = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let filter = log_filter(env, debug);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Signal handlers go in before anything that can block
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        let count = MarketRepository::count(&app.database).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not count markets");
            0
        });
        tracing::debug!(markets = count, "Database ready");

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.storage.data_dir().display().to_string(),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_checkpoint_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}

/// Log filter directive. An explicit env filter wins over `--debug`.
fn log_filter(env: Option<String>, debug: bool) -> String {
    match env {
        Some(filter) => filter,
        None if debug => format!("debug,{}=debug", APP_NAME_LOWER),
        None => format!("info,{}=info", APP_NAME_LOWER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None, false), "info,feiras=info");
    }

    #[test]
    fn test_log_filter_debug_flag_raises_level() {
        assert_eq!(log_filter(None, true), "debug,feiras=debug");
    }

    #[test]
    fn test_log_filter_env_wins() {
        assert_eq!(log_filter(Some("warn".to_string()), true), "warn");
        assert_eq!(log_filter(Some("trace".to_string()), false), "trace");
    }
}
