use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use covid_dashboard::app::DashboardUseCase;
use covid_dashboard::boundary::{self, ReqwestBoundarySource};
use covid_dashboard::config::Config;
use covid_dashboard::constants;
use covid_dashboard::logging;
use covid_dashboard::server;

#[derive(Parser)]
#[command(name = "covid_dashboard")]
#[command(about = "COVID-19 mortality dashboard for Colombia")]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to ./dashboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard and serve it over HTTP
    Serve {
        /// Workbook to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// Address or host name to listen on, e.g. 0.0.0.0 or localhost
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Build the dashboard and write it to an HTML file
    Build {
        /// Workbook to read
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = constants::DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
    },
    /// Print the aggregated views as JSON
    Summary {
        /// Workbook to read
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Download the boundary document if it is not cached yet
    Boundaries,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = logging::init_logging(&config.logging).context("Failed to set up logging")?;

    match cli.command {
        Commands::Serve { input, host, port } => {
            if let Some(input) = input {
                config.input.path = input;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let use_case = DashboardUseCase::new(config, Box::new(ReqwestBoundarySource::new()));
            let dataset = use_case.load_dataset().context("Failed to load case records")?;
            let dashboard = use_case.build(&dataset).context("Failed to build dashboard")?;

            // The data work above is blocking; the runtime is only for serving
            let server_cfg = use_case.config().server.clone();
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime
                .block_on(server::start_server(
                    Arc::new(dashboard),
                    &server_cfg.host,
                    server_cfg.port,
                ))
                .context("Dashboard server failed")?;
        }
        Commands::Build { input, output } => {
            if let Some(input) = input {
                config.input.path = input;
            }
            let use_case = DashboardUseCase::new(config, Box::new(ReqwestBoundarySource::new()));
            let dataset = use_case.load_dataset().context("Failed to load case records")?;
            let dashboard = use_case.build(&dataset).context("Failed to build dashboard")?;
            fs::write(&output, dashboard.html())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(path = %output.display(), "Dashboard written");
        }
        Commands::Summary { input } => {
            if let Some(input) = input {
                config.input.path = input;
            }
            let use_case = DashboardUseCase::new(config, Box::new(ReqwestBoundarySource::new()));
            let dataset = use_case.load_dataset().context("Failed to load case records")?;
            let summary = use_case.summary(&dataset);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Boundaries => {
            let path = config.boundary.path.clone();
            let key = config.boundary.feature_key.clone();
            let use_case = DashboardUseCase::new(config, Box::new(ReqwestBoundarySource::new()));
            let document = use_case
                .boundaries()
                .context("Failed to obtain boundary document")?;
            let names = boundary::feature_names(&document, &key);
            println!("{}: {} features keyed by {}", path.display(), names.len(), key);
        }
    }
    Ok(())
}
