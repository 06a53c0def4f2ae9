use anyhow::{Context, Result, bail};
use mcptools::{
    AppConfig, AppState, ToolRegistry,
    cli::{
        Cli, Commands, extract,
        init::{self, InitConfig, InitResult},
        output::Output,
    },
    create_app,
    utils::toml_config::{ConfigSource, ServerConfig},
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init { ref path, force }) => {
            let result = init::run(
                InitConfig {
                    path: path.clone(),
                    force,
                },
                &output,
            );
            match result {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => bail!("init failed: {}", e),
            }
        }
        Some(Commands::Extract { ref file, validate }) => {
            run_extract(file.as_deref(), validate, &output)
        }
        Some(Commands::Tools) => {
            let (config, _) = load_config(&cli)?;
            let registry = ToolRegistry::with_config(&config.tools)?;
            output.tool_catalogue(&registry.get_tool_definitions());
            Ok(())
        }
        Some(Commands::Config { validate }) => {
            let (config, source) = load_config(&cli)?;
            print_config(&source, &config, validate, &output)
        }
        Some(Commands::Serve) | None => {
            let (config, source) = load_config(&cli)?;
            init_tracing(&config.server, cli.verbose);
            match &source {
                ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
                ConfigSource::Defaults(path) => {
                    warn!("No configuration file at {}, using defaults", path.display())
                }
            }
            serve(config, &output).await
        }
    }
}

/// Load the config file (or defaults) and apply `--host`/`--port`.
///
/// Runs before tracing is set up, so the source is returned for the caller to log.
fn load_config(cli: &Cli) -> Result<(AppConfig, ConfigSource)> {
    let (mut config, source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.validate().context("Invalid configuration")?;
    Ok((config, source))
}

fn init_tracing(server: &ServerConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { server.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mcptools={level},mcp_tools_server={level},tower_http={level}",
            level = default_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: AppConfig, output: &Output) -> Result<()> {
    let addr = config.bind_address();
    let state = AppState::from_config(config).context("Failed to build tool registry")?;
    let tools = state.mcp.tools().tool_names();
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.server_started(&addr, &tools);

    info!(%addr, ?tools, "MCP tool server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn run_extract(file: Option<&Path>, validate: bool, output: &Output) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let summary = match file {
        Some(path) => {
            let reader = File::open(path)
                .map(BufReader::new)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            extract::run(reader, &mut stdout, validate)?
        }
        None => extract::run(io::stdin().lock(), &mut stdout, validate)?,
    };

    output.extract_summary(&summary);
    Ok(())
}

fn print_config(
    source: &ConfigSource,
    config: &AppConfig,
    validate: bool,
    output: &Output,
) -> Result<()> {
    if validate {
        output.config_valid(source);
        return Ok(());
    }

    output.config_summary(source, config);
    println!("{}", config.to_toml().context("Failed to render configuration")?);
    Ok(())
}
