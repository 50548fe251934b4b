mod frame_commands;
mod validate_commands;

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use {
    anyhow::{Context, Result},
    clap::{Parser, Subcommand},
    frames_config::FramesConfig,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "frames", version, about = "Inspect, render and validate frames")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "FRAMES_CONFIG")]
    config: Option<PathBuf>,

    /// Hub HTTP API URL (overrides config and environment).
    #[arg(long, global = true)]
    hub_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page and print its frame as JSON.
    Inspect {
        /// Page URL.
        url: String,
    },
    /// Parse a local HTML file (stdin when omitted) and print its frame.
    Parse {
        file: Option<PathBuf>,
        /// URL the HTML was served from; used as the post URL fallback.
        #[arg(long)]
        source_url: Option<String>,
    },
    /// Render frame JSON (stdin when omitted) as HTML.
    Render(frame_commands::RenderArgs),
    /// Validate a frame action request body (stdin when omitted).
    Validate {
        file: Option<PathBuf>,
        /// Decode the action without asking the hub. Never reports valid.
        #[arg(long)]
        ignore_signature: bool,
    },
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Config file (explicit or discovered), then environment, then `--hub-url`.
fn resolve_config(cli: &Cli) -> Result<FramesConfig> {
    let config = match &cli.config {
        Some(path) => frames_config::load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => frames_config::discover_and_load(),
    };
    let mut config = frames_config::apply_env_overrides(config);
    if let Some(url) = &cli.hub_url {
        config.hub.http_url = url.clone();
    }
    Ok(config)
}

/// Read `path`, or stdin when it is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "frames starting");

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Inspect { url } => frame_commands::handle_inspect(&config, &url).await,
        Commands::Parse { file, source_url } => {
            let html = read_input(file.as_deref())?;
            frame_commands::handle_parse(&html, source_url.as_deref())
        },
        Commands::Render(args) => {
            let json = read_input(args.file.as_deref())?;
            frame_commands::handle_render(&json, &args)
        },
        Commands::Validate {
            file,
            ignore_signature,
        } => {
            let body = read_input(file.as_deref())?;
            validate_commands::handle_validate(&config, &body, ignore_signature).await
        },
    }
}
