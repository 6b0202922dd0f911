use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A personal portfolio page for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use a different config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive page (default)
    Run {
        /// Portfolio content file
        #[arg(short, long)]
        content: Option<PathBuf>,
        /// Built-in theme name
        #[arg(short, long)]
        theme: Option<String>,
    },
    /// Write the default content file next to the config
    Init {
        /// Overwrite an existing content file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the page as plain text
    Print {
        /// Portfolio content file
        #[arg(short, long)]
        content: Option<PathBuf>,
        /// Page width in columns
        #[arg(short, long, default_value_t = 100)]
        width: u16,
    },
    /// List built-in themes
    Themes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli
        .config
        .as_deref()
        .map(folio_core::config::expand_tilde)
        .unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // The interactive page owns the terminal, so it logs to a file
    let interactive = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, interactive)?;

    match cli.command {
        None => commands::run::run(config, None, None).await,
        Some(Commands::Run { content, theme }) => commands::run::run(config, content, theme).await,
        Some(Commands::Init { force }) => commands::init::run(&config_path, force),
        Some(Commands::Print { content, width }) => commands::print::run(&config, content, width),
        Some(Commands::Themes) => commands::themes::run(&config),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let file_layer = if to_file {
        let path = config.log_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    let stderr_layer = (!to_file).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}
