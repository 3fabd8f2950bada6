use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod prompt;

use commands::{LearnArgs, LessonContext, ScanArgs, StrategiesArgs};
use options_lab_alpaca::{AlpacaClient, AlpacaClientConfig};
use options_lab_core::ConfigLoader;

#[derive(Parser)]
#[command(name = "options-lab")]
#[command(about = "Learn options trading against live Alpaca market data", long_about = None)]
struct Cli {
    /// Config file path (defaults to config/Options.toml when present)
    #[arg(short, long, global = true, env = "OPTIONS_LAB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Options basics: chains, calls, puts, moneyness and time decay
    Learn(LearnArgs),
    /// Greeks, covered calls, protective puts, paper trading and risk
    Strategies(StrategiesArgs),
    /// IV scanners, chain analyzer and quick reference
    Scan(ScanArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Lesson output goes to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::print_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    tracing::debug!(paper = config.alpaca.paper, "Configuration loaded");

    let client = AlpacaClient::new(AlpacaClientConfig::from_app_config(&config.alpaca))?;
    let today = chrono::Local::now().date_naive();
    let ctx = LessonContext::new(&client, &config, today);

    match cli.command {
        Commands::Learn(args) => commands::learn::run(args, ctx).await?,
        Commands::Strategies(args) => commands::strategies::run(args, ctx, &client).await?,
        Commands::Scan(args) => commands::scan::run(args, ctx).await?,
    }

    Ok(())
}
