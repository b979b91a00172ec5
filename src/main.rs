//! vade binary entry point.

use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use vade::cli::output::Output;
use vade::cli::{self, Cli, Commands};
use vade::types::Result;
use vade::utils::config::Config;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose, cli.quiet);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Ingest => cli::ingest::handle_ingest(&config, &output).await,
        Commands::Embed => cli::embed::handle_embed(&config, &output).await,
        Commands::Search { query, top_k } => {
            cli::query::handle_search(&config, query, top_k, &output).await
        }
        Commands::Ask {
            question,
            top_k,
            no_sources,
        } => cli::query::handle_ask(&config, question, top_k, no_sources, &output).await,
        Commands::Config { validate } => cli::handle_config(&config, &cli.config, validate, &output),
    }
}

/// Initialize tracing from the CLI flags, honoring a VADE_LOG override.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("VADE_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
