//! solrnav - faceted search against a Solr core from the command line
//!
//! Searches, single-document lookups, counts, posts and deletes, with facet
//! navigation links that can be fed back into the next search. Cores and
//! collections can be listed, created and removed.

use anyhow::Context;
use clap::{Parser, Subcommand};
use solrnav_cli::{
    execute_command, exit_code_for_error, CliArgs, CliCommand, CommandContext, ConfigManager,
    OutputFormatter,
};
use solrnav_core::SolrError;
use solrnav_infra::{connect, init_logger, logger_config_from_env, LoggerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solrnav")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Faceted search and document updates against a Solr core")]
#[command(long_about = r#"
solrnav sends searches to a Solr core and prints documents, facets and paging
links. Every link is a query string that can be passed back to `search --link`.

The core URL comes from --url, the SOLRNAV_CORE_URL environment variable, or
the core_url key of the configuration file.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every Solr request URL
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Solr core URL, e.g. http://localhost:8983/solr/bibdata
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Output format (json, yaml, pretty, compact, table)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the core
    Search(solrnav_cli::SearchArgs),

    /// Fetch a single document
    Get(solrnav_cli::GetArgs),

    /// Count the documents in the core
    Count(solrnav_cli::CountArgs),

    /// Add or replace documents from a JSON file
    Post(solrnav_cli::PostArgs),

    /// Delete documents by id
    Delete(solrnav_cli::DeleteArgs),

    /// Manage cores or collections
    Admin(solrnav_cli::AdminArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<SolrError>()
            .map(exit_code_for_error)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut manager = ConfigManager::new();
    manager.load_default_cli_config()?;

    let args = CliArgs {
        output_format: cli.output.clone(),
        log_level: cli.log_level.clone(),
        use_colors: (cli.no_color || solrnav_cli::is_ci()).then_some(false),
        config_file: cli.config.clone(),
        core_url: cli.url.clone(),
        verbose: cli.verbose,
    };
    manager
        .merge_with_args(&args)
        .context("Failed to load configuration")?;

    let solr_config = manager.solr_config_or_default()?;
    init_logging(cli, &manager, &solr_config.logging)?;
    tracing::debug!("Starting solrnav v{}", env!("CARGO_PKG_VERSION"));

    let client = connect(solr_config)?;
    let output = OutputFormatter::new(manager.cli_config());
    let mut ctx = CommandContext::new(client, output);

    match &cli.command {
        Commands::Search(args) => run_command(args, &mut ctx),
        Commands::Get(args) => run_command(args, &mut ctx),
        Commands::Count(args) => run_command(args, &mut ctx),
        Commands::Post(args) => run_command(args, &mut ctx),
        Commands::Delete(args) => run_command(args, &mut ctx),
        Commands::Admin(args) => run_command(args, &mut ctx),
    }
}

fn run_command<C: CliCommand>(
    command: &C,
    ctx: &mut CommandContext<solrnav_infra::ReqwestTransport>,
) -> anyhow::Result<()> {
    execute_command(command, ctx)?;
    Ok(())
}

/// Environment settings first, then the logging section of the Solr config
/// file in effect, then command-line flags
fn init_logging(
    cli: &Cli,
    manager: &ConfigManager,
    logging: &solrnav_core::LoggingConfig,
) -> anyhow::Result<()> {
    let mut config = if std::env::var("SOLRNAV_LOG_LEVEL").is_ok() {
        logger_config_from_env()
    } else if manager.solr_config_source().is_some() {
        LoggerConfig::from(logging)
    } else {
        LoggerConfig {
            level: manager.cli_config().default_log_level.to_string(),
            ..LoggerConfig::default()
        }
    };

    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    // Request URLs are logged at info when verbose
    if cli.verbose && !matches!(config.level.as_str(), "debug" | "trace") {
        config.level = "info".to_string();
    }

    init_logger(config)?;
    Ok(())
}
