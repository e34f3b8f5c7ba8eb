//! Burner Domains CLI - lint, normalize and prune the burner domain list
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates subcommands to validator, normalizer and pruner operations
//! - Handles process exit codes and terminal output; logs go to stderr

use burner_domains::{
    normalize_file, pruner_from_config, validator_from_config, BurnerConfig, BurnerResult,
    OutputFormat, ReportFormatter, ReportOptions,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Burner Domains - maintenance tooling for the burner email domain list
#[derive(Parser)]
#[command(name = "burner-domains")]
#[command(version)]
#[command(about = "Lint, normalize and prune a list of burner email domains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the list for duplicates, wrong sorting and invalid domains
    Check {
        /// List file (defaults to the configured list, emails.txt)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Maximum number of violations to report
        #[arg(long)]
        max_violations: Option<usize>,
    },

    /// Report upstream domains without a working MX record
    Prune {
        /// URL or path of the list to prune (defaults to the canonical upstream list)
        #[arg(short, long)]
        source: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Lowercase, deduplicate and sort the list in place
    Sort {
        /// List file (defaults to the configured list, emails.txt)
        path: Option<PathBuf>,

        /// Only report whether the list is normalized; never rewrite it
        #[arg(long)]
        check: bool,
    },

    /// Check domains read from stdin for MX records
    Mx,

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli).await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run_command(cli: Cli) -> BurnerResult<i32> {
    let config_path = cli.config;
    let load_config = || BurnerConfig::discover(config_path.as_deref());

    match cli.command {
        Commands::Check {
            path,
            format,
            max_violations,
        } => run_check(&load_config()?, path, format, max_violations),
        Commands::Prune { source, format } => run_prune(&load_config()?, source, format).await,
        Commands::Sort { path, check } => run_sort(&load_config()?, path, check),
        Commands::Mx => run_mx(&load_config()?).await,
        Commands::ValidateConfig { config_file } => {
            Ok(run_validate_config(config_file.or_else(|| config_path.clone())))
        }
    }
}

fn run_check(
    config: &BurnerConfig,
    path: Option<PathBuf>,
    format: OutputFormatArg,
    max_violations: Option<usize>,
) -> BurnerResult<i32> {
    let path = path.unwrap_or_else(|| config.list.path.clone());

    let validator = validator_from_config(config);
    let report = validator.validate_file(&path)?;

    let formatter = ReportFormatter::new(ReportOptions { max_violations });
    formatter.write_validation(&report, format.into(), io::stdout().lock())?;

    if report.has_violations() {
        tracing::debug!(
            "{} violations in {}",
            report.summary.violations_by_kind.total(),
            path.display()
        );
        Ok(1)
    } else {
        Ok(0)
    }
}

async fn run_prune(
    config: &BurnerConfig,
    source: Option<String>,
    format: OutputFormatArg,
) -> BurnerResult<i32> {
    let location = source.unwrap_or_else(|| config.prune.upstream_url.clone());

    let mut pruner = pruner_from_config(config)?;

    match OutputFormat::from(format) {
        OutputFormat::Json => {
            let report = pruner.prune(&location).await?;
            let formatted = ReportFormatter::default().format_prune(&report, OutputFormat::Json)?;
            print!("{}", formatted);
        }
        OutputFormat::Human | OutputFormat::GitHub => {
            // Fetch before the header so a failed fetch prints nothing
            pruner.fetch_list(&location).await?;
            print!("{}", ReportFormatter::prune_header());
            let report = pruner
                .prune_with(&location, |domain| {
                    print!("{}", ReportFormatter::prune_removed_line(domain));
                })
                .await?;
            print!("{}", ReportFormatter::prune_footer(&report));
        }
    }

    tracing::info!("{}", pruner.cache_statistics().format_display());

    Ok(0)
}

fn run_sort(config: &BurnerConfig, path: Option<PathBuf>, check: bool) -> BurnerResult<i32> {
    let path = path.unwrap_or_else(|| config.list.path.clone());

    let summary = normalize_file(&path, check)?;

    if check && summary.changed {
        println!("{} is not normalized", path.display());
        return Ok(1);
    }

    Ok(0)
}

async fn run_mx(config: &BurnerConfig) -> BurnerResult<i32> {
    let domains = read_domains(io::stdin().lock())?;
    println!("Checking {} domains", domains.len());

    let mut pruner = pruner_from_config(config)?;
    let failed = pruner.find_unreachable(&domains).await;

    if !failed.is_empty() {
        println!("These domains do not have any active MX records:");
        println!("{}", failed.join("\n"));
    }

    Ok(0)
}

/// One domain per line; blank lines are skipped
fn read_domains<R: BufRead>(reader: R) -> BurnerResult<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let domain = line.trim();
        if !domain.is_empty() {
            domains.push(domain.to_string());
        }
    }
    Ok(domains)
}

fn run_validate_config(config_path: Option<PathBuf>) -> i32 {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("burner.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match BurnerConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  List: {}", config.list.path.display());
            println!("  Suffix source: {:?}", config.suffix.source);
            println!("  Upstream: {}", config.prune.upstream_url);
            println!(
                "  DNS: {}s timeout, {} attempts",
                config.dns.timeout_secs, config.dns.attempts
            );
            0
        }
        Err(e) => {
            eprintln!("Configuration validation failed: {}", e);
            1
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
