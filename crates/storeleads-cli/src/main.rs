mod input;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use storeleads_core::AppConfig;
use storeleads_scraper::{run_batch, write_json_array, write_json_lines, HttpClient, RetryPolicy};
use tracing_subscriber::EnvFilter;

/// Exit status when the cookie file cannot be read.
const EXIT_COOKIE_FILE: u8 = 2;
/// Exit status when the input file holds no queries.
const EXIT_EMPTY_INPUT: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "storeleads")]
#[command(about = "Scrape Storeleads search results into company records")]
struct Cli {
    /// File with one search URL or term per line (`#` starts a comment)
    #[arg(long, default_value = "data/sample_input.txt")]
    input: PathBuf,
    /// Destination for the scraped records
    #[arg(long, default_value = "data/sample_output.json")]
    output: PathBuf,
    /// Raw Cookie header value (overrides STORELEADS_COOKIES)
    #[arg(long)]
    cookies: Option<String>,
    /// Read the Cookie header value from a file (overrides --cookies)
    #[arg(long)]
    cookies_file: Option<PathBuf>,
    /// Reserved for parallel fetching; queries are processed one at a time
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    /// Synthesize records instead of fetching pages
    #[arg(long)]
    mock: bool,
    /// User-Agent header (overrides STORELEADS_USER_AGENT)
    #[arg(long)]
    user_agent: Option<String>,
    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match storeleads_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Runs one scrape. Fatal configuration problems map to dedicated exit codes;
/// anything else unexpected is returned as an error.
async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    let mut cookies = cli.cookies.or(config.cookies).unwrap_or_default();
    if let Some(path) = &cli.cookies_file {
        match input::load_cookies(path) {
            Ok(loaded) => cookies = loaded,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to read cookies file");
                return Ok(ExitCode::from(EXIT_COOKIE_FILE));
            }
        }
    }

    let mock = cli.mock || cookies.trim().is_empty();
    if mock {
        tracing::warn!("running in mock mode; no network requests will be made");
    } else {
        tracing::info!("running in live mode with provided cookies");
    }
    tracing::debug!(
        concurrency = cli.concurrency,
        "concurrency is reserved; queries run sequentially"
    );

    let user_agent = cli.user_agent.unwrap_or(config.user_agent);
    let retry = RetryPolicy {
        max_attempts: config.max_attempts,
        base_delay: Duration::from_millis(config.retry_backoff_base_ms),
        max_delay: Duration::from_millis(config.retry_backoff_max_ms),
    };
    let client = HttpClient::new(
        config.request_timeout_secs,
        &user_agent,
        Some(cookies.as_str()),
        retry,
    )
    .context("failed to build HTTP client")?;

    let queries = input::read_queries(&cli.input)?;
    if queries.is_empty() {
        tracing::error!(input = %cli.input.display(), "input file contains no queries");
        return Ok(ExitCode::from(EXIT_EMPTY_INPUT));
    }

    let outcome = run_batch(&queries, &client, mock).await;

    match cli.format {
        OutputFormat::Json => write_json_array(&cli.output, &outcome.records),
        OutputFormat::Jsonl => write_json_lines(&cli.output, &outcome.records),
    }
    .with_context(|| format!("failed to write {}", cli.output.display()))?;

    tracing::info!(
        records = outcome.records.len(),
        failed_queries = outcome.failed.len(),
        output = %cli.output.display(),
        "wrote records"
    );
    Ok(ExitCode::SUCCESS)
}
