use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tekstowo_crawl::{CrawlConfig, Crawler, DirStore, Fetcher, HttpFetcher, SiteClient, WhatlangClassifier};
use tekstowo_model::{Letter, PageLimit, PageTable};

/// Listing pages walked per letter when no other page limit is given.
const DEFAULT_MAX_PAGES: u32 = 2;

#[derive(Parser)]
#[command(name = "tekstowo")]
#[command(about = "Crawl lyrics and translations from tekstowo.pl, one artist letter at a time")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Artist index to crawl: a single letter, or "pozostale" for everything else
    #[arg(long, alias = "artist-letter", default_value = "Q")]
    letter: Letter,

    /// Progress checkpoint interval (accepted for compatibility, currently unused)
    #[arg(long, default_value_t = 30)]
    save_progress: u32,

    /// Walk this many listing pages [default: 2]
    #[arg(long, conflicts_with_all = ["resolve_pages", "page_table"])]
    max_pages: Option<u32>,

    /// Ask the site how many listing pages the letter has before crawling
    #[arg(long, conflicts_with = "page_table")]
    resolve_pages: bool,

    /// JSON table of listing pages per letter; built across the whole index if missing
    #[arg(long, value_name = "FILE")]
    page_table: Option<PathBuf>,

    /// Directory the lyric files are written to
    #[arg(short = 'O', long, default_value = "teksty")]
    output_dir: PathBuf,

    /// Site origin that relative links are joined to
    #[arg(long, default_value = tekstowo_crawl::config::DEFAULT_ORIGIN)]
    origin: String,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn init_tracing(log_level: &LogLevel, utc: bool) {
    // HTML parsing crates are chatty below info
    let level = match log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z".to_string();

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format))
            .init();
    }
}

/// Turn the page-limit flags into a [`PageLimit`], hitting the site only
/// when asked to resolve or build page counts.
async fn page_limit<F: Fetcher>(cli: &Cli, client: &SiteClient<F>) -> Result<PageLimit> {
    if let Some(path) = &cli.page_table {
        let table = if path.exists() {
            load_page_table(path)?
        } else {
            let table = client.build_page_table().await;
            store_page_table(path, &table)?;
            table
        };
        return Ok(PageLimit::PerLetter(table));
    }

    if cli.resolve_pages {
        return Ok(PageLimit::Fixed(client.listing_pages(cli.letter).await));
    }

    Ok(PageLimit::Fixed(cli.max_pages.unwrap_or(DEFAULT_MAX_PAGES)))
}

fn load_page_table(path: &Path) -> Result<PageTable> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page table {}", path.display()))?;
    let table: PageTable = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid page table {}", path.display()))?;
    tracing::info!(path = %path.display(), letters = table.len(), "Loaded page table");
    Ok(table)
}

fn store_page_table(path: &Path, table: &PageTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write page table {}", path.display()))?;
    tracing::info!(path = %path.display(), letters = table.len(), "Saved page table");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.utc);

    tracing::debug!(save_progress = cli.save_progress, "Progress checkpoints are not implemented, ignoring --save-progress");

    let config = CrawlConfig {
        origin: cli.origin.trim_end_matches('/').to_string(),
        ..CrawlConfig::default()
    };
    let store = DirStore::create(&cli.output_dir)?;
    let fetcher = HttpFetcher::new(&config).context("Failed to build HTTP client")?;
    let client = SiteClient::new(config, fetcher);

    let limit = page_limit(&cli, &client).await?;
    tracing::info!(
        letter = %cli.letter,
        output_dir = %store.dir().display(),
        "Crawling artists under {}",
        cli.letter
    );

    let crawler = Crawler::new(client, WhatlangClassifier, store);
    let stats = crawler
        .run(cli.letter, &limit)
        .await
        .with_context(|| format!("Crawl of letter {} failed", cli.letter))?;

    tracing::info!(
        artists = stats.artists,
        failed_artists = stats.failed_artists,
        songs = stats.songs,
        degraded_songs = stats.degraded_songs,
        files = stats.files_written,
        "Crawl finished"
    );
    Ok(())
}
