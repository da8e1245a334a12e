//! ebay-crawler - Stateless eBay item listing scraper CLI

use anyhow::Result;
use clap::Parser;
use ebay_crawler::commands::{ScrapeCommand, Scraped};
use ebay_crawler::config::{Config, OutputFormat};
use ebay_crawler::format::Formatter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ebay-crawler",
    version,
    about = "Stateless eBay item listing scraper",
    long_about = "Fetches eBay item pages and extracts title, price, condition, images, \
                  seller, shipping, quantity and variant options into a JSON file. \
                  One URL produces a single record, several URLs (or --batch) produce a list."
)]
struct Cli {
    /// Item page URL(s) to scrape
    #[arg(required = true)]
    urls: Vec<String>,

    /// File to write the scraped records to
    #[arg(short, long, env = "EBAY_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "EBAY_PROXY")]
    proxy: Option<String>,

    /// Delay before each request in milliseconds
    #[arg(long, env = "EBAY_DELAY")]
    delay: Option<u64>,

    /// Extra attempts after a server error or network failure
    #[arg(long)]
    retries: Option<u32>,

    /// Fail on the first field that cannot be parsed
    #[arg(long)]
    strict: bool,

    /// Write a list even when only one URL is given
    #[arg(long)]
    batch: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(retries) = cli.retries {
        config.retries = retries;
    }
    if cli.strict {
        config.strict = true;
    }
    if cli.batch {
        config.batch = true;
    }

    let formatter = Formatter::new(config.format);
    let cmd = ScrapeCommand::new(config);

    let scraped = cmd.execute(&cli.urls).await?;
    let output = match &scraped {
        Scraped::Single(record) => formatter.format_record(record),
        Scraped::Batch(records) => formatter.format_records(records),
    };

    println!("{}", output);
    info!("Saved {} record(s)", scraped.records().len());
    eprintln!("Data saved to \"{}\"", cmd.output_path().display());

    Ok(())
}
