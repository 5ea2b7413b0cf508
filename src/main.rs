// src/main.rs
// =============================================================================
// This is the entry point of the crawler.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Load and check spider.yaml and the seed list
// 4. Run the crawl until there is nothing left to do
// 5. Exit with a proper code (0 = crawl completed, 1 = could not start)
//
// Individual pages failing does not change the exit code; they are logged
// and the crawl moves on.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use cli::Cli;
use mini_spider::config::{load_seeds, SpiderConfig, CONFIG_FILE_NAME};
use mini_spider::fetch::HttpFetcher;
use mini_spider::logging::init_logging;
use mini_spider::Scheduler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, &cli.log_dir) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "mini-spider starting");

    let config_path = cli.conf_dir.join(CONFIG_FILE_NAME);
    let config = SpiderConfig::load(&config_path).context("Failed to load configuration")?;

    let seeds = load_seeds(&config.url_list_file).context("Failed to load seeds")?;

    tokio::fs::create_dir_all(&config.output_directory)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output_directory.display()
            )
        })?;

    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
    let scheduler = Scheduler::new(&config, seeds, Arc::new(fetcher))?;

    let summary = scheduler.run().await;
    info!(
        fetched = summary.fetched,
        saved = summary.saved,
        failed = summary.failed,
        "crawl finished"
    );

    Ok(())
}
