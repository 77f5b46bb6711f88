//! catalog-scrape: listing scraper, JSON API and terminal browser.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use catalog_scrape::api::{self, ChromeCatalogService};
use catalog_scrape::client::{Card, CatalogClient, CatalogView};
use catalog_scrape::utils::{
    DEFAULT_API_ADDR, DEFAULT_MAX_CONCURRENT_SESSIONS, DEFAULT_PAGE_DELAY_MS, DEFAULT_START_URL,
};
use catalog_scrape::{ScrapeConfig, scrape_catalog, scrape_product_details};

#[derive(Parser)]
#[command(name = "catalog-scrape")]
#[command(about = "Scrape a storefront's product listing through headless Chromium")]
#[command(version)]
struct Cli {
    /// First listing page
    #[arg(long, global = true, env = "CATALOG_START_URL", default_value = DEFAULT_START_URL)]
    start_url: String,

    /// Pause between listing pages, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_DELAY_MS)]
    page_delay_ms: u64,

    /// Stop after this many listing pages
    #[arg(long, global = true)]
    max_pages: Option<usize>,

    /// Show the browser window (debug builds only)
    #[arg(long, global = true)]
    headed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "CATALOG_ADDR", default_value = DEFAULT_API_ADDR)]
        addr: SocketAddr,

        /// Browsers allowed to run at once
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_SESSIONS)]
        max_sessions: usize,
    },

    /// Scrape the listing once and print it as JSON
    Scrape {
        #[arg(long)]
        pretty: bool,
    },

    /// Scrape one product's detail page and print it as JSON
    Detail {
        product_id: String,

        #[arg(long)]
        image_url: Option<String>,
    },

    /// Load the catalog from a running API and print it
    Browse {
        #[arg(long, default_value_t = format!("http://{DEFAULT_API_ADDR}"))]
        api: String,

        /// Only show items whose name or size contains this
        #[arg(long)]
        term: Option<String>,

        /// Report API failures instead of showing sample data
        #[arg(long)]
        no_fallback: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_scrape=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_config(cli: &Cli, max_sessions: usize) -> Result<ScrapeConfig> {
    let mut builder = ScrapeConfig::builder()
        .start_url(cli.start_url.clone())
        .page_delay_ms(cli.page_delay_ms)
        .headless(!cli.headed)
        .max_concurrent_sessions(max_sessions);
    if let Some(max_pages) = cli.max_pages {
        builder = builder.max_pages(max_pages);
    }
    builder.build().context("Invalid scrape configuration")
}

fn print_view(view: &CatalogView) {
    if view.using_sample_data() {
        println!("Demo mode: API not available, showing sample data.");
    }
    if let Some(summary) = view.summary() {
        println!("{summary}");
    }

    for card in view.cards() {
        match card {
            Card::Product {
                product_id,
                name,
                size,
                price,
                original_price,
                ..
            } => {
                let was = if original_price.is_empty() {
                    String::new()
                } else {
                    format!(" (was {original_price})")
                };
                println!("{product_id:<16} {name:<32} {size:<10} {price}{was}");
            }
            Card::MissingId => println!("{:<16} This product cannot be viewed in detail.", "-"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { addr, max_sessions } => {
            let config = build_config(&cli, *max_sessions)?;
            info!("Scraping {} on request", config.start_url());
            api::serve(*addr, ChromeCatalogService::new(config)).await
        }
        Commands::Scrape { pretty } => {
            let config = build_config(&cli, DEFAULT_MAX_CONCURRENT_SESSIONS)?;
            let records = scrape_catalog(&config).await?;
            let json = if *pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Detail {
            product_id,
            image_url,
        } => {
            let config = build_config(&cli, DEFAULT_MAX_CONCURRENT_SESSIONS)?;
            let detail = scrape_product_details(&config, product_id, image_url.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
            Ok(())
        }
        Commands::Browse {
            api,
            term,
            no_fallback,
        } => {
            let client = CatalogClient::new(api)?;
            let mut view = CatalogView::new(!no_fallback);
            client.load(&mut view).await;
            if let Some(term) = term {
                view.set_search_term(term.clone());
            }
            print_view(&view);
            Ok(())
        }
    }
}
