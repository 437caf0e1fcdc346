use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thirtyfour::{DesiredCapabilities, WebDriver};

use sellscan_core::{load_app_config, load_marketplaces};
use sellscan_scraper::{
    run, JsonlSink, RunOptions, SelectorCatalog, Timing, WebDriverPage,
};

#[derive(Debug, Parser)]
#[command(name = "sellscan")]
#[command(about = "Discover marketplace sellers and extract their business registration data")]
struct Cli {
    /// Product identifiers (ASINs) to scan.
    #[arg(required = true)]
    products: Vec<String>,

    /// Process at most this many products.
    #[arg(long)]
    max_products: Option<usize>,

    /// Marketplace codes to restrict the run to, in processing order
    /// (default: all configured marketplaces).
    #[arg(long, value_delimiter = ',')]
    marketplaces: Vec<String>,

    /// Override the inter-request delay in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Also emit records for the platform's own storefront.
    #[arg(long)]
    include_first_party: bool,

    /// Output file (JSON Lines). Overrides SELLSCAN_OUTPUT_PATH.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let table = load_marketplaces(&config.marketplaces_path)?;
    let marketplaces = table.subset(&cli.marketplaces);
    if marketplaces.is_empty() {
        anyhow::bail!(
            "no configured marketplace matches {:?}; check {}",
            cli.marketplaces,
            config.marketplaces_path.display()
        );
    }

    let mut products = cli.products;
    if let Some(max) = cli.max_products {
        products.truncate(max);
    }

    let options = RunOptions {
        skip_first_party: !cli.include_first_party,
        delay_between_requests: Duration::from_millis(
            cli.delay_ms.unwrap_or(config.inter_request_delay_ms),
        ),
    };
    let timing = Timing {
        nav_timeout: Duration::from_secs(config.nav_timeout_secs),
        element_wait: Duration::from_secs(config.element_wait_secs),
        settle_delay: Duration::from_millis(config.settle_delay_ms),
    };
    let catalog = SelectorCatalog::default();

    let output_path = cli.output.unwrap_or_else(|| config.output_path.clone());
    let mut sink = JsonlSink::create(&output_path)?;

    tracing::info!(
        products = products.len(),
        marketplaces = marketplaces.len(),
        output = %output_path.display(),
        "starting seller scan"
    );

    let caps = DesiredCapabilities::chrome();
    let driver = WebDriver::new(&config.webdriver_url, caps).await?;
    let page = WebDriverPage::new(driver);

    let report = run(
        &page,
        &products,
        &marketplaces,
        &options,
        &catalog,
        &timing,
        &mut sink,
    )
    .await;

    if let Err(e) = page.quit().await {
        tracing::warn!(error = %e, "browser session did not close cleanly");
    }

    println!("Run complete.");
    println!("  records:              {}", report.total_records);
    println!("  distinct sellers:     {}", report.distinct_sellers);
    println!("  products processed:   {}", report.products_processed);
    println!("  marketplaces checked: {}", report.marketplaces_checked);
    println!("  with phone number:    {}", report.records_with_phone);
    println!("  with email:           {}", report.records_with_email);

    Ok(())
}
