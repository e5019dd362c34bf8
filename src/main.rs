mod error;
mod fetch;
mod output;
mod parser;
mod product;

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

const DEFAULT_URL: &str = "https://www.momoshop.com.tw/category/LgrpCategory.jsp\
                           ?l_code=1912300000&mdiv=1099600000-bt_0_996_10-&ctype=B";

#[derive(Parser, Debug)]
#[command(
    name = "momo_scraper",
    about = "Extract product titles and prices from a Momoshop category page"
)]
struct Cli {
    /// Category page URL
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Max products to print (default: all)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write results as CSV to this path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Keep only products whose category or title contains this text (e.g. "AI手機")
    #[arg(long)]
    keyword: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let t0 = Instant::now();

    let html = fetch_with_spinner(&cli.url, Duration::from_secs(cli.timeout))?;
    let mut stdout = std::io::stdout().lock();
    let count = emit(&html, &cli, &mut stdout)?;

    info!("Emitted {} products in {:.1}s", count, t0.elapsed().as_secs_f64());
    Ok(())
}

fn fetch_with_spinner(url: &str, timeout: Duration) -> Result<String> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message("Fetching category page...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch::fetch_html(url, timeout);
    pb.finish_and_clear();
    result.context("Failed to fetch category page")
}

/// Extract, filter, limit, then write CSV (if requested) and stdout.
/// Nothing is written unless extraction succeeds.
fn emit<W: Write>(html: &str, cli: &Cli, out: &mut W) -> Result<usize> {
    let mut products =
        parser::extract_products(html).context("Failed to parse category page")?;
    info!("Extracted {} products", products.len());

    if let Some(keyword) = &cli.keyword {
        products = product::filter_by_keyword(products, keyword);
        info!("{} products match keyword {:?}", products.len(), keyword);
    }
    let products = output::apply_limit(products, cli.limit);

    if let Some(path) = &cli.csv {
        output::write_csv_file(path, &products)?;
        eprintln!("Saved {} products to {}", products.len(), path.display());
    }

    if cli.json {
        writeln!(out, "{}", output::render_json(&products)?)?;
    } else if products.is_empty() {
        eprintln!("No matching products found.");
    } else {
        writeln!(out, "{}", output::render_text(&products))?;
    }
    out.flush()?;

    Ok(products.len())
}
