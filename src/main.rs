use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod models;
mod parsers;
mod recognize;
mod sources;
mod storage;
mod utils;

use crate::config::Config;
use crate::models::Offer;
use crate::parsers::{effective_price_cny, format_amount, select_best};
use crate::recognize::{query_from_image, PlainTextRecognizer};
use crate::sources::{CorpusSource, LogProgress, OfferSource, SampleSource, SourceRunner};
use crate::storage::{SqliteStorage, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bijia=info".parse()?),
        )
        .init();

    info!(
        "Starting bijia at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    // Load configuration
    let config = Arc::new(Config::load()?);

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path).await?;
    storage.migrate().await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let query = resolve_query(&args, &storage).await?;
    info!("Query: {:?}", query);

    // Initialize HTTP client with connection pooling
    let client = utils::http::create_client(&config.user_agent)?;

    // Register sources
    let sources: Vec<Box<dyn OfferSource>> = vec![
        Box::new(SampleSource::new(Duration::from_millis(
            config.sample_delay_ms,
        ))),
        Box::new(CorpusSource::new(
            client,
            config.corpus_base_url.clone(),
            Duration::from_millis(config.corpus_timeout_ms),
        )),
    ];

    let runner = SourceRunner::new(sources).with_observer(Arc::new(LogProgress));
    let offers = runner.run(&query).await;

    render(&offers);

    storage.save_offers(&offers).await?;
    storage.save_query(&query).await?;

    Ok(())
}

/// Query precedence: recognized text from `--text-file`, then the joined
/// positional arguments, then whatever query was stored last.
async fn resolve_query(args: &[String], storage: &SqliteStorage) -> Result<String> {
    let mut words: Vec<&str> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--text-file" {
            let path = iter
                .next()
                .context("--text-file requires a path argument")?;
            match query_from_image(&PlainTextRecognizer, Path::new(path)).await {
                Ok(query) if !query.is_empty() => return Ok(query),
                Ok(_) => {
                    warn!("No usable text extracted from {}", path);
                    return Ok(String::new());
                }
                Err(e) => {
                    warn!("Text recognition failed for {}: {:#}", path, e);
                    return Ok(String::new());
                }
            }
        }
        words.push(arg);
    }

    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    Ok(storage.last_query().await?.unwrap_or_default())
}

fn render(offers: &[Offer]) {
    if offers.is_empty() {
        println!("暂无报价 (no offers available)");
        return;
    }

    for offer in offers {
        println!("{}", offer_line(offer));
    }

    if let Some(best) = select_best(offers) {
        println!(
            "最优 {} · {}",
            format_amount(effective_price_cny(best), "CNY"),
            best.display_merchant()
        );
    }
}

/// One printed offer: merchant, effective CNY cost, native price, title, URL.
fn offer_line(offer: &Offer) -> String {
    format!(
        "{:<12} {:>12}  {:>10}  {}  {}",
        offer.display_merchant(),
        format_amount(effective_price_cny(offer), "CNY"),
        format_amount(offer.price.value(), &offer.currency),
        offer.title,
        offer.url
    )
}
