use std::sync::Arc;

use analysis_orchestrator::AnalysisOrchestrator;
use anyhow::{Context, Result};
use market_data::{market_status, MarketDataConfig, StockDataService};

mod report;

const DEFAULT_SYMBOL: &str = "AAPL";

struct CliArgs {
    symbols: Vec<String>,
    json: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> CliArgs {
    let mut symbols = Vec::new();
    let mut json = false;
    for arg in args {
        if arg == "--json" {
            json = true;
        } else {
            symbols.push(arg);
        }
    }
    if symbols.is_empty() {
        symbols.push(DEFAULT_SYMBOL.to_string());
    }
    CliArgs { symbols, json }
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout stays clean for the report
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = parse_args(std::env::args().skip(1));

    let config = MarketDataConfig::from_env().context("invalid market data configuration")?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Live provider: {}", if config.live_api_key().is_some() { "Alpha Vantage" } else { "none (demo data)" });
    tracing::info!("  Cache TTL: {}s", config.cache_ttl.as_secs());
    tracing::info!("  Fallback: {:?}", config.fallback);

    let service = StockDataService::new(config)?;
    let orchestrator = AnalysisOrchestrator::new(Arc::new(service));

    let results = orchestrator.analyze_many(&args.symbols).await;

    if args.json {
        let analyses: Vec<_> = results
            .iter()
            .filter_map(|(symbol, result)| match result {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    tracing::error!("Analysis failed for {}: {}", symbol, e);
                    None
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&analyses)?);
    } else {
        println!("{}", report::render_market_status(&market_status()));
        for (symbol, result) in &results {
            match result {
                Ok(analysis) => println!("{}", report::render(analysis)),
                Err(e) => eprintln!("{}: analysis failed: {}", symbol, e),
            }
        }
        println!("{}", report::DISCLAIMER);
    }

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();
    if failures == results.len() {
        anyhow::bail!("no symbol could be analyzed");
    }
    Ok(())
}
