mod cli;
mod config;

use std::sync::Arc;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Command};
use config::Config;
use unistock_core::stocks::{UnifiedStockService, UnifiedStockServiceTrait};
use unistock_market_data::{
    BursaProvider, BursaProviderConfig, LayeredSettings, SettingsReader, YahooClient,
};
use unistock_storage_sqlite::{open, DocumentRepository, GroupingRepository, SettingsRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let service = build_service(&config)?;
    let output = run(&service, cli.command).await?;

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn build_service(config: &Config) -> anyhow::Result<UnifiedStockService> {
    let (pool, writer) = open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let documents = Arc::new(DocumentRepository::new(pool.clone(), writer.clone()));
    let groupings = Arc::new(GroupingRepository::new(pool.clone(), writer.clone()));
    let settings: Arc<dyn SettingsReader> = Arc::new(SettingsRepository::new(pool, writer));

    let mut provider_config = BursaProviderConfig::from_settings(&LayeredSettings::new(Some(settings)));
    if let Some(cache_file) = &config.cache_file {
        provider_config = provider_config.with_cache_file(cache_file.clone());
    }
    let live = Arc::new(BursaProvider::new(YahooClient::new()?, provider_config));

    Ok(UnifiedStockService::new(documents, groupings, live))
}

async fn run(service: &UnifiedStockService, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Info {
            market,
            code,
            source,
        } => json!(service.get_stock_info(market, &code, source.as_deref()).await?),
        Command::Quote { market, code } => json!(service.get_stock_quote(market, &code).await?),
        Command::Search {
            market,
            query,
            limit,
        } => json!(service.search_stocks(market, &query, limit).await?),
        Command::Daily {
            market,
            code,
            start,
            end,
            limit,
        } => json!(service.get_daily_quotes(market, &code, start, end, limit).await?),
        Command::Markets => json!(service.get_supported_markets()),
        Command::Priority { market } => json!(service.resolver().resolve_code(&market).await),
    };
    Ok(output)
}
