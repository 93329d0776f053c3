pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug)]
pub enum AppCommand {
    Quote { from: String },
    Afford { price: f64, installments: Option<u32> },
    Import { price: f64, currency: String },
    Recommend { item: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Financial Sniper starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = providers::AwesomeApiProvider::new(
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_secs),
    );
    let rates = providers::CachingRateProvider::new(
        source,
        Duration::from_secs(config.provider.ttl_minutes * 60),
    );

    match command {
        AppCommand::Quote { from } => cli::quote::run(&rates, &from, &config.currency).await,
        AppCommand::Afford {
            price,
            installments,
        } => cli::afford::run(&config, price, installments),
        AppCommand::Import { price, currency } => {
            cli::import::run(&config, &rates, price, &currency).await
        }
        AppCommand::Recommend { item } => {
            cli::recommend::run(&config, &rates, item.as_deref()).await
        }
    }
}
