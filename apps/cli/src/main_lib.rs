use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cashly_api_client::CashlyApiClient;
use cashly_core::state::StaticToken;

use crate::config::{Config, LogFormat};

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_client(config: &Config) -> anyhow::Result<CashlyApiClient> {
    let token = config
        .api_token
        .clone()
        .context("CASHLY_API_TOKEN is not set")?;
    let client = CashlyApiClient::new(
        &config.api_url,
        Arc::new(StaticToken(token)),
        Some(config.request_timeout),
    )?;
    tracing::debug!("Using Cashly API at {}", client.base_url());
    Ok(client)
}
