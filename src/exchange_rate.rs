use crate::config::AlphaVantageConfig;
use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use std::time::Duration;

const QUERY_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage CURRENCY_EXCHANGE_RATE response. The payload key is absent
/// when the API rejects the request (bad key, rate limit), so it is optional
/// here and checked during parsing.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    rate: Option<RateInfo>,
}

#[derive(Debug, Deserialize)]
struct RateInfo {
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: String,
    #[serde(rename = "6. Last Refreshed")]
    last_refreshed: String,
}

pub struct AlphaVantageClient {
    http: reqwest::Client,
    config: AlphaVantageConfig,
}

impl AlphaVantageClient {
    pub fn new(config: AlphaVantageConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetch the current EUR/USD exchange rate.
    pub async fn fetch_eur_usd(&self) -> Result<f64> {
        info!("Fetching EUR/USD exchange rate from Alpha Vantage");

        let body = self
            .http
            .get(QUERY_URL)
            .query(&[
                ("function", "CURRENCY_EXCHANGE_RATE"),
                ("from_currency", "EUR"),
                ("to_currency", "USD"),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let (rate, last_refreshed) = parse_exchange_rate(&body)?;
        info!("EUR/USD rate: {} (last refreshed: {})", rate, last_refreshed);
        Ok(rate)
    }
}

fn parse_exchange_rate(body: &str) -> Result<(f64, String)> {
    let response: QuoteResponse =
        serde_json::from_str(body).context("Failed to decode Alpha Vantage response")?;

    let Some(rate_info) = response.rate else {
        bail!("Unexpected Alpha Vantage response: {}", body.trim());
    };

    let rate: f64 = rate_info
        .exchange_rate
        .parse()
        .with_context(|| format!("Unparsable exchange rate: {}", rate_info.exchange_rate))?;

    Ok((rate, rate_info.last_refreshed))
}
