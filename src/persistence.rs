use crate::config::SupabaseConfig;
use anyhow::{Result, bail};
use log::{error, info};
use serde::Serialize;
use std::time::Duration;

/// One row for the `exchangerate` table.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRateRecord {
    pub exchange: f64,
    pub timestamp: String,
}

/// One row for the `contracts` table: the three front contracts and their
/// prices, earliest delivery first.
#[derive(Debug, Clone, Serialize)]
pub struct ContractRecord {
    pub contract_name_1: String,
    pub contract_1: f64,
    pub contract_name_2: String,
    pub contract_2: f64,
    pub contract_name_3: String,
    pub contract_3: f64,
    pub timestamp: String,
}

impl ContractRecord {
    pub fn new(quotes: &[(String, f64)], timestamp: String) -> Result<Self> {
        if quotes.len() != 3 {
            bail!("Expected exactly 3 contract prices, got {}", quotes.len());
        }
        Ok(Self {
            contract_name_1: quotes[0].0.clone(),
            contract_1: quotes[0].1,
            contract_name_2: quotes[1].0.clone(),
            contract_2: quotes[1].1,
            contract_name_3: quotes[2].0.clone(),
            contract_3: quotes[2].1,
            timestamp,
        })
    }
}

/// Thin client for the Supabase REST surface (PostgREST inserts only).
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    pub async fn insert_exchange_rate(&self, record: &ExchangeRateRecord) -> Result<()> {
        self.insert("exchangerate", record).await?;
        info!("Exchange rate updated in Supabase: {}", record.exchange);
        Ok(())
    }

    pub async fn insert_contracts(&self, record: &ContractRecord) -> Result<()> {
        self.insert("contracts", record).await?;
        info!("Contracts updated in Supabase successfully");
        info!("   {}: ${:.2}", record.contract_name_1, record.contract_1);
        info!("   {}: ${:.2}", record.contract_name_2, record.contract_2);
        info!("   {}: ${:.2}", record.contract_name_3, record.contract_3);
        Ok(())
    }

    async fn insert<T: Serialize>(&self, table: &str, record: &T) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Failed to insert into {}: {} {}", table, status, body.trim());
            bail!("Supabase insert into {} failed with status {}", table, status);
        }
        Ok(())
    }
}
