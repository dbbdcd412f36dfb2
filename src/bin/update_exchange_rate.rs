use anyhow::Result;
use chrono::Local;
use log::info;
use sugar_updater::config::{AlphaVantageConfig, SupabaseConfig};
use sugar_updater::exchange_rate::AlphaVantageClient;
use sugar_updater::persistence::{ExchangeRateRecord, SupabaseClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG not set
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();
    dotenv::dotenv().ok();

    info!("Starting EUR/USD exchange rate update");

    let alpha_vantage = AlphaVantageClient::new(AlphaVantageConfig::from_env()?)?;
    let rate = alpha_vantage.fetch_eur_usd().await?;

    let record = ExchangeRateRecord {
        exchange: rate,
        timestamp: Local::now().to_rfc3339(),
    };
    let supabase = SupabaseClient::new(SupabaseConfig::from_env()?)?;
    supabase.insert_exchange_rate(&record).await?;

    info!("Exchange rate update completed successfully");
    Ok(())
}
