use anyhow::Result;
use chrono::{Datelike, Local};
use log::info;
use sugar_updater::config::{BarchartConfig, SupabaseConfig};
use sugar_updater::contract_roll::compute_front_three;
use sugar_updater::market_data::BarchartClient;
use sugar_updater::persistence::{ContractRecord, SupabaseClient};

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

    info!("Starting sugar contracts update");

    let today = Local::now().date_naive();
    let symbols = compute_front_three(today.month(), today.year())?;
    let rendered: Vec<String> = symbols.iter().map(|s| s.render()).collect();
    info!("Contracts to fetch: {}", rendered.join(", "));

    let barchart = BarchartClient::login(BarchartConfig::from_env()?).await?;

    // Sequential on purpose: the job aborts on the first failed fetch so a
    // partial row is never written
    let mut quotes = Vec::with_capacity(rendered.len());
    for symbol in &rendered {
        let price = barchart.latest_close(symbol).await?;
        quotes.push((symbol.clone(), price));
    }

    let record = ContractRecord::new(&quotes, Local::now().to_rfc3339())?;
    let supabase = SupabaseClient::new(SupabaseConfig::from_env()?)?;
    supabase.insert_contracts(&record).await?;

    info!("Contract update completed successfully");
    Ok(())
}
