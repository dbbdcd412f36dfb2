pub mod config;
pub mod contract_roll;
pub mod exchange_rate;
pub mod market_data;
pub mod persistence;
