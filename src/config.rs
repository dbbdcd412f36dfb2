use anyhow::{Context, Result};
use std::env;

/// Supabase project credentials. The service role key is required because
/// the updater inserts rows directly.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: require_var("SUPABASE_URL")?,
            service_role_key: require_var("SUPABASE_SERVICE_ROLE_KEY")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    pub api_key: String,
}

impl AlphaVantageConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_var("ALPHA_VANTAGE_API_KEY")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BarchartConfig {
    pub username: String,
    pub password: String,
}

impl BarchartConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            username: require_var("BARCHART_USERNAME")?,
            password: require_var("BARCHART_PASSWORD")?,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing required environment variable {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_names_the_variable() {
        let err = require_var("SUGAR_UPDATER_DOES_NOT_EXIST").unwrap_err();
        assert!(err.to_string().contains("SUGAR_UPDATER_DOES_NOT_EXIST"));
    }
}
