use crate::config::BarchartConfig;
use anyhow::{Context, Result, bail};
use log::info;
use std::time::Duration;

const LOGIN_URL: &str = "https://www.barchart.com/login";
const QUOTE_URL: &str = "https://www.barchart.com/proxies/timeseries/queryeod.ashx";

/// Authenticated Barchart session. Login happens once in `login`; the cookie
/// jar carries the session for subsequent quote requests.
pub struct BarchartClient {
    http: reqwest::Client,
}

impl BarchartClient {
    pub async fn login(config: BarchartConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        // The login form carries a CSRF token that must be posted back
        let page = http
            .get(LOGIN_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let token = extract_login_token(&page)?;

        let params = [
            ("email", config.username.as_str()),
            ("password", config.password.as_str()),
            ("_token", token.as_str()),
        ];
        http.post(LOGIN_URL)
            .form(&params)
            .send()
            .await?
            .error_for_status()
            .context("Barchart login failed")?;

        info!("Authenticated with Barchart as {}", config.username);
        Ok(Self { http })
    }

    /// Latest daily close for one rendered contract symbol.
    pub async fn latest_close(&self, symbol: &str) -> Result<f64> {
        info!("Fetching price for {}", symbol);

        // Ask for a few days of history so we still get a close over
        // weekends and holidays
        let body = self
            .http
            .get(QUOTE_URL)
            .query(&[
                ("symbol", symbol),
                ("data", "daily"),
                ("maxrecords", "10"),
                ("volume", "contract"),
                ("order", "asc"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let close = parse_latest_close(&body)
            .with_context(|| format!("No data available for {}", symbol))?;
        info!("{}: ${:.2}", symbol, close);
        Ok(close)
    }
}

fn extract_login_token(page: &str) -> Result<String> {
    let marker = "name=\"_token\" value=\"";
    let start = page
        .find(marker)
        .context("Login token not found in Barchart login page")?
        + marker.len();
    let end = page[start..]
        .find('"')
        .context("Malformed login token in Barchart login page")?
        + start;
    Ok(page[start..end].to_string())
}

/// Parse the most recent close out of a queryeod CSV response. Rows are
/// `symbol,date,open,high,low,close,volume` in ascending date order.
fn parse_latest_close(body: &str) -> Result<f64> {
    let last = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .next_back()
        .context("Empty quote response")?;

    let fields: Vec<&str> = last.split(',').collect();
    if fields.len() < 7 {
        bail!("Unexpected quote row: {}", last);
    }
    fields[5]
        .trim()
        .parse()
        .with_context(|| format!("Unparsable close price in row: {}", last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latest_close_takes_last_row() {
        let body = "SBV25,2025-08-27,16.10,16.35,16.02,16.20,45120\n\
                    SBV25,2025-08-28,16.20,16.41,16.11,16.33,39876\n\
                    SBV25,2025-08-29,16.33,16.50,16.25,16.47,41002\n";
        let close = parse_latest_close(body).unwrap();
        assert!((close - 16.47).abs() < 1e-9);
    }

    #[test]
    fn test_parse_latest_close_ignores_trailing_blank_lines() {
        let body = "SBV25,2025-08-29,16.33,16.50,16.25,16.47,41002\n\n";
        assert!((parse_latest_close(body).unwrap() - 16.47).abs() < 1e-9);
    }

    #[test]
    fn test_parse_latest_close_rejects_empty_body() {
        assert!(parse_latest_close("").is_err());
        assert!(parse_latest_close("\n\n").is_err());
    }

    #[test]
    fn test_parse_latest_close_rejects_short_row() {
        assert!(parse_latest_close("SBV25,2025-08-29,16.33").is_err());
    }

    #[test]
    fn test_extract_login_token() {
        let page = r#"<form method="POST" action="/login">
            <input type="hidden" name="_token" value="abc123DEF">
        </form>"#;
        assert_eq!(extract_login_token(page).unwrap(), "abc123DEF");
        assert!(extract_login_token("<html></html>").is_err());
    }
}
