use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use tickerbook_core::constants::{DEFAULT_CAGR_START_DATE, DEFAULT_PRICE_REFRESH_SECS};
use tickerbook_core::utils::time_utils::parse_iso_date;

/// Where current prices come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSource {
    /// Random walk over a built-in universe of names.
    Mock,
    /// CSV export of a published spreadsheet.
    Spreadsheet { url: String },
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub price_source: PriceSource,
    pub price_refresh: Duration,
    pub sheet_timeout: Duration,
    pub cagr_start: NaiveDate,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("TB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid TB_LISTEN_ADDR")?;
        let data_dir = PathBuf::from(var("TB_DATA_DIR", "./data"));

        let price_source = match var("TB_PRICE_SOURCE", "mock").to_ascii_lowercase().as_str() {
            "mock" => PriceSource::Mock,
            "spreadsheet" => {
                let url = lookup("TB_SHEET_URL").unwrap_or_default();
                if url.trim().is_empty() {
                    bail!("TB_SHEET_URL is required when TB_PRICE_SOURCE=spreadsheet");
                }
                PriceSource::Spreadsheet { url }
            }
            other => bail!("Unknown TB_PRICE_SOURCE '{}', expected mock or spreadsheet", other),
        };

        let refresh_secs: u64 = var("TB_PRICE_REFRESH_SECS", &DEFAULT_PRICE_REFRESH_SECS.to_string())
            .parse()
            .context("Invalid TB_PRICE_REFRESH_SECS")?;
        let sheet_timeout_ms: u64 = var("TB_SHEET_TIMEOUT_MS", "10000")
            .parse()
            .unwrap_or(10000);
        let cagr_start = parse_iso_date(&var("TB_CAGR_START_DATE", DEFAULT_CAGR_START_DATE))
            .context("Invalid TB_CAGR_START_DATE, expected YYYY-MM-DD")?;

        let cors_allow = var("TB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("TB_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);

        Ok(Self {
            listen_addr,
            data_dir,
            price_source,
            price_refresh: Duration::from_secs(refresh_secs),
            sheet_timeout: Duration::from_millis(sheet_timeout_ms),
            cagr_start,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.price_source, PriceSource::Mock);
        assert_eq!(config.price_refresh, Duration::from_secs(300));
        assert_eq!(config.cagr_start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
    }

    #[test]
    fn test_spreadsheet_requires_url() {
        assert!(config_from(&[("TB_PRICE_SOURCE", "spreadsheet")]).is_err());

        let config = config_from(&[
            ("TB_PRICE_SOURCE", "Spreadsheet"),
            ("TB_SHEET_URL", "https://example.com/sheet.csv"),
        ])
        .unwrap();
        assert_eq!(
            config.price_source,
            PriceSource::Spreadsheet {
                url: "https://example.com/sheet.csv".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("TB_PRICE_SOURCE", "bloomberg")]).is_err());
        assert!(config_from(&[("TB_CAGR_START_DATE", "01/01/2020")]).is_err());
        assert!(config_from(&[("TB_LISTEN_ADDR", "localhost")]).is_err());
    }

    #[test]
    fn test_cors_list_is_trimmed() {
        let config = config_from(&[(
            "TB_CORS_ALLOW_ORIGINS",
            "http://a.test, http://b.test,,",
        )])
        .unwrap();
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
    }
}
