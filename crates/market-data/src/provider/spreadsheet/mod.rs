//! Published-spreadsheet price provider.
//!
//! Reads current prices from the CSV export of a spreadsheet that has been
//! published to the web (for example a Google Sheet using `GOOGLEFINANCE`
//! formulas). The sheet needs a header row, a column with stock names and a
//! column with prices:
//!
//! ```text
//! Name,Current Price
//! RELIANCE,"₹2,915.40"
//! TCS,3520.10
//! ```
//!
//! Price cells may contain currency symbols and thousands separators. Rows
//! whose price cannot be read are skipped.

use std::time::Duration;

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{PriceMap, PriceSnapshot};
use crate::provider::PriceProvider;

const PROVIDER_ID: &str = "SPREADSHEET";

/// Header names accepted for the stock name column (compared lowercase).
const NAME_HEADERS: &[&str] = &["name", "stock", "stock name", "symbol", "ticker"];

/// Header names accepted for the price column (compared lowercase).
const PRICE_HEADERS: &[&str] = &["price", "current price", "ltp", "last price", "close"];

/// Price provider backed by a published spreadsheet CSV export.
pub struct SpreadsheetPriceProvider {
    client: Client,
    url: String,
}

impl SpreadsheetPriceProvider {
    /// Create a provider for the given CSV export URL.
    pub fn new(url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, url }
    }

    async fn fetch_body(&self) -> Result<String, MarketDataError> {
        debug!("Spreadsheet request: {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response.text().await.map_err(request_error)
    }
}

fn request_error(e: reqwest::Error) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(e)
    }
}

#[async_trait]
impl PriceProvider for SpreadsheetPriceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_prices(&self) -> Result<PriceSnapshot, MarketDataError> {
        if self.url.trim().is_empty() {
            return Err(MarketDataError::Configuration(
                "spreadsheet URL is empty".to_string(),
            ));
        }

        let body = self.fetch_body().await?;
        let prices = parse_price_sheet(&body)?;
        debug!("Spreadsheet returned {} prices", prices.len());
        Ok(PriceSnapshot::new(prices, PROVIDER_ID))
    }
}

/// Parse a spreadsheet CSV export into a price map.
///
/// The name column is the first header matching [`NAME_HEADERS`], the price
/// column the first matching [`PRICE_HEADERS`]. When a column is not found by
/// header, column 0 is used for names and column 1 for prices.
pub fn parse_price_sheet(body: &str) -> Result<PriceMap, MarketDataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| invalid_response(format!("unreadable header row: {}", e)))?
        .clone();

    let normalized: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let find_column = |candidates: &[&str]| {
        normalized
            .iter()
            .position(|h| candidates.contains(&h.as_str()))
    };
    let name_idx = find_column(NAME_HEADERS).unwrap_or(0);
    let price_idx = find_column(PRICE_HEADERS).unwrap_or(1);

    if name_idx == price_idx || headers.len() <= name_idx.max(price_idx) {
        return Err(invalid_response(format!(
            "expected a name and a price column, got headers {:?}",
            normalized
        )));
    }

    let mut prices = PriceMap::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable spreadsheet row {}: {}", line + 2, e);
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        match record.get(price_idx).and_then(parse_price_cell) {
            Some(price) => {
                if prices.contains_key(name) {
                    debug!("Duplicate spreadsheet row for {}; keeping the first", name);
                    continue;
                }
                prices.insert(name.to_string(), price);
            }
            None => debug!(
                "Skipping spreadsheet row {} for {}: unreadable price {:?}",
                line + 2,
                name,
                record.get(price_idx)
            ),
        }
    }

    Ok(prices)
}

/// Read a price cell such as `"₹2,915.40"`, `"Rs. 2,915.40"` or `"$ 12.5"`.
///
/// Anything before the number is a currency prefix and is dropped. Returns
/// `None` for empty, negative, or non-numeric cells.
pub fn parse_price_cell(cell: &str) -> Option<f64> {
    let chars: Vec<(usize, char)> = cell.char_indices().collect();
    let start = chars
        .iter()
        .enumerate()
        .find(|(i, (_, c))| {
            c.is_ascii_digit()
                || (matches!(*c, '.' | '-')
                    && chars.get(i + 1).is_some_and(|(_, next)| next.is_ascii_digit()))
        })
        .map(|(_, (offset, _))| *offset)?;

    let cleaned: String = cell[start..]
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn invalid_response(message: String) -> MarketDataError {
    MarketDataError::InvalidResponse {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}
