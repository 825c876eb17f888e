/// Days used to annualize a realized percent gain
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Days per year used for CAGR elapsed-time calculations
pub const DAYS_PER_YEAR_CAGR: f64 = 365.25;

/// Default reference start date for the closed-positions CAGR
pub const DEFAULT_CAGR_START_DATE: &str = "2020-01-01";

/// Default staleness window for cached prices, in seconds
pub const DEFAULT_PRICE_REFRESH_SECS: u64 = 300;
