pub mod realty;
pub mod redfin;
pub mod scrape_time;
pub mod zillow;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::ProviderKind;

/// Parameter bag accepted by every listing source. Each provider reads
/// the fields it understands and ignores the rest.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub location: String,
    pub home_status: Option<String>,
    pub sort: Option<String>,
    pub listing_type: Option<String>,
    pub page: u32,
    pub per_page: u32,
    pub city: Option<String>,
    pub postal: Option<String>,
    pub region_id: Option<String>,
    pub free_text: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub beds_min: Option<u32>,
    pub beds_max: Option<u32>,
    pub distress: DistressFilters,
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            location: String::new(),
            home_status: None,
            sort: None,
            listing_type: None,
            page: 1,
            per_page: 25,
            city: None,
            postal: None,
            region_id: None,
            free_text: None,
            property_type: None,
            price_min: None,
            price_max: None,
            beds_min: None,
            beds_max: None,
            distress: DistressFilters::default(),
        }
    }
}

/// Distress toggles translated into provider keyword groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistressFilters {
    pub probate: bool,
    pub foreclosure: bool,
    pub as_is: bool,
    pub distressed: bool,
}

impl DistressFilters {
    pub fn keywords(&self) -> String {
        let mut groups: Vec<&str> = Vec::new();
        if self.probate {
            groups.push("probate|estate sale|executor");
        }
        if self.foreclosure {
            groups.push("foreclosure|judicial sale|court ordered|bank owned");
        }
        if self.as_is {
            groups.push("as is|as-is where-is|handyman special|needs tlc|fixer");
        }
        if self.distressed {
            groups.push("distressed|motivated seller|must sell");
        }
        groups.join(" ")
    }
}

/// A raw upstream batch: untyped listing records plus the upstream status.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub listings: Vec<Value>,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("missing configuration: {0}")]
    NotConfigured(&'static str),
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("unexpected payload: {snippet}")]
    UnexpectedPayload { snippet: String },
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else {
            SourceError::Network(err)
        }
    }
}

/// External listing-source collaborator: one raw batch per call.
/// Retries, caching and rate limiting are not this seam's concern.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    fn kind(&self) -> ProviderKind;

    async fn fetch_raw(&self, query: &SearchQuery) -> Result<RawBatch, SourceError>;
}

pub(crate) fn rapid_headers(key: &str, host: &str) -> Result<HeaderMap, SourceError> {
    let mut headers: HeaderMap = HeaderMap::new();
    let key = HeaderValue::from_str(key)
        .map_err(|_| SourceError::NotConfigured("rapidapi key is not a valid header value"))?;
    let host_value = HeaderValue::from_str(host)
        .map_err(|_| SourceError::NotConfigured("rapidapi host is not a valid header value"))?;
    headers.insert("x-rapidapi-key", key);
    headers.insert("x-rapidapi-host", host_value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Bounded payload excerpt for error reporting.
pub(crate) fn payload_snippet(payload: &Value) -> String {
    let rendered = payload.to_string();
    rendered.chars().take(500).collect()
}
