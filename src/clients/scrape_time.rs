use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::market_time;

use super::SourceError;

const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/119.0 Safari/537.36";

/// Fetch a listing detail page and recover its time on market in minutes.
/// None means the page loaded but carried no usable relative time.
pub async fn fetch_minutes_on_market(url: &str) -> Result<Option<i64>, SourceError> {
    if url.is_empty() {
        return Err(SourceError::InvalidQuery("url is required"));
    }

    let client: reqwest::Client = reqwest::Client::builder()
        .timeout(Duration::from_secs(20))
        .build()?;

    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let response = client.get(url).headers(headers).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    Ok(market_time::minutes_on_market(&html))
}
