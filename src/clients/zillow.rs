use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::normalize::{self, ProviderKind};

use super::{payload_snippet, rapid_headers, ListingSource, RawBatch, SearchQuery, SourceError};

/// RapidAPI Zillow search client.
#[derive(Debug, Clone)]
pub struct ZillowClient {
    http: Client,
    key: String,
    host: String,
    endpoint: String,
}

impl ZillowClient {
    pub fn from_config(config: &Config) -> Result<ZillowClient, SourceError> {
        let key = config
            .zillow_key
            .clone()
            .unwrap_or_else(|| config.rapidapi_key.clone());
        if key.is_empty() {
            return Err(SourceError::NotConfigured("rapidapi_key"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds as u64))
            .build()?;

        Ok(ZillowClient {
            http,
            key,
            host: config.zillow_host.clone(),
            endpoint: config.zillow_endpoint.clone(),
        })
    }
}

impl ListingSource for ZillowClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Zillow
    }

    async fn fetch_raw(&self, query: &SearchQuery) -> Result<RawBatch, SourceError> {
        if query.location.is_empty() {
            return Err(SourceError::InvalidQuery("location is required"));
        }

        let url = format!("https://{}{}", self.host, self.endpoint);
        let mut params: Vec<(&str, String)> = vec![
            ("location", query.location.clone()),
            (
                "home_status",
                query
                    .home_status
                    .clone()
                    .unwrap_or_else(|| String::from("FOR_SALE")),
            ),
            (
                "sort",
                query.sort.clone().unwrap_or_else(|| String::from("DEFAULT")),
            ),
            (
                "listing_type",
                query
                    .listing_type
                    .clone()
                    .unwrap_or_else(|| String::from("BY_AGENT")),
            ),
            ("page", query.page.max(1).to_string()),
        ];
        if let Some(beds_min) = query.beds_min {
            params.push(("beds_min", beds_min.to_string()));
        }
        if let Some(beds_max) = query.beds_max {
            params.push(("beds_max", beds_max.to_string()));
        }
        if let Some(price_min) = query.price_min {
            params.push(("price_min", price_min.to_string()));
        }
        if let Some(price_max) = query.price_max {
            params.push(("price_max", price_max.to_string()));
        }

        let headers = rapid_headers(&self.key, &self.host)?;
        let response = self
            .http
            .get(&url)
            .query(&params)
            .headers(headers)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(SourceError::UpstreamStatus { status });
        }

        let payload: Value = response.json().await?;
        let rules = ProviderKind::Zillow.rules();
        match normalize::extract_listing_array(&payload, rules.list_keys) {
            Some(listings) => Ok(RawBatch { listings, status }),
            None => Err(SourceError::UnexpectedPayload {
                snippet: payload_snippet(&payload),
            }),
        }
    }
}
