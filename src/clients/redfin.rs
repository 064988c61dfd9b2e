use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::normalize::{self, ProviderKind};

use super::{payload_snippet, rapid_headers, ListingSource, RawBatch, SearchQuery, SourceError};

/// RapidAPI Redfin sale-search client.
#[derive(Debug, Clone)]
pub struct RedfinClient {
    http: Client,
    key: String,
    host: String,
    endpoint: String,
}

impl RedfinClient {
    pub fn from_config(config: &Config) -> Result<RedfinClient, SourceError> {
        let key = config
            .redfin_key
            .clone()
            .unwrap_or_else(|| config.rapidapi_key.clone());
        if key.is_empty() {
            return Err(SourceError::NotConfigured("rapidapi_key"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds as u64))
            .build()?;

        Ok(RedfinClient {
            http,
            key,
            host: config.redfin_host.clone(),
            endpoint: config.redfin_endpoint.clone(),
        })
    }
}

impl ListingSource for RedfinClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Redfin
    }

    async fn fetch_raw(&self, query: &SearchQuery) -> Result<RawBatch, SourceError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(region_id) = &query.region_id {
            params.push(("regionId", region_id.clone()));
        }
        if let Some(city) = &query.city {
            params.push(("city", city.clone()));
        }
        if let Some(postal) = &query.postal {
            params.push(("postal", postal.clone()));
        }
        if let Some(free_text) = &query.free_text {
            params.push(("q", free_text.clone()));
        }
        if params.is_empty() {
            return Err(SourceError::InvalidQuery(
                "provide one of regionId, city, postal or q",
            ));
        }

        let url = format!("https://{}{}", self.host, self.endpoint);
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
        let rules = ProviderKind::Redfin.rules();
        match normalize::extract_listing_array(&payload, rules.list_keys) {
            Some(listings) => Ok(RawBatch { listings, status }),
            None => Err(SourceError::UnexpectedPayload {
                snippet: payload_snippet(&payload),
            }),
        }
    }
}
