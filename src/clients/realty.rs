use std::time::Duration;

use chrono::Utc;
use log::warn;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::normalize::{self, ProviderKind};

use super::{payload_snippet, rapid_headers, ListingSource, RawBatch, SearchQuery, SourceError};

// Alberta bounding box used by the provider's residential search.
const LATITUDE_MAX: &str = "60.0";
const LATITUDE_MIN: &str = "49.0";
const LONGITUDE_MAX: &str = "-110.0";
const LONGITUDE_MIN: &str = "-120.0";

/// Generic realty-board client (realty-in-ca style RapidAPI provider).
///
/// Stays constructible without credentials: an unconfigured client serves
/// a sample batch so downstream flows keep working.
#[derive(Debug, Clone)]
pub struct RealtyClient {
    http: Client,
    key: Option<String>,
    host: Option<String>,
    endpoint: Option<String>,
}

impl RealtyClient {
    pub fn from_config(config: &Config) -> Result<RealtyClient, SourceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds as u64))
            .build()?;

        let key = config.realty_key.clone().or_else(|| {
            if config.rapidapi_key.is_empty() {
                None
            } else {
                Some(config.rapidapi_key.clone())
            }
        });

        Ok(RealtyClient {
            http,
            key,
            host: config.realty_host.clone(),
            endpoint: config.realty_endpoint.clone(),
        })
    }

    fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.key, &self.host, &self.endpoint) {
            (Some(key), Some(host), Some(endpoint))
                if !key.is_empty() && !host.is_empty() && !endpoint.is_empty() =>
            {
                Some((key, host, endpoint))
            }
            _ => None,
        }
    }

    /// Canned single-listing batch shaped like a provider response.
    fn sample_batch(query: &SearchQuery) -> RawBatch {
        let city = query
            .city
            .clone()
            .or_else(|| {
                if query.location.is_empty() {
                    None
                } else {
                    Some(query.location.clone())
                }
            })
            .unwrap_or_else(|| String::from("Edmonton"));
        let status = if query.distress.foreclosure {
            "Foreclosure"
        } else if query.distress.probate {
            "Probate"
        } else if query.distress.as_is {
            "As-Is"
        } else {
            "Distressed"
        };

        let listing = json!({
            "id": format!("sample-{}", Utc::now().timestamp()),
            "address": "1234 Distressed St",
            "city": city,
            "type": query.property_type.clone().unwrap_or_else(|| String::from("House")),
            "price": 299000,
            "status": status,
            "daysOnMarket": 45,
            "remarks": "Bank-owned property in need of repairs."
        });

        RawBatch {
            listings: vec![listing],
            status: 200,
        }
    }
}

impl ListingSource for RealtyClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Realty
    }

    async fn fetch_raw(&self, query: &SearchQuery) -> Result<RawBatch, SourceError> {
        let (key, host, endpoint) = match self.credentials() {
            Some(credentials) => credentials,
            None => {
                warn!("realty source is not configured, serving sample data");
                return Ok(RealtyClient::sample_batch(query));
            }
        };

        let mut params: Vec<(&str, String)> = vec![
            ("LatitudeMax", String::from(LATITUDE_MAX)),
            ("LatitudeMin", String::from(LATITUDE_MIN)),
            ("LongitudeMax", String::from(LONGITUDE_MAX)),
            ("LongitudeMin", String::from(LONGITUDE_MIN)),
            ("CurrentPage", query.page.max(1).to_string()),
            ("RecordsPerPage", query.per_page.max(1).to_string()),
            ("SortOrder", String::from("A")),
            ("SortBy", String::from("1")),
            ("CultureId", String::from("1")),
            ("NumberOfDays", String::from("0")),
            ("BedRange", String::from("0-0")),
            ("BathRange", String::from("0-0")),
            ("RentMin", String::from("0")),
        ];
        if let Some(price_min) = query.price_min {
            params.push(("PriceMin", price_min.to_string()));
        }
        if let Some(price_max) = query.price_max {
            params.push(("PriceMax", price_max.to_string()));
        }
        if let Some(property_type) = &query.property_type {
            params.push(("PropertyType", property_type.clone()));
        }
        let keywords = query.distress.keywords();
        if !keywords.is_empty() {
            params.push(("Keywords", keywords));
        }

        let url = format!("https://{}{}", host, endpoint);
        let headers = rapid_headers(key, host)?;
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
        let rules = ProviderKind::Realty.rules();
        match normalize::extract_listing_array(&payload, rules.list_keys) {
            Some(listings) => Ok(RawBatch { listings, status }),
            None => Err(SourceError::UnexpectedPayload {
                snippet: payload_snippet(&payload),
            }),
        }
    }
}
