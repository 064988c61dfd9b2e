pub mod fields;
pub mod region;

use anyhow::{bail, Result};
use chrono::Utc;
use log::warn;
use serde_json::Value;

use crate::models::listing::CanonicalListing;
use fields::{
    as_text, city_from_address_text, flatten_address, format_thousands, is_numeric_like,
    parse_days, parse_money, parse_quantity, probe, status_text, ProviderRules,
};
pub use region::RegionPolicy;

/// Upstream payload shapes the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Zillow,
    Redfin,
    Realty,
}

impl ProviderKind {
    pub fn rules(&self) -> &'static ProviderRules {
        match self {
            ProviderKind::Zillow => &fields::ZILLOW,
            ProviderKind::Redfin => &fields::REDFIN,
            ProviderKind::Realty => &fields::REALTY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Zillow => "zillow",
            ProviderKind::Redfin => "redfin",
            ProviderKind::Realty => "realty",
        }
    }
}

/// Locate the listing array inside an upstream payload.
///
/// Known wrapper keys are probed in priority order; a payload that is
/// itself an array is taken whole.
pub fn extract_listing_array(payload: &Value, list_keys: &[&str]) -> Option<Vec<Value>> {
    if let Value::Object(map) = payload {
        for key in list_keys {
            if let Some(Value::Array(items)) = map.get(*key) {
                return Some(items.clone());
            }
        }
    }
    if let Value::Array(items) = payload {
        return Some(items.clone());
    }
    None
}

/// Normalize a full provider payload. Only an unrecognizable payload is a
/// hard failure; individual records never are.
pub fn normalize_payload(
    provider: ProviderKind,
    payload: &Value,
    region: &RegionPolicy,
) -> Result<Vec<CanonicalListing>> {
    let rules = provider.rules();
    let raw_listings = match extract_listing_array(payload, rules.list_keys) {
        Some(list) => list,
        None => bail!("no listing array found in {} payload", provider.label()),
    };
    Ok(normalize_batch(provider, &raw_listings, region))
}

/// Normalize a batch of raw records, preserving input order among the
/// eligible ones. Malformed and out-of-region records are dropped.
pub fn normalize_batch(
    provider: ProviderKind,
    raw_listings: &[Value],
    region: &RegionPolicy,
) -> Vec<CanonicalListing> {
    // One timestamp per batch keeps synthesized ids unique by index.
    let batch_ts = Utc::now().timestamp();

    let mut listings: Vec<CanonicalListing> = Vec::new();
    for (index, raw) in raw_listings.iter().enumerate() {
        if !raw.is_object() {
            warn!(
                "skipping malformed {} record at index {}",
                provider.label(),
                index
            );
            continue;
        }
        if let Some(listing) = normalize_one(provider, raw, index, batch_ts, region) {
            listings.push(listing);
        }
    }

    listings
}

/// Map one raw record into the canonical schema, or drop it.
pub fn normalize_one(
    provider: ProviderKind,
    raw: &Value,
    index: usize,
    batch_ts: i64,
    region: &RegionPolicy,
) -> Option<CanonicalListing> {
    let rules = provider.rules();

    // Providers carrying an explicit province reject mismatches outright.
    if let Some(province) = probe(raw, rules.province).and_then(as_text) {
        if !province.is_empty() && !region.matches_province(&province) {
            return None;
        }
    }

    let address = probe(raw, rules.address)
        .and_then(as_text)
        .or_else(|| {
            rules
                .structured_address
                .as_ref()
                .and_then(|paths| flatten_address(raw, paths))
        })
        .unwrap_or_default();

    let mut city = probe(raw, rules.city).and_then(as_text).unwrap_or_default();
    if city.is_empty() && rules.city_from_address_text && !address.is_empty() {
        city = city_from_address_text(&address);
    }

    if !region.is_eligible(&city, &address) {
        return None;
    }

    let id = probe(raw, rules.id)
        .and_then(as_text)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{}_{}_{}", rules.prefix, index, batch_ts));

    let price_value = probe(raw, rules.price);
    let price = price_value.and_then(parse_money).unwrap_or(0);
    let currency = probe(raw, rules.currency)
        .and_then(as_text)
        .filter(|code| !code.is_empty());

    let price_display = probe(raw, rules.price_display)
        .and_then(as_text)
        .or_else(|| {
            let value = price_value?;
            if is_numeric_like(value) {
                currency
                    .as_ref()
                    .map(|code| format!("{} ${}", code, format_thousands(price)))
            } else if let Value::String(s) = value {
                Some(s.clone())
            } else {
                None
            }
        });

    Some(CanonicalListing {
        id,
        mls_number: probe(raw, rules.mls_number).and_then(as_text),
        address,
        city,
        property_type: probe(raw, rules.property_type)
            .and_then(as_text)
            .unwrap_or_default(),
        price,
        price_display,
        beds: probe(raw, rules.beds).and_then(parse_quantity),
        baths: probe(raw, rules.baths).and_then(parse_quantity),
        status: probe(raw, rules.status)
            .map(|value| status_text(value, rules.numeric_status_is_active))
            .unwrap_or_default(),
        days_on_market: probe(raw, rules.days_on_market)
            .map(parse_days)
            .unwrap_or(0),
        remarks: probe(raw, rules.remarks)
            .and_then(as_text)
            .unwrap_or_default(),
        detail_url: probe(raw, rules.detail_url).and_then(as_text),
        image_url: probe(raw, rules.image_url).and_then(as_text),
        currency,
        living_area: probe(raw, rules.living_area).and_then(parse_quantity),
        year_built: probe(raw, rules.year_built)
            .and_then(parse_quantity)
            .map(|year| year as i64),
        zipcode: probe(raw, rules.zipcode).and_then(as_text),
    })
}
