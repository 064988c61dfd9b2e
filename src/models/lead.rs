use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_this_or_that::{as_f64, as_i64};

lazy_static! {
    static ref HTTP_URL: Regex = Regex::new(r"https?:[^\s)]+").unwrap();
}

/// Pull the first usable http(s) URL out of a free-text value.
pub fn first_http_url(raw: &str) -> Option<String> {
    HTTP_URL.find(raw).map(|m| m.as_str().to_string())
}

/// Flat lead shape used by lead exports and the demo inventory.
///
/// Numeric fields tolerate string values since lead files come from
/// spreadsheet exports. The optional sub-scores distinguish "absent"
/// from a real zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(deserialize_with = "as_i64", default)]
    pub price: i64,
    #[serde(deserialize_with = "as_i64", default)]
    pub local_avg_price: i64,
    #[serde(deserialize_with = "as_i64", default)]
    pub days_listed: i64,
    #[serde(default)]
    pub yield_percent: Option<f64>,
    #[serde(default)]
    pub location_score: Option<f64>,
    #[serde(default)]
    pub condition_score: Option<f64>,
    #[serde(default)]
    pub growth_score: Option<f64>,
    #[serde(deserialize_with = "as_f64", default)]
    pub beds: f64,
    #[serde(deserialize_with = "as_f64", default)]
    pub baths: f64,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

impl LeadRecord {
    /// Best image candidate: the explicit image when it looks like one,
    /// otherwise the first entry of image_urls run through URL extraction.
    pub fn image_candidate(&self) -> Option<String> {
        match &self.image {
            Some(image) if image.len() >= 5 => Some(image.clone()),
            _ => self
                .image_urls
                .as_ref()
                .and_then(|urls| urls.first())
                .map(|raw| first_http_url(raw).unwrap_or_else(|| raw.clone())),
        }
    }
}

/// Lead search constraints. Zero/empty values leave a dimension open.
#[derive(Debug, Clone)]
pub struct LeadFilter {
    pub min_price: i64,
    pub max_price: i64,
    pub min_beds: f64,
    pub min_baths: f64,
    pub max_days_listed: i64,
    pub property_type: String,
    pub min_yield: f64,
    pub max_yield: f64,
    pub min_location: f64,
    pub min_condition: f64,
    pub min_growth: f64,
}

impl Default for LeadFilter {
    fn default() -> Self {
        LeadFilter {
            min_price: 0,
            max_price: 99_999_999,
            min_beds: 0.0,
            min_baths: 0.0,
            max_days_listed: 365,
            property_type: String::new(),
            min_yield: 0.0,
            max_yield: 1000.0,
            min_location: 0.0,
            min_condition: 0.0,
            min_growth: 0.0,
        }
    }
}

impl LeadFilter {
    pub fn matches(&self, lead: &LeadRecord) -> bool {
        let ok_price = lead.price >= self.min_price && lead.price <= self.max_price;
        let ok_beds = self.min_beds <= 0.0 || lead.beds >= self.min_beds;
        let ok_baths = self.min_baths <= 0.0 || lead.baths >= self.min_baths;
        let ok_days = lead.days_listed <= self.max_days_listed;
        let ok_type = self.property_type.is_empty()
            || lead.property_type.eq_ignore_ascii_case(&self.property_type);
        let lead_yield = lead.yield_percent.unwrap_or(0.0);
        let ok_yield = lead_yield >= self.min_yield && lead_yield <= self.max_yield;
        let ok_location = lead.location_score.unwrap_or(0.0) >= self.min_location;
        let ok_condition = lead.condition_score.unwrap_or(0.0) >= self.min_condition;
        let ok_growth = lead.growth_score.unwrap_or(0.0) >= self.min_growth;

        ok_price
            && ok_beds
            && ok_baths
            && ok_days
            && ok_type
            && ok_yield
            && ok_location
            && ok_condition
            && ok_growth
    }
}

const STREETS: &[&str] = &[
    "Oak", "Pine", "Cedar", "Maple", "Elm", "Birch", "Willow", "Aspen", "Hillcrest", "Sunset",
    "Ridge", "Valley", "River", "Lake", "Forest",
];
const SUFFIXES: &[&str] = &["St", "Ave", "Rd", "Blvd", "Ln", "Dr", "Ct"];
const PROPERTY_TYPES: &[&str] = &["Single Family", "Condo", "Townhouse", "Multi-Family", "Land"];

fn random_street<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        rng.gen_range(100..=9999),
        STREETS[rng.gen_range(0..STREETS.len())],
        SUFFIXES[rng.gen_range(0..SUFFIXES.len())]
    )
}

fn random_phone<R: Rng>(rng: &mut R) -> String {
    format!(
        "({}) {}-{:04}",
        rng.gen_range(200..=989),
        rng.gen_range(200..=989),
        rng.gen_range(0..=9999)
    )
}

/// Generate randomized sample leads for a location and keep the ones
/// passing the filter. Used when no upstream source is configured.
pub fn demo_inventory(location: &str, count: usize, filter: &LeadFilter) -> Vec<LeadRecord> {
    let mut rng = rand::thread_rng();
    let city = if location.is_empty() {
        "Sample City, ST"
    } else {
        location
    };

    let mut leads: Vec<LeadRecord> = Vec::with_capacity(count);
    for i in 0..count {
        let price: i64 = rng.gen_range(180_000..=950_000);
        let swing = rng.gen_range(-5..=5) as f64 / 100.0;
        let lead = LeadRecord {
            address: format!("{}, {}", random_street(&mut rng), city),
            property_type: PROPERTY_TYPES[rng.gen_range(0..PROPERTY_TYPES.len())].to_string(),
            price,
            local_avg_price: (price as f64 * (0.95 + swing)).round() as i64,
            days_listed: rng.gen_range(1..=120),
            yield_percent: Some(rng.gen_range(40..=120) as f64 / 10.0),
            location_score: Some(rng.gen_range(60..=95) as f64 / 100.0),
            condition_score: Some(rng.gen_range(55..=90) as f64 / 100.0),
            growth_score: Some(rng.gen_range(50..=85) as f64 / 100.0),
            beds: rng.gen_range(1..=6) as f64,
            baths: rng.gen_range(1..=5) as f64,
            contact: random_phone(&mut rng),
            link: format!("https://www.zillow.com/homedetails/demo-{}", i + 1),
            image: None,
            image_urls: None,
        };
        if filter.matches(&lead) {
            leads.push(lead);
        }
    }

    leads
}
