use serde::{Deserialize, Serialize};

/// The single normalized schema every upstream provider is mapped into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalListing {
    pub id: String,
    pub mls_number: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: i64,
    pub price_display: Option<String>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub status: String,
    pub days_on_market: i64,
    pub remarks: String,
    pub detail_url: Option<String>,
    pub image_url: Option<String>,
    pub currency: Option<String>,
    pub living_area: Option<f64>,
    pub year_built: Option<i64>,
    pub zipcode: Option<String>,
}

/// Canonical listing plus the derived ranking fields shown to users.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayListing {
    #[serde(flatten)]
    pub listing: CanonicalListing,
    pub score: f64,
    pub stars: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub total: usize,
}

/// Response envelope handed to callers: `{ meta: { total }, data: [...] }`.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub meta: PageMeta,
    pub data: Vec<DisplayListing>,
}
