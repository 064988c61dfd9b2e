use anyhow::{bail, Result};
use log::{error, info};

use crate::clients::realty::RealtyClient;
use crate::clients::redfin::RedfinClient;
use crate::clients::zillow::ZillowClient;
use crate::clients::{ListingSource, RawBatch, SearchQuery, SourceError};
use crate::config::Config;
use crate::models::listing::{CanonicalListing, ListingPage, PageMeta};
use crate::normalize::{self, ProviderKind, RegionPolicy};
use crate::scoring::{self, ScoreDefaults};

/// Fetch, normalize and score a single source.
pub async fn collect<S: ListingSource>(
    source: &S,
    query: &SearchQuery,
    region: &RegionPolicy,
    defaults: &ScoreDefaults,
) -> Result<ListingPage> {
    let batch = source.fetch_raw(query).await?;
    let listings = normalize::normalize_batch(source.kind(), &batch.listings, region);
    let data = scoring::score_batch(listings, defaults);
    Ok(ListingPage {
        meta: PageMeta { total: data.len() },
        data,
    })
}

/// Query every configured provider for one location and merge the results
/// into a single scored page. Batch bounds are computed over the merged
/// set, so scores are comparable across providers.
pub async fn collect_all(config: &Config, query: &SearchQuery) -> Result<ListingPage> {
    let region = RegionPolicy::alberta();

    let mut redfin_query = query.clone();
    if redfin_query.region_id.is_none()
        && redfin_query.city.is_none()
        && redfin_query.postal.is_none()
        && redfin_query.free_text.is_none()
    {
        redfin_query.city = Some(query.location.clone());
    }

    let (zillow_raw, redfin_raw, realty_raw) = tokio::join!(
        fetch_source(ZillowClient::from_config(config), query),
        fetch_source(RedfinClient::from_config(config), &redfin_query),
        fetch_source(RealtyClient::from_config(config), query),
    );

    let outcomes = [
        (ProviderKind::Zillow, zillow_raw),
        (ProviderKind::Redfin, redfin_raw),
        (ProviderKind::Realty, realty_raw),
    ];

    let mut listings: Vec<CanonicalListing> = Vec::new();
    let mut fetched_any = false;
    for (kind, outcome) in outcomes {
        match outcome {
            Ok(batch) => {
                fetched_any = true;
                let normalized = normalize::normalize_batch(kind, &batch.listings, &region);
                info!(
                    "{}: {} raw listings, {} region-eligible",
                    kind.label(),
                    batch.listings.len(),
                    normalized.len()
                );
                listings.extend(normalized);
            }
            Err(err) => error!("{}: fetch failed: {}", kind.label(), err),
        }
    }
    if !fetched_any {
        bail!("every listing source failed");
    }

    let data = scoring::score_batch(listings, &ScoreDefaults::default());
    Ok(ListingPage {
        meta: PageMeta { total: data.len() },
        data,
    })
}

async fn fetch_source<S: ListingSource>(
    client: Result<S, SourceError>,
    query: &SearchQuery,
) -> Result<RawBatch, SourceError> {
    client?.fetch_raw(query).await
}
