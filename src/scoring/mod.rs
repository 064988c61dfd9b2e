use serde::Serialize;

use crate::models::lead::LeadRecord;
use crate::models::listing::{CanonicalListing, DisplayListing};

/// Floor applied to the batch minimum price when deriving bounds.
pub const MIN_PRICE_FLOOR: i64 = 50_000;

/// Per-listing inputs to the opportunity score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub price: f64,
    pub local_avg_price: f64,
    pub days_listed: i64,
    pub yield_percent: f64,
    pub location_score: f64,
    pub condition_score: f64,
    pub growth_score: f64,
}

/// Dataset-wide context, computed once per batch before any listing is scored.
#[derive(Debug, Clone, Copy)]
pub struct BatchBounds {
    pub min_price: f64,
    pub max_price: f64,
    pub max_yield: f64,
}

impl BatchBounds {
    /// Bounds over the batch's positive prices, with the minimum floored.
    pub fn from_prices<I: IntoIterator<Item = i64>>(prices: I, max_yield: f64) -> BatchBounds {
        let positive: Vec<i64> = prices.into_iter().filter(|price| *price > 0).collect();
        let min_price = positive
            .iter()
            .min()
            .map(|m| (*m).max(MIN_PRICE_FLOOR))
            .unwrap_or(MIN_PRICE_FLOOR);
        let max_price = positive.iter().max().copied().unwrap_or(min_price + 1);
        BatchBounds {
            min_price: min_price as f64,
            max_price: max_price as f64,
            max_yield,
        }
    }
}

/// Fallback inputs for listings that do not carry their own sub-scores.
#[derive(Debug, Clone, Copy)]
pub struct ScoreDefaults {
    pub max_yield: f64,
    pub yield_percent: f64,
    pub location_score: f64,
    pub condition_score: f64,
    pub growth_score: f64,
    pub local_avg_price: f64,
}

impl Default for ScoreDefaults {
    fn default() -> Self {
        ScoreDefaults {
            max_yield: 12.0,
            yield_percent: 6.0,
            location_score: 0.65,
            condition_score: 0.6,
            growth_score: 0.6,
            local_avg_price: 350_000.0,
        }
    }
}

pub fn clamp01(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

/// The 1-5 opportunity score.
///
/// Weighted sum of price-favorability, yield ratio and the three clamped
/// sub-scores, plus two binary bonuses. Bonuses are added before the 1.0
/// ceiling. Price-favorability is intentionally not clamped for listings
/// priced outside the batch bounds.
pub fn opportunity_score(inputs: &ScoreInputs, bounds: &BatchBounds) -> f64 {
    let p = 1.0 - (inputs.price - bounds.min_price) / (bounds.max_price - bounds.min_price).max(1.0);
    let r = inputs.yield_percent / bounds.max_yield.max(1.0);
    let l = clamp01(inputs.location_score);
    let c = clamp01(inputs.condition_score);
    let g = clamp01(inputs.growth_score);

    let mut raw = 0.4 * p + 0.3 * r + 0.15 * l + 0.1 * c + 0.05 * g;
    if inputs.price <= 0.8 * inputs.local_avg_price {
        raw += 0.2;
    }
    if inputs.days_listed > 30 {
        raw += 0.1;
    }
    raw = raw.min(1.0);

    let score = 1.0 + raw * 4.0;
    (score * 100.0).round() / 100.0
}

/// Star glyphs for a score: full stars, a half star when the fractional
/// part reaches 0.5, dots for the remaining slots.
pub fn star_glyphs(score: f64) -> String {
    let full = score.floor() as usize;
    let half = if score - score.floor() >= 0.5 { 1 } else { 0 };
    let empty = 5usize.saturating_sub(full + half);

    let mut stars = "★".repeat(full);
    if half == 1 {
        stars.push('☆');
    }
    stars.push_str(&"·".repeat(empty));
    stars
}

/// Score a batch of canonical listings with shared bounds.
pub fn score_batch(
    listings: Vec<CanonicalListing>,
    defaults: &ScoreDefaults,
) -> Vec<DisplayListing> {
    let bounds = BatchBounds::from_prices(listings.iter().map(|l| l.price), defaults.max_yield);

    listings
        .into_iter()
        .map(|listing| {
            let price = listing.price as f64;
            // Without a local average on record, assume the listing sits
            // at 70% of it, matching the lead flow.
            let local_avg_price = if listing.price > 0 {
                (price / 0.7).round()
            } else {
                defaults.local_avg_price
            };
            let inputs = ScoreInputs {
                price,
                local_avg_price,
                days_listed: listing.days_on_market,
                yield_percent: defaults.yield_percent,
                location_score: defaults.location_score,
                condition_score: defaults.condition_score,
                growth_score: defaults.growth_score,
            };
            let score = opportunity_score(&inputs, &bounds);
            let stars = star_glyphs(score);
            DisplayListing {
                listing,
                score,
                stars,
            }
        })
        .collect()
}

/// A lead with its computed ranking fields.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredLead {
    #[serde(flatten)]
    pub lead: LeadRecord,
    pub score: f64,
    pub stars: String,
    pub image_url: Option<String>,
}

/// Rank a batch of leads: bounds over the positive lead prices, per-lead
/// fallbacks for missing inputs.
pub fn rank_leads(leads: &[LeadRecord], defaults: &ScoreDefaults) -> Vec<ScoredLead> {
    let bounds = BatchBounds::from_prices(leads.iter().map(|lead| lead.price), defaults.max_yield);

    leads
        .iter()
        .enumerate()
        .map(|(index, lead)| {
            let inputs = lead_inputs(lead, index, defaults);
            let score = opportunity_score(&inputs, &bounds);
            ScoredLead {
                lead: lead.clone(),
                score,
                stars: star_glyphs(score),
                image_url: lead.image_candidate(),
            }
        })
        .collect()
}

fn lead_inputs(lead: &LeadRecord, index: usize, defaults: &ScoreDefaults) -> ScoreInputs {
    let mut price = lead.price as f64;
    let mut local_avg_price = lead.local_avg_price as f64;
    if price <= 0.0 {
        let base = if local_avg_price > 0.0 {
            local_avg_price
        } else {
            defaults.local_avg_price
        };
        price = (base * 0.7).round();
    }
    if local_avg_price <= 0.0 {
        local_avg_price = (price / 0.7).round();
    }

    // Deterministic stagger for leads without a listing age.
    let days_listed = if lead.days_listed > 0 {
        lead.days_listed
    } else {
        15 + (index as i64 * 7) % 60
    };

    ScoreInputs {
        price,
        local_avg_price,
        days_listed,
        yield_percent: lead.yield_percent.unwrap_or(defaults.yield_percent),
        location_score: lead.location_score.unwrap_or(defaults.location_score),
        condition_score: lead.condition_score.unwrap_or(defaults.condition_score),
        growth_score: lead.growth_score.unwrap_or(defaults.growth_score),
    }
}
