//! "Time on market" recovery from listing detail pages.
//!
//! Providers bury the listing age in embedded page state or render it as
//! relative text ("3 days", "5 hours"). Everything normalizes to minutes.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref RELATIVE_TIME: Regex =
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(minute|minutes|min|mins|hour|hours|hr|hrs|day|days)")
            .unwrap();
    static ref TIME_KEY: Regex = Regex::new(r"(?i)time.*zillow").unwrap();
    static ref LEADING_NUMBER: Regex = Regex::new(r"(\d+(?:\.\d+)?)").unwrap();
    static ref EMBEDDED_NEXT: Regex =
        Regex::new(r#"<script[^>]*>\s*window\.__NEXT_DATA__\s*=\s*(\{[\s\S]*?\})\s*</script>"#)
            .unwrap();
    static ref EMBEDDED_SHARED: Regex = Regex::new(
        r#"<script[^>]*data-zrr-shared-data-key="initial-data"[^>]*>\s*(\{[\s\S]*?\})\s*</script>"#
    )
    .unwrap();
}

fn unit_minutes(amount: f64, unit: &str) -> i64 {
    let unit = unit.to_lowercase();
    if unit.starts_with("min") {
        amount.round() as i64
    } else if unit.starts_with("hr") || unit.starts_with("hour") {
        (amount * 60.0).round() as i64
    } else {
        (amount * 1440.0).round() as i64
    }
}

/// Parse the first "number + unit" occurrence in free text into minutes.
pub fn parse_relative_minutes(text: &str) -> Option<i64> {
    let caps = RELATIVE_TIME.captures(text)?;
    let amount: f64 = caps[1].parse().ok()?;
    Some(unit_minutes(amount, &caps[2]))
}

/// Walk embedded page state for a "time on zillow"-style key.
///
/// String values parse as relative time, with hours assumed when the text
/// carries no unit. Bare numbers are taken as minutes.
pub fn minutes_from_embedded(value: &Value) -> Option<i64> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if TIME_KEY.is_match(key) {
                    match child {
                        Value::String(text) => {
                            if let Some(minutes) = parse_relative_minutes(text) {
                                return Some(minutes);
                            }
                            if let Some(m) = LEADING_NUMBER.captures(text) {
                                if let Ok(amount) = m[1].parse::<f64>() {
                                    return Some(unit_minutes(amount, "hour"));
                                }
                            }
                        }
                        Value::Number(n) => {
                            return n.as_f64().map(|minutes| minutes.round() as i64)
                        }
                        _ => {}
                    }
                }
                if child.is_object() || child.is_array() {
                    if let Some(found) = minutes_from_embedded(child) {
                        return Some(found);
                    }
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(minutes_from_embedded),
        _ => None,
    }
}

/// Pull the embedded JSON state blob out of a detail page, if present.
pub fn extract_embedded_state(html: &str) -> Option<Value> {
    let caps = EMBEDDED_NEXT
        .captures(html)
        .or_else(|| EMBEDDED_SHARED.captures(html))?;
    serde_json::from_str(caps.get(1)?.as_str()).ok()
}

/// Minutes on market for a detail page: embedded state first, visible
/// text second. Zero means "nothing found" and maps to None.
pub fn minutes_on_market(html: &str) -> Option<i64> {
    if let Some(state) = extract_embedded_state(html) {
        if let Some(minutes) = minutes_from_embedded(&state) {
            if minutes > 0 {
                return Some(minutes);
            }
        }
    }
    parse_relative_minutes(html).filter(|minutes| *minutes > 0)
}
