use serde_json::Value;

/// Paths used to flatten a structured address into one line.
pub struct AddressPaths {
    pub street: &'static str,
    pub city: &'static str,
    pub state: &'static str,
}

/// Field-mapping table for one upstream payload shape.
///
/// Each canonical field has a chain of dotted source paths probed in
/// order, first present wins. Adding a provider is a data change.
pub struct ProviderRules {
    pub prefix: &'static str,
    pub list_keys: &'static [&'static str],
    pub id: &'static [&'static str],
    pub mls_number: &'static [&'static str],
    pub address: &'static [&'static str],
    pub structured_address: Option<AddressPaths>,
    pub city: &'static [&'static str],
    pub city_from_address_text: bool,
    pub property_type: &'static [&'static str],
    pub status: &'static [&'static str],
    pub numeric_status_is_active: bool,
    pub price: &'static [&'static str],
    pub price_display: &'static [&'static str],
    pub currency: &'static [&'static str],
    pub beds: &'static [&'static str],
    pub baths: &'static [&'static str],
    pub days_on_market: &'static [&'static str],
    pub remarks: &'static [&'static str],
    pub detail_url: &'static [&'static str],
    pub image_url: &'static [&'static str],
    pub living_area: &'static [&'static str],
    pub year_built: &'static [&'static str],
    pub zipcode: &'static [&'static str],
    pub province: &'static [&'static str],
}

pub static ZILLOW: ProviderRules = ProviderRules {
    prefix: "z",
    list_keys: &["data", "results", "props", "properties", "list"],
    id: &["zpid", "id"],
    mls_number: &["zpid"],
    address: &["address"],
    structured_address: Some(AddressPaths {
        street: "address.streetAddress",
        city: "address.city",
        state: "address.state",
    }),
    city: &["city", "address.city"],
    city_from_address_text: false,
    property_type: &["homeType"],
    status: &["homeStatus"],
    numeric_status_is_active: false,
    price: &["price"],
    price_display: &[],
    currency: &["currency"],
    beds: &["bedrooms"],
    baths: &["bathrooms"],
    days_on_market: &["daysOnZillow"],
    remarks: &["description"],
    detail_url: &["detailUrl"],
    image_url: &["imgSrc"],
    living_area: &["livingArea"],
    year_built: &["yearBuilt"],
    zipcode: &["zipcode"],
    province: &[],
};

pub static REDFIN: ProviderRules = ProviderRules {
    prefix: "rf",
    list_keys: &["results", "data", "properties", "list", "items"],
    id: &["listingId", "mlsId.value", "propertyId", "id"],
    mls_number: &["mlsId.value"],
    address: &["fullAddress", "address"],
    structured_address: Some(AddressPaths {
        street: "streetLine.value",
        city: "city",
        state: "state",
    }),
    city: &["city", "address.city"],
    city_from_address_text: false,
    property_type: &["propertyType"],
    status: &["mlsStatus", "status"],
    numeric_status_is_active: false,
    price: &["price.value", "price"],
    price_display: &[],
    currency: &["currency"],
    beds: &["beds", "bedrooms"],
    baths: &["baths", "bathrooms"],
    days_on_market: &["daysOnMarket.value", "daysOnMarket", "dom.value"],
    remarks: &["remarks", "description"],
    detail_url: &["url", "detailUrl"],
    image_url: &["photoUrl", "imgSrc"],
    living_area: &["sqFt.value", "livingArea"],
    year_built: &["yearBuilt.value", "yearBuilt"],
    zipcode: &["postalCode", "zip"],
    province: &[],
};

pub static REALTY: ProviderRules = ProviderRules {
    prefix: "prov",
    list_keys: &["data", "Results", "Data", "Properties", "Listings", "results"],
    id: &["Id", "ListingID", "id"],
    mls_number: &["MlsNumber"],
    address: &[
        "Property.Address.AddressText",
        "Address.AddressText",
        "Address",
        "address",
    ],
    structured_address: Some(AddressPaths {
        street: "Property.Address.StreetAddress",
        city: "Property.Address.City",
        state: "Property.Address.Province",
    }),
    city: &["city", "City"],
    city_from_address_text: true,
    property_type: &["Property.Type", "PropertyType", "type"],
    status: &["Status", "StatusId", "status"],
    numeric_status_is_active: true,
    price: &[
        "Property.PriceUnformattedValue",
        "PriceUnformattedValue",
        "price",
        "Price",
    ],
    price_display: &["Property.Price", "Property.ShortValue"],
    currency: &[],
    beds: &["Building.BedroomsTotal", "Building.Bedrooms", "beds"],
    baths: &[
        "Building.BathroomsTotal",
        "Building.BathroomTotal",
        "Building.Bathrooms",
        "baths",
    ],
    days_on_market: &["DaysOnMarket", "Dom", "daysOnMarket"],
    remarks: &["PublicRemarks", "Remarks", "remarks"],
    detail_url: &["RelativeDetailsURL", "detailUrl"],
    image_url: &["Property.Photo.0.HighResPath", "imageUrl"],
    living_area: &[],
    year_built: &[],
    zipcode: &["PostalCode"],
    province: &["ProvinceName", "Property.Address.Province"],
};

/// Walk a dotted path ("Property.Address.City", "Photo.0.HighResPath")
/// into a JSON value. Null counts as absent.
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// First present value along a fallback chain.
pub fn probe<'a>(raw: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup_path(raw, path))
}

/// Strings pass through trimmed, numbers are rendered; other shapes are absent.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Price coercion: numeric values round, numeric strings are stripped of
/// currency symbols and separators first. Anything else is absent.
pub fn parse_money(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f.round() as i64),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().map(|f| f.round() as i64)
        }
        _ => None,
    }
}

pub fn parse_quantity(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Days-on-market: integer coercion with negatives clamped to zero.
pub fn parse_days(value: &Value) -> i64 {
    let days = parse_quantity(value).unwrap_or(0.0) as i64;
    days.max(0)
}

/// True when the value is a number, or a string that parses as one untouched.
pub fn is_numeric_like(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

/// Status text. Providers with numeric status codes map 1 to "Active".
pub fn status_text(value: &Value, numeric_is_active: bool) -> String {
    if numeric_is_active {
        if let Some(code) = parse_quantity(value) {
            if code == 1.0 {
                return String::from("Active");
            }
        }
    }
    as_text(value).unwrap_or_default()
}

/// Flatten a structured address: street + city + ", " + state/province.
pub fn flatten_address(raw: &Value, paths: &AddressPaths) -> Option<String> {
    let street = lookup_path(raw, paths.street)
        .and_then(as_text)
        .unwrap_or_default();
    let city = lookup_path(raw, paths.city)
        .and_then(as_text)
        .unwrap_or_default();
    let state = lookup_path(raw, paths.state)
        .and_then(as_text)
        .unwrap_or_default();

    if street.is_empty() && city.is_empty() && state.is_empty() {
        return None;
    }

    let flat = format!("{} {}, {}", street, city, state);
    Some(flat.trim().trim_end_matches(',').trim().to_string())
}

/// Derive a city from pipe-delimited address text: after the last '|',
/// up to the first ','.
pub fn city_from_address_text(address: &str) -> String {
    let after_pipe = match address.rfind('|') {
        Some(pos) => &address[pos + 1..],
        None => address,
    };
    after_pipe
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Group an amount with comma thousands separators.
pub fn format_thousands(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod field_tests {
    use serde_json::json;

    use super::{
        city_from_address_text, format_thousands, lookup_path, parse_days, parse_money, probe,
    };

    #[test]
    fn lookup_follows_nested_paths_and_array_indexes() {
        let raw = json!({
            "Property": {
                "Photo": [{ "HighResPath": "https://cdn.example/1.jpg" }],
                "Address": { "City": "Calgary" }
            }
        });

        let city = lookup_path(&raw, "Property.Address.City").unwrap();
        assert_eq!(city.as_str(), Some("Calgary"));

        let photo = lookup_path(&raw, "Property.Photo.0.HighResPath").unwrap();
        assert_eq!(photo.as_str(), Some("https://cdn.example/1.jpg"));

        assert!(lookup_path(&raw, "Property.Address.Province").is_none());
    }

    #[test]
    fn probe_takes_first_present_value() {
        let raw = json!({ "Dom": 12, "daysOnMarket": 99 });
        let value = probe(&raw, &["DaysOnMarket", "Dom", "daysOnMarket"]).unwrap();
        assert_eq!(value.as_i64(), Some(12));
    }

    #[test]
    fn money_strips_currency_decorations() {
        assert_eq!(parse_money(&json!("CAD $450,000")), Some(450_000));
        assert_eq!(parse_money(&json!("$1,249,900.50")), Some(1_249_901));
        assert_eq!(parse_money(&json!(325000.4)), Some(325_000));
        assert_eq!(parse_money(&json!("Contact for price")), None);
    }

    #[test]
    fn days_clamp_at_zero() {
        assert_eq!(parse_days(&json!(-5)), 0);
        assert_eq!(parse_days(&json!("45")), 45);
    }

    #[test]
    fn city_derivation_handles_pipes() {
        assert_eq!(
            city_from_address_text("123 4 St NW|Calgary, Alberta T2N 1P4"),
            "Calgary"
        );
        assert_eq!(city_from_address_text("Edmonton, Alberta"), "Edmonton");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(450000), "450,000");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }
}
