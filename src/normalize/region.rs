/// Geographic allow-list every normalized listing must pass.
///
/// A listing is eligible when its city matches the allow-list exactly, or
/// its address text mentions the region name or abbreviation marker.
#[derive(Debug, Clone)]
pub struct RegionPolicy {
    pub name: String,
    pub marker: String,
    pub cities: Vec<String>,
}

impl RegionPolicy {
    pub fn new(name: &str, marker: &str, cities: &[&str]) -> RegionPolicy {
        RegionPolicy {
            name: name.to_string(),
            marker: marker.to_string(),
            cities: cities.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// The shipped Alberta policy: known municipalities plus ", AB" marker.
    pub fn alberta() -> RegionPolicy {
        RegionPolicy::new(
            "Alberta",
            ", AB",
            &[
                "Calgary",
                "Edmonton",
                "Red Deer",
                "Lethbridge",
                "Medicine Hat",
                "Grande Prairie",
                "Airdrie",
                "St. Albert",
                "Sherwood Park",
                "Fort McMurray",
                "Spruce Grove",
                "Leduc",
                "Okotoks",
                "Cochrane",
                "Camrose",
                "Brooks",
                "Lloydminster",
                "Chestermere",
                "Canmore",
                "Banff",
                "Strathcona County",
                "Stony Plain",
                "Fort Saskatchewan",
                "Sylvan Lake",
                "Wetaskiwin",
                "Parkland County",
                "Beaumont",
                "Strathmore",
                "High River",
                "Hinton",
                "Jasper",
                "Rocky Mountain House",
            ],
        )
    }

    /// City match is exact and case-sensitive; address markers are not.
    pub fn is_eligible(&self, city: &str, address: &str) -> bool {
        if self.cities.iter().any(|known| known == city) {
            return true;
        }
        let haystack = address.to_lowercase();
        haystack.contains(&self.name.to_lowercase()) || haystack.contains(&self.marker.to_lowercase())
    }

    pub fn matches_province(&self, province: &str) -> bool {
        province.eq_ignore_ascii_case(&self.name)
    }
}
