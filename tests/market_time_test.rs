#[cfg(test)]
mod market_time_tests {
    use serde_json::json;

    use synapse::market_time::{
        extract_embedded_state, minutes_from_embedded, minutes_on_market, parse_relative_minutes,
    };

    #[test]
    fn relative_units_normalize_to_minutes() {
        assert_eq!(parse_relative_minutes("Listed 3 days ago"), Some(4320));
        assert_eq!(parse_relative_minutes("45 mins"), Some(45));
        assert_eq!(parse_relative_minutes("5.5 hours on site"), Some(330));
        assert_eq!(parse_relative_minutes("2 hrs"), Some(120));
        assert_eq!(parse_relative_minutes("just listed"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(
            parse_relative_minutes("8 hours on Zillow, updated 2 days ago"),
            Some(480)
        );
    }

    #[test]
    fn embedded_state_is_preferred_over_page_text() {
        let html = r#"<html>
            <script id="data">window.__NEXT_DATA__ = {"props":{"homeDetails":{"timeOnZillow":"2 days"}}}</script>
            <div>99 days on market</div>
        </html>"#;

        assert_eq!(minutes_on_market(html), Some(2880));
    }

    #[test]
    fn embedded_number_without_unit_reads_as_hours() {
        let state = json!({ "page": { "timeOnZillow": "3" } });
        assert_eq!(minutes_from_embedded(&state), Some(180));
    }

    #[test]
    fn embedded_numeric_value_reads_as_minutes() {
        let state = json!({ "timeOnZillowMinutes": 95 });
        assert_eq!(minutes_from_embedded(&state), Some(95));
    }

    #[test]
    fn page_text_fallback_handles_days() {
        let html = "<div class=\"stat\">14 days on market</div>";
        assert_eq!(minutes_on_market(html), Some(20160));
    }

    #[test]
    fn zero_minutes_means_nothing_found() {
        assert_eq!(minutes_on_market("<div>0 days on site</div>"), None);
    }

    #[test]
    fn shared_data_script_is_recognized() {
        let html = r#"<script data-zrr-shared-data-key="initial-data" type="application/json">
            {"listing":{"timeOnZillow":"6 hours"}}
        </script>"#;

        let state = extract_embedded_state(html).expect("state should parse");
        assert_eq!(minutes_from_embedded(&state), Some(360));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let state = json!({ "listingTime": "5 days", "meta": { "daysOnSite": 12 } });
        assert_eq!(minutes_from_embedded(&state), None);
    }
}
