#[cfg(test)]
mod lead_tests {
    use synapse::models::lead::{demo_inventory, first_http_url, LeadFilter, LeadRecord};
    use synapse::scoring::{rank_leads, ScoreDefaults};

    fn lead(price: i64, local_avg_price: i64) -> LeadRecord {
        LeadRecord {
            address: "788 Memorial Dr NW, Calgary".to_string(),
            property_type: "Single Family".to_string(),
            price,
            local_avg_price,
            days_listed: 10,
            yield_percent: Some(4.0),
            location_score: Some(0.5),
            condition_score: Some(0.5),
            growth_score: Some(0.5),
            beds: 3.0,
            baths: 2.0,
            ..LeadRecord::default()
        }
    }

    #[test]
    fn default_filter_leaves_every_dimension_open() {
        let filter = LeadFilter::default();
        assert!(filter.matches(&lead(300000, 400000)));
    }

    #[test]
    fn type_match_ignores_case() {
        let filter = LeadFilter {
            property_type: "single family".to_string(),
            ..LeadFilter::default()
        };
        assert!(filter.matches(&lead(300000, 400000)));

        let other = LeadFilter {
            property_type: "Condo".to_string(),
            ..LeadFilter::default()
        };
        assert!(!other.matches(&lead(300000, 400000)));
    }

    #[test]
    fn zero_minimums_do_not_constrain() {
        let mut subject = lead(300000, 400000);
        subject.beds = 0.0;
        subject.baths = 0.0;

        assert!(LeadFilter::default().matches(&subject));

        let filter = LeadFilter {
            min_beds: 2.0,
            ..LeadFilter::default()
        };
        assert!(!filter.matches(&subject));
    }

    #[test]
    fn yield_range_uses_absent_as_zero() {
        let mut subject = lead(300000, 400000);
        subject.yield_percent = None;

        let filter = LeadFilter {
            min_yield: 5.0,
            ..LeadFilter::default()
        };
        assert!(!filter.matches(&subject));
        assert!(LeadFilter::default().matches(&subject));
    }

    #[test]
    fn demo_inventory_respects_the_filter() {
        let filter = LeadFilter::default();
        let leads = demo_inventory("Calgary", 40, &filter);

        assert!(leads.len() <= 40);
        assert!(!leads.is_empty());
        for lead in &leads {
            assert!(filter.matches(lead));
            assert!(lead.address.ends_with(", Calgary"));
            assert!((180_000..=950_000).contains(&lead.price));
        }

        let impossible = LeadFilter {
            min_price: 10_000_000,
            ..LeadFilter::default()
        };
        assert!(demo_inventory("Calgary", 40, &impossible).is_empty());
    }

    #[test]
    fn image_candidate_prefers_explicit_then_sanitized_url() {
        let mut subject = lead(300000, 400000);
        subject.image = Some("https://cdn.example/cover.jpg".to_string());
        assert_eq!(
            subject.image_candidate().as_deref(),
            Some("https://cdn.example/cover.jpg")
        );

        subject.image = Some("x".to_string());
        subject.image_urls = Some(vec!["see https://img.example/a.jpg) for details".to_string()]);
        assert_eq!(
            subject.image_candidate().as_deref(),
            Some("https://img.example/a.jpg")
        );
    }

    #[test]
    fn url_extraction_stops_at_whitespace_and_parens() {
        assert_eq!(
            first_http_url("photo at https://img.example/b.png end"),
            Some("https://img.example/b.png".to_string())
        );
        assert_eq!(first_http_url("no url here"), None);
    }

    #[test]
    fn ranked_leads_use_shared_bounds_and_fallbacks() {
        let cheap = lead(300000, 400000);
        let pricey = LeadRecord {
            price: 500000,
            local_avg_price: 450000,
            days_listed: 0,
            ..LeadRecord::default()
        };

        let ranked = rank_leads(
            &[
                cheap,
                pricey.clone(),
                pricey.clone(),
                pricey,
            ],
            &ScoreDefaults::default(),
        );

        // Cheapest lead: P=1, yield 4/12, three 0.5 sub-scores, underpriced bonus.
        assert_eq!(ranked[0].score, 4.4);
        assert_eq!(ranked[0].stars, "★★★★·");

        // Expensive lead at index 1: staggered fallback age 22 days, no bonuses.
        assert_eq!(ranked[1].score, 2.35);
        assert_eq!(ranked[1].stars, "★★···");

        // Same lead at index 3: fallback age 36 days earns the staleness bonus.
        assert_eq!(ranked[3].score, 2.75);
        assert_eq!(ranked[2].score, 2.35);
    }

    #[test]
    fn ranking_is_deterministic() {
        let leads = vec![lead(300000, 400000), lead(350000, 380000)];
        let defaults = ScoreDefaults::default();

        let first: Vec<f64> = rank_leads(&leads, &defaults).iter().map(|l| l.score).collect();
        let second: Vec<f64> = rank_leads(&leads, &defaults).iter().map(|l| l.score).collect();

        assert_eq!(first, second);
    }
}
