#[cfg(test)]
mod scoring_tests {
    use serde_json::json;

    use synapse::normalize::{self, ProviderKind, RegionPolicy};
    use synapse::scoring::{
        clamp01, opportunity_score, score_batch, star_glyphs, BatchBounds, ScoreDefaults,
        ScoreInputs,
    };

    fn inputs(price: f64, local_avg_price: f64) -> ScoreInputs {
        ScoreInputs {
            price,
            local_avg_price,
            days_listed: 0,
            yield_percent: 0.0,
            location_score: 0.0,
            condition_score: 0.0,
            growth_score: 0.0,
        }
    }

    fn bounds(min_price: f64, max_price: f64) -> BatchBounds {
        BatchBounds {
            min_price,
            max_price,
            max_yield: 12.0,
        }
    }

    #[test]
    fn identical_inputs_yield_identical_scores() {
        let listing = ScoreInputs {
            price: 380000.0,
            local_avg_price: 410000.0,
            days_listed: 44,
            yield_percent: 7.2,
            location_score: 0.8,
            condition_score: 0.55,
            growth_score: 0.7,
        };
        let context = bounds(300000.0, 500000.0);

        let first = opportunity_score(&listing, &context);
        let second = opportunity_score(&listing, &context);

        assert_eq!(first, second);
    }

    #[test]
    fn cheapest_listing_with_no_other_signal_scores_2_6() {
        // P = 1 contributes the full 0.4 weight, everything else is zero.
        let score = opportunity_score(&inputs(300000.0, 300000.0), &bounds(300000.0, 500000.0));

        assert_eq!(score, 2.6);
    }

    #[test]
    fn score_caps_at_exactly_five() {
        let listing = ScoreInputs {
            price: 300000.0,
            local_avg_price: 1000000.0,
            days_listed: 45,
            yield_percent: 12.0,
            location_score: 1.0,
            condition_score: 1.0,
            growth_score: 1.0,
        };

        // Weighted sum alone reaches 1.0; both bonuses would push past it.
        let score = opportunity_score(&listing, &bounds(300000.0, 500000.0));

        assert_eq!(score, 5.0);
    }

    #[test]
    fn underpriced_bonus_applies_at_eighty_percent_of_local_average() {
        let score = opportunity_score(&inputs(200000.0, 300000.0), &bounds(200000.0, 400000.0));

        // 0.4 base + 0.2 bonus
        assert_eq!(score, 3.4);
    }

    #[test]
    fn staleness_bonus_needs_more_than_thirty_days() {
        let mut listing = inputs(200000.0, 200000.0);
        listing.days_listed = 31;
        let stale = opportunity_score(&listing, &bounds(200000.0, 400000.0));

        listing.days_listed = 30;
        let fresh = opportunity_score(&listing, &bounds(200000.0, 400000.0));

        assert_eq!(stale, 3.0);
        assert_eq!(fresh, 2.6);
    }

    #[test]
    fn price_favorability_is_not_clamped_outside_bounds() {
        let score = opportunity_score(&inputs(600000.0, 600000.0), &bounds(200000.0, 400000.0));

        // P = -1, so the weighted sum goes negative and stays there.
        assert_eq!(score, -0.6);
    }

    #[test]
    fn sub_scores_clamp_to_unit_interval() {
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(0.65), 0.65);
    }

    #[test]
    fn star_rendering_matches_display_rules() {
        assert_eq!(star_glyphs(3.5), "★★★☆·");
        assert_eq!(star_glyphs(3.4), "★★★··");
        assert_eq!(star_glyphs(5.0), "★★★★★");
        assert_eq!(star_glyphs(2.6), "★★☆··");
        assert_eq!(star_glyphs(1.0), "★····");
    }

    #[test]
    fn bounds_floor_the_minimum_price() {
        let floored = BatchBounds::from_prices(vec![30000, 400000], 12.0);
        assert_eq!(floored.min_price, 50000.0);
        assert_eq!(floored.max_price, 400000.0);

        let empty = BatchBounds::from_prices(Vec::new(), 12.0);
        assert_eq!(empty.min_price, 50000.0);
        assert_eq!(empty.max_price, 50001.0);
    }

    #[test]
    fn degenerate_single_listing_batch_never_divides_by_zero() {
        let single = BatchBounds::from_prices(vec![300000], 12.0);
        let score = opportunity_score(&inputs(300000.0, 300000.0), &single);

        // min == max falls back to the max(1, ..) divisor, P stays 1.
        assert_eq!(score, 2.6);
    }

    #[test]
    fn merged_batch_scores_with_shared_bounds() {
        let payload = json!({
            "data": [
                { "zpid": 1, "city": "Calgary", "price": 300000, "daysOnZillow": 10 },
                { "zpid": 2, "city": "Edmonton", "price": 500000, "daysOnZillow": 40 }
            ]
        });
        let listings =
            normalize::normalize_payload(ProviderKind::Zillow, &payload, &RegionPolicy::alberta())
                .unwrap();

        let scored = score_batch(listings, &ScoreDefaults::default());

        assert_eq!(scored.len(), 2);
        // Cheapest listing: P=1, default yield and sub-scores, underpriced
        // bonus from the derived local average.
        assert_eq!(scored[0].score, 4.75);
        assert_eq!(scored[0].stars, "★★★★☆");
        // Most expensive listing: P=0, plus the staleness bonus at 40 days.
        assert_eq!(scored[1].score, 3.55);
        assert_eq!(scored[1].stars, "★★★☆·");
    }
}
