// ═══════════════════════════════════════════════════════════════════
// Service Tests — price categories, validation marks, report template,
// maintenance and depreciation helpers
// ═══════════════════════════════════════════════════════════════════

use chrono::{FixedOffset, TimeZone, Utc};
use carvalue_core::errors::CoreError;
use carvalue_core::models::report::ReportFields;
use carvalue_core::services::advice_service::{calculate_roi, suggest_maintenance};
use carvalue_core::services::category_service::{price_category, PriceCategory};
use carvalue_core::services::report_service::render_report;
use carvalue_core::services::validation_service::{validity_on_blur, FieldMark};

// ═══════════════════════════════════════════════════════════════════
// Price category
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn boundaries() {
        let cases = [
            (0.0, PriceCategory::BudgetFriendly),
            (299_999.0, PriceCategory::BudgetFriendly),
            (300_000.0, PriceCategory::MidRange),
            (699_999.0, PriceCategory::MidRange),
            (700_000.0, PriceCategory::Premium),
            (1_499_999.0, PriceCategory::Premium),
            (1_500_000.0, PriceCategory::Luxury),
            (50_000_000.0, PriceCategory::Luxury),
        ];
        for (price, expected) in cases {
            assert_eq!(price_category(price), expected, "price {price}");
        }
    }

    #[test]
    fn fractional_values_just_below_threshold() {
        assert_eq!(price_category(299_999.99), PriceCategory::BudgetFriendly);
        assert_eq!(price_category(1_499_999.5), PriceCategory::Premium);
    }

    #[test]
    fn negative_is_budget() {
        assert_eq!(price_category(-1.0), PriceCategory::BudgetFriendly);
    }

    #[test]
    fn nan_and_infinity_are_luxury() {
        assert_eq!(price_category(f64::NAN), PriceCategory::Luxury);
        assert_eq!(price_category(f64::INFINITY), PriceCategory::Luxury);
    }

    #[test]
    fn labels_and_badges() {
        assert_eq!(PriceCategory::BudgetFriendly.label(), "Budget Friendly");
        assert_eq!(PriceCategory::MidRange.to_string(), "Mid Range");
        assert_eq!(PriceCategory::Premium.badge(), "⭐ Premium");
        assert_eq!(PriceCategory::Luxury.badge(), "💎 Luxury");
        assert!(PriceCategory::BudgetFriendly.badge().ends_with("Budget Friendly"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Validation marks
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn non_empty_and_valid() {
        assert_eq!(validity_on_blur("2019", true), FieldMark::Valid);
    }

    #[test]
    fn non_empty_and_invalid() {
        assert_eq!(validity_on_blur("1800", false), FieldMark::Invalid);
    }

    #[test]
    fn empty_is_unmarked_regardless_of_constraint() {
        assert_eq!(validity_on_blur("", true), FieldMark::Unmarked);
        assert_eq!(validity_on_blur("", false), FieldMark::Unmarked);
    }

    #[test]
    fn classes() {
        assert_eq!(FieldMark::Valid.class(), Some("is-valid"));
        assert_eq!(FieldMark::Invalid.class(), Some("is-invalid"));
        assert_eq!(FieldMark::Unmarked.class(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Report template
// ═══════════════════════════════════════════════════════════════════

mod report {
    use super::*;

    fn fields() -> ReportFields {
        ReportFields {
            price: "₹ 5.25 Lakh".into(),
            car_age: "6 years".into(),
            depreciation: "50%".into(),
        }
    }

    #[test]
    fn renders_fixed_template() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        let text = render_report(&fields(), &at);
        let expected = "\nCAR VALUATION REPORT\n\
                        ====================\n\
                        Generated: 3/7/2024, 2:05:09 PM\n\
                        \n\
                        Estimated Value: ₹ 5.25 Lakh\n\
                        Car Age: 6 years\n\
                        Depreciation: 50%\n\
                        \n\
                        This report is generated by CarValue AI\n\
                        For more information, visit: carvalue.ai\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn uses_local_wall_clock_of_timestamp() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let at = tz.with_ymd_and_hms(2024, 12, 31, 0, 30, 0).unwrap();
        let text = render_report(&fields(), &at);
        assert!(text.contains("Generated: 12/31/2024, 12:30:00 AM"));
    }

    #[test]
    fn placeholders_pass_through_untouched() {
        let placeholder = ReportFields {
            price: "₹ --".into(),
            car_age: "-".into(),
            depreciation: String::new(),
        };
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let text = render_report(&placeholder, &at);
        assert!(text.contains("Estimated Value: ₹ --\n"));
        assert!(text.contains("Car Age: -\n"));
        assert!(text.contains("Depreciation: \n"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Advice helpers
// ═══════════════════════════════════════════════════════════════════

mod advice {
    use super::*;

    #[test]
    fn no_suggestions_for_young_low_mileage_car() {
        assert!(suggest_maintenance(20_000.0, "2022", 2024).is_empty());
    }

    #[test]
    fn all_suggestions_in_order() {
        assert_eq!(
            suggest_maintenance(120_000.0, "2010", 2024),
            vec![
                "Consider major service",
                "Check for rust and wear",
                "Timing belt replacement recommended"
            ]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(suggest_maintenance(50_000.0, "2019", 2024).is_empty());
        assert_eq!(
            suggest_maintenance(100_000.0, "2019", 2024),
            vec!["Consider major service"]
        );
        assert_eq!(
            suggest_maintenance(0.0, "2018", 2024),
            vec!["Check for rust and wear"]
        );
    }

    #[test]
    fn unparsable_year_skips_age_check() {
        assert_eq!(
            suggest_maintenance(60_000.0, "", 2024),
            vec!["Consider major service"]
        );
    }

    #[test]
    fn roi_two_decimals() {
        let roi = calculate_roi(1_000_000.0, 600_000.0, 3.0).unwrap();
        assert_eq!(roi.total_depreciation, "40.00");
        assert_eq!(roi.annual_depreciation, "13.33");
    }

    #[test]
    fn roi_appreciation_is_negative() {
        let roi = calculate_roi(500_000.0, 550_000.0, 2.0).unwrap();
        assert_eq!(roi.total_depreciation, "-10.00");
        assert_eq!(roi.annual_depreciation, "-5.00");
    }

    #[test]
    fn roi_rejects_degenerate_inputs() {
        assert!(matches!(
            calculate_roi(0.0, 1.0, 1.0),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            calculate_roi(1.0, 1.0, 0.0),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
