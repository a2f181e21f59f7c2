use crate::errors::CoreError;

/// Odometer reading above which a major service is suggested.
const MAJOR_SERVICE_KMS: f64 = 50_000.0;
/// Odometer reading above which the timing belt is due.
const TIMING_BELT_KMS: f64 = 100_000.0;
/// Age in years above which rust/wear checks are suggested.
const WEAR_CHECK_AGE: i32 = 5;

/// Maintenance suggestions for a car with `kms` on the clock, registered in
/// `year` (form text). Age is measured against `reference_year`.
///
/// A year that is not an integer yields no age-based suggestion.
pub fn suggest_maintenance(kms: f64, year: &str, reference_year: i32) -> Vec<&'static str> {
    let age = year.trim().parse::<i32>().ok().map(|y| reference_year - y);
    let mut suggestions = Vec::new();

    if kms > MAJOR_SERVICE_KMS {
        suggestions.push("Consider major service");
    }
    if age.is_some_and(|a| a > WEAR_CHECK_AGE) {
        suggestions.push("Check for rust and wear");
    }
    if kms > TIMING_BELT_KMS {
        suggestions.push("Timing belt replacement recommended");
    }

    suggestions
}

/// Depreciation over an ownership period, as two-decimal percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiSummary {
    pub total_depreciation: String,
    pub annual_depreciation: String,
}

/// Depreciation between buying at `buy_price` and selling at `sell_price`
/// after `years`.
pub fn calculate_roi(buy_price: f64, sell_price: f64, years: f64) -> Result<RoiSummary, CoreError> {
    if buy_price == 0.0 || !buy_price.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "buy price must be a non-zero number, got {buy_price}"
        )));
    }
    if years == 0.0 || !years.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "ownership period must be a non-zero number of years, got {years}"
        )));
    }

    let total = (buy_price - sell_price) / buy_price * 100.0;
    let annual = total / years;

    Ok(RoiSummary {
        total_depreciation: format!("{total:.2}"),
        annual_depreciation: format!("{annual:.2}"),
    })
}
