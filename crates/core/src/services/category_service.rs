/// Upper (exclusive) bound of the budget bucket.
pub const BUDGET_CEILING: f64 = 300_000.0;
/// Upper (exclusive) bound of the mid-range bucket.
pub const MID_RANGE_CEILING: f64 = 700_000.0;
/// Upper (exclusive) bound of the premium bucket. Everything at or above is luxury.
pub const PREMIUM_CEILING: f64 = 1_500_000.0;

/// Price bracket of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceCategory {
    BudgetFriendly,
    MidRange,
    Premium,
    Luxury,
}

impl PriceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PriceCategory::BudgetFriendly => "Budget Friendly",
            PriceCategory::MidRange => "Mid Range",
            PriceCategory::Premium => "Premium",
            PriceCategory::Luxury => "Luxury",
        }
    }

    /// Label with its emoji, as shown under the price.
    pub fn badge(&self) -> &'static str {
        match self {
            PriceCategory::BudgetFriendly => "💰 Budget Friendly",
            PriceCategory::MidRange => "🚗 Mid Range",
            PriceCategory::Premium => "⭐ Premium",
            PriceCategory::Luxury => "💎 Luxury",
        }
    }
}

impl std::fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket a numeric price. Buckets are `[low, high)`; the top one is open.
///
/// NaN compares false against every ceiling and so lands in `Luxury`.
pub fn price_category(price: f64) -> PriceCategory {
    if price < BUDGET_CEILING {
        PriceCategory::BudgetFriendly
    } else if price < MID_RANGE_CEILING {
        PriceCategory::MidRange
    } else if price < PREMIUM_CEILING {
        PriceCategory::Premium
    } else {
        PriceCategory::Luxury
    }
}
