//! The page as the controller sees it.
//!
//! [`PageView`] is the whole DOM contract: the browser crate implements it
//! with web-sys, tests implement it with a recording fake. Element ids and
//! class names the markup must provide live in [`ids`] and [`classes`].

use crate::errors::CoreError;
use crate::models::notification::Notification;
use crate::models::report::ReportFields;
use crate::models::request::FormField;
use crate::models::result::Estimate;
use crate::models::theme::Theme;
use crate::services::category_service::price_category;
use crate::services::validation_service::FieldMark;

/// Element ids required by the controller.
pub mod ids {
    pub const FORM: &str = "predictionForm";
    pub const PRICE_DISPLAY: &str = "priceDisplay";
    pub const PRICE_RANGE: &str = "priceRange";
    pub const INSIGHTS_LIST: &str = "insightsList";
    pub const INSIGHTS_SECTION: &str = "insightsSection";
    pub const CAR_AGE: &str = "carAge";
    pub const DEPRECIATION: &str = "depreciation";
    pub const RESULT_CARD: &str = "resultCard";
    pub const PREDICT_SECTION: &str = "predict";
    pub const LOADING_OVERLAY: &str = "loadingOverlay";
    pub const THEME_ICON: &str = "themeIcon";
}

/// Class names and selectors shared with the stylesheet.
pub mod classes {
    /// Marks the loading overlay as shown.
    pub const ACTIVE: &str = "active";
    /// One-shot reveal animation; never removed once added.
    pub const FADE_IN: &str = "fade-in";
    /// Elements observed for the reveal animation.
    pub const REVEAL_SELECTOR: &str = ".feature-card, .insight-card";
    /// Attribute on `<html>` carrying the theme.
    pub const THEME_ATTRIBUTE: &str = "data-theme";
}

/// Scroll targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The estimate card; centred in the viewport.
    ResultCard,
    /// The form section; aligned to the top.
    PredictForm,
}

impl Section {
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::ResultCard => ids::RESULT_CARD,
            Section::PredictForm => ids::PREDICT_SECTION,
        }
    }

    /// `block` option of `scrollIntoView`.
    pub fn block(&self) -> &'static str {
        match self {
            Section::ResultCard => "center",
            Section::PredictForm => "start",
        }
    }
}

/// One rendered insight row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRow {
    pub class: String,
    pub text: String,
}

/// Everything written to the page for one successful estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub price: String,
    pub category: String,
    /// Replaces the insight list. When empty, the insight list, age,
    /// depreciation and section visibility are all left as they were.
    pub insights: Vec<InsightRow>,
    pub car_age: String,
    pub depreciation: String,
}

impl ResultView {
    pub fn from_estimate(estimate: &Estimate) -> Self {
        Self {
            price: estimate.price.clone(),
            category: price_category(estimate.price_value).badge().to_string(),
            insights: estimate
                .insights
                .iter()
                .map(|i| InsightRow {
                    class: i.kind.alert_class(),
                    text: i.text.clone(),
                })
                .collect(),
            car_age: estimate.car_age_text(),
            depreciation: estimate.depreciation_text(),
        }
    }

    pub fn has_insights(&self) -> bool {
        !self.insights.is_empty()
    }
}

/// Operations the controller performs on the page.
///
/// All methods are synchronous and take `&self`: the page is shared by
/// every handler, and the browser runs them one at a time.
pub trait PageView {
    /// Current text of a form control.
    fn read_field(&self, field: FormField) -> Result<String, CoreError>;

    fn write_field(&self, field: FormField, value: &str) -> Result<(), CoreError>;

    /// Apply `mark`, removing the opposite validation class.
    /// `FieldMark::Unmarked` leaves the control as it is.
    fn mark_field(&self, field: FormField, mark: FieldMark) -> Result<(), CoreError>;

    /// Remove both validation classes.
    fn clear_field_marks(&self, field: FormField) -> Result<(), CoreError>;

    /// Set the document theme attribute and the toggle icon.
    fn apply_theme(&self, theme: Theme) -> Result<(), CoreError>;

    /// Cosmetic transition played after a user-initiated theme switch.
    fn play_theme_transition(&self) -> Result<(), CoreError>;

    fn set_loading(&self, visible: bool) -> Result<(), CoreError>;

    fn render_result(&self, result: &ResultView) -> Result<(), CoreError>;

    /// Insert the toast and schedule its fade-out and removal.
    fn show_notification(&self, notification: &Notification) -> Result<(), CoreError>;

    /// Add the reveal animation to the observed element `key`.
    fn reveal(&self, key: &str) -> Result<(), CoreError>;

    fn scroll_into_view(&self, section: Section) -> Result<(), CoreError>;

    /// Result fields exactly as currently displayed.
    fn report_fields(&self) -> Result<ReportFields, CoreError>;

    /// Offer `contents` to the user as a file download.
    fn download(&self, filename: &str, mime: &str, contents: &str) -> Result<(), CoreError>;
}
