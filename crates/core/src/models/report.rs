/// Default name of the downloaded report.
pub const REPORT_FILENAME: &str = "car-valuation-report.txt";

/// MIME type of the downloaded report.
pub const REPORT_MIME: &str = "text/plain";

/// Result fields as currently shown on the page.
///
/// Read back from the view, not from the last estimate, so a report taken
/// before any prediction carries whatever placeholder text the page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFields {
    pub price: String,
    pub car_age: String,
    pub depreciation: String,
}
