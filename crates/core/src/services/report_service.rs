use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::models::report::ReportFields;

/// `M/D/YYYY, h:mm:ss AM` in the viewer's local time.
const GENERATED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Render the plain-text valuation report.
///
/// Fields are copied verbatim; nothing is checked, so a report taken
/// before any prediction simply carries the page's placeholder text.
pub fn render_report<Tz>(fields: &ReportFields, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "\n\
CAR VALUATION REPORT\n\
====================\n\
Generated: {generated}\n\
\n\
Estimated Value: {price}\n\
Car Age: {age}\n\
Depreciation: {depreciation}\n\
\n\
This report is generated by CarValue AI\n\
For more information, visit: carvalue.ai\n",
        generated = generated_at.format(GENERATED_FORMAT),
        price = fields.price,
        age = fields.car_age,
        depreciation = fields.depreciation,
    )
}
