use super::request::FormField;

/// Every user or browser interaction the page controller reacts to.
///
/// The browser layer translates DOM events into these and hands them to
/// `PageController::dispatch`; nothing in the core touches the DOM directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The valuation form was submitted.
    Submit,
    /// The theme button was clicked.
    ToggleTheme,
    /// A field lost focus. `constraint_satisfied` is the control's native
    /// validity check at that moment.
    FieldBlur {
        field: FormField,
        value: String,
        constraint_satisfied: bool,
    },
    /// The user typed into a field.
    FieldInput { field: FormField },
    /// A field's committed value changed.
    FieldChange { field: FormField, value: String },
    /// An observed card scrolled into the viewport. `key` identifies the
    /// element within the view.
    ElementVisible { key: String },
    /// "Get started" style link to the form.
    ScrollToPredict,
    /// The report download button was clicked.
    DownloadReport,
}

impl PageEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Submit => "submit",
            PageEvent::ToggleTheme => "toggle_theme",
            PageEvent::FieldBlur { .. } => "field_blur",
            PageEvent::FieldInput { .. } => "field_input",
            PageEvent::FieldChange { .. } => "field_change",
            PageEvent::ElementVisible { .. } => "element_visible",
            PageEvent::ScrollToPredict => "scroll_to_predict",
            PageEvent::DownloadReport => "download_report",
        }
    }
}
