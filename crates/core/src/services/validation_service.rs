/// CSS class of a field that passed validation on blur.
pub const VALID_CLASS: &str = "is-valid";
/// CSS class of a field that failed validation on blur.
pub const INVALID_CLASS: &str = "is-invalid";

/// Validation styling of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMark {
    Valid,
    Invalid,
    Unmarked,
}

impl FieldMark {
    /// Class to add; the other validation class is removed.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            FieldMark::Valid => Some(VALID_CLASS),
            FieldMark::Invalid => Some(INVALID_CLASS),
            FieldMark::Unmarked => None,
        }
    }
}

/// Styling to show when a field loses focus.
///
/// Empty fields are left unmarked regardless of their constraints; the
/// marks are cosmetic and never block submission.
pub fn validity_on_blur(value: &str, constraint_satisfied: bool) -> FieldMark {
    if value.is_empty() {
        FieldMark::Unmarked
    } else if constraint_satisfied {
        FieldMark::Valid
    } else {
        FieldMark::Invalid
    }
}
