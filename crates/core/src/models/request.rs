use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One of the ten inputs on the valuation form.
///
/// The identifier doubles as the DOM element id and as the JSON key
/// sent to the prediction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Year,
    Engine,
    Transmission,
    Kms,
    Owner,
    Fuel,
    Power,
    Seats,
    Mileage,
    Body,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 10] = [
        FormField::Year,
        FormField::Engine,
        FormField::Transmission,
        FormField::Kms,
        FormField::Owner,
        FormField::Fuel,
        FormField::Power,
        FormField::Seats,
        FormField::Mileage,
        FormField::Body,
    ];

    /// Element id / JSON key of this field.
    pub fn id(&self) -> &'static str {
        match self {
            FormField::Year => "year",
            FormField::Engine => "engine",
            FormField::Transmission => "transmission",
            FormField::Kms => "kms",
            FormField::Owner => "owner",
            FormField::Fuel => "fuel",
            FormField::Power => "power",
            FormField::Seats => "seats",
            FormField::Mileage => "mileage",
            FormField::Body => "body",
        }
    }

    /// Look a field up by its element id.
    pub fn from_id(id: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| CoreError::UnknownField(id.to_string()))
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// The form payload sent to `POST /predict`.
///
/// Values are sent exactly as read from the form controls: no trimming,
/// no numeric parsing. Empty strings are allowed; the service validates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub year: String,
    pub engine: String,
    pub transmission: String,
    pub kms: String,
    pub owner: String,
    pub fuel: String,
    pub power: String,
    pub seats: String,
    pub mileage: String,
    pub body: String,
}

impl PredictionRequest {
    /// Build a request by reading every field through `read`.
    pub fn from_fields<F>(mut read: F) -> Self
    where
        F: FnMut(FormField) -> String,
    {
        let mut request = Self::default();
        for field in FormField::ALL {
            *request.field_mut(field) = read(field);
        }
        request
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Year => &self.year,
            FormField::Engine => &self.engine,
            FormField::Transmission => &self.transmission,
            FormField::Kms => &self.kms,
            FormField::Owner => &self.owner,
            FormField::Fuel => &self.fuel,
            FormField::Power => &self.power,
            FormField::Seats => &self.seats,
            FormField::Mileage => &self.mileage,
            FormField::Body => &self.body,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Year => &mut self.year,
            FormField::Engine => &mut self.engine,
            FormField::Transmission => &mut self.transmission,
            FormField::Kms => &mut self.kms,
            FormField::Owner => &mut self.owner,
            FormField::Fuel => &mut self.fuel,
            FormField::Power => &mut self.power,
            FormField::Seats => &mut self.seats,
            FormField::Mileage => &mut self.mileage,
            FormField::Body => &mut self.body,
        }
    }
}
