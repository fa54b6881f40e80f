use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidateEmail;

use crate::error::ValidationError;

/// Vehicle category offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Truck,
}

impl VehicleType {
    /// Value sent in the `vehicleType` multipart field.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "Sedan",
            VehicleType::Suv => "SUV",
            VehicleType::Truck => "Truck",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedan" => Ok(VehicleType::Sedan),
            "suv" => Ok(VehicleType::Suv),
            "truck" => Ok(VehicleType::Truck),
            other => Err(format!(
                "Unknown vehicle type '{}' (expected Sedan, SUV or Truck)",
                other
            )),
        }
    }
}

/// Text input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Number,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Number => "number",
        }
    }
}

/// Contact details and vehicle selection entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub number: String,
    pub vehicle_type: Option<VehicleType>,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        number: impl Into<String>,
        vehicle_type: Option<VehicleType>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            number: number.into(),
            vehicle_type,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Number => &self.number,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Number => self.number = value,
        }
    }

    /// Presence checks for the text inputs, in form order. The email must also be well formed.
    pub fn validate_contact(&self) -> Result<(), ValidationError> {
        for field in [ContactField::Name, ContactField::Email, ContactField::Number] {
            if self.field(field).trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        let email = self.email.trim().to_string();
        if !email.validate_email() {
            tracing::debug!(email = %self.email, "Rejected malformed email address");
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
