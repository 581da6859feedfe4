//! Delivery contact details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for contact details, one per required field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// First name was empty.
    #[error("first name is required")]
    MissingFirstName,

    /// Last name was empty.
    #[error("last name is required")]
    MissingLastName,

    /// House/street address was empty.
    #[error("house/street address is required")]
    MissingStreet,
}

/// Name and delivery address collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub house_street: String,
    pub barangay: String,
    pub city: String,
    pub postal_code: String,
}

impl ContactInfo {
    /// Checks the required fields: first name, last name and house/street
    /// must be non-empty after trimming. Barangay, city and postal code are
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns the error for the first missing field, in form order.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.first_name.trim().is_empty() {
            return Err(ContactError::MissingFirstName);
        }

        if self.last_name.trim().is_empty() {
            return Err(ContactError::MissingLastName);
        }

        if self.house_street.trim().is_empty() {
            return Err(ContactError::MissingStreet);
        }

        Ok(())
    }

    /// Joins street, barangay, city and postal code into the single address
    /// string the order payload carries.
    pub fn delivery_address(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.house_street, self.barangay, self.city, self.postal_code
        )
    }
}
