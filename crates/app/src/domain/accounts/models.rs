//! Account models.

use kotsell::ids::TypedId;
use serde::{Deserialize, Serialize};

/// Customer id.
pub type CustomerId = TypedId<CustomerAccount>;

/// Admin id.
pub type AdminId = TypedId<AdminAccount>;

/// A customer account as the storefront sees it. Credentials never leave the
/// auth boundary; this carries identity and address fields only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub id: CustomerId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub barangay: String,
    pub city: String,
    pub postal_code: String,
}

impl CustomerAccount {
    /// Full name when both parts are present, otherwise the username,
    /// otherwise a generic fallback.
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();

        if !first.is_empty() && !last.is_empty() {
            return format!("{first} {last}");
        }

        if !self.username.trim().is_empty() {
            return self.username.clone();
        }

        "User".to_owned()
    }
}

/// An admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Registration input for a new customer account.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile fields editable from the account screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub barangay: String,
    pub city: String,
    pub postal_code: String,
}

impl ProfileUpdate {
    /// Replaces blank fields with the storefront's placeholder defaults, so
    /// a partially-filled save never blanks out an address on the backend.
    pub fn with_placeholders(self) -> Self {
        fn or_placeholder(value: String, placeholder: &str) -> String {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                placeholder.to_owned()
            } else {
                trimmed.to_owned()
            }
        }

        Self {
            first_name: or_placeholder(self.first_name, "No first name"),
            last_name: or_placeholder(self.last_name, "No last name"),
            street: or_placeholder(self.street, "No house/street"),
            barangay: or_placeholder(self.barangay, "No barangay"),
            city: or_placeholder(self.city, "No city"),
            postal_code: or_placeholder(self.postal_code, "No postal code"),
        }
    }
}
