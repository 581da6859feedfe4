//! Account wire records.
//!
//! The backend is loose about field names (`customersId` vs `id`) and may
//! omit profile fields entirely, so records decode every field optionally and
//! resolve to models in one place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::coerce;

use super::models::{AdminAccount, AdminId, CustomerAccount, CustomerId};

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecord {
    #[serde(default, rename = "customersId")]
    customers_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    pub(crate) password: Option<String>,
    #[serde(default, rename = "firstName")]
    first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    last_name: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    barangay: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, rename = "postalCode")]
    postal_code: Option<String>,
}

impl CustomerRecord {
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customers_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(CustomerId::from_i64)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Resolves to the credential-free account model. Records without a
    /// usable id are dropped.
    pub fn into_account(self) -> Option<CustomerAccount> {
        let id = self.customer_id()?;

        Some(CustomerAccount {
            id,
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            street: self.street.unwrap_or_default(),
            barangay: self.barangay.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            postal_code: self.postal_code.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminRecord {
    #[serde(default, rename = "adminId")]
    admin_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    pub(crate) password: Option<String>,
    #[serde(default, rename = "firstName")]
    first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    last_name: Option<String>,
}

impl AdminRecord {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn into_account(self) -> Option<AdminAccount> {
        let id = self
            .admin_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(AdminId::from_i64)?;

        Some(AdminAccount {
            id,
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
        })
    }
}

/// Registration payload. The profile fields are seeded with the storefront's
/// placeholder value and filled in later from the account screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub street: &'static str,
    pub barangay: &'static str,
    pub city: &'static str,
    pub postal_code: &'static str,
}

impl RegisterPayload {
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            username,
            email,
            password,
            first_name: "default",
            last_name: "default",
            street: "default",
            barangay: "default",
            city: "default",
            postal_code: "default",
        }
    }
}

/// Profile save payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub barangay: String,
    pub city: String,
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn customer_record_resolves_either_id_field() {
        let by_customers_id: CustomerRecord =
            serde_json::from_value(json!({ "customersId": 5, "email": "a@b.c" }))
                .expect("decode");
        let by_id: CustomerRecord =
            serde_json::from_value(json!({ "id": "7", "email": "a@b.c" })).expect("decode");

        assert_eq!(by_customers_id.customer_id(), Some(CustomerId::from_i64(5)));
        assert_eq!(by_id.customer_id(), Some(CustomerId::from_i64(7)));
    }

    #[test]
    fn record_without_id_resolves_to_no_account() {
        let record: CustomerRecord =
            serde_json::from_value(json!({ "email": "a@b.c" })).expect("decode");

        assert!(record.into_account().is_none());
    }

    #[test]
    fn account_model_never_carries_the_password() {
        let record: CustomerRecord = serde_json::from_value(json!({
            "customersId": 1,
            "email": "a@b.c",
            "password": "hunter2",
        }))
        .expect("decode");

        let account = record.into_account().expect("account");
        let serialized = serde_json::to_value(&account).expect("serialize");

        assert!(serialized.get("password").is_none());
    }

    #[test]
    fn register_payload_seeds_placeholder_profile() {
        let payload = RegisterPayload::new(
            "juandc".to_owned(),
            "juan@example.com".to_owned(),
            "secret".to_owned(),
        );
        let value = serde_json::to_value(&payload).expect("serialize");

        assert_eq!(value["firstName"], "default");
        assert_eq!(value["postalCode"], "default");
    }
}
