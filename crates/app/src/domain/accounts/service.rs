//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::session::SessionStore;

use super::{
    api::AccountsApi,
    errors::AccountsServiceError,
    models::{AdminAccount, AdminId, CustomerAccount, CustomerId, NewCustomer, ProfileUpdate},
    records::{ProfilePayload, RegisterPayload},
};

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Registers a new customer account.
    async fn register(&self, new: NewCustomer) -> Result<(), AccountsServiceError>;

    /// Loads a customer's profile from the backend.
    async fn load_customer(&self, id: CustomerId) -> Result<CustomerAccount, AccountsServiceError>;

    /// Saves a customer's profile and refreshes the session cache.
    async fn save_customer(
        &self,
        id: CustomerId,
        update: ProfileUpdate,
    ) -> Result<CustomerAccount, AccountsServiceError>;

    /// Loads an admin's profile from the backend.
    async fn load_admin(&self, id: AdminId) -> Result<AdminAccount, AccountsServiceError>;

    /// Saves an admin's profile and refreshes the session cache.
    async fn save_admin(
        &self,
        id: AdminId,
        update: ProfileUpdate,
    ) -> Result<AdminAccount, AccountsServiceError>;
}

/// [`AccountsService`] over the REST backend, mirroring saved profiles into
/// the session store for quick re-display.
#[derive(Clone)]
pub struct HttpAccountsService {
    api: Arc<dyn AccountsApi>,
    session: Arc<SessionStore>,
}

impl std::fmt::Debug for HttpAccountsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAccountsService").finish_non_exhaustive()
    }
}

impl HttpAccountsService {
    #[must_use]
    pub fn new(api: Arc<dyn AccountsApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    async fn find_customer(
        &self,
        id: CustomerId,
    ) -> Result<CustomerAccount, AccountsServiceError> {
        self.api
            .fetch_customers()
            .await?
            .into_iter()
            .filter_map(super::records::CustomerRecord::into_account)
            .find(|account| account.id == id)
            .ok_or(AccountsServiceError::NotFound)
    }

    async fn find_admin(&self, id: AdminId) -> Result<AdminAccount, AccountsServiceError> {
        self.api
            .fetch_admins()
            .await?
            .into_iter()
            .filter_map(super::records::AdminRecord::into_account)
            .find(|account| account.id == id)
            .ok_or(AccountsServiceError::NotFound)
    }
}

#[async_trait]
impl AccountsService for HttpAccountsService {
    async fn register(&self, new: NewCustomer) -> Result<(), AccountsServiceError> {
        let username = new.username.trim();
        let email = new.email.trim();
        let password = new.password.trim();

        if username.is_empty()
            || email.is_empty()
            || password.is_empty()
            || new.confirm_password.trim().is_empty()
        {
            return Err(AccountsServiceError::MissingFields);
        }

        if password != new.confirm_password.trim() {
            return Err(AccountsServiceError::PasswordMismatch);
        }

        let payload =
            RegisterPayload::new(username.to_owned(), email.to_owned(), password.to_owned());

        self.api.register_customer(&payload).await?;

        info!(username, "customer account created");

        Ok(())
    }

    async fn load_customer(&self, id: CustomerId) -> Result<CustomerAccount, AccountsServiceError> {
        self.find_customer(id).await
    }

    async fn save_customer(
        &self,
        id: CustomerId,
        update: ProfileUpdate,
    ) -> Result<CustomerAccount, AccountsServiceError> {
        let update = update.with_placeholders();
        let payload = ProfilePayload {
            first_name: update.first_name,
            last_name: update.last_name,
            street: update.street,
            barangay: update.barangay,
            city: update.city,
            postal_code: update.postal_code,
        };

        self.api.update_customer(id, &payload).await?;

        // Refetch rather than trusting the form data, so the session cache
        // reflects whatever the backend actually stored.
        let account = self.find_customer(id).await?;
        self.session.cache_customer(&account);

        Ok(account)
    }

    async fn load_admin(&self, id: AdminId) -> Result<AdminAccount, AccountsServiceError> {
        self.find_admin(id).await
    }

    async fn save_admin(
        &self,
        id: AdminId,
        update: ProfileUpdate,
    ) -> Result<AdminAccount, AccountsServiceError> {
        let update = update.with_placeholders();
        let payload = ProfilePayload {
            first_name: update.first_name,
            last_name: update.last_name,
            street: update.street,
            barangay: update.barangay,
            city: update.city,
            postal_code: update.postal_code,
        };

        self.api.update_admin(id, &payload).await?;

        let account = self.find_admin(id).await?;
        self.session.cache_admin(&account);

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{domain::accounts::api::MockAccountsApi, session::MemoryStorage};

    use super::*;

    fn customer_records() -> Vec<super::super::records::CustomerRecord> {
        serde_json::from_value(json!([
            {
                "customersId": 5,
                "username": "juandc",
                "email": "juan@example.com",
                "firstName": "Juan",
                "lastName": "Dela Cruz",
                "street": "Blk 2 Lot 4",
                "barangay": "Pulo",
                "city": "Cabuyao",
                "postalCode": "4025",
            },
            { "id": 9, "username": "maria", "email": "maria@example.com" },
        ]))
        .expect("records should decode")
    }

    fn service(api: MockAccountsApi) -> (HttpAccountsService, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        (
            HttpAccountsService::new(Arc::new(api), Arc::clone(&session)),
            session,
        )
    }

    fn new_customer() -> NewCustomer {
        NewCustomer {
            username: "juandc".to_owned(),
            email: "juan@example.com".to_owned(),
            password: "secret".to_owned(),
            confirm_password: "secret".to_owned(),
        }
    }

    #[tokio::test]
    async fn load_customer_finds_record_by_id() {
        let mut api = MockAccountsApi::new();
        api.expect_fetch_customers()
            .times(1)
            .returning(|| Ok(customer_records()));
        let (service, _) = service(api);

        let account = service
            .load_customer(CustomerId::from_i64(5))
            .await
            .expect("load should succeed");

        assert_eq!(account.username, "juandc");
        assert_eq!(account.city, "Cabuyao");
    }

    #[tokio::test]
    async fn load_customer_unknown_id_is_not_found() {
        let mut api = MockAccountsApi::new();
        api.expect_fetch_customers()
            .returning(|| Ok(customer_records()));
        let (service, _) = service(api);

        let result = service.load_customer(CustomerId::from_i64(404)).await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn save_customer_sends_placeholders_and_caches_result() {
        let mut api = MockAccountsApi::new();
        api.expect_update_customer()
            .times(1)
            .withf(|id, payload| {
                *id == CustomerId::from_i64(5)
                    && payload.first_name == "Juan"
                    && payload.barangay == "No barangay"
            })
            .returning(|_, _| Ok(()));
        api.expect_fetch_customers()
            .times(1)
            .returning(|| Ok(customer_records()));
        let (service, session) = service(api);

        let update = ProfileUpdate {
            first_name: "Juan".to_owned(),
            last_name: "Dela Cruz".to_owned(),
            street: "Blk 2 Lot 4".to_owned(),
            ..ProfileUpdate::default()
        };

        service
            .save_customer(CustomerId::from_i64(5), update)
            .await
            .expect("save should succeed");

        assert!(session.cached_customer().is_some());
    }

    #[tokio::test]
    async fn register_with_blank_field_is_rejected_before_any_call() {
        let mut api = MockAccountsApi::new();
        api.expect_register_customer().never();
        let (service, _) = service(api);

        let result = service
            .register(NewCustomer {
                email: "  ".to_owned(),
                ..new_customer()
            })
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::MissingFields)),
            "expected MissingFields, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_with_mismatched_passwords_is_rejected() {
        let mut api = MockAccountsApi::new();
        api.expect_register_customer().never();
        let (service, _) = service(api);

        let result = service
            .register(NewCustomer {
                confirm_password: "different".to_owned(),
                ..new_customer()
            })
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::PasswordMismatch)),
            "expected PasswordMismatch, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_posts_trimmed_payload() {
        let mut api = MockAccountsApi::new();
        api.expect_register_customer()
            .times(1)
            .withf(|payload| payload.username == "juandc" && payload.first_name == "default")
            .returning(|_| Ok(()));
        let (service, _) = service(api);

        service
            .register(NewCustomer {
                username: " juandc ".to_owned(),
                ..new_customer()
            })
            .await
            .expect("register should succeed");
    }
}
