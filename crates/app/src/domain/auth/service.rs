//! Auth service.
//!
//! Credential verification lives behind this one boundary. The bundled
//! implementation still matches credentials against the fetched account
//! collection, since the backend issues no session tokens, but the
//! comparison happens in exactly one place, password buffers are zeroized,
//! and the session it establishes is an explicit value in the session store.
//! A token-issuing backend can replace [`ClientAuthService`] without
//! touching any caller.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use zeroize::Zeroizing;

use crate::{
    domain::accounts::{
        api::AccountsApi,
        models::{AdminAccount, CustomerAccount},
    },
    session::SessionStore,
};

use super::errors::AuthError;

/// The command requires an active admin session.
///
/// # Errors
///
/// Returns [`AuthError::AdminRequired`] when no admin session is active.
pub fn require_admin(session: &SessionStore) -> Result<(), AuthError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(AuthError::AdminRequired)
    }
}

/// The command requires an active customer session.
///
/// # Errors
///
/// Returns [`AuthError::CustomerRequired`] when no customer session is
/// active.
pub fn require_customer(session: &SessionStore) -> Result<(), AuthError> {
    if session.is_customer() {
        Ok(())
    } else {
        Err(AuthError::CustomerRequired)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies customer credentials and establishes a customer session.
    async fn login_customer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccount, AuthError>;

    /// Verifies admin credentials and establishes an admin session.
    async fn login_admin(&self, email: &str, password: &str) -> Result<AdminAccount, AuthError>;

    /// Clears the active session. The guest cart snapshot survives.
    fn logout(&self);
}

/// [`AuthService`] verifying against the backend's account collections.
#[derive(Clone)]
pub struct ClientAuthService {
    api: Arc<dyn AccountsApi>,
    session: Arc<SessionStore>,
}

impl std::fmt::Debug for ClientAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAuthService").finish_non_exhaustive()
    }
}

impl ClientAuthService {
    #[must_use]
    pub fn new(api: Arc<dyn AccountsApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }
}

#[async_trait]
impl AuthService for ClientAuthService {
    async fn login_customer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccount, AuthError> {
        let email = email.trim();
        let candidate = Zeroizing::new(password.trim().to_owned());

        if email.is_empty() || candidate.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let records = self.api.fetch_customers().await?;
        let mut record = records
            .into_iter()
            .find(|record| record.email() == email)
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = Zeroizing::new(record.password.take().unwrap_or_default());

        if *stored != *candidate {
            return Err(AuthError::InvalidCredentials);
        }

        let account = record.into_account().ok_or(AuthError::InvalidCredentials)?;

        self.session.start_customer_session(&account);
        info!(customer = %account.id, "customer logged in");

        Ok(account)
    }

    async fn login_admin(&self, email: &str, password: &str) -> Result<AdminAccount, AuthError> {
        let email = email.trim();
        let candidate = Zeroizing::new(password.trim().to_owned());

        if email.is_empty() || candidate.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let records = self.api.fetch_admins().await?;
        let mut record = records
            .into_iter()
            .find(|record| record.email() == email)
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = Zeroizing::new(record.password.take().unwrap_or_default());

        if *stored != *candidate {
            return Err(AuthError::InvalidCredentials);
        }

        let account = record.into_account().ok_or(AuthError::InvalidCredentials)?;

        self.session.start_admin_session(&account);
        info!(admin = %account.id, "admin logged in");

        Ok(account)
    }

    fn logout(&self) {
        self.session.end_session();
        info!("session ended");
    }
}
