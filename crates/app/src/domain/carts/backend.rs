//! Cart backing selection.

use crate::{domain::accounts::models::CustomerId, session::SessionStore};

/// Which store is authoritative for the cart, decided once per session:
/// browser-style local storage for guests, the remote cart API for a
/// logged-in customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartBackend {
    /// Guest session; the local snapshot is the cart.
    Local,

    /// Logged-in customer; the remote cart is authoritative and the local
    /// snapshot mirrors it.
    Remote(CustomerId),
}

impl CartBackend {
    /// Resolves the backing from the session. A customer flag without a
    /// usable customer id degrades to local.
    pub fn resolve(session: &SessionStore) -> Self {
        if session.is_customer() {
            if let Some(customer) = session.customer_id() {
                return Self::Remote(customer);
            }
        }

        Self::Local
    }

}

#[cfg(test)]
mod tests {
    use crate::{
        domain::accounts::models::{CustomerAccount, CustomerId},
        session::{MemoryStorage, SessionStore},
    };

    use super::*;

    #[test]
    fn guest_session_resolves_to_local() {
        let session = SessionStore::new(Box::new(MemoryStorage::new()));

        assert_eq!(CartBackend::resolve(&session), CartBackend::Local);
    }

    #[test]
    fn customer_session_resolves_to_remote() {
        let session = SessionStore::new(Box::new(MemoryStorage::new()));
        session.start_customer_session(&CustomerAccount {
            id: CustomerId::from_i64(5),
            username: "juandc".to_owned(),
            email: "juan@example.com".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            street: String::new(),
            barangay: String::new(),
            city: String::new(),
            postal_code: String::new(),
        });

        assert_eq!(
            CartBackend::resolve(&session),
            CartBackend::Remote(CustomerId::from_i64(5))
        );
    }
}
