//! Session storage.
//!
//! The persistence layer for session state: login flags, cached account
//! blobs, the local cart snapshot and the customer id. Backed by a string
//! key-value [`Storage`] (in-memory for tests, a JSON file for the CLI)
//! with last-write-wins semantics and no cross-instance coordination.

use std::{
    fmt::Debug,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;
use uuid::Uuid;

use kotsell::cart::Cart;

use crate::domain::accounts::models::{AdminAccount, CustomerAccount, CustomerId};

/// Persisted keys. Names match the browser build so a storage dump stays
/// recognisable.
mod keys {
    pub(super) const IS_ADMIN: &str = "isAdmin";
    pub(super) const IS_CUSTOMER: &str = "isCustomer";
    pub(super) const ADMIN_ACCOUNT: &str = "adminAccount";
    pub(super) const ADMIN_ID: &str = "adminId";
    pub(super) const CUSTOMER_ACCOUNT: &str = "customerAccount";
    pub(super) const CUSTOMER_ID: &str = "customerId";
    pub(super) const CUSTOMER_NAME: &str = "customerName";
    pub(super) const CUSTOMER_EMAIL: &str = "customerEmail";
    pub(super) const CART: &str = "cart";
    pub(super) const SESSION_ID: &str = "sessionId";
}

/// A string key-value store. Writes are best-effort: a backing store that
/// cannot persist logs and carries on, it never fails the caller.
pub trait Storage: Send + Sync + Debug {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&self, key: &str, value: String);

    /// Deletes a value.
    fn remove(&self, key: &str);
}

/// Process-local storage, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// File-backed storage for the CLI, so a session survives between
/// invocations. The whole map lives in one JSON file; a corrupt file is
/// replaced with an empty map.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Uses the given file as the backing store. The file is created on the
    /// first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> FxHashMap<String, String> {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return FxHashMap::default();
        };

        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "discarding corrupt session file");
                FxHashMap::default()
            }
        }
    }

    fn store(&self, values: &FxHashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(values) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(%error, "failed to serialize session state");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            _ = std::fs::create_dir_all(parent);
        }

        if let Err(error) = std::fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), %error, "failed to persist session state");
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut values = self.load();
        values.insert(key.to_owned(), value);
        self.store(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.load();
        values.remove(key);
        self.store(&values);
    }
}

/// Typed access to the session keys, with corrupt values replaced by safe
/// defaults rather than surfaced.
#[derive(Debug)]
pub struct SessionStore {
    storage: Box<dyn Storage>,
}

impl SessionStore {
    /// Wraps a backing store.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    fn flag(&self, key: &str) -> bool {
        self.storage.get(key).is_some_and(|v| v == "true")
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "discarding corrupt session value");
                self.storage.remove(key);
                None
            }
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(serialized) => self.storage.set(key, serialized),
            Err(error) => warn!(key, %error, "failed to serialize session value"),
        }
    }

    /// Whether an admin session is active.
    pub fn is_admin(&self) -> bool {
        self.flag(keys::IS_ADMIN)
    }

    /// Whether a customer session is active.
    pub fn is_customer(&self) -> bool {
        self.flag(keys::IS_CUSTOMER)
    }

    /// The logged-in customer's id, when a customer session is active.
    pub fn customer_id(&self) -> Option<CustomerId> {
        let raw = self.storage.get(keys::CUSTOMER_ID)?;

        match raw.parse() {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "discarding corrupt customer id");
                self.storage.remove(keys::CUSTOMER_ID);
                None
            }
        }
    }

    /// The cached customer account blob, if present and well-formed.
    pub fn cached_customer(&self) -> Option<CustomerAccount> {
        self.get_json(keys::CUSTOMER_ACCOUNT)
    }

    /// The cached admin account blob, if present and well-formed.
    pub fn cached_admin(&self) -> Option<AdminAccount> {
        self.get_json(keys::ADMIN_ACCOUNT)
    }

    /// Refreshes the cached customer account blob after a profile save.
    pub fn cache_customer(&self, account: &CustomerAccount) {
        self.set_json(keys::CUSTOMER_ACCOUNT, account);
    }

    /// Refreshes the cached admin account blob after a profile save.
    pub fn cache_admin(&self, account: &AdminAccount) {
        self.set_json(keys::ADMIN_ACCOUNT, account);
    }

    /// The local cart snapshot. A corrupt snapshot degrades to an empty
    /// cart.
    pub fn cart(&self) -> Cart {
        self.get_json(keys::CART).unwrap_or_default()
    }

    /// Persists the local cart snapshot.
    pub fn set_cart(&self, cart: &Cart) {
        self.set_json(keys::CART, cart);
    }

    /// Drops the local cart snapshot.
    pub fn clear_cart(&self) {
        self.storage.remove(keys::CART);
    }

    /// Marks a customer session active and caches the account for quick
    /// re-display.
    pub fn start_customer_session(&self, account: &CustomerAccount) {
        self.storage.set(keys::IS_CUSTOMER, "true".to_owned());
        self.storage
            .set(keys::CUSTOMER_ID, account.id.into_i64().to_string());
        self.storage
            .set(keys::CUSTOMER_NAME, account.display_name());
        self.storage
            .set(keys::CUSTOMER_EMAIL, account.email.clone());
        self.storage
            .set(keys::SESSION_ID, Uuid::new_v4().to_string());
        self.cache_customer(account);
    }

    /// Marks an admin session active and caches the account.
    pub fn start_admin_session(&self, account: &AdminAccount) {
        self.storage.set(keys::IS_ADMIN, "true".to_owned());
        self.storage
            .set(keys::ADMIN_ID, account.id.into_i64().to_string());
        self.storage
            .set(keys::SESSION_ID, Uuid::new_v4().to_string());
        self.cache_admin(account);
    }

    /// The logged-in admin's id, when an admin session is active.
    pub fn admin_id(&self) -> Option<crate::domain::accounts::models::AdminId> {
        let raw = self.storage.get(keys::ADMIN_ID)?;

        match raw.parse() {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "discarding corrupt admin id");
                self.storage.remove(keys::ADMIN_ID);
                None
            }
        }
    }

    /// The display name cached at login.
    pub fn customer_name(&self) -> Option<String> {
        self.storage.get(keys::CUSTOMER_NAME)
    }

    /// Clears every session flag and cached blob. The cart snapshot is left
    /// alone so a guest cart survives logout.
    pub fn end_session(&self) {
        for key in [
            keys::IS_ADMIN,
            keys::IS_CUSTOMER,
            keys::ADMIN_ACCOUNT,
            keys::ADMIN_ID,
            keys::CUSTOMER_ACCOUNT,
            keys::CUSTOMER_ID,
            keys::CUSTOMER_NAME,
            keys::CUSTOMER_EMAIL,
            keys::SESSION_ID,
        ] {
            self.storage.remove(key);
        }
    }
}
