//! App context.
//!
//! One place that wires the API client, the session store and every domain
//! service together. Nothing reaches for ambient globals; whatever a screen
//! or command needs, it takes from here.

use std::sync::{Arc, Mutex};

use kotsell::orders::TransactionLog;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError},
    config::AppConfig,
    domain::{
        accounts::{
            api::HttpAccountsApi,
            service::{AccountsService, HttpAccountsService},
        },
        auth::service::{AuthService, ClientAuthService},
        carts::{api::HttpCartsApi, backend::CartBackend, store::CartStore},
        categories::{api::HttpCategoriesApi, service::CategoriesService},
        checkout::flow::CheckoutFlow,
        dashboard::service::DashboardService,
        images::{api::HttpImagesApi, service::ImagesService},
        orders::api::{HttpOrdersApi, OrdersApi},
        products::{
            api::HttpProductsApi,
            service::{CachedProductsService, ProductsService},
        },
    },
    session::{JsonFileStorage, SessionStore, Storage},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialise HTTP client")]
    Http(#[source] ApiError),
}

/// The wired application services.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub products: Arc<dyn ProductsService>,
    pub categories: CategoriesService,
    pub images: ImagesService,
    pub carts: Arc<CartStore>,
    pub orders: Arc<dyn OrdersApi>,
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub transactions: Arc<Mutex<TransactionLog>>,
    carts_api: Arc<dyn crate::domain::carts::api::CartsApi>,
    shipping_fee: Decimal,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds the context from configuration, with the session persisted to
    /// the configured file.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let storage = JsonFileStorage::new(config.session_file.clone());

        Self::with_storage(config, Box::new(storage))
    }

    /// Builds the context over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn with_storage(
        config: &AppConfig,
        storage: Box<dyn Storage>,
    ) -> Result<Self, AppInitError> {
        let client = ApiClient::new(&config.api_url, config.request_timeout())
            .map_err(AppInitError::Http)?;
        let session = Arc::new(SessionStore::new(storage));

        let products: Arc<dyn ProductsService> = Arc::new(CachedProductsService::new(
            Arc::new(HttpProductsApi::new(client.clone())),
            client.base_host(),
            config.cache_ttl(),
        ));

        let accounts_api: Arc<dyn crate::domain::accounts::api::AccountsApi> =
            Arc::new(HttpAccountsApi::new(client.clone()));
        let carts_api: Arc<dyn crate::domain::carts::api::CartsApi> =
            Arc::new(HttpCartsApi::new(client.clone()));

        let carts = Arc::new(CartStore::new(
            Arc::clone(&session),
            Arc::clone(&carts_api),
            Arc::clone(&products),
            CartBackend::resolve(&session),
        ));

        Ok(Self {
            products,
            categories: CategoriesService::new(Arc::new(HttpCategoriesApi::new(client.clone()))),
            images: ImagesService::new(Arc::new(HttpImagesApi::new(client.clone()))),
            carts,
            orders: Arc::new(HttpOrdersApi::new(client.clone())),
            accounts: Arc::new(HttpAccountsService::new(
                Arc::clone(&accounts_api),
                Arc::clone(&session),
            )),
            auth: Arc::new(ClientAuthService::new(accounts_api, Arc::clone(&session))),
            transactions: Arc::new(Mutex::new(TransactionLog::new())),
            carts_api,
            shipping_fee: config.shipping_fee,
            session,
        })
    }

    /// A cart store over the backing the session resolves to right now.
    /// Used after a login changes which store is authoritative.
    pub fn resolve_cart_store(&self) -> CartStore {
        CartStore::new(
            Arc::clone(&self.session),
            Arc::clone(&self.carts_api),
            Arc::clone(&self.products),
            CartBackend::resolve(&self.session),
        )
    }

    /// Starts a checkout over the current cart.
    pub fn begin_checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.carts),
            Arc::clone(&self.session),
            Arc::clone(&self.transactions),
            self.shipping_fee,
        )
    }

    /// The admin dashboard aggregator.
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(Arc::clone(&self.products), Arc::clone(&self.transactions))
    }
}
