//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use kotsell::products::{Product, ProductId};
use mockall::automock;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use tracing::debug;

use super::{
    api::ProductsApi,
    cache::ProductCache,
    errors::ProductsServiceError,
    models::{NewProduct, ProductUpdate},
    records::{ProductPayload, ProductRecord},
};

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The full catalog, served from cache while it is fresh as of `now`.
    async fn list(&self, now: Timestamp) -> Result<Vec<Product>, ProductsServiceError>;

    /// One product, always fetched fresh.
    async fn get(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a product; invalidates the cache.
    async fn create(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replaces a product's fields; invalidates the cache.
    async fn update(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product; invalidates the cache.
    async fn delete(&self, product: ProductId) -> Result<(), ProductsServiceError>;

    /// Drops the cache and refetches the catalog.
    async fn refresh(&self, now: Timestamp) -> Result<Vec<Product>, ProductsServiceError>;

    /// A random sample of the catalog for the home screen.
    async fn featured(
        &self,
        count: usize,
        now: Timestamp,
    ) -> Result<Vec<Product>, ProductsServiceError>;
}

/// [`ProductsService`] over the REST backend with the read-through,
/// write-invalidated product cache in front of the list call.
pub struct CachedProductsService {
    api: Arc<dyn ProductsApi>,
    cache: ProductCache,
    base_host: String,
}

impl std::fmt::Debug for CachedProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedProductsService").finish_non_exhaustive()
    }
}

impl CachedProductsService {
    #[must_use]
    pub fn new(api: Arc<dyn ProductsApi>, base_host: impl Into<String>, ttl: SignedDuration) -> Self {
        Self {
            api,
            cache: ProductCache::new(ttl),
            base_host: base_host.into(),
        }
    }

    fn transform(&self, record: ProductRecord) -> Option<Product> {
        record.into_product(&self.base_host)
    }

    async fn fetch_list(&self, now: Timestamp) -> Result<Vec<Product>, ProductsServiceError> {
        let records = self.api.fetch_all().await?;
        let products: Vec<Product> = records
            .into_iter()
            .filter_map(|record| self.transform(record))
            .collect();

        debug!(count = products.len(), "fetched fresh products");
        self.cache.put(products.clone(), now);

        Ok(products)
    }

    fn validate(name: &str, price: Decimal) -> Result<(), ProductsServiceError> {
        if name.trim().is_empty() {
            return Err(ProductsServiceError::MissingName);
        }

        if price < Decimal::ZERO {
            return Err(ProductsServiceError::InvalidPrice);
        }

        Ok(())
    }
}

#[async_trait]
impl ProductsService for CachedProductsService {
    async fn list(&self, now: Timestamp) -> Result<Vec<Product>, ProductsServiceError> {
        if let Some(products) = self.cache.get(now) {
            debug!("returning cached products");
            return Ok(products);
        }

        self.fetch_list(now).await
    }

    async fn get(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        match self.api.fetch_by_id(product).await {
            Ok(record) => self
                .transform(record)
                .ok_or(ProductsServiceError::NotFound),
            Err(error) if error.is_not_found() => Err(ProductsServiceError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    async fn create(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        Self::validate(&product.name, product.price)?;

        let payload = ProductPayload {
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
        };

        let record = self.api.create(&payload).await?;
        self.cache.invalidate();

        self.transform(record)
            .ok_or(ProductsServiceError::MalformedResponse)
    }

    async fn update(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        Self::validate(&update.name, update.price)?;

        let payload = ProductPayload {
            name: update.name,
            description: update.description,
            price: update.price,
            stock: update.stock,
        };

        let record = self.api.update(product, &payload).await?;
        self.cache.invalidate();

        self.transform(record)
            .ok_or(ProductsServiceError::MalformedResponse)
    }

    async fn delete(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        self.api.delete(product).await?;
        self.cache.invalidate();

        Ok(())
    }

    async fn refresh(&self, now: Timestamp) -> Result<Vec<Product>, ProductsServiceError> {
        self.cache.invalidate();
        self.fetch_list(now).await
    }

    async fn featured(
        &self,
        count: usize,
        now: Timestamp,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.list(now).await?;

        let sampled = products
            .choose_multiple(&mut rand::thread_rng(), count)
            .cloned()
            .collect();

        Ok(sampled)
    }
}
