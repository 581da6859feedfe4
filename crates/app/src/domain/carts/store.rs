//! Cart store.
//!
//! One interface over both cart backings. The local snapshot in the session
//! store is always maintained (it is what the screens render), and in
//! remote mode every mutation is attempted against the cart API first. A
//! failed remote mutation falls back to the local-only change and logs the
//! divergence: the cart then disagrees with the server until the next
//! successful sync, which is the accepted trade-off rather than losing the
//! shopper's action.

use std::sync::Arc;

use kotsell::{
    cart::{Cart, LineItem},
    products::{Product, ProductId},
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    domain::{accounts::models::CustomerId, products::service::ProductsService},
    session::SessionStore,
};

use super::{api::CartsApi, backend::CartBackend, errors::CartStoreError, models::CartEntry};

/// The authoritative list of items the shopper intends to purchase.
pub struct CartStore {
    session: Arc<SessionStore>,
    api: Arc<dyn CartsApi>,
    products: Arc<dyn ProductsService>,
    backend: CartBackend,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates a store over the given backing.
    #[must_use]
    pub fn new(
        session: Arc<SessionStore>,
        api: Arc<dyn CartsApi>,
        products: Arc<dyn ProductsService>,
        backend: CartBackend,
    ) -> Self {
        Self {
            session,
            api,
            products,
            backend,
        }
    }

    /// The backing resolved for this session.
    pub fn backend(&self) -> CartBackend {
        self.backend
    }

    /// The current cart as the screens should render it: the local snapshot.
    pub fn current(&self) -> Cart {
        self.session.cart()
    }

    /// Loads the cart from the authoritative store. In remote mode the
    /// server rows are fetched and enriched with product details; if that
    /// fails, the local snapshot is served instead and the divergence is
    /// logged.
    pub async fn load(&self) -> Cart {
        let CartBackend::Remote(customer) = self.backend else {
            return self.current();
        };

        match self.api.fetch_for_customer(customer).await {
            Ok(entries) => {
                let cart = self.enrich(entries).await;
                self.session.set_cart(&cart);
                cart
            }
            Err(error) => {
                warn!(%error, "failed to load remote cart, serving local snapshot");
                self.current()
            }
        }
    }

    /// Adds a product to the cart, merging by product id. The requested
    /// quantity is clamped to the product's stock.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError::Cart`] when the mutation is rejected
    /// outright (zero quantity, stock exhausted). A remote sync failure is
    /// not an error: the local change stands and the divergence is logged.
    pub async fn add(&self, product: &Product, quantity: u32) -> Result<Cart, CartStoreError> {
        let mut cart = self.current();
        let before = cart.get(product.id).map_or(0, |item| item.quantity);
        let merged = cart.add(LineItem::from_product(product, quantity))?;

        if let CartBackend::Remote(customer) = self.backend {
            self.sync_increment(customer, product.id, merged - before, product.price)
                .await;
        }

        self.session.set_cart(&cart);
        debug!(product = %product.id, quantity = merged, "cart updated");

        Ok(cart)
    }

    /// Sets the quantity for a product already in the cart. Quantities below
    /// 1 are rejected without side effects; use [`CartStore::remove`] to
    /// drop an item.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError::Cart`] when the cart rejects the change.
    pub async fn update_quantity(
        &self,
        product: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self.current();
        let applied = cart.update_quantity(product, quantity)?;
        let price = cart.get(product).map(|item| item.price);

        if let CartBackend::Remote(customer) = self.backend {
            self.sync_quantity(customer, product, applied, price.unwrap_or(Decimal::ZERO))
                .await;
        }

        self.session.set_cart(&cart);

        Ok(cart)
    }

    /// Removes a product from the cart and its backing store. Removing an
    /// absent product is a no-op.
    pub async fn remove(&self, product: ProductId) -> Cart {
        let mut cart = self.current();
        let removed = cart.remove(product);

        if removed {
            if let CartBackend::Remote(customer) = self.backend {
                match self.api.find_entry(customer, product).await {
                    Ok(Some(entry)) => {
                        if let Err(error) = self.api.delete_item(entry.id).await {
                            warn!(%error, %product, "failed to remove remote cart row");
                        }
                    }
                    Ok(None) => {}
                    Err(error) => {
                        warn!(%error, %product, "failed to look up remote cart row");
                    }
                }
            }
        }

        self.session.set_cart(&cart);

        cart
    }

    /// Empties the cart in both backings. Invoked once at successful
    /// checkout completion. Remote rows that cannot be deleted are logged
    /// and left behind.
    pub async fn clear(&self) {
        if let CartBackend::Remote(customer) = self.backend {
            match self.api.fetch_for_customer(customer).await {
                Ok(entries) => {
                    for entry in entries {
                        if let Err(error) = self.api.delete_item(entry.id).await {
                            warn!(%error, entry = %entry.id, "failed to clear remote cart row");
                        }
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to list remote cart for clearing");
                }
            }
        }

        self.session.clear_cart();
    }

    /// Pushes the guest cart accumulated before login into the remote cart,
    /// summing quantities by product id, then reloads from the server. Rows
    /// that fail to push are logged and dropped when the server state is
    /// adopted.
    pub async fn adopt_guest_cart(&self) -> Cart {
        let CartBackend::Remote(customer) = self.backend else {
            return self.current();
        };

        for item in self.current().items() {
            self.sync_increment(customer, item.product_id, item.quantity, item.price)
                .await;
        }

        self.load().await
    }

    /// Reflects a local target quantity onto the remote cart: updates the
    /// row when one exists, creates it otherwise. Failures are logged, never
    /// surfaced.
    async fn sync_quantity(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u32,
        price: Decimal,
    ) {
        let result = match self.api.find_entry(customer, product).await {
            Ok(Some(entry)) => self.api.update_item(entry.id, quantity).await,
            Ok(None) => self.api.add_item(customer, product, quantity, price).await,
            Err(error) => Err(error),
        };

        if let Err(error) = result {
            warn!(%error, %product, "cart diverged from server, keeping local change");
        }
    }

    /// Adds a quantity on top of whatever the server already holds for the
    /// product. Failures are logged, never surfaced.
    async fn sync_increment(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u32,
        price: Decimal,
    ) {
        if quantity == 0 {
            return;
        }

        let result = match self.api.find_entry(customer, product).await {
            Ok(Some(entry)) => {
                self.api
                    .update_item(entry.id, entry.quantity.saturating_add(quantity))
                    .await
            }
            Ok(None) => self.api.add_item(customer, product, quantity, price).await,
            Err(error) => Err(error),
        };

        if let Err(error) = result {
            warn!(%error, %product, "cart diverged from server, keeping local change");
        }
    }

    /// Turns remote rows into render-ready line items by pulling product
    /// details; a product that cannot be fetched leaves a bare row. Rows
    /// with a zero quantity are dropped.
    async fn enrich(&self, entries: Vec<CartEntry>) -> Cart {
        let mut items = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.quantity == 0 {
                continue;
            }

            let item = match self.products.get(entry.product_id).await {
                Ok(product) => LineItem {
                    product_id: entry.product_id,
                    name: product.name,
                    price: entry.price.unwrap_or(product.price),
                    images: product.images,
                    quantity: entry.quantity,
                    stock: Some(product.stock),
                },
                Err(error) => {
                    debug!(%error, product = %entry.product_id, "cart row without product details");
                    LineItem {
                        product_id: entry.product_id,
                        name: String::new(),
                        price: entry.price.unwrap_or(Decimal::ZERO),
                        images: Vec::new(),
                        quantity: entry.quantity,
                        stock: None,
                    }
                }
            };

            items.push(item);
        }

        Cart::from(items)
    }
}

#[cfg(test)]
mod tests {
    use kotsell::cart::CartError;
    use smallvec::SmallVec;

    use crate::{
        api::ApiError,
        domain::{
            carts::{api::MockCartsApi, models::CartEntryId},
            products::service::MockProductsService,
        },
        session::MemoryStorage,
    };

    use super::*;

    fn product(id: i64, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::from_i64(id),
            name: format!("product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            stock,
            categories: SmallVec::new(),
            images: Vec::new(),
        }
    }

    fn transport_error() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }
    }

    fn local_store() -> (CartStore, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        let store = CartStore::new(
            Arc::clone(&session),
            Arc::new(MockCartsApi::new()),
            Arc::new(MockProductsService::new()),
            CartBackend::Local,
        );

        (store, session)
    }

    fn remote_store(api: MockCartsApi, products: MockProductsService) -> CartStore {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        CartStore::new(
            session,
            Arc::new(api),
            Arc::new(products),
            CartBackend::Remote(CustomerId::from_i64(5)),
        )
    }

    #[tokio::test]
    async fn local_add_merges_and_persists() {
        let (store, session) = local_store();

        store.add(&product(1, 150, 10), 1).await.expect("first add");
        let cart = store.add(&product(1, 150, 10), 2).await.expect("second add");

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.get(ProductId::from_i64(1)).map(|i| i.quantity),
            Some(3)
        );
        // The snapshot survives a fresh store over the same session.
        assert_eq!(session.cart(), cart);
    }

    #[tokio::test]
    async fn local_add_clamps_to_stock() {
        let (store, _) = local_store();

        let cart = store.add(&product(1, 150, 2), 5).await.expect("add");

        assert_eq!(
            cart.get(ProductId::from_i64(1)).map(|i| i.quantity),
            Some(2)
        );
    }

    #[tokio::test]
    async fn out_of_stock_add_is_rejected() {
        let (store, session) = local_store();

        let result = store.add(&product(1, 150, 0), 1).await;

        assert!(
            matches!(result, Err(CartStoreError::Cart(CartError::OutOfStock(_)))),
            "expected OutOfStock, got {result:?}"
        );
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn remote_add_updates_existing_row_to_merged_quantity() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry().times(1).returning(|_, _| {
            Ok(Some(CartEntry {
                id: CartEntryId::from_i64(11),
                product_id: ProductId::from_i64(1),
                quantity: 2,
                price: Some(Decimal::from(150)),
            }))
        });
        api.expect_update_item()
            .times(1)
            .withf(|entry, quantity| *entry == CartEntryId::from_i64(11) && *quantity == 3)
            .returning(|_, _| Ok(()));
        let store = remote_store(api, MockProductsService::new());

        store.add(&product(1, 150, 10), 1).await.expect("add");
    }

    #[tokio::test]
    async fn remote_add_creates_row_when_absent() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry().returning(|_, _| Ok(None));
        api.expect_add_item()
            .times(1)
            .withf(|customer, product, quantity, price| {
                *customer == CustomerId::from_i64(5)
                    && *product == ProductId::from_i64(1)
                    && *quantity == 2
                    && *price == Decimal::from(150)
            })
            .returning(|_, _, _, _| Ok(()));
        let store = remote_store(api, MockProductsService::new());

        store.add(&product(1, 150, 10), 2).await.expect("add");
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local_change() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry()
            .returning(|_, _| Err(transport_error()));
        let store = remote_store(api, MockProductsService::new());

        let cart = store.add(&product(1, 150, 10), 2).await.expect("add");

        assert_eq!(
            cart.get(ProductId::from_i64(1)).map(|i| i.quantity),
            Some(2)
        );
        assert_eq!(store.current(), cart);
    }

    #[tokio::test]
    async fn update_below_one_is_rejected_without_any_call() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry().never();
        api.expect_update_item().never();
        let store = remote_store(api, MockProductsService::new());

        let result = store.update_quantity(ProductId::from_i64(1), 0).await;

        assert!(
            matches!(result, Err(CartStoreError::Cart(CartError::ZeroQuantity))),
            "expected ZeroQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_is_idempotent_and_quiet_for_absent_products() {
        let (store, _) = local_store();

        let cart = store.remove(ProductId::from_i64(42)).await;

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn remove_deletes_the_remote_row() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry().times(2).returning(|_, product| {
            Ok(Some(CartEntry {
                id: CartEntryId::from_i64(11),
                product_id: product,
                quantity: 1,
                price: None,
            }))
        });
        api.expect_add_item().returning(|_, _, _, _| Ok(()));
        api.expect_update_item().returning(|_, _| Ok(()));
        api.expect_delete_item()
            .times(1)
            .withf(|entry| *entry == CartEntryId::from_i64(11))
            .returning(|_| Ok(()));
        let store = remote_store(api, MockProductsService::new());

        store.add(&product(1, 150, 10), 1).await.expect("add");
        let cart = store.remove(ProductId::from_i64(1)).await;

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn clear_empties_local_and_remote() {
        let mut api = MockCartsApi::new();
        api.expect_fetch_for_customer().times(1).returning(|_| {
            Ok(vec![
                CartEntry {
                    id: CartEntryId::from_i64(11),
                    product_id: ProductId::from_i64(1),
                    quantity: 1,
                    price: None,
                },
                CartEntry {
                    id: CartEntryId::from_i64(12),
                    product_id: ProductId::from_i64(2),
                    quantity: 2,
                    price: None,
                },
            ])
        });
        api.expect_delete_item().times(2).returning(|_| Ok(()));
        let store = remote_store(api, MockProductsService::new());

        store.clear().await;

        assert!(store.current().is_empty());
    }

    #[tokio::test]
    async fn load_enriches_remote_rows_with_product_details() {
        let mut api = MockCartsApi::new();
        api.expect_fetch_for_customer().returning(|_| {
            Ok(vec![CartEntry {
                id: CartEntryId::from_i64(11),
                product_id: ProductId::from_i64(1),
                quantity: 2,
                price: None,
            }])
        });
        let mut products = MockProductsService::new();
        products
            .expect_get()
            .returning(|_| Ok(product(1, 150, 10)));
        let store = remote_store(api, products);

        let cart = store.load().await;

        let item = cart.get(ProductId::from_i64(1)).expect("item");
        assert_eq!(item.name, "product 1");
        assert_eq!(item.price, Decimal::from(150));
        assert_eq!(item.stock, Some(10));
    }

    #[tokio::test]
    async fn load_failure_serves_the_local_snapshot() {
        let mut api = MockCartsApi::new();
        api.expect_find_entry().returning(|_, _| Ok(None));
        api.expect_add_item().returning(|_, _, _, _| Ok(()));
        api.expect_fetch_for_customer()
            .returning(|_| Err(transport_error()));
        let mut products = MockProductsService::new();
        products.expect_get().never();
        let store = remote_store(api, products);

        store.add(&product(1, 150, 10), 1).await.expect("add");
        let cart = store.load().await;

        assert_eq!(cart.len(), 1);
    }

    #[tokio::test]
    async fn adopting_a_guest_cart_sums_onto_remote_rows() {
        let mut api = MockCartsApi::new();
        // Server already holds quantity 2 for product 1.
        api.expect_find_entry().returning(|_, product| {
            if product == ProductId::from_i64(1) {
                Ok(Some(CartEntry {
                    id: CartEntryId::from_i64(11),
                    product_id: product,
                    quantity: 2,
                    price: Some(Decimal::from(150)),
                }))
            } else {
                Ok(None)
            }
        });
        api.expect_update_item()
            .times(1)
            .withf(|entry, quantity| *entry == CartEntryId::from_i64(11) && *quantity == 5)
            .returning(|_, _| Ok(()));
        api.expect_fetch_for_customer().returning(|_| {
            Ok(vec![CartEntry {
                id: CartEntryId::from_i64(11),
                product_id: ProductId::from_i64(1),
                quantity: 5,
                price: Some(Decimal::from(150)),
            }])
        });
        let mut products = MockProductsService::new();
        products
            .expect_get()
            .returning(|_| Ok(product(1, 150, 10)));

        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        let mut guest_cart = Cart::new();
        guest_cart
            .add(LineItem::from_product(&product(1, 150, 10), 3))
            .expect("guest add");
        session.set_cart(&guest_cart);

        let store = CartStore::new(
            session,
            Arc::new(api),
            Arc::new(products),
            CartBackend::Remote(CustomerId::from_i64(5)),
        );

        let cart = store.adopt_guest_cart().await;

        assert_eq!(
            cart.get(ProductId::from_i64(1)).map(|i| i.quantity),
            Some(5)
        );
    }
}
