//! Checkout flow.
//!
//! Drives one cart through `editing → submitting → confirmed`. Validation
//! failures bounce straight back to `editing` with no side effects; a
//! rejected order leaves the cart intact and records nothing, so a submit is
//! at-most-once per click with no automatic retry.

use std::sync::{Arc, Mutex, PoisonError};

use jiff::Timestamp;
use kotsell::{
    contact::ContactInfo,
    coupons::Coupon,
    orders::{OrderStatus, PaymentMethod, TransactionLog, build_transaction},
    pricing,
    receipt::Receipt,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    domain::{
        carts::store::CartStore,
        orders::{
            api::OrdersApi,
            records::{OrderItemPayload, OrderPayload},
        },
    },
    session::SessionStore,
};

use super::errors::CheckoutError;

/// Where the flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting contact and payment details.
    Editing,

    /// An order submission is in flight; the submit control is disabled.
    Submitting,

    /// The order was placed; the receipt is the only thing left to render.
    Confirmed,
}

/// A single checkout attempt over the current cart.
pub struct CheckoutFlow {
    orders: Arc<dyn OrdersApi>,
    carts: Arc<CartStore>,
    session: Arc<SessionStore>,
    transactions: Arc<Mutex<TransactionLog>>,
    shipping_fee: Decimal,
    contact: ContactInfo,
    payment_method: PaymentMethod,
    coupon: Option<Coupon>,
    state: CheckoutState,
    receipt: Option<Receipt>,
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state)
            .field("payment_method", &self.payment_method)
            .finish_non_exhaustive()
    }
}

impl CheckoutFlow {
    /// Starts a checkout in the editing state. Contact details default to
    /// the logged-in customer's saved profile when one is cached.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersApi>,
        carts: Arc<CartStore>,
        session: Arc<SessionStore>,
        transactions: Arc<Mutex<TransactionLog>>,
        shipping_fee: Decimal,
    ) -> Self {
        let contact = session
            .cached_customer()
            .map(|account| ContactInfo {
                first_name: account.first_name,
                last_name: account.last_name,
                house_street: account.street,
                barangay: account.barangay,
                city: account.city,
                postal_code: account.postal_code,
            })
            .unwrap_or_default();

        Self {
            orders,
            carts,
            session,
            transactions,
            shipping_fee,
            contact,
            payment_method: PaymentMethod::default(),
            coupon: None,
            state: CheckoutState::Editing,
            receipt: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The contact details as currently entered.
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Replaces the contact details.
    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.contact = contact;
    }

    /// Selects the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Applies a coupon. A code already spent this session is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CouponAlreadyUsed`] for a spent code.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> Result<(), CheckoutError> {
        let log = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if log.is_coupon_used(coupon.code()) {
            return Err(CheckoutError::CouponAlreadyUsed(coupon.code().to_owned()));
        }

        drop(log);
        self.coupon = Some(coupon);

        Ok(())
    }

    /// The discount currently applied.
    pub fn discount(&self) -> Decimal {
        self.coupon.as_ref().map_or(Decimal::ZERO, Coupon::amount)
    }

    /// Subtotal, discount, shipping and total for the current cart.
    pub fn totals(&self) -> (Decimal, Decimal, Decimal, Decimal) {
        let subtotal = self.carts.current().subtotal();
        let discount = self.discount();
        let total = pricing::order_total(subtotal, discount, self.shipping_fee);

        (subtotal, discount, self.shipping_fee, total)
    }

    /// The receipt, once the flow is confirmed.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Validates, posts the order, clears the cart and records the
    /// transaction.
    ///
    /// # Errors
    ///
    /// - Validation and coupon errors leave the flow editing with no side
    ///   effects and no network call.
    /// - [`CheckoutError::OrderRejected`]: the backend refused the order;
    ///   the flow returns to editing, the cart is untouched and nothing is
    ///   recorded.
    pub async fn submit(&mut self, now: Timestamp) -> Result<&Receipt, CheckoutError> {
        match self.state {
            CheckoutState::Editing => {}
            CheckoutState::Submitting => return Err(CheckoutError::AlreadyProcessing),
            CheckoutState::Confirmed => return Err(CheckoutError::AlreadyConfirmed),
        }

        let cart = self.carts.current();

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.contact.validate()?;

        self.state = CheckoutState::Submitting;

        let delivery_address = self.contact.delivery_address();
        let (_, discount, shipping_fee, total) = self.totals();

        let payload = OrderPayload {
            customers_id: self.session.customer_id().map(Into::into),
            items: cart.items().iter().map(OrderItemPayload::from).collect(),
            total,
            payment_method: self.payment_method,
            delivery_address: delivery_address.clone(),
            status: OrderStatus::Pending,
        };

        if let Err(error) = self.orders.create(&payload).await {
            self.state = CheckoutState::Editing;
            return Err(CheckoutError::OrderRejected(error));
        }

        self.carts.clear().await;

        let items = cart.into_items();
        let receipt = Receipt::new(items.clone(), discount, shipping_fee);

        let mut log = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let order_number = log.next_order_number();
        log.record(build_transaction(
            order_number,
            items,
            discount,
            shipping_fee,
            self.coupon.as_ref().map(|c| c.code().to_owned()),
            self.payment_method,
            delivery_address,
            now,
        ));
        drop(log);

        info!(order_number, %total, "order placed");

        self.receipt = Some(receipt);
        self.state = CheckoutState::Confirmed;

        // The receipt was just stored; this cannot miss.
        self.receipt
            .as_ref()
            .ok_or(CheckoutError::AlreadyConfirmed)
    }
}

#[cfg(test)]
mod tests {
    use kotsell::products::{Product, ProductId};
    use serde_json::json;
    use smallvec::SmallVec;

    use crate::{
        api::ApiError,
        domain::{
            carts::{api::MockCartsApi, backend::CartBackend},
            orders::api::MockOrdersApi,
            products::service::MockProductsService,
        },
        session::{MemoryStorage, SessionStore},
    };

    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::from_i64(id),
            name: format!("product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            stock: 10,
            categories: SmallVec::new(),
            images: Vec::new(),
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            first_name: "Juan".to_owned(),
            last_name: "Dela Cruz".to_owned(),
            house_street: "Blk 2 Lot 4".to_owned(),
            barangay: "Pulo".to_owned(),
            city: "Cabuyao".to_owned(),
            postal_code: "4025".to_owned(),
        }
    }

    struct Fixture {
        session: Arc<SessionStore>,
        carts: Arc<CartStore>,
        transactions: Arc<Mutex<TransactionLog>>,
    }

    fn fixture() -> Fixture {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        let carts = Arc::new(CartStore::new(
            Arc::clone(&session),
            Arc::new(MockCartsApi::new()),
            Arc::new(MockProductsService::new()),
            CartBackend::Local,
        ));

        Fixture {
            session,
            carts,
            transactions: Arc::new(Mutex::new(TransactionLog::new())),
        }
    }

    fn flow_with(fixture: &Fixture, orders: MockOrdersApi) -> CheckoutFlow {
        CheckoutFlow::new(
            Arc::new(orders),
            Arc::clone(&fixture.carts),
            Arc::clone(&fixture.session),
            Arc::clone(&fixture.transactions),
            Decimal::from(50),
        )
    }

    fn order_created() -> Result<crate::domain::orders::records::OrderRecord, ApiError> {
        Ok(serde_json::from_value(json!({ "orderId": 1, "total": 350 })).expect("record"))
    }

    #[tokio::test]
    async fn empty_first_name_stays_editing_and_never_posts() {
        let fixture = fixture();
        fixture
            .carts
            .add(&product(1, 150), 1)
            .await
            .expect("add");

        let mut orders = MockOrdersApi::new();
        orders.expect_create().never();
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(ContactInfo {
            first_name: String::new(),
            ..contact()
        });

        let result = flow.submit(Timestamp::UNIX_EPOCH).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Contact(
                    kotsell::contact::ContactError::MissingFirstName
                ))
            ),
            "expected MissingFirstName, got {result:?}"
        );
        assert_eq!(*flow.state(), CheckoutState::Editing);
        assert_eq!(fixture.carts.current().len(), 1);
    }

    #[tokio::test]
    async fn empty_cart_cannot_be_submitted() {
        let fixture = fixture();
        let mut orders = MockOrdersApi::new();
        orders.expect_create().never();
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());

        let result = flow.submit(Timestamp::UNIX_EPOCH).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn guest_checkout_posts_order_clears_cart_and_records() {
        let fixture = fixture();
        fixture.carts.add(&product(1, 150), 1).await.expect("add A");
        fixture.carts.add(&product(2, 75), 2).await.expect("add B");

        let mut orders = MockOrdersApi::new();
        orders
            .expect_create()
            .times(1)
            .withf(|payload| {
                payload.customers_id.is_none()
                    && payload.items.len() == 2
                    && payload.total == Decimal::from(350)
                    && payload.delivery_address == "Blk 2 Lot 4, Pulo, Cabuyao, 4025"
            })
            .returning(|_| order_created());
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());

        let receipt = flow
            .submit(Timestamp::UNIX_EPOCH)
            .await
            .expect("submit should succeed")
            .clone();

        assert_eq!(receipt.items().len(), 2);
        assert_eq!(receipt.total(), Decimal::from(350));
        assert_eq!(*flow.state(), CheckoutState::Confirmed);
        assert!(fixture.carts.current().is_empty());

        let log = fixture.transactions.lock().expect("log");
        assert_eq!(log.history().len(), 1);
        let tx = log.history().first().expect("transaction");
        assert_eq!(tx.order_number, 1);
        assert_eq!(tx.total, Decimal::from(350));
        assert_eq!(tx.payment_method, PaymentMethod::Cod);
    }

    #[tokio::test]
    async fn rejected_order_keeps_cart_and_records_nothing() {
        let fixture = fixture();
        fixture.carts.add(&product(1, 150), 1).await.expect("add");

        let mut orders = MockOrdersApi::new();
        orders.expect_create().times(1).returning(|_| {
            Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })
        });
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());

        let result = flow.submit(Timestamp::UNIX_EPOCH).await;

        assert!(
            matches!(result, Err(CheckoutError::OrderRejected(_))),
            "expected OrderRejected, got {result:?}"
        );
        assert_eq!(*flow.state(), CheckoutState::Editing);
        assert_eq!(fixture.carts.current().len(), 1);
        assert!(
            fixture
                .transactions
                .lock()
                .expect("log")
                .history()
                .is_empty(),
            "no transaction should be recorded"
        );
    }

    #[tokio::test]
    async fn confirmed_flow_rejects_a_second_submit() {
        let fixture = fixture();
        fixture.carts.add(&product(1, 150), 1).await.expect("add");

        let mut orders = MockOrdersApi::new();
        orders.expect_create().times(1).returning(|_| order_created());
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());

        flow.submit(Timestamp::UNIX_EPOCH).await.expect("submit");
        let result = flow.submit(Timestamp::UNIX_EPOCH).await;

        assert!(
            matches!(result, Err(CheckoutError::AlreadyConfirmed)),
            "expected AlreadyConfirmed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn coupon_discount_is_subtracted_before_flooring() {
        let fixture = fixture();
        fixture.carts.add(&product(1, 100), 2).await.expect("add");

        let mut orders = MockOrdersApi::new();
        orders
            .expect_create()
            .withf(|payload| payload.total == Decimal::from(220))
            .returning(|_| order_created());
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());
        flow.apply_coupon(Coupon::new("WELCOME30", Decimal::from(30)).expect("coupon"))
            .expect("apply");

        let receipt = flow
            .submit(Timestamp::UNIX_EPOCH)
            .await
            .expect("submit")
            .clone();

        assert_eq!(receipt.discount(), Decimal::from(30));
        assert_eq!(receipt.total(), Decimal::from(220));
    }

    #[tokio::test]
    async fn spent_coupon_cannot_be_applied_again() {
        let fixture = fixture();
        fixture.carts.add(&product(1, 100), 1).await.expect("add");

        let mut orders = MockOrdersApi::new();
        orders.expect_create().returning(|_| order_created());
        let mut flow = flow_with(&fixture, orders);
        flow.set_contact(contact());
        flow.apply_coupon(Coupon::new("ONCE", Decimal::from(10)).expect("coupon"))
            .expect("apply");
        flow.submit(Timestamp::UNIX_EPOCH).await.expect("submit");

        let mut second = flow_with(&fixture, MockOrdersApi::new());
        let result =
            second.apply_coupon(Coupon::new("ONCE", Decimal::from(10)).expect("coupon"));

        assert!(
            matches!(result, Err(CheckoutError::CouponAlreadyUsed(_))),
            "expected CouponAlreadyUsed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn contact_defaults_come_from_the_cached_profile() {
        let fixture = fixture();
        fixture
            .session
            .start_customer_session(&crate::domain::accounts::models::CustomerAccount {
                id: crate::domain::accounts::models::CustomerId::from_i64(5),
                username: "juandc".to_owned(),
                email: "juan@example.com".to_owned(),
                first_name: "Juan".to_owned(),
                last_name: "Dela Cruz".to_owned(),
                street: "Blk 2 Lot 4".to_owned(),
                barangay: "Pulo".to_owned(),
                city: "Cabuyao".to_owned(),
                postal_code: "4025".to_owned(),
            });

        let flow = flow_with(&fixture, MockOrdersApi::new());

        assert_eq!(flow.contact().first_name, "Juan");
        assert_eq!(flow.contact().house_street, "Blk 2 Lot 4");
    }
}
