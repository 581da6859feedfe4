//! Dashboard service.

use std::sync::{Arc, Mutex, PoisonError};

use jiff::Timestamp;
use kotsell::orders::TransactionLog;
use rust_decimal::Decimal;

use crate::domain::products::{errors::ProductsServiceError, service::ProductsService};

/// The three dashboard tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_orders: usize,
    pub revenue: Decimal,
}

/// Computes the dashboard tiles from the catalog and this session's
/// transaction history.
pub struct DashboardService {
    products: Arc<dyn ProductsService>,
    transactions: Arc<Mutex<TransactionLog>>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        transactions: Arc<Mutex<TransactionLog>>,
    ) -> Self {
        Self {
            products,
            transactions,
        }
    }

    /// The current counts and revenue.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be fetched.
    pub async fn overview(&self, now: Timestamp) -> Result<DashboardSummary, ProductsServiceError> {
        let total_products = self.products.list(now).await?.len();

        let log = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(DashboardSummary {
            total_products,
            total_orders: log.history().len(),
            revenue: log.revenue(),
        })
    }
}
