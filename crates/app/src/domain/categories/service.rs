//! Categories service.

use std::sync::Arc;

use kotsell::products::{Category, CategoryId, ProductId};
use rustc_hash::FxHashSet;

use super::{api::CategoriesApi, errors::CategoriesServiceError};

/// Category listing and product-category link management.
#[derive(Clone)]
pub struct CategoriesService {
    api: Arc<dyn CategoriesApi>,
}

impl std::fmt::Debug for CategoriesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoriesService").finish_non_exhaustive()
    }
}

impl CategoriesService {
    #[must_use]
    pub fn new(api: Arc<dyn CategoriesApi>) -> Self {
        Self { api }
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn list(&self) -> Result<Vec<Category>, CategoriesServiceError> {
        let records = self.api.fetch_all().await?;

        Ok(records
            .into_iter()
            .filter_map(super::records::CategoryRecord::into_category)
            .collect())
    }

    /// The categories a product is linked to.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend call fails.
    pub async fn categories_for(
        &self,
        product: ProductId,
    ) -> Result<Vec<Category>, CategoriesServiceError> {
        let links = self.api.fetch_links(product).await?;
        let linked: FxHashSet<CategoryId> = links
            .iter()
            .filter_map(super::records::CategoryLinkRecord::category_id)
            .collect();

        let categories = self.list().await?;

        Ok(categories
            .into_iter()
            .filter(|category| linked.contains(&category.id))
            .collect())
    }

    /// Resolves a category by (case-insensitive) name.
    ///
    /// # Errors
    ///
    /// Returns [`CategoriesServiceError::UnknownCategory`] when no category
    /// carries the name.
    pub async fn find_by_name(&self, name: &str) -> Result<Category, CategoriesServiceError> {
        self.list()
            .await?
            .into_iter()
            .find(|category| category.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CategoriesServiceError::UnknownCategory(name.to_owned()))
    }

    /// Replaces a product's links with the given categories.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend call fails; links already applied
    /// before the failure stay applied (the list is refetched on the next
    /// read anyway).
    pub async fn replace_links(
        &self,
        product: ProductId,
        categories: &[CategoryId],
    ) -> Result<(), CategoriesServiceError> {
        self.api.unlink_all(product).await?;

        for category in categories {
            self.api.link(product, *category).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::categories::api::MockCategoriesApi;

    use super::*;

    fn category_records() -> Vec<super::super::records::CategoryRecord> {
        serde_json::from_value(json!([
            { "categoryId": 1, "name": "Brakes" },
            { "categoryId": 2, "name": "Helmets" },
            { "categoryId": 3, "name": "Oils" },
        ]))
        .expect("records should decode")
    }

    #[tokio::test]
    async fn categories_for_joins_links_to_names() {
        let mut api = MockCategoriesApi::new();
        api.expect_fetch_links().returning(|_| {
            Ok(serde_json::from_value(json!([
                { "productId": 9, "categoryId": 1 },
                { "productId": 9, "categoryId": 3 },
            ]))
            .expect("links"))
        });
        api.expect_fetch_all().returning(|| Ok(category_records()));
        let service = CategoriesService::new(Arc::new(api));

        let categories = service
            .categories_for(ProductId::from_i64(9))
            .await
            .expect("categories");

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Brakes", "Oils"]);
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive() {
        let mut api = MockCategoriesApi::new();
        api.expect_fetch_all().returning(|| Ok(category_records()));
        let service = CategoriesService::new(Arc::new(api));

        let category = service.find_by_name("helmets").await.expect("category");

        assert_eq!(category.id, CategoryId::from_i64(2));
    }

    #[tokio::test]
    async fn find_by_unknown_name_errors() {
        let mut api = MockCategoriesApi::new();
        api.expect_fetch_all().returning(|| Ok(category_records()));
        let service = CategoriesService::new(Arc::new(api));

        let result = service.find_by_name("Tyres").await;

        assert!(
            matches!(result, Err(CategoriesServiceError::UnknownCategory(_))),
            "expected UnknownCategory, got {result:?}"
        );
    }

    #[tokio::test]
    async fn replace_links_unlinks_then_links_each() {
        let mut api = MockCategoriesApi::new();
        api.expect_unlink_all()
            .times(1)
            .withf(|product| *product == ProductId::from_i64(9))
            .returning(|_| Ok(()));
        api.expect_link().times(2).returning(|_, _| Ok(()));
        let service = CategoriesService::new(Arc::new(api));

        service
            .replace_links(
                ProductId::from_i64(9),
                &[CategoryId::from_i64(1), CategoryId::from_i64(3)],
            )
            .await
            .expect("replace should succeed");
    }
}
