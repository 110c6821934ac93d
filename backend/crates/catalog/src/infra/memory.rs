//! In-Memory Repository Implementation
//!
//! Backs tests and database-less local runs. Every write takes the single
//! write lock, so SKU checks and stock checks are atomic with the write.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use kernel::pagination::PageRequest;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::entity::product::{Product, ProductPatch};
use crate::domain::entity::summary::InventorySummary;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{SearchQuery, Sku, StockChangeError};
use crate::error::{CatalogError, CatalogResult};

/// In-memory product repository
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn sku_taken(products: &HashMap<ProductId, Product>, sku: &Sku, except: Option<&ProductId>) -> bool {
    products
        .values()
        .any(|p| p.sku.as_ref() == Some(sku) && Some(&p.id) != except)
}

impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.write().await;
        if let Some(sku) = &product.sku {
            if sku_taken(&products, sku, None) {
                return Err(CatalogError::DuplicateSku);
            }
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().await;
        if !products.contains_key(id) {
            return Ok(None);
        }
        if let Some(Some(sku)) = &patch.sku {
            if sku_taken(&products, sku, Some(id)) {
                return Err(CatalogError::DuplicateSku);
            }
        }

        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };
        product.apply(patch, updated_at);
        Ok(Some(product.clone()))
    }

    async fn adjust_quantity(
        &self,
        id: &ProductId,
        delta: i64,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(id).ok_or(CatalogError::NotFound)?;

        product.quantity = product.quantity.adjusted(delta).map_err(|e| match e {
            StockChangeError::Insufficient => CatalogError::InsufficientStock,
            StockChangeError::Overflow => {
                CatalogError::Validation("Stock would exceed the maximum quantity".to_string())
            }
        })?;
        product.updated_at = updated_at;
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        Ok(self.products.write().await.remove(id).is_some())
    }

    async fn list(
        &self,
        request: PageRequest,
        search: Option<&SearchQuery>,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;

        let mut matches: Vec<(u32, &Product)> = match search {
            None => products.values().map(|p| (0, p)).collect(),
            Some(query) => products
                .values()
                .map(|p| (query.score(p.name.as_str(), p.description.as_deref()), p))
                .filter(|(score, _)| *score > 0)
                .collect(),
        };

        matches.sort_by_key(|(score, p)| (Reverse(*score), Reverse(p.created_at), Reverse(p.id)));

        let total = matches.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size()).unwrap_or(usize::MAX);

        let items = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, p)| p.clone())
            .collect();

        Ok((items, total))
    }

    async fn summary(&self, low_stock_threshold: i32) -> CatalogResult<InventorySummary> {
        let products = self.products.read().await;

        Ok(products.values().fold(InventorySummary::empty(), |mut acc, p| {
            acc.products += 1;
            acc.total_inventory_value += p.price.amount() * Decimal::from(p.quantity.value());
            if p.quantity.value() <= low_stock_threshold {
                acc.low_stock += 1;
            }
            acc
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::product::NewProduct;
    use crate::domain::value_object::{Price, ProductName, Quantity};
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn product(name: &str, sku: Option<&str>, minutes_ago: i64) -> Product {
        Product::create(
            NewProduct {
                name: ProductName::new(name).unwrap(),
                sku: sku.and_then(|s| Sku::parse(s).unwrap()),
                description: None,
                price: Price::new(Decimal::ONE).unwrap(),
                quantity: Quantity::new(10).unwrap(),
                image_url: None,
                product_type: None,
            },
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let repo = InMemoryProductRepository::new();
        repo.insert(&product("A", Some("SKU-1"), 0)).await.unwrap();

        let err = repo.insert(&product("B", Some("SKU-1"), 0)).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku));

        // Products without SKU never collide
        repo.insert(&product("C", None, 0)).await.unwrap();
        repo.insert(&product("D", None, 0)).await.unwrap();
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_update_to_taken_sku_rejected() {
        let repo = InMemoryProductRepository::new();
        let a = product("A", Some("SKU-1"), 0);
        let b = product("B", Some("SKU-2"), 0);
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let patch = ProductPatch {
            sku: Some(Sku::parse("SKU-1").unwrap()),
            ..Default::default()
        };
        let err = repo.update(&b.id, &patch, Utc::now()).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku));

        // Re-setting its own SKU is fine
        let patch = ProductPatch {
            sku: Some(Sku::parse("SKU-2").unwrap()),
            ..Default::default()
        };
        assert!(repo.update(&b.id, &patch, Utc::now()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_adjust_quantity() {
        let repo = InMemoryProductRepository::new();
        let p = product("A", None, 0);
        repo.insert(&p).await.unwrap();

        let updated = repo.adjust_quantity(&p.id, -4, Utc::now()).await.unwrap();
        assert_eq!(updated.quantity.value(), 6);

        let err = repo.adjust_quantity(&p.id, -7, Utc::now()).await.unwrap_err();
        assert!(matches!(err, CatalogError::InsufficientStock));

        let err = repo
            .adjust_quantity(&ProductId::new(), 1, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_concurrent_withdrawals_never_go_negative() {
        let repo = InMemoryProductRepository::new();
        let p = product("A", None, 0);
        repo.insert(&p).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let repo = repo.clone();
            let id = p.id;
            handles.push(tokio::spawn(async move {
                repo.adjust_quantity(&id, -1, Utc::now()).await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 10);
        let stored = repo.find_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity.value(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_paged() {
        let repo = InMemoryProductRepository::new();
        for i in 0..25 {
            repo.insert(&product(&format!("P{i}"), None, i)).await.unwrap();
        }

        let (items, total) = repo.list(PageRequest::clamped(1, 10, 100), None).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].name.as_str(), "P0");
        assert_eq!(items[9].name.as_str(), "P9");

        let (items, _) = repo.list(PageRequest::clamped(3, 10, 100), None).await.unwrap();
        assert_eq!(items.len(), 5);

        let (items, total) = repo.list(PageRequest::clamped(4, 10, 100), None).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn test_pages_stable_when_created_at_ties() {
        let repo = InMemoryProductRepository::new();
        let now = Utc::now();
        for i in 0..25 {
            let mut p = product(&format!("P{i}"), None, 0);
            p.created_at = now;
            p.updated_at = now;
            repo.insert(&p).await.unwrap();
        }

        let mut seen = std::collections::HashSet::new();
        for page in 1..=3 {
            let (items, total) = repo
                .list(PageRequest::clamped(page, 10, 100), None)
                .await
                .unwrap();
            assert_eq!(total, 25);
            for item in items {
                assert!(seen.insert(item.id), "product repeated across pages");
            }
        }
        assert_eq!(seen.len(), 25);

        // Same request twice gives the same order
        let first = repo.list(PageRequest::clamped(2, 10, 100), None).await.unwrap().0;
        let second = repo.list(PageRequest::clamped(2, 10, 100), None).await.unwrap().0;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_sku_inserts_once() {
        let repo = InMemoryProductRepository::new();

        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(&product(&format!("P{i}"), Some("SKU-RACE"), 0)).await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => ok += 1,
                Err(err) => assert!(matches!(err, CatalogError::DuplicateSku)),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_summary_under_one_read() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.summary(10).await.unwrap(), InventorySummary::empty());

        let mut low = product("Low", None, 0);
        low.quantity = Quantity::new(3).unwrap();
        low.price = Price::new(Decimal::new(250, 2)).unwrap();
        let mut edge = product("Edge", None, 0);
        edge.quantity = Quantity::new(10).unwrap();
        let mut plenty = product("Plenty", None, 0);
        plenty.quantity = Quantity::new(11).unwrap();
        for p in [&low, &edge, &plenty] {
            repo.insert(p).await.unwrap();
        }

        let summary = repo.summary(10).await.unwrap();
        assert_eq!(summary.products, 3);
        // 3 * 2.50 + 10 * 1 + 11 * 1
        assert_eq!(summary.total_inventory_value, Decimal::new(2850, 2));
        assert_eq!(summary.low_stock, 2);
    }

    #[tokio::test]
    async fn test_list_search_ranks_by_relevance() {
        let repo = InMemoryProductRepository::new();
        let mut described = product("Fastener kit", None, 0);
        described.description = Some("Includes one bolt".to_string());
        let named = product("Hex bolt", None, 10);
        let unrelated = product("Washer", None, 0);
        repo.insert(&described).await.unwrap();
        repo.insert(&named).await.unwrap();
        repo.insert(&unrelated).await.unwrap();

        let query = SearchQuery::parse(Some("BOLT")).unwrap();
        let (items, total) = repo
            .list(PageRequest::clamped(1, 10, 100), Some(&query))
            .await
            .unwrap();

        assert_eq!(total, 2);
        // Name match outranks the newer description match
        assert_eq!(items[0].id, named.id);
        assert_eq!(items[1].id, described.id);
    }
}
