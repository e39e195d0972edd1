//! Catalog provider: supplies products and the active-only scoring snapshot.

use std::sync::{Arc, RwLock};

use glowcart_catalog::{CatalogProduct, ProductLite};
use glowcart_core::ProductId;

/// Source of catalog rows.
///
/// `active_snapshot()` is what the recommendation engine consumes: active
/// products only, labels normalized, in a stable order.
pub trait CatalogProvider: Send + Sync {
    fn get(&self, product_id: &ProductId) -> Option<CatalogProduct>;
    fn upsert(&self, product: CatalogProduct);
    fn active_snapshot(&self) -> Vec<ProductLite>;
}

impl<S> CatalogProvider for Arc<S>
where
    S: CatalogProvider + ?Sized,
{
    fn get(&self, product_id: &ProductId) -> Option<CatalogProduct> {
        (**self).get(product_id)
    }

    fn upsert(&self, product: CatalogProduct) {
        (**self).upsert(product)
    }

    fn active_snapshot(&self) -> Vec<ProductLite> {
        (**self).active_snapshot()
    }
}

/// In-memory catalog for tests/dev.
///
/// Keeps first-insertion order; an upsert of a known id replaces the row in
/// place, so rankings that tie stay deterministic across updates.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<CatalogProduct>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let catalog = Self::new();
        for p in products {
            catalog.upsert(p);
        }
        catalog
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn get(&self, product_id: &ProductId) -> Option<CatalogProduct> {
        let products = self.products.read().ok()?;
        products.iter().find(|p| &p.id == product_id).cloned()
    }

    fn upsert(&self, product: CatalogProduct) {
        if let Ok(mut products) = self.products.write() {
            match products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => products.push(product),
            }
        }
    }

    fn active_snapshot(&self) -> Vec<ProductLite> {
        let products = match self.products.read() {
            Ok(p) => p,
            Err(_) => return vec![],
        };

        products
            .iter()
            .filter(|p| p.is_active())
            .map(CatalogProduct::to_lite)
            .collect()
    }
}
