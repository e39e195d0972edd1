use serde::{Deserialize, Serialize};

use glowcart_core::{Entity, ProductId};

use crate::labels::LabelSet;

/// Projection of a catalog product used for scoring and display.
///
/// `name`, `brand`, prices and `image` are carried through for display only.
/// `benefits` is carried but not scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLite {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub skin_type: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductLite {
    /// Minimal constructor; display fields can be filled in afterwards.
    pub fn new(id: impl Into<ProductId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            brand: String::new(),
            category: category.into(),
            skin_type: Vec::new(),
            benefits: Vec::new(),
            price: 0,
            compare_at_price: None,
            image: None,
        }
    }

    pub fn with_skin_types<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skin_type = labels.into_iter().map(Into::into).collect();
        self
    }
}

impl Entity for ProductLite {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog row as storage returns it (labels not yet normalized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub skin_type: LabelSet,
    #[serde(default)]
    pub benefits: LabelSet,
    pub price: u64,
    #[serde(default)]
    pub compare_at_price: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogProduct {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Normalize into the scoring projection.
    pub fn to_lite(&self) -> ProductLite {
        ProductLite {
            id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            category: self.category.trim().to_string(),
            skin_type: self.skin_type.labels(),
            benefits: self.benefits.labels(),
            price: self.price,
            compare_at_price: self.compare_at_price,
            image: self.image.clone(),
        }
    }
}
