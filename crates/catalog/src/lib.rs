//! Catalog domain module.
//!
//! Holds the product projection the recommendation engine scores
//! (`ProductLite`) and the adapter that turns a loosely-typed storage row into
//! it. Normalization happens here so downstream code only ever sees plain
//! label lists.

pub mod labels;
pub mod product;

pub use labels::LabelSet;
pub use product::{CatalogProduct, ProductLite};
