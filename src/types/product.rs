//! Product catalog types
//!
//! `CatalogProduct` mirrors one entry of the catalog response; `ProductInfo`
//! is the subset the enrichment join consumes.

use serde::Deserialize;
use std::collections::HashMap;

/// Catalog product identifier
pub type CatalogId = i64;

/// One product as decoded from the catalog response
///
/// Only the fields the pipeline consumes are declared; everything else in the
/// response is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogProduct {
    pub id: Option<CatalogId>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

/// Catalog metadata for one product
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductInfo {
    pub title: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

impl From<&CatalogProduct> for ProductInfo {
    fn from(product: &CatalogProduct) -> Self {
        ProductInfo {
            title: product.title.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            rating: product.rating,
        }
    }
}

/// Lookup from catalog id to product metadata
pub type ProductMapping = HashMap<CatalogId, ProductInfo>;
