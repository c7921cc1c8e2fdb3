//! Product catalog sources
//!
//! The catalog is an external collaborator: the pipeline only needs a list of
//! products with `{id, title, category, brand, rating}`. Any failure to load
//! it degrades to an empty list, which makes every transaction unmatched
//! rather than aborting the run.

use crate::types::{AnalyticsError, CatalogProduct, ProductInfo, ProductMapping};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Products endpoint queried by [`HttpCatalog`] when no other URL is given
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products?limit=100";

/// Upper bound on the whole catalog request
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of catalog products
pub trait ProductCatalog {
    /// Fetch every available product
    ///
    /// Implementations must not fail: errors are logged and reported as an
    /// empty list.
    fn fetch_products(&self) -> Vec<CatalogProduct>;
}

/// Catalog response envelope
///
/// Matches the `{"products": [...], "total": .., ...}` shape of the products
/// endpoint; only `products` is read.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    products: Vec<CatalogProduct>,
}

/// Catalog backed by a saved JSON response on disk
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the catalog file
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::CatalogError` if the file cannot be read or is
    /// not a valid catalog response.
    pub fn load(&self) -> Result<Vec<CatalogProduct>, AnalyticsError> {
        let location = self.path.display().to_string();

        let content = fs::read_to_string(&self.path)
            .map_err(|e| AnalyticsError::catalog(&location, e))?;

        decode_response(&location, &content)
    }
}

impl ProductCatalog for JsonFileCatalog {
    fn fetch_products(&self) -> Vec<CatalogProduct> {
        products_or_empty(self.load())
    }
}

/// Catalog fetched from the products endpoint
///
/// Makes one blocking GET bounded by `timeout`. Anything other than a `200`
/// response carrying a valid catalog document counts as a failure. There are
/// no retries.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
    timeout: Duration,
}

impl Default for HttpCatalog {
    fn default() -> Self {
        HttpCatalog::new(DEFAULT_CATALOG_URL, DEFAULT_CATALOG_TIMEOUT)
    }
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        HttpCatalog {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Request and decode the catalog
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::CatalogError` on connection failure, timeout,
    /// a non-200 status or an undecodable body.
    pub fn load(&self) -> Result<Vec<CatalogProduct>, AnalyticsError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();

        let response = agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => {
                AnalyticsError::catalog(&self.url, format!("HTTP status {}", status))
            }
            ureq::Error::Transport(transport) => AnalyticsError::catalog(&self.url, transport),
        })?;

        if response.status() != 200 {
            return Err(AnalyticsError::catalog(
                &self.url,
                format!("HTTP status {}", response.status()),
            ));
        }

        let body = response
            .into_string()
            .map_err(|e| AnalyticsError::catalog(&self.url, e))?;

        decode_response(&self.url, &body)
    }
}

impl ProductCatalog for HttpCatalog {
    fn fetch_products(&self) -> Vec<CatalogProduct> {
        products_or_empty(self.load())
    }
}

fn decode_response(location: &str, content: &str) -> Result<Vec<CatalogProduct>, AnalyticsError> {
    let response: CatalogResponse =
        serde_json::from_str(content).map_err(|e| AnalyticsError::catalog(location, e))?;
    Ok(response.products)
}

fn products_or_empty(loaded: Result<Vec<CatalogProduct>, AnalyticsError>) -> Vec<CatalogProduct> {
    match loaded {
        Ok(products) => {
            info!("Loaded {} products from catalog", products.len());
            products
        }
        Err(e) => {
            warn!("{}; continuing without product data", e);
            Vec::new()
        }
    }
}

/// Catalog with no products
///
/// Used when no catalog is configured; every transaction ends up unmatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl ProductCatalog for EmptyCatalog {
    fn fetch_products(&self) -> Vec<CatalogProduct> {
        Vec::new()
    }
}

/// Build the id → metadata lookup used by the enrichment join
///
/// Products without an id are skipped. When an id repeats, the last entry
/// wins.
pub fn create_product_mapping(products: &[CatalogProduct]) -> ProductMapping {
    products
        .iter()
        .filter_map(|product| product.id.map(|id| (id, ProductInfo::from(product))))
        .collect()
}
