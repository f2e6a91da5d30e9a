//! Fresh Nest Cleaning website backend: the pricing engine and its JSON API.

pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use crate::pricing::{PricingCatalog, QuoteOptions};

/// Shared application state.
///
/// Cheap to clone. The engine is a pure function over the catalog, so
/// concurrent requests need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PricingCatalog>,
    pub options: QuoteOptions,
}
