//! Pricing engine module for the booking site.
//!
//! Turns a customer's room selections, service tier, cleanliness assessment,
//! add-ons/reductions, frequency and payment schedule into a priced,
//! itemized quote, including tier-escalation advice and availability gating.
//! The engine itself is pure and UI-free; the website frontend calls it via
//! HTTP/JSON.

pub mod advisor;
pub mod breakdown;
pub mod calculators;
pub mod catalog;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{compute_quote, round_money, QuoteOptions, QuoteOutcome};
pub use catalog::{PricingCatalog, PricingError};
pub use routes::router;
