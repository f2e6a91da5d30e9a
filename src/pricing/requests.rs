//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

use super::models::{
    CleanlinessLevel, Frequency, PaymentFrequency, PropertyRiskFlags, RoomConfiguration,
    ServiceTier,
};

/// A complete quote request, built by the caller from booking-form state.
///
/// Immutable once handed to the engine; the calculator validates counts,
/// square footage and add-on/reduction ids before any arithmetic runs.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub rooms: RoomConfiguration,
    pub tier: ServiceTier,
    pub cleanliness: CleanlinessLevel,
    /// Selected add-on ids from the catalog.
    #[serde(default)]
    pub add_ons: Vec<String>,
    /// Selected reduction ids from the catalog.
    #[serde(default)]
    pub reductions: Vec<String>,
    pub frequency: Frequency,
    #[serde(default)]
    pub payment: PaymentFrequency,
    pub property: PropertyRiskFlags,
}
