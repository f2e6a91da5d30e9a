//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::breakdown::BreakdownLine;
use super::calculators::{AppliedUpgrade, QuoteOutcome};
use super::catalog::PricingError;
use super::models::{Frequency, PaymentFrequency, ServiceTier};
use super::requests::QuoteRequest;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Recurrence metadata the cart/checkout collaborator needs to turn the
/// quote into a billable line item.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutMetadata {
    /// Stable SKU-like token for the priced plan.
    pub price_id: String,
    pub frequency: Frequency,
    pub payment: PaymentFrequency,
    #[serde(with = "rust_decimal::serde::str")]
    pub services_per_payment: Decimal,
}

/// Response for a quote calculation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub total: MoneyResponse,
    pub breakdown: Vec<BreakdownLine>,
    pub applied_upgrades: Vec<AppliedUpgrade>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_tier: Option<ServiceTier>,
    pub service_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<CheckoutMetadata>,
    pub generated_at: DateTime<Utc>,
}

impl QuoteResponse {
    pub fn from_outcome(request: &QuoteRequest, outcome: QuoteOutcome, currency: &str) -> Self {
        // The token reflects the tier actually priced, including any
        // auto-applied escalation.
        let priced_tier = outcome
            .applied_upgrades
            .last()
            .map(|upgrade| upgrade.to)
            .unwrap_or(request.tier);

        let checkout = if outcome.service_available && outcome.total_price > Decimal::ZERO {
            Some(CheckoutMetadata {
                price_id: format!(
                    "clean-{}-{}-{}",
                    priced_tier.slug(),
                    request.frequency.slug(),
                    request.payment.slug()
                ),
                frequency: request.frequency,
                payment: request.payment,
                services_per_payment: outcome.services_per_payment,
            })
        } else {
            None
        };

        Self {
            quote_id: Uuid::new_v4(),
            total: MoneyResponse { amount: outcome.total_price, currency: currency.to_string() },
            breakdown: outcome.breakdown,
            applied_upgrades: outcome.applied_upgrades,
            warnings: outcome.warnings,
            recommended_tier: outcome.recommended_tier,
            service_available: outcome.service_available,
            checkout,
            generated_at: Utc::now(),
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(error: &PricingError) -> Self {
        let error_type = match error {
            PricingError::UnknownRoomType(_) => "unknown_room_type",
            PricingError::UnknownAddOn(_) => "unknown_add_on",
            PricingError::UnknownReduction(_) => "unknown_reduction",
            PricingError::InvalidRoomCount { .. } => "invalid_room_count",
            PricingError::InvalidSquareFootage(_) => "invalid_square_footage",
            PricingError::Configuration(_) => "configuration",
        };
        Self { error_type: error_type.to_string(), message: error.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::{compute_quote, QuoteOptions};
    use crate::pricing::catalog::PricingCatalog;
    use crate::pricing::models::{CleanlinessLevel, PropertyRiskFlags, RoomType};

    fn sample_request() -> QuoteRequest {
        QuoteRequest {
            rooms: [(RoomType::Bedroom, 2)].into_iter().collect(),
            tier: ServiceTier::Standard,
            cleanliness: CleanlinessLevel::Clean,
            add_ons: vec![],
            reductions: vec![],
            frequency: Frequency::Weekly,
            payment: PaymentFrequency::Yearly,
            property: PropertyRiskFlags::for_square_footage(900.0),
        }
    }

    #[test]
    fn test_checkout_metadata_present_for_priced_quote() {
        let catalog = PricingCatalog::default();
        let request = sample_request();
        let outcome = compute_quote(&catalog, &request, QuoteOptions::default()).unwrap();
        let response = QuoteResponse::from_outcome(&request, outcome, &catalog.currency);

        let checkout = response.checkout.expect("priced quote carries checkout metadata");
        assert_eq!(checkout.price_id, "clean-standard-weekly-yearly");
        assert_eq!(checkout.services_per_payment, Decimal::from(52));
        assert_eq!(response.total.currency, "USD");
    }

    #[test]
    fn test_no_checkout_metadata_when_unavailable() {
        let catalog = PricingCatalog::default();
        let mut request = sample_request();
        request.cleanliness = CleanlinessLevel::Extreme;
        let outcome = compute_quote(&catalog, &request, QuoteOptions::default()).unwrap();
        let response = QuoteResponse::from_outcome(&request, outcome, &catalog.currency);

        assert!(!response.service_available);
        assert!(response.checkout.is_none());
    }

    #[test]
    fn test_price_id_reflects_auto_applied_tier() {
        let catalog = PricingCatalog::default();
        let mut request = sample_request();
        request.property.has_biohazard = true;
        let outcome =
            compute_quote(&catalog, &request, QuoteOptions { auto_apply_upgrades: true }).unwrap();
        let response = QuoteResponse::from_outcome(&request, outcome, &catalog.currency);

        assert!(response.checkout.unwrap().price_id.starts_with("clean-elite-"));
    }

    #[test]
    fn test_error_response_types() {
        let error = PricingError::UnknownAddOn("bogus".to_string());
        let body = PricingErrorResponse::from(&error);
        assert_eq!(body.error_type, "unknown_add_on");
        assert!(body.message.contains("bogus"));
    }
}
