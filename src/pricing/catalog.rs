//! Pricing reference data.
//!
//! The catalog holds every business-owned number the engine consults: room
//! rates, tier multipliers, cleanliness terms, add-ons, reductions, the
//! frequency table, prepayment discounts and the flat service fee. It is
//! constructed explicitly and passed into the calculator (no globals), so
//! tests can substitute fixtures and regional catalogs can coexist.
//!
//! `Default` carries the standard rates; `from_json_file` loads an override
//! so the numbers can change without a code deploy.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{ensure, Context};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::models::{
    AddOn, CleanlinessLevel, Frequency, PaymentFrequency, Reduction, RoomType, ServiceTier,
};

/// Pricing calculation error types.
///
/// These are caller/data errors raised before any monetary arithmetic runs.
/// Expected business outcomes (service unavailable, empty configuration,
/// tier escalation) are result values, never errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("no base price configured for room type '{0:?}'")]
    UnknownRoomType(RoomType),

    #[error("unknown add-on id '{0}'")]
    UnknownAddOn(String),

    #[error("unknown reduction id '{0}'")]
    UnknownReduction(String),

    #[error("invalid count {count} for {room:?}: counts must be non-negative")]
    InvalidRoomCount { room: RoomType, count: i64 },

    #[error("square footage must be positive, got {0}")]
    InvalidSquareFootage(f64),

    #[error("catalog misconfigured: {0}")]
    Configuration(String),
}

/// Terms attached to a service tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTerms {
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    /// Display name used on quotes, e.g. "Elite Bundle".
    pub bundle_name: String,
}

/// Terms attached to a cleanliness level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanlinessTerms {
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    /// Below a threshold the service is unavailable and the customer is
    /// directed to request a custom quote.
    pub available: bool,
    /// Levels in the moderately-dirty band get an "Extra Cleaning Required"
    /// note alongside the difficulty multiplier.
    #[serde(default)]
    pub extra_cleaning: bool,
}

/// Terms attached to a recurrence frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTerms {
    /// Per-visit price multiplier relative to the weekly baseline.
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    pub services_per_year: u32,
}

/// Immutable pricing reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    pub currency: String,
    pub room_rates: BTreeMap<RoomType, Decimal>,
    pub tiers: BTreeMap<ServiceTier, TierTerms>,
    pub cleanliness: BTreeMap<CleanlinessLevel, CleanlinessTerms>,
    pub add_ons: Vec<AddOn>,
    pub reductions: Vec<Reduction>,
    pub frequencies: BTreeMap<Frequency, FrequencyTerms>,
    /// Prepayment discount multipliers, applied only when the payment
    /// cadence is less frequent than the service cadence.
    pub payment_discounts: BTreeMap<PaymentFrequency, Decimal>,
    /// Flat fee added once per non-empty configuration.
    #[serde(with = "rust_decimal::serde::str")]
    pub service_fee: Decimal,
}

impl PricingCatalog {
    /// Load a catalog from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog file {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Parse a catalog from a JSON string and validate it.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let catalog: Self = serde_json::from_str(raw).context("parsing catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Structural validation, run on every loaded catalog.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.currency.is_empty(), "currency must be set");
        ensure!(self.service_fee >= Decimal::ZERO, "service fee must be non-negative");

        for room in RoomType::ALL {
            let rate = self
                .room_rates
                .get(&room)
                .with_context(|| format!("missing room rate for {room:?}"))?;
            ensure!(*rate >= Decimal::ZERO, "room rate for {room:?} must be non-negative");
        }

        let mut previous: Option<Decimal> = None;
        for tier in ServiceTier::ALL {
            let terms = self
                .tiers
                .get(&tier)
                .with_context(|| format!("missing tier terms for {tier:?}"))?;
            ensure!(terms.multiplier >= Decimal::ONE, "tier multiplier for {tier:?} must be >= 1");
            if let Some(prev) = previous {
                // Keeps the enum order and the multiplier order aligned, so
                // escalation comparisons are total.
                ensure!(
                    terms.multiplier > prev,
                    "tier multipliers must be strictly increasing, {tier:?} is not"
                );
            }
            previous = Some(terms.multiplier);
        }

        for level in CleanlinessLevel::ALL {
            let terms = self
                .cleanliness
                .get(&level)
                .with_context(|| format!("missing cleanliness terms for {level:?}"))?;
            ensure!(
                terms.multiplier >= Decimal::ONE,
                "cleanliness multiplier for {level:?} must be >= 1"
            );
        }

        for freq in Frequency::ALL {
            let terms = self
                .frequencies
                .get(&freq)
                .with_context(|| format!("missing frequency terms for {freq:?}"))?;
            ensure!(terms.multiplier > Decimal::ZERO, "frequency multiplier for {freq:?} must be positive");
            ensure!(terms.services_per_year >= 1, "services per year for {freq:?} must be >= 1");
        }

        for (payment, discount) in &self.payment_discounts {
            ensure!(
                *discount > Decimal::ZERO && *discount <= Decimal::ONE,
                "payment discount for {payment:?} must be in (0, 1]"
            );
        }

        let mut seen = HashSet::new();
        for add_on in &self.add_ons {
            ensure!(seen.insert(&add_on.id), "duplicate add-on id '{}'", add_on.id);
            ensure!(add_on.price >= Decimal::ZERO, "add-on '{}' price must be non-negative", add_on.id);
        }
        let mut seen = HashSet::new();
        for reduction in &self.reductions {
            ensure!(seen.insert(&reduction.id), "duplicate reduction id '{}'", reduction.id);
            ensure!(
                reduction.discount >= Decimal::ZERO,
                "reduction '{}' discount must be non-negative",
                reduction.id
            );
        }

        Ok(())
    }

    pub fn room_base_price(&self, room: RoomType) -> Result<Decimal, PricingError> {
        self.room_rates
            .get(&room)
            .copied()
            .ok_or(PricingError::UnknownRoomType(room))
    }

    pub fn tier_terms(&self, tier: ServiceTier) -> Result<&TierTerms, PricingError> {
        self.tiers
            .get(&tier)
            .ok_or_else(|| PricingError::Configuration(format!("no terms for tier {tier:?}")))
    }

    pub fn tier_multiplier(&self, tier: ServiceTier) -> Result<Decimal, PricingError> {
        Ok(self.tier_terms(tier)?.multiplier)
    }

    pub fn bundle_name(&self, tier: ServiceTier) -> Result<&str, PricingError> {
        Ok(self.tier_terms(tier)?.bundle_name.as_str())
    }

    /// The highest-multiplier tier defined in this catalog.
    pub fn top_tier(&self) -> ServiceTier {
        self.tiers
            .iter()
            .max_by_key(|(_, terms)| terms.multiplier)
            .map(|(tier, _)| *tier)
            .unwrap_or(ServiceTier::Elite)
    }

    pub fn cleanliness_terms(&self, level: CleanlinessLevel) -> Result<&CleanlinessTerms, PricingError> {
        self.cleanliness
            .get(&level)
            .ok_or_else(|| PricingError::Configuration(format!("no terms for cleanliness {level:?}")))
    }

    pub fn cleanliness_multiplier(&self, level: CleanlinessLevel) -> Result<Decimal, PricingError> {
        Ok(self.cleanliness_terms(level)?.multiplier)
    }

    pub fn add_on_by_id(&self, id: &str) -> Result<&AddOn, PricingError> {
        self.add_ons
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| PricingError::UnknownAddOn(id.to_string()))
    }

    pub fn reduction_by_id(&self, id: &str) -> Result<&Reduction, PricingError> {
        self.reductions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| PricingError::UnknownReduction(id.to_string()))
    }

    pub fn frequency_terms(&self, freq: Frequency) -> Result<&FrequencyTerms, PricingError> {
        self.frequencies
            .get(&freq)
            .ok_or_else(|| PricingError::Configuration(format!("no terms for frequency {freq:?}")))
    }

    /// Prepayment discount multiplier for the given payment cadence.
    ///
    /// Returns 1.0 (no discount) whenever payments are at least as frequent
    /// as services: paying per visit, or monthly for a monthly service,
    /// earns nothing.
    pub fn payment_discount(&self, payment: PaymentFrequency, services_per_year: u32) -> Decimal {
        if payment.payments_per_year(services_per_year) >= services_per_year {
            return Decimal::ONE;
        }
        self.payment_discounts
            .get(&payment)
            .copied()
            .unwrap_or(Decimal::ONE)
    }

    pub fn service_fee(&self) -> Decimal {
        self.service_fee
    }
}

impl Default for PricingCatalog {
    /// The standard Fresh Nest rate card.
    fn default() -> Self {
        let room_rates = BTreeMap::from([
            (RoomType::Bedroom, dec!(30)),
            (RoomType::Bathroom, dec!(40)),
            (RoomType::Kitchen, dec!(45)),
            (RoomType::LivingRoom, dec!(35)),
            (RoomType::DiningRoom, dec!(25)),
            (RoomType::Office, dec!(25)),
            (RoomType::Basement, dec!(40)),
            (RoomType::Garage, dec!(35)),
        ]);

        let tiers = BTreeMap::from([
            (
                ServiceTier::Standard,
                TierTerms { multiplier: dec!(1), bundle_name: "Standard Clean".to_string() },
            ),
            (
                ServiceTier::Detailing,
                TierTerms { multiplier: dec!(3.5), bundle_name: "Detailing Bundle".to_string() },
            ),
            (
                ServiceTier::Elite,
                TierTerms { multiplier: dec!(6), bundle_name: "Elite Bundle".to_string() },
            ),
        ]);

        let available = |multiplier, extra_cleaning| CleanlinessTerms {
            multiplier,
            available: true,
            extra_cleaning,
        };
        let cleanliness = BTreeMap::from([
            // Levels 1-2 are below the availability floor; the multiplier is
            // kept for completeness but never applied.
            (
                CleanlinessLevel::Extreme,
                CleanlinessTerms { multiplier: dec!(3.5), available: false, extra_cleaning: true },
            ),
            (
                CleanlinessLevel::Severe,
                CleanlinessTerms { multiplier: dec!(3.5), available: false, extra_cleaning: true },
            ),
            (CleanlinessLevel::VeryDirty, available(dec!(3.5), true)),
            (CleanlinessLevel::Dirty, available(dec!(2.75), true)),
            (CleanlinessLevel::Moderate, available(dec!(2), true)),
            (CleanlinessLevel::Average, available(dec!(1.5), true)),
            (CleanlinessLevel::LightlyUsed, available(dec!(1.2), false)),
            (CleanlinessLevel::Tidy, available(dec!(1.1), false)),
            (CleanlinessLevel::Clean, available(dec!(1), false)),
            (CleanlinessLevel::Pristine, available(dec!(1), false)),
        ]);

        let add_ons = vec![
            AddOn {
                id: "inside_fridge".to_string(),
                name: "Inside Fridge".to_string(),
                price: dec!(25),
                unit: None,
                included_in_tier: Some(ServiceTier::Elite),
            },
            AddOn {
                id: "inside_oven".to_string(),
                name: "Inside Oven".to_string(),
                price: dec!(30),
                unit: None,
                included_in_tier: Some(ServiceTier::Elite),
            },
            AddOn {
                id: "interior_windows".to_string(),
                name: "Interior Windows".to_string(),
                price: dec!(40),
                unit: None,
                included_in_tier: None,
            },
            AddOn {
                id: "laundry".to_string(),
                name: "Laundry & Folding".to_string(),
                price: dec!(20),
                unit: Some("per load".to_string()),
                included_in_tier: None,
            },
            AddOn {
                id: "carpet_shampoo".to_string(),
                name: "Carpet Shampoo".to_string(),
                price: dec!(50),
                unit: None,
                included_in_tier: None,
            },
        ];

        let reductions = vec![
            Reduction {
                id: "own_supplies".to_string(),
                name: "Customer Provides Supplies".to_string(),
                discount: dec!(10),
            },
            Reduction {
                id: "skip_baseboards".to_string(),
                name: "Skip Baseboards".to_string(),
                discount: dec!(5),
            },
            Reduction {
                id: "no_linen_change".to_string(),
                name: "No Linen Change".to_string(),
                discount: dec!(5),
            },
        ];

        let frequencies = BTreeMap::from([
            (Frequency::OneTime, FrequencyTerms { multiplier: dec!(1.2), services_per_year: 1 }),
            (Frequency::Weekly, FrequencyTerms { multiplier: dec!(1), services_per_year: 52 }),
            (Frequency::Biweekly, FrequencyTerms { multiplier: dec!(1.05), services_per_year: 26 }),
            (Frequency::Monthly, FrequencyTerms { multiplier: dec!(1.1), services_per_year: 12 }),
            (Frequency::SemiAnnual, FrequencyTerms { multiplier: dec!(1.15), services_per_year: 2 }),
            (Frequency::Annually, FrequencyTerms { multiplier: dec!(1.2), services_per_year: 1 }),
            (Frequency::VipDaily, FrequencyTerms { multiplier: dec!(0.9), services_per_year: 365 }),
        ]);

        let payment_discounts = BTreeMap::from([
            (PaymentFrequency::Monthly, dec!(0.95)),
            (PaymentFrequency::Yearly, dec!(0.92)),
        ]);

        Self {
            currency: "USD".to_string(),
            room_rates,
            tiers,
            cleanliness,
            add_ons,
            reductions,
            frequencies,
            payment_discounts,
            service_fee: dec!(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        PricingCatalog::default().validate().unwrap();
    }

    #[test]
    fn test_room_base_price_lookup() {
        let catalog = PricingCatalog::default();
        assert_eq!(catalog.room_base_price(RoomType::Bedroom).unwrap(), dec!(30));
        assert_eq!(catalog.room_base_price(RoomType::Bathroom).unwrap(), dec!(40));
    }

    #[test]
    fn test_missing_room_rate_is_unknown_room_type() {
        let mut catalog = PricingCatalog::default();
        catalog.room_rates.remove(&RoomType::Garage);
        assert_eq!(
            catalog.room_base_price(RoomType::Garage),
            Err(PricingError::UnknownRoomType(RoomType::Garage))
        );
    }

    #[test]
    fn test_unknown_add_on_and_reduction_ids_are_errors() {
        let catalog = PricingCatalog::default();
        assert_eq!(
            catalog.add_on_by_id("nope").unwrap_err(),
            PricingError::UnknownAddOn("nope".to_string())
        );
        assert_eq!(
            catalog.reduction_by_id("nope").unwrap_err(),
            PricingError::UnknownReduction("nope".to_string())
        );
    }

    #[test]
    fn test_top_tier_follows_multipliers() {
        let catalog = PricingCatalog::default();
        assert_eq!(catalog.top_tier(), ServiceTier::Elite);
    }

    #[test]
    fn test_payment_discount_requires_less_frequent_payments() {
        let catalog = PricingCatalog::default();

        // Weekly service, yearly prepay: 1 payment < 52 services.
        assert_eq!(catalog.payment_discount(PaymentFrequency::Yearly, 52), dec!(0.92));
        assert_eq!(catalog.payment_discount(PaymentFrequency::Monthly, 52), dec!(0.95));

        // Paying per service never discounts.
        assert_eq!(catalog.payment_discount(PaymentFrequency::PerService, 52), Decimal::ONE);

        // No "pay yearly" discount on a yearly service.
        assert_eq!(catalog.payment_discount(PaymentFrequency::Yearly, 1), Decimal::ONE);
        assert_eq!(catalog.payment_discount(PaymentFrequency::Monthly, 12), Decimal::ONE);
    }

    #[test]
    fn test_validation_rejects_non_increasing_tier_multipliers() {
        let mut catalog = PricingCatalog::default();
        catalog.tiers.get_mut(&ServiceTier::Elite).unwrap().multiplier = dec!(2);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_missing_cleanliness_level() {
        let mut catalog = PricingCatalog::default();
        catalog.cleanliness.remove(&CleanlinessLevel::Moderate);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalog = PricingCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let loaded = PricingCatalog::from_json(&json).unwrap();
        assert_eq!(loaded, catalog);
    }
}
