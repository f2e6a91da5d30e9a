//! Core quote calculation.
//!
//! Pure functions for pricing math - no I/O, no shared state. The engine is
//! safe to call concurrently (one recomputation per keystroke is fine) and a
//! stale result can simply be discarded.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::advisor::{self, TierAdvice};
use super::breakdown::{BreakdownBuilder, BreakdownLine};
use super::catalog::{PricingCatalog, PricingError};
use super::models::{AddOn, Frequency, Reduction, ServiceTier};
use super::requests::QuoteRequest;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use freshnest_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Engine behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteOptions {
    /// Price at the advisor's minimum tier when it exceeds the requested
    /// one. Off by default: the engine surfaces the recommendation and the
    /// caller asks the customer before charging more.
    pub auto_apply_upgrades: bool,
}

/// A tier escalation the engine actually priced at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedUpgrade {
    pub from: ServiceTier,
    pub to: ServiceTier,
    pub reasons: Vec<String>,
}

/// Result of a quote computation. A value, not a persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOutcome {
    /// The upfront charge: per-visit price times visits bundled into one
    /// payment.
    pub total_price: Decimal,
    /// Visits bundled into one payment; 1 unless the payment cadence is
    /// less frequent than the service cadence.
    pub services_per_payment: Decimal,
    pub breakdown: Vec<BreakdownLine>,
    pub applied_upgrades: Vec<AppliedUpgrade>,
    pub warnings: Vec<String>,
    pub recommended_tier: Option<ServiceTier>,
    pub service_available: bool,
}

impl QuoteOutcome {
    fn unavailable(warning: String) -> Self {
        Self {
            total_price: Decimal::ZERO,
            services_per_payment: Decimal::ONE,
            breakdown: Vec::new(),
            applied_upgrades: Vec::new(),
            warnings: vec![warning],
            recommended_tier: None,
            service_available: false,
        }
    }

    fn empty_configuration() -> Self {
        let mut builder = BreakdownBuilder::new();
        builder.no_rooms();
        Self {
            total_price: Decimal::ZERO,
            services_per_payment: Decimal::ONE,
            breakdown: builder.finish(),
            applied_upgrades: Vec::new(),
            warnings: Vec::new(),
            recommended_tier: None,
            service_available: true,
        }
    }
}

/// Compute a priced, itemized quote for a request.
///
/// Deterministic and side-effect free. Expected business outcomes (service
/// unavailable, empty configuration, escalation) come back as result values;
/// only bad request data or a catalog gap is an `Err`.
pub fn compute_quote(
    catalog: &PricingCatalog,
    request: &QuoteRequest,
    options: QuoteOptions,
) -> Result<QuoteOutcome, PricingError> {
    // Fail fast on data errors, before any monetary arithmetic.
    let sqft = request.property.square_footage;
    if !(sqft > 0.0) {
        return Err(PricingError::InvalidSquareFootage(sqft));
    }
    for (&room, &count) in &request.rooms {
        if count < 0 {
            return Err(PricingError::InvalidRoomCount { room, count });
        }
        catalog.room_base_price(room)?;
    }
    let add_ons: Vec<&AddOn> = request
        .add_ons
        .iter()
        .map(|id| catalog.add_on_by_id(id))
        .collect::<Result<_, _>>()?;
    let reductions: Vec<&Reduction> = request
        .reductions
        .iter()
        .map(|id| catalog.reduction_by_id(id))
        .collect::<Result<_, _>>()?;

    // Availability gate: nothing else runs for conditions we cannot serve.
    let cleanliness_terms = catalog.cleanliness_terms(request.cleanliness)?;
    if !cleanliness_terms.available {
        return Ok(QuoteOutcome::unavailable(
            "Service is not available at this cleanliness level. Please contact us for a custom quote.".to_string(),
        ));
    }

    if request.rooms.values().all(|&count| count == 0) {
        return Ok(QuoteOutcome::empty_configuration());
    }

    // Tier resolution. The advisor only raises floors; whether the floor is
    // priced or merely recommended is the caller's policy.
    let advice: TierAdvice =
        advisor::advise(catalog, request.tier, request.cleanliness, &request.property)?;
    let mut warnings = advice.upgrade_messages.clone();
    warnings.extend(advice.notes.iter().cloned());

    let effective_tier = if options.auto_apply_upgrades {
        advisor::higher_tier(catalog, request.tier, advice.minimum_tier)?
    } else {
        request.tier
    };
    let mut applied_upgrades = Vec::new();
    if effective_tier != request.tier {
        applied_upgrades.push(AppliedUpgrade {
            from: request.tier,
            to: effective_tier,
            reasons: advice.upgrade_messages.clone(),
        });
    }

    let mut builder = BreakdownBuilder::new();

    // Base price over the room configuration.
    let mut base_price = Decimal::ZERO;
    for (&room, &count) in &request.rooms {
        if count == 0 {
            continue;
        }
        let amount = catalog.room_base_price(room)? * Decimal::from(count);
        builder.room(room, count, amount);
        base_price += amount;
    }

    // Multipliers compose multiplicatively, mirroring how the tiers and
    // difficulty bands stack on the rate card.
    let tier_terms = catalog.tier_terms(effective_tier)?;
    let price_multiplier = tier_terms.multiplier * cleanliness_terms.multiplier;

    // Add-ons, minus the ones the effective tier's bundle already includes.
    let mut add_on_total = Decimal::ZERO;
    for add_on in &add_ons {
        if add_on.included_in_tier == Some(effective_tier) {
            builder.add_on_included(add_on, &tier_terms.bundle_name);
        } else {
            builder.add_on(add_on);
            add_on_total += add_on.price;
        }
    }

    // Reductions, clamped so the subtotal never goes negative.
    let mut subtotal = base_price * price_multiplier + add_on_total;
    for reduction in &reductions {
        let applied = reduction.discount.min(subtotal);
        subtotal -= applied;
        builder.reduction(reduction, applied);
    }

    let frequency_terms = catalog.frequency_terms(request.frequency)?;
    let per_visit_full = subtotal * frequency_terms.multiplier + catalog.service_fee();
    builder.frequency(request.frequency, frequency_terms);

    // Payment-frequency conversion. A one-time job has exactly one payment,
    // whatever cadence was picked.
    let services_per_year = frequency_terms.services_per_year;
    let (payment_discount, services_per_payment) = if request.frequency == Frequency::OneTime {
        (Decimal::ONE, Decimal::ONE)
    } else {
        let payments_per_year = request.payment.payments_per_year(services_per_year);
        let bundled = if payments_per_year < services_per_year {
            Decimal::from(services_per_year) / Decimal::from(payments_per_year)
        } else {
            Decimal::ONE
        };
        (catalog.payment_discount(request.payment, services_per_year), bundled)
    };

    let per_visit = round_money(per_visit_full * payment_discount, 2);
    if services_per_payment > Decimal::ONE || payment_discount < Decimal::ONE {
        builder.payment_plan(request.payment, services_per_payment, payment_discount);
    }

    builder.tier(&tier_terms.bundle_name, tier_terms.multiplier);
    builder.cleanliness(request.cleanliness, cleanliness_terms);
    builder.service_fee(catalog.service_fee());

    let total_price = round_money(per_visit * services_per_payment, 2);
    builder.total(total_price);

    Ok(QuoteOutcome {
        total_price,
        services_per_payment,
        breakdown: builder.finish(),
        applied_upgrades,
        warnings,
        recommended_tier: advice.recommended_tier,
        service_available: true,
    })
}
