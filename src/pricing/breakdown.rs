//! Quote breakdown assembly.
//!
//! Turns the calculator's intermediate values into the ordered list of line
//! items shown on the quote. Lines with no amount are informational. The
//! output is order-stable: the same inputs always produce the same lines in
//! the same order, so display code and tests can rely on position.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_money;
use super::catalog::{CleanlinessTerms, FrequencyTerms};
use super::models::{AddOn, CleanlinessLevel, Frequency, PaymentFrequency, Reduction, RoomType};

/// One line of a quote breakdown. `amount: None` marks an informational
/// line, e.g. a payment-plan note with no standalone dollar figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

/// Percentage saved going from `original` to `discounted`, rounded to two
/// decimals. Returns zero when `original` is not positive.
pub fn discount_percent(original: Decimal, discounted: Decimal) -> Decimal {
    if original <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut pct = round_money((original - discounted) / original * Decimal::ONE_HUNDRED, 2);
    // Pin the scale so labels always read like "8.00%", not "8.0%".
    pct.rescale(2);
    pct
}

/// Accumulates breakdown lines in presentation order.
#[derive(Debug, Default)]
pub struct BreakdownBuilder {
    lines: Vec<BreakdownLine>,
}

impl BreakdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, label: String, amount: Option<Decimal>) {
        self.lines.push(BreakdownLine { label, amount });
    }

    /// The single line emitted for an empty configuration.
    pub fn no_rooms(&mut self) {
        self.push("No rooms selected".to_string(), None);
    }

    pub fn room(&mut self, room: RoomType, count: i64, amount: Decimal) {
        self.push(format!("{} x {}", room.display_name(), count), Some(amount));
    }

    pub fn add_on(&mut self, add_on: &AddOn) {
        let label = match &add_on.unit {
            Some(unit) => format!("{} ({})", add_on.name, unit),
            None => add_on.name.clone(),
        };
        self.push(label, Some(add_on.price));
    }

    /// An add-on waived because the effective tier's bundle includes it.
    pub fn add_on_included(&mut self, add_on: &AddOn, bundle_name: &str) {
        self.push(format!("{} (included with {})", add_on.name, bundle_name), None);
    }

    /// Reductions carry negative amounts; `applied` is the clamped discount
    /// actually taken off the subtotal.
    pub fn reduction(&mut self, reduction: &Reduction, applied: Decimal) {
        self.push(reduction.name.clone(), Some(-applied));
    }

    pub fn frequency(&mut self, freq: Frequency, terms: &FrequencyTerms) {
        let label = if terms.multiplier < Decimal::ONE {
            format!(
                "{} service ({}% off)",
                freq.display_name(),
                discount_percent(Decimal::ONE, terms.multiplier)
            )
        } else {
            format!("{} service (x{})", freq.display_name(), terms.multiplier)
        };
        self.push(label, None);
    }

    /// Payment-plan note, emitted when visits are bundled into one upfront
    /// charge or a prepayment discount applies.
    pub fn payment_plan(
        &mut self,
        payment: PaymentFrequency,
        services_per_payment: Decimal,
        discount: Decimal,
    ) {
        let mut label = payment.display_name().to_string();
        if services_per_payment > Decimal::ONE {
            label.push_str(&format!(": {} visits prepaid", services_per_payment.round_dp(2)));
        }
        if discount < Decimal::ONE {
            label.push_str(&format!(" ({}% off)", discount_percent(Decimal::ONE, discount)));
        }
        self.push(label, None);
    }

    pub fn tier(&mut self, bundle_name: &str, multiplier: Decimal) {
        self.push(format!("{} (x{})", bundle_name, multiplier), None);
    }

    pub fn cleanliness(&mut self, level: CleanlinessLevel, terms: &CleanlinessTerms) {
        self.push(
            format!("Cleanliness: {} (x{})", level.display_name(), terms.multiplier),
            None,
        );
        if terms.extra_cleaning {
            self.push("Extra Cleaning Required".to_string(), None);
        }
    }

    pub fn service_fee(&mut self, amount: Decimal) {
        self.push("Service fee".to_string(), Some(amount));
    }

    pub fn total(&mut self, amount: Decimal) {
        self.push("Total".to_string(), Some(amount));
    }

    pub fn finish(self) -> Vec<BreakdownLine> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_percent_rounds_to_two_decimals() {
        assert_eq!(discount_percent(dec!(85), dec!(78.2)), dec!(8.00));
        assert_eq!(discount_percent(dec!(1), dec!(0.92)), dec!(8.00));
        assert_eq!(discount_percent(dec!(3), dec!(2)), dec!(33.33));
    }

    #[test]
    fn test_discount_percent_zero_original() {
        assert_eq!(discount_percent(dec!(0), dec!(5)), Decimal::ZERO);
    }

    #[test]
    fn test_frequency_line_shows_discount_when_below_baseline() {
        let mut builder = BreakdownBuilder::new();
        builder.frequency(
            Frequency::VipDaily,
            &FrequencyTerms { multiplier: dec!(0.9), services_per_year: 365 },
        );
        let lines = builder.finish();
        assert_eq!(lines[0].label, "VIP Daily service (10.00% off)");
        assert_eq!(lines[0].amount, None);
    }

    #[test]
    fn test_frequency_line_shows_multiplier_at_or_above_baseline() {
        let mut builder = BreakdownBuilder::new();
        builder.frequency(
            Frequency::OneTime,
            &FrequencyTerms { multiplier: dec!(1.2), services_per_year: 1 },
        );
        assert_eq!(builder.finish()[0].label, "One-time service (x1.2)");
    }

    #[test]
    fn test_payment_plan_line() {
        let mut builder = BreakdownBuilder::new();
        builder.payment_plan(PaymentFrequency::Yearly, dec!(52), dec!(0.92));
        assert_eq!(
            builder.finish()[0].label,
            "Yearly payment plan: 52 visits prepaid (8.00% off)"
        );
    }

    #[test]
    fn test_line_order_is_stable() {
        let build = || {
            let mut builder = BreakdownBuilder::new();
            builder.room(RoomType::Bedroom, 2, dec!(60));
            builder.service_fee(dec!(15));
            builder.total(dec!(75));
            builder.finish()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_reduction_amount_is_negative() {
        let reduction = Reduction {
            id: "own_supplies".to_string(),
            name: "Customer Provides Supplies".to_string(),
            discount: dec!(10),
        };
        let mut builder = BreakdownBuilder::new();
        builder.reduction(&reduction, dec!(10));
        assert_eq!(builder.finish()[0].amount, Some(dec!(-10)));
    }
}
