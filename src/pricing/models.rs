//! Domain types for the quote engine.
//!
//! These are the vocabulary shared by the catalog, the tier advisor and the
//! calculator. Everything here is plain data; pricing behavior lives in
//! `calculators` and the numbers themselves live in `catalog`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room categories a customer can select on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
    DiningRoom,
    Office,
    Basement,
    Garage,
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Kitchen,
        RoomType::LivingRoom,
        RoomType::DiningRoom,
        RoomType::Office,
        RoomType::Basement,
        RoomType::Garage,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::LivingRoom => "Living Room",
            RoomType::DiningRoom => "Dining Room",
            RoomType::Office => "Office",
            RoomType::Basement => "Basement",
            RoomType::Garage => "Garage",
        }
    }
}

/// Room counts keyed by room type.
///
/// Counts arrive as signed integers so the engine can reject negatives with
/// a typed error instead of a deserialization failure. An all-zero (or empty)
/// map is a valid "no rooms selected" configuration.
pub type RoomConfiguration = BTreeMap<RoomType, i64>;

/// Service intensity level.
///
/// Declaration order matches multiplier order; catalog validation enforces
/// strictly increasing multipliers so escalation comparisons stay total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTier {
    Standard,
    Detailing,
    Elite,
}

impl ServiceTier {
    pub const ALL: [ServiceTier; 3] =
        [ServiceTier::Standard, ServiceTier::Detailing, ServiceTier::Elite];

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceTier::Standard => "Standard",
            ServiceTier::Detailing => "Detailing",
            ServiceTier::Elite => "Elite",
        }
    }

    /// Stable token fragment for SKU-like identifiers.
    pub fn slug(self) -> &'static str {
        match self {
            ServiceTier::Standard => "standard",
            ServiceTier::Detailing => "detailing",
            ServiceTier::Elite => "elite",
        }
    }
}

/// Customer's assessment of how dirty the space currently is.
///
/// Ordinal 1 (Extreme) through 10 (Pristine). The catalog attaches a
/// difficulty multiplier, an availability flag and an extra-cleaning flag
/// to each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanlinessLevel {
    Extreme,
    Severe,
    VeryDirty,
    Dirty,
    Moderate,
    Average,
    LightlyUsed,
    Tidy,
    Clean,
    Pristine,
}

impl CleanlinessLevel {
    pub const ALL: [CleanlinessLevel; 10] = [
        CleanlinessLevel::Extreme,
        CleanlinessLevel::Severe,
        CleanlinessLevel::VeryDirty,
        CleanlinessLevel::Dirty,
        CleanlinessLevel::Moderate,
        CleanlinessLevel::Average,
        CleanlinessLevel::LightlyUsed,
        CleanlinessLevel::Tidy,
        CleanlinessLevel::Clean,
        CleanlinessLevel::Pristine,
    ];

    /// 1-10 scale shown in the booking UI slider.
    pub fn ordinal(self) -> u8 {
        match self {
            CleanlinessLevel::Extreme => 1,
            CleanlinessLevel::Severe => 2,
            CleanlinessLevel::VeryDirty => 3,
            CleanlinessLevel::Dirty => 4,
            CleanlinessLevel::Moderate => 5,
            CleanlinessLevel::Average => 6,
            CleanlinessLevel::LightlyUsed => 7,
            CleanlinessLevel::Tidy => 8,
            CleanlinessLevel::Clean => 9,
            CleanlinessLevel::Pristine => 10,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CleanlinessLevel::Extreme => "Extreme",
            CleanlinessLevel::Severe => "Severe",
            CleanlinessLevel::VeryDirty => "Very Dirty",
            CleanlinessLevel::Dirty => "Dirty",
            CleanlinessLevel::Moderate => "Moderate",
            CleanlinessLevel::Average => "Average",
            CleanlinessLevel::LightlyUsed => "Lightly Used",
            CleanlinessLevel::Tidy => "Tidy",
            CleanlinessLevel::Clean => "Clean",
            CleanlinessLevel::Pristine => "Pristine",
        }
    }
}

/// How often the service recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
    SemiAnnual,
    Annually,
    VipDaily,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::OneTime,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::SemiAnnual,
        Frequency::Annually,
        Frequency::VipDaily,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::SemiAnnual => "Semi-annual",
            Frequency::Annually => "Annual",
            Frequency::VipDaily => "VIP Daily",
        }
    }

    /// Stable token fragment for SKU-like identifiers.
    pub fn slug(self) -> &'static str {
        match self {
            Frequency::OneTime => "one_time",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::SemiAnnual => "semi_annual",
            Frequency::Annually => "annually",
            Frequency::VipDaily => "vip_daily",
        }
    }
}

/// How often the customer is billed, independent of service frequency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    PerService,
    Monthly,
    Yearly,
}

impl PaymentFrequency {
    /// Billing events per year for a given service cadence.
    pub fn payments_per_year(self, services_per_year: u32) -> u32 {
        match self {
            PaymentFrequency::PerService => services_per_year,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Yearly => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PaymentFrequency::PerService => "Pay per service",
            PaymentFrequency::Monthly => "Monthly payment plan",
            PaymentFrequency::Yearly => "Yearly payment plan",
        }
    }

    /// Stable token fragment for SKU-like identifiers.
    pub fn slug(self) -> &'static str {
        match self {
            PaymentFrequency::PerService => "per_service",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Yearly => "yearly",
        }
    }
}

/// Property conditions collected on the booking form.
///
/// None of these change the price directly; they drive tier escalation and
/// warnings through the advisor. Square footage must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyRiskFlags {
    #[serde(default)]
    pub is_rental_property: bool,
    #[serde(default)]
    pub has_pets: bool,
    #[serde(default)]
    pub is_post_renovation: bool,
    #[serde(default)]
    pub has_mold_water_damage: bool,
    #[serde(default)]
    pub has_biohazard: bool,
    pub square_footage: f64,
}

impl PropertyRiskFlags {
    /// Flags for an ordinary property of the given size.
    pub fn for_square_footage(square_footage: f64) -> Self {
        Self {
            is_rental_property: false,
            has_pets: false,
            is_post_renovation: false,
            has_mold_water_damage: false,
            has_biohazard: false,
            square_footage,
        }
    }
}

/// An optional extra service billed additively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Unit label for display, e.g. "per load".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Tier whose bundle already includes this add-on; selecting it at that
    /// tier must not double-charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_in_tier: Option<ServiceTier>,
}

/// An optional scope reduction billed as a fixed discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanliness_ordinals_cover_1_to_10() {
        let ordinals: Vec<u8> = CleanlinessLevel::ALL.iter().map(|l| l.ordinal()).collect();
        assert_eq!(ordinals, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_cleanliness_order_matches_ordinal() {
        assert!(CleanlinessLevel::Extreme < CleanlinessLevel::VeryDirty);
        assert!(CleanlinessLevel::VeryDirty < CleanlinessLevel::Pristine);
    }

    #[test]
    fn test_payments_per_year() {
        assert_eq!(PaymentFrequency::PerService.payments_per_year(52), 52);
        assert_eq!(PaymentFrequency::Monthly.payments_per_year(52), 12);
        assert_eq!(PaymentFrequency::Yearly.payments_per_year(52), 1);
    }

    #[test]
    fn test_tier_serde_names() {
        let json = serde_json::to_string(&ServiceTier::Detailing).unwrap();
        assert_eq!(json, "\"detailing\"");
        let tier: ServiceTier = serde_json::from_str("\"elite\"").unwrap();
        assert_eq!(tier, ServiceTier::Elite);
    }

    #[test]
    fn test_frequency_serde_names() {
        let json = serde_json::to_string(&Frequency::SemiAnnual).unwrap();
        assert_eq!(json, "\"semi_annual\"");
        let freq: Frequency = serde_json::from_str("\"vip_daily\"").unwrap();
        assert_eq!(freq, Frequency::VipDaily);
    }
}
