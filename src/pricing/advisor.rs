//! Tier escalation advisor.
//!
//! Inspects property risk flags and the cleanliness assessment and decides
//! the minimum service tier the job can be quoted at. The advisor only
//! advises: it never mutates the request, and the calculator decides whether
//! to price at the recommendation or merely surface it.

use super::catalog::{PricingCatalog, PricingError};
use super::models::{CleanlinessLevel, PropertyRiskFlags, ServiceTier};

/// A single rule raising the tier floor.
#[derive(Debug, Clone, PartialEq)]
pub struct TierFloor {
    pub tier: ServiceTier,
    pub reason: String,
}

/// Outcome of a tier consultation.
#[derive(Debug, Clone, PartialEq)]
pub struct TierAdvice {
    /// Highest floor raised by any rule; the lowest catalog tier when no
    /// rule fires.
    pub minimum_tier: ServiceTier,
    /// Set only when the minimum exceeds the requested tier.
    pub recommended_tier: Option<ServiceTier>,
    /// One message per floor that exceeds the requested tier.
    pub upgrade_messages: Vec<String>,
    /// Informational notes that do not force a tier.
    pub notes: Vec<String>,
}

/// Decide the minimum tier for a job and produce escalation guidance.
///
/// Multiple rules may each raise the floor; the minimum tier is the maximum
/// of all floors, compared by catalog multiplier.
pub fn advise(
    catalog: &PricingCatalog,
    requested: ServiceTier,
    cleanliness: CleanlinessLevel,
    flags: &PropertyRiskFlags,
) -> Result<TierAdvice, PricingError> {
    let mut floors: Vec<TierFloor> = Vec::new();

    if flags.has_biohazard {
        floors.push(TierFloor {
            tier: catalog.top_tier(),
            reason: "Biohazard conditions require our top-tier service.".to_string(),
        });
    }

    if flags.has_mold_water_damage {
        floors.push(TierFloor {
            tier: ServiceTier::Detailing,
            reason: "Mold or water damage requires at least our Detailing service.".to_string(),
        });
    }

    if flags.is_post_renovation {
        floors.push(TierFloor {
            tier: ServiceTier::Detailing,
            reason: "Post-renovation cleanup requires at least our Detailing service.".to_string(),
        });
    }

    let mut notes = Vec::new();
    if catalog.cleanliness_terms(cleanliness)?.extra_cleaning {
        notes.push(format!(
            "Extra Cleaning Required: the {} condition adds a difficulty multiplier.",
            cleanliness.display_name()
        ));
    }

    let mut minimum_tier = ServiceTier::Standard;
    for floor in &floors {
        minimum_tier = higher_tier(catalog, minimum_tier, floor.tier)?;
    }

    let requested_multiplier = catalog.tier_multiplier(requested)?;
    let upgrade_messages = floors
        .iter()
        .filter_map(|floor| {
            match catalog.tier_multiplier(floor.tier) {
                Ok(floor_multiplier) if floor_multiplier > requested_multiplier => {
                    Some(Ok(floor.reason.clone()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let recommended_tier = if catalog.tier_multiplier(minimum_tier)? > requested_multiplier {
        Some(minimum_tier)
    } else {
        None
    };

    Ok(TierAdvice { minimum_tier, recommended_tier, upgrade_messages, notes })
}

/// The higher of two tiers by catalog multiplier.
pub fn higher_tier(
    catalog: &PricingCatalog,
    a: ServiceTier,
    b: ServiceTier,
) -> Result<ServiceTier, PricingError> {
    Ok(if catalog.tier_multiplier(b)? > catalog.tier_multiplier(a)? { b } else { a })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> PropertyRiskFlags {
        PropertyRiskFlags::for_square_footage(1200.0)
    }

    #[test]
    fn test_no_flags_no_recommendation() {
        let catalog = PricingCatalog::default();
        let advice = advise(&catalog, ServiceTier::Standard, CleanlinessLevel::Clean, &flags())
            .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Standard);
        assert_eq!(advice.recommended_tier, None);
        assert!(advice.upgrade_messages.is_empty());
        assert!(advice.notes.is_empty());
    }

    #[test]
    fn test_biohazard_forces_top_tier() {
        let catalog = PricingCatalog::default();
        let advice = advise(
            &catalog,
            ServiceTier::Standard,
            CleanlinessLevel::Clean,
            &PropertyRiskFlags { has_biohazard: true, ..flags() },
        )
        .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Elite);
        assert_eq!(advice.recommended_tier, Some(ServiceTier::Elite));
        assert_eq!(advice.upgrade_messages.len(), 1);
        assert!(advice.upgrade_messages[0].contains("Biohazard"));
    }

    #[test]
    fn test_mold_requires_detailing() {
        let catalog = PricingCatalog::default();
        let advice = advise(
            &catalog,
            ServiceTier::Standard,
            CleanlinessLevel::Clean,
            &PropertyRiskFlags { has_mold_water_damage: true, ..flags() },
        )
        .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Detailing);
        assert_eq!(advice.recommended_tier, Some(ServiceTier::Detailing));
    }

    #[test]
    fn test_post_renovation_requires_detailing() {
        let catalog = PricingCatalog::default();
        let advice = advise(
            &catalog,
            ServiceTier::Standard,
            CleanlinessLevel::Clean,
            &PropertyRiskFlags { is_post_renovation: true, ..flags() },
        )
        .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Detailing);
    }

    #[test]
    fn test_multiple_floors_take_the_maximum() {
        let catalog = PricingCatalog::default();
        let advice = advise(
            &catalog,
            ServiceTier::Standard,
            CleanlinessLevel::Clean,
            &PropertyRiskFlags {
                has_biohazard: true,
                has_mold_water_damage: true,
                is_post_renovation: true,
                ..flags()
            },
        )
        .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Elite);
        // Only floors above the requested tier produce messages; all three
        // rules exceed Standard here.
        assert_eq!(advice.upgrade_messages.len(), 3);
    }

    #[test]
    fn test_requested_tier_already_sufficient() {
        let catalog = PricingCatalog::default();
        let advice = advise(
            &catalog,
            ServiceTier::Elite,
            CleanlinessLevel::Clean,
            &PropertyRiskFlags { has_mold_water_damage: true, ..flags() },
        )
        .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Detailing);
        assert_eq!(advice.recommended_tier, None);
        assert!(advice.upgrade_messages.is_empty());
    }

    #[test]
    fn test_moderately_dirty_band_emits_note_without_floor() {
        let catalog = PricingCatalog::default();
        let advice = advise(&catalog, ServiceTier::Standard, CleanlinessLevel::Moderate, &flags())
            .unwrap();
        assert_eq!(advice.minimum_tier, ServiceTier::Standard);
        assert_eq!(advice.recommended_tier, None);
        assert_eq!(advice.notes.len(), 1);
        assert!(advice.notes[0].contains("Extra Cleaning Required"));
    }
}
