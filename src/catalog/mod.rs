//! Read-only catalog of enhancements and commander traits
//!
//! Bundles are `static` values shared by reference; units hold a slot that
//! is either empty or names one bundle. Nothing here is ever mutated.

mod enhancements;
mod traits;

use serde::{Serialize, Serializer};

use crate::battle::unit_type::BrigadeType;
use crate::core::error::{EngineError, Result};

pub use enhancements::{
    CAVALRY_ENHANCEMENTS, HEAVY_ENHANCEMENTS, LIGHT_ENHANCEMENTS, SHIP_ENHANCEMENTS,
};
pub use traits::{ADMIRAL_TRAITS, GENERAL_TRAITS};

/// Bonus categories a bundle can contribute to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusCategory {
    Skirmish,
    Defense,
    Pitch,
    Rally,
    Maneuver,
    Gunnery,
    Boarding,
}

/// Qualitative abilities consulted by special-case rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTag {
    // Brigade enhancements
    FreeDestructionReroll,
    ConditionalPitchBonus,
    TerrainBonus,
    MajorTerrainBonus,
    AutoOverrun, // Any skirmish win rolls for overrun
    GeneralReroll,
    EasyPromotion,
    ChooseRetreat,
    GarrisonBonus,
    EnemyDefenseReduction,
    InitialPitchBonus,
    LineInfantryBonus,
    AntiCavalry, // Negates overrun by cavalry
    SelectTarget,
    NegateGarrison,
    ExtendedSight,
    Stealth,
    RoutSkirmishers,

    // Ship enhancements
    ReinforcedHulls, // +1 on damage rolls taken
    Camouflage,
    DebrisNetting,
    Spotters,
    FalseFlags,

    // Commander traits
    DoublePitch,
    BrutalPillaging,
    SkipSkirmish,
    Chivalrous,
    LightBonus,
    TacticalRetreat,
    CavalryBonus,
    RallyReroll,
    HeavyBonus,
    LuckyReroll,
    Merciless,
    BonusLevel,
    Pursuit,
    EnhancedAwareness,
    HolyWarBonus,
    BoardingBonus,
    EnhancedPiracy,
    CoastalRaiding,
    ExtendedCombat,
    IncreasedWidth,
}

/// What kind of unit an enhancement can be fitted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnhancementTarget {
    Brigade(BrigadeType),
    Ship,
}

/// Named bundle of bonuses fitted to a single unit
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Enhancement {
    pub name: &'static str,
    pub description: &'static str,
    pub target: EnhancementTarget,
    pub bonuses: &'static [(BonusCategory, i32)],
    pub tags: &'static [AbilityTag],
}

impl Enhancement {
    pub fn bonus(&self, category: BonusCategory) -> i32 {
        bonus_from(self.bonuses, category)
    }

    pub fn has(&self, tag: AbilityTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Which commanders a trait belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraitRole {
    General,
    Admiral,
}

/// Named bundle of bonuses carried by a commander
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CommanderTrait {
    pub name: &'static str,
    pub description: &'static str,
    pub role: TraitRole,
    pub bonuses: &'static [(BonusCategory, i32)],
    pub tags: &'static [AbilityTag],
}

impl CommanderTrait {
    pub fn bonus(&self, category: BonusCategory) -> i32 {
        bonus_from(self.bonuses, category)
    }

    pub fn has(&self, tag: AbilityTag) -> bool {
        self.tags.contains(&tag)
    }
}

fn bonus_from(bonuses: &[(BonusCategory, i32)], category: BonusCategory) -> i32 {
    bonuses
        .iter()
        .filter(|(c, _)| *c == category)
        .map(|(_, v)| *v)
        .sum()
}

/// Enhancement fitted to a unit, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnhancementSlot {
    #[default]
    Empty,
    Named(&'static Enhancement),
}

impl EnhancementSlot {
    /// Resolve a brigade enhancement by name, checking it fits the type
    pub fn for_brigade(name: &str, brigade_type: BrigadeType) -> Result<Self> {
        let enhancement = brigade_enhancements(brigade_type)
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| {
                EngineError::invalid_input(format!(
                    "'{name}' is not a {brigade_type} brigade enhancement"
                ))
            })?;
        Ok(Self::Named(enhancement))
    }

    /// Resolve a ship enhancement by name
    pub fn for_ship(name: &str) -> Result<Self> {
        SHIP_ENHANCEMENTS
            .iter()
            .find(|e| e.name == name)
            .map(Self::Named)
            .ok_or_else(|| EngineError::invalid_input(format!("unknown ship enhancement '{name}'")))
    }

    pub fn get(&self) -> Option<&'static Enhancement> {
        match *self {
            Self::Empty => None,
            Self::Named(e) => Some(e),
        }
    }

    /// Bonus for a category; an empty slot contributes nothing
    pub fn bonus(&self, category: BonusCategory) -> i32 {
        self.get().map_or(0, |e| e.bonus(category))
    }

    pub fn has(&self, tag: AbilityTag) -> bool {
        self.get().is_some_and(|e| e.has(tag))
    }

    pub fn name(&self) -> Option<&'static str> {
        self.get().map(|e| e.name)
    }
}

impl Serialize for EnhancementSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

/// Trait carried by a commander, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraitSlot {
    #[default]
    Empty,
    Named(&'static CommanderTrait),
}

impl TraitSlot {
    pub fn general(name: &str) -> Result<Self> {
        find_trait(GENERAL_TRAITS, name).map(Self::Named)
    }

    pub fn admiral(name: &str) -> Result<Self> {
        find_trait(ADMIRAL_TRAITS, name).map(Self::Named)
    }

    pub fn get(&self) -> Option<&'static CommanderTrait> {
        match *self {
            Self::Empty => None,
            Self::Named(t) => Some(t),
        }
    }

    pub fn bonus(&self, category: BonusCategory) -> i32 {
        self.get().map_or(0, |t| t.bonus(category))
    }

    pub fn has(&self, tag: AbilityTag) -> bool {
        self.get().is_some_and(|t| t.has(tag))
    }

    pub fn name(&self) -> Option<&'static str> {
        self.get().map(|t| t.name)
    }
}

impl Serialize for TraitSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

fn find_trait(table: &'static [CommanderTrait], name: &str) -> Result<&'static CommanderTrait> {
    table
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| EngineError::invalid_input(format!("unknown commander trait '{name}'")))
}

/// Enhancements that can be fitted to a brigade type
pub fn brigade_enhancements(brigade_type: BrigadeType) -> &'static [Enhancement] {
    match brigade_type {
        BrigadeType::Cavalry => CAVALRY_ENHANCEMENTS,
        BrigadeType::Heavy => HEAVY_ENHANCEMENTS,
        BrigadeType::Light => LIGHT_ENHANCEMENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_contributes_zero() {
        let slot = EnhancementSlot::Empty;
        assert_eq!(slot.bonus(BonusCategory::Pitch), 0);
        assert!(!slot.has(AbilityTag::AutoOverrun));
        assert_eq!(slot.name(), None);
    }

    #[test]
    fn test_lancers_resolve_for_cavalry() {
        let slot = EnhancementSlot::for_brigade("Lancers", BrigadeType::Cavalry).unwrap();
        assert_eq!(slot.bonus(BonusCategory::Skirmish), 3);
        assert!(slot.has(AbilityTag::AutoOverrun));
    }

    #[test]
    fn test_enhancement_type_mismatch_rejected() {
        let err = EnhancementSlot::for_brigade("Lancers", BrigadeType::Heavy).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_ship_enhancements() {
        let hulls = EnhancementSlot::for_ship("Reinforced Hulls").unwrap();
        assert!(hulls.has(AbilityTag::ReinforcedHulls));
        assert!(EnhancementSlot::for_ship("Lancers").is_err());
    }

    #[test]
    fn test_brilliant_doubles_pitch() {
        let slot = TraitSlot::general("Brilliant").unwrap();
        assert!(slot.has(AbilityTag::DoublePitch));
        assert!(TraitSlot::admiral("Brilliant").is_err());
    }

    #[test]
    fn test_catalog_targets_consistent() {
        for t in BrigadeType::ALL {
            assert!(brigade_enhancements(t)
                .iter()
                .all(|e| e.target == EnhancementTarget::Brigade(t)));
        }
        assert!(SHIP_ENHANCEMENTS
            .iter()
            .all(|e| e.target == EnhancementTarget::Ship));
        assert!(GENERAL_TRAITS.iter().all(|t| t.role == TraitRole::General));
        assert!(ADMIRAL_TRAITS.iter().all(|t| t.role == TraitRole::Admiral));
    }

    #[test]
    fn test_slot_serializes_as_name() {
        let slot = EnhancementSlot::for_brigade("Elite", BrigadeType::Heavy).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"Elite\"");
        assert_eq!(serde_json::to_string(&EnhancementSlot::Empty).unwrap(), "null");
    }
}
