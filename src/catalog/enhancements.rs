use super::AbilityTag::*;
use super::BonusCategory::*;
use super::{Enhancement, EnhancementTarget};
use crate::battle::unit_type::BrigadeType;

const CAV: EnhancementTarget = EnhancementTarget::Brigade(BrigadeType::Cavalry);
const HEAVY: EnhancementTarget = EnhancementTarget::Brigade(BrigadeType::Heavy);
const LIGHT: EnhancementTarget = EnhancementTarget::Brigade(BrigadeType::Light);

pub static CAVALRY_ENHANCEMENTS: &[Enhancement] = &[
    Enhancement {
        name: "Cuirassiers",
        description: "+2 Defense. +1 Pitch. Free Destruction Reroll.",
        target: CAV,
        bonuses: &[(Defense, 2), (Pitch, 1)],
        tags: &[FreeDestructionReroll],
    },
    Enhancement {
        name: "Dragoons",
        description: "+1 Pitch. +1 Rally. +1 Pitch if not in initial pitch.",
        target: CAV,
        bonuses: &[(Pitch, 1), (Rally, 1)],
        tags: &[ConditionalPitchBonus],
    },
    Enhancement {
        name: "Hussars",
        description: "+1 Skirmish. +1 Rally. -1 terrain cost.",
        target: CAV,
        bonuses: &[(Skirmish, 1), (Rally, 1)],
        tags: &[TerrainBonus],
    },
    Enhancement {
        name: "Lancers",
        description: "+3 Skirmish. Auto overrun on skirmish win.",
        target: CAV,
        bonuses: &[(Skirmish, 3)],
        tags: &[AutoOverrun],
    },
    Enhancement {
        name: "Life Guard",
        description: "+2 Rally. General reroll promotion once per battle.",
        target: CAV,
        bonuses: &[(Rally, 2)],
        tags: &[GeneralReroll],
    },
    Enhancement {
        name: "Officer Corps",
        description: "+2 Rally. General promotes on 5-6. Choose retreat direction.",
        target: CAV,
        bonuses: &[(Rally, 2)],
        tags: &[EasyPromotion, ChooseRetreat],
    },
];

pub static HEAVY_ENHANCEMENTS: &[Enhancement] = &[
    Enhancement {
        name: "Artillery Team",
        description: "+2 Defense. +1 Pitch. +1 Pitch when garrisoned. -1 defense to all enemies.",
        target: HEAVY,
        bonuses: &[(Defense, 2), (Pitch, 1)],
        tags: &[GarrisonBonus, EnemyDefenseReduction],
    },
    Enhancement {
        name: "Elite",
        description: "+1 Skirmish. +2 Defense. +1 Pitch. +1 Rally.",
        target: HEAVY,
        bonuses: &[(Skirmish, 1), (Defense, 2), (Pitch, 1), (Rally, 1)],
        tags: &[],
    },
    Enhancement {
        name: "Grenadiers",
        description: "+2 Skirmish. +2 Pitch. +1 Pitch in initial stage.",
        target: HEAVY,
        bonuses: &[(Skirmish, 2), (Pitch, 2)],
        tags: &[InitialPitchBonus],
    },
    Enhancement {
        name: "Line Infantry",
        description: "+1 Pitch. +1 Pitch per 2 friendly Line Infantry.",
        target: HEAVY,
        bonuses: &[(Pitch, 1)],
        tags: &[LineInfantryBonus],
    },
    Enhancement {
        name: "Pikes",
        description: "+4 Defense. +1 Pitch. +2 Pitch vs cavalry. Negates lancer overrun.",
        target: HEAVY,
        bonuses: &[(Defense, 4), (Pitch, 1)],
        tags: &[AntiCavalry],
    },
    Enhancement {
        name: "Stormtroopers",
        description: "+1 Pitch. +1 Rally. -1 terrain cost.",
        target: HEAVY,
        bonuses: &[(Pitch, 1), (Rally, 1)],
        tags: &[TerrainBonus],
    },
];

pub static LIGHT_ENHANCEMENTS: &[Enhancement] = &[
    Enhancement {
        name: "Assault Team",
        description: "+2 Skirmish. +1 Pitch. Select skirmish target. Negate garrison.",
        target: LIGHT,
        bonuses: &[(Skirmish, 2), (Pitch, 1)],
        tags: &[SelectTarget, NegateGarrison],
    },
    Enhancement {
        name: "Chasseurs",
        description: "+2 Skirmish. +2 Defense. +1 sight range.",
        target: LIGHT,
        bonuses: &[(Skirmish, 2), (Defense, 2)],
        tags: &[ExtendedSight],
    },
    Enhancement {
        name: "Commando",
        description: "+2 Defense. +1 Pitch. +1 Rally. Cannot be seen unless in battle.",
        target: LIGHT,
        bonuses: &[(Defense, 2), (Pitch, 1), (Rally, 1)],
        tags: &[Stealth],
    },
    Enhancement {
        name: "Fusiliers",
        description: "+1 Skirmish. +2 Defense. +2 Pitch.",
        target: LIGHT,
        bonuses: &[(Skirmish, 1), (Defense, 2), (Pitch, 2)],
        tags: &[],
    },
    Enhancement {
        name: "Rangers",
        description: "+2 Pitch. -2 terrain cost.",
        target: LIGHT,
        bonuses: &[(Pitch, 2)],
        tags: &[MajorTerrainBonus],
    },
    Enhancement {
        name: "Sharpshooters",
        description: "+2 Defense. +1 Pitch. +2 Pitch when garrisoned. Rout failed skirmishers.",
        target: LIGHT,
        bonuses: &[(Defense, 2), (Pitch, 1)],
        tags: &[GarrisonBonus, RoutSkirmishers],
    },
];

pub static SHIP_ENHANCEMENTS: &[Enhancement] = &[
    Enhancement {
        name: "Additional Firepower",
        description: "+2 Gunnery.",
        target: EnhancementTarget::Ship,
        bonuses: &[(Gunnery, 2)],
        tags: &[],
    },
    Enhancement {
        name: "Additional Propulsion",
        description: "+1 Maneuver.",
        target: EnhancementTarget::Ship,
        bonuses: &[(Maneuver, 1)],
        tags: &[],
    },
    Enhancement {
        name: "Marine Detachment",
        description: "+2 Boarding.",
        target: EnhancementTarget::Ship,
        bonuses: &[(Boarding, 2)],
        tags: &[],
    },
    Enhancement {
        name: "Reinforced Hulls",
        description: "+1 on damage rolls taken.",
        target: EnhancementTarget::Ship,
        bonuses: &[],
        tags: &[ReinforcedHulls],
    },
    Enhancement {
        name: "Camouflage",
        description: "Harder to spot at sea.",
        target: EnhancementTarget::Ship,
        bonuses: &[],
        tags: &[Camouflage],
    },
    Enhancement {
        name: "Debris Netting",
        description: "Catches splinters on deck.",
        target: EnhancementTarget::Ship,
        bonuses: &[],
        tags: &[DebrisNetting],
    },
    Enhancement {
        name: "Experienced Spotters",
        description: "+1 sight range at sea.",
        target: EnhancementTarget::Ship,
        bonuses: &[],
        tags: &[Spotters],
    },
    Enhancement {
        name: "False Flags",
        description: "Fly any national flag.",
        target: EnhancementTarget::Ship,
        bonuses: &[],
        tags: &[FalseFlags],
    },
];
