use super::AbilityTag::*;
use super::BonusCategory::*;
use super::{CommanderTrait, TraitRole};

const fn general(
    name: &'static str,
    description: &'static str,
    bonuses: &'static [(super::BonusCategory, i32)],
    tags: &'static [super::AbilityTag],
) -> CommanderTrait {
    CommanderTrait {
        name,
        description,
        role: TraitRole::General,
        bonuses,
        tags,
    }
}

const fn admiral(
    name: &'static str,
    description: &'static str,
    bonuses: &'static [(super::BonusCategory, i32)],
    tags: &'static [super::AbilityTag],
) -> CommanderTrait {
    CommanderTrait {
        name,
        description,
        role: TraitRole::Admiral,
        bonuses,
        tags,
    }
}

pub static GENERAL_TRAITS: &[CommanderTrait] = &[
    general("Ambitious", "-1 to promotion number", &[], &[EasyPromotion]),
    general("Bold", "+2 Skirmish to all brigades", &[(Skirmish, 2)], &[]),
    general("Brilliant", "Double general level in pitch", &[], &[DoublePitch]),
    general("Brutal", "Double pillaging resources, enhanced sacking", &[], &[BrutalPillaging]),
    general("Cautious", "May skip skirmishing stage", &[], &[SkipSkirmish]),
    general("Chivalrous", "Enemy rolls 1-2 on destruction", &[], &[Chivalrous]),
    general("Clever", "+1 Pitch and Skirmish for Light Brigades", &[], &[LightBonus]),
    general("Defiant", "+1 Rally for all brigades", &[(Rally, 1)], &[]),
    general("Disciplined", "+1 Pitch for all brigades", &[(Pitch, 1)], &[]),
    general("Elusive", "Retreat after skirmish once per week", &[], &[TacticalRetreat]),
    general("Flamboyant", "+1 Skirmish and Rally for Cavalry", &[], &[CavalryBonus]),
    general("Inspiring", "Free reroll on rally rolls", &[], &[RallyReroll]),
    general("Judicious", "+1 Pitch and Rally for Heavy Brigades", &[], &[HeavyBonus]),
    general("Lucky", "Reroll promotion die on 1", &[], &[LuckyReroll]),
    general("Merciless", "Enemies destroyed on 1-4 instead of 1-3", &[], &[Merciless]),
    general("Prodigious", "Starts with additional level", &[], &[BonusLevel]),
    general("Relentless", "May pursue retreating enemies", &[], &[Pursuit]),
    general("Resolute", "+4 Defense for all brigades", &[(Defense, 4)], &[]),
    general("Wary", "Alert when seen, reveal enemy traits", &[], &[EnhancedAwareness]),
    general("Zealous", "+1 Pitch and Rally during Holy War", &[], &[HolyWarBonus]),
];

pub static ADMIRAL_TRAITS: &[CommanderTrait] = &[
    admiral(
        "Dauntless",
        "+1 Boarding, bonus victory on boarding win",
        &[(Boarding, 1)],
        &[BoardingBonus],
    ),
    admiral("Implacable", "Chase retreating ships for second battle", &[], &[Pursuit]),
    admiral("Privateer", "Piracy with national flags", &[], &[EnhancedPiracy]),
    admiral("Raider", "Pillage coastal tiles with armada", &[], &[CoastalRaiding]),
    admiral("Stoic", "Fight 2 additional gunnery rounds", &[], &[ExtendedCombat]),
    admiral("Multilingual", "Fly any national flag", &[], &[FalseFlags]),
    admiral("Daring", "+1 combat width", &[], &[IncreasedWidth]),
    admiral("Experienced", "+1 on all Maneuver rolls", &[(Maneuver, 1)], &[]),
    admiral("Accurate", "+1 on all Gunnery rolls", &[(Gunnery, 1)], &[]),
    admiral("Wary", "Alert when seen, reveal enemy traits", &[], &[EnhancedAwareness]),
];
