//! Situational bonuses for units and commanders
//!
//! Every bonus is additive: base by type, plus the enhancement (zero when the
//! slot is empty), plus status adjustments. Nothing here fails or mutates.

use crate::battle::constants::{
    FATIGUE_PENALTY, FLAGSHIP_BONUS, GARRISON_DEFENSE_BONUS, GARRISON_RALLY_BONUS,
};
use crate::battle::units::{Brigade, General};
use crate::catalog::{AbilityTag, BonusCategory};
use crate::naval::fleet::Ship;

fn fatigue(brigade: &Brigade) -> i32 {
    if brigade.fatigued {
        FATIGUE_PENALTY
    } else {
        0
    }
}

pub fn skirmish(brigade: &Brigade) -> i32 {
    brigade.brigade_type.default_properties().skirmish
        + brigade.enhancement.bonus(BonusCategory::Skirmish)
        - fatigue(brigade)
}

pub fn defense(brigade: &Brigade) -> i32 {
    let garrison = if brigade.garrisoned {
        GARRISON_DEFENSE_BONUS
    } else {
        0
    };
    brigade.brigade_type.default_properties().defense
        + brigade.enhancement.bonus(BonusCategory::Defense)
        + garrison
        - fatigue(brigade)
}

pub fn pitch(brigade: &Brigade) -> i32 {
    brigade.brigade_type.default_properties().pitch
        + brigade.enhancement.bonus(BonusCategory::Pitch)
        - fatigue(brigade)
}

pub fn rally(brigade: &Brigade) -> i32 {
    let garrison = if brigade.garrisoned {
        GARRISON_RALLY_BONUS
    } else {
        0
    };
    brigade.brigade_type.default_properties().rally
        + brigade.enhancement.bonus(BonusCategory::Rally)
        + garrison
        - fatigue(brigade)
}

/// General's contribution to the pitch; level, doubled by Brilliant
pub fn general_pitch(general: &General) -> i32 {
    let level = general.level as i32;
    if general.trait_.has(AbilityTag::DoublePitch) {
        level * 2
    } else {
        level
    }
}

fn flagship(ship: &Ship) -> i32 {
    if ship.is_flagship {
        FLAGSHIP_BONUS
    } else {
        0
    }
}

pub fn maneuver(ship: &Ship) -> i32 {
    ship.enhancement.bonus(BonusCategory::Maneuver) + flagship(ship)
}

/// Gunnery at a range band; closer bands hit harder
pub fn gunnery(ship: &Ship, band: u8) -> i32 {
    let range = match band {
        1 => 2,
        2 => 1,
        _ => 0,
    };
    range + ship.enhancement.bonus(BonusCategory::Gunnery) + flagship(ship)
}

pub fn boarding(ship: &Ship) -> i32 {
    ship.enhancement.bonus(BonusCategory::Boarding) + flagship(ship)
}
