//! Combat resolution arithmetic
//!
//! Dice are rolled by the caller; these functions only compare totals, so
//! the same rolls always produce the same outcome.

use crate::battle::units::{Brigade, General};
use crate::capability;
use crate::catalog::AbilityTag;
use crate::core::config::LandRules;

/// Result of one skirmisher attacking one enemy brigade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkirmishResult {
    pub attacker_total: i32,
    pub defender_total: i32,
    pub routs: bool,
    pub overrun: bool,
}

impl SkirmishResult {
    pub fn margin(&self) -> i32 {
        self.attacker_total - self.defender_total
    }
}

/// Compare skirmish against defense
///
/// A strict win routs the defender. A wide enough win, or any win by a
/// brigade with auto-overrun, triggers an overrun roll unless pikes are
/// facing cavalry.
pub fn resolve_skirmish(
    attacker: &Brigade,
    defender: &Brigade,
    attack_roll: u32,
    defense_roll: u32,
    rules: &LandRules,
) -> SkirmishResult {
    let attacker_total = attack_roll as i32 + capability::skirmish(attacker);
    let defender_total = defense_roll as i32 + capability::defense(defender);
    let margin = attacker_total - defender_total;
    let routs = margin > 0;

    let wide = margin >= rules.overrun_margin || attacker.enhancement.has(AbilityTag::AutoOverrun);
    let braced = attacker.is_cavalry() && defender.enhancement.has(AbilityTag::AntiCavalry);

    SkirmishResult {
        attacker_total,
        defender_total,
        routs,
        overrun: routs && wide && !braced,
    }
}

/// Pitch total for one side: dice, brigade pitch bonuses and the general
pub fn pitch_total<'b>(
    rolls: &[u32],
    brigades: impl IntoIterator<Item = &'b Brigade>,
    general: &General,
) -> i32 {
    let dice: i32 = rolls.iter().map(|&r| r as i32).sum();
    let bonuses: i32 = brigades.into_iter().map(capability::pitch).sum();
    dice + bonuses + capability::general_pitch(general)
}

/// Signed pitch result; positive favours the positive side
pub fn pitch_result(positive_total: i32, negative_total: i32) -> i32 {
    positive_total - negative_total
}

/// Raise a general one level, capped; returns the new level
pub fn promote(general: &mut General, max_level: u32) -> u32 {
    general.level = (general.level + 1).min(max_level);
    general.level
}
