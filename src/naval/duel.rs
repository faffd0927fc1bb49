//! Ship-to-ship duel
//!
//! Each internal round: maneuver -> disengage check -> boarding at band 0,
//! otherwise gunnery and damage. The first ship of a pair prefers to close,
//! the second to open the range.

use serde::Serialize;

use crate::capability;
use crate::catalog::AbilityTag;
use crate::core::config::NavalRules;
use crate::core::error::Result;
use crate::dice::{Dice, RandomSource};
use crate::events::{BattleEventKind, EventSink, Narrator};
use crate::naval::fleet::{DamageEffect, Ship};

/// Widest range band; reaching it breaks the duel off
pub const MAX_BAND: u8 = 4;

/// Engagement distance, always within `0..=MAX_BAND`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RangeBand(u8);

impl RangeBand {
    pub const BOARDING: RangeBand = RangeBand(0);

    /// Clamp into the legal range
    pub fn new(band: u8) -> Self {
        Self(band.min(MAX_BAND))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_boarding(self) -> bool {
        self.0 == 0
    }

    pub fn is_disengaged(self) -> bool {
        self.0 >= MAX_BAND
    }

    /// One step closer; closing never goes below band 1
    pub fn closed(self) -> Self {
        if self.0 > 1 {
            Self(self.0 - 1)
        } else {
            self
        }
    }

    /// One step further out
    pub fn opened(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }
}

/// Position of a ship within a duel pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelSide {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelOutcome {
    Sunk { victor: DuelSide },
    Captured { victor: DuelSide },
    Disengaged, // Range opened to MAX_BAND
    Exhausted,  // Ran out of internal rounds
}

impl DuelOutcome {
    pub fn victor(&self) -> Option<DuelSide> {
        match *self {
            DuelOutcome::Sunk { victor } | DuelOutcome::Captured { victor } => Some(victor),
            DuelOutcome::Disengaged | DuelOutcome::Exhausted => None,
        }
    }

    /// Both ships break off and return to their pools
    pub fn both_retreat(&self) -> bool {
        self.victor().is_none()
    }
}

/// Outcome plus the range bands seen after each maneuver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelReport {
    pub outcome: DuelOutcome,
    pub rounds: u32,
    pub bands: Vec<u8>,
}

/// What a damage roll does to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    Glancing,
    Debuff(DamageEffect),
    Sunk,
}

/// Damage table; reinforced hulls add one to the roll
pub fn damage_result(roll: u32, reinforced: bool) -> DamageResult {
    let net = roll as i32 + i32::from(reinforced);
    match net {
        n if n >= 6 => DamageResult::Glancing,
        5 => DamageResult::Debuff(DamageEffect::BlastedDeck),
        4 => DamageResult::Debuff(DamageEffect::AmmunitionStrike),
        3 => DamageResult::Debuff(DamageEffect::RakingFire),
        2 => DamageResult::Debuff(DamageEffect::HullBreach),
        _ => DamageResult::Sunk,
    }
}

/// Range after a maneuver exchange; ties leave it unchanged
pub fn maneuver_result(band: RangeBand, first: i32, second: i32) -> RangeBand {
    if first > second {
        band.closed()
    } else if second > first {
        band.opened()
    } else {
        band
    }
}

/// Capturing side of a boarding action, if the margin is wide enough
pub fn boarding_result(first: i32, second: i32, margin: i32) -> Option<DuelSide> {
    if first >= second + margin {
        Some(DuelSide::First)
    } else if second >= first + margin {
        Some(DuelSide::Second)
    } else {
        None
    }
}

/// Fight a single duel outside a fleet battle
pub fn fight_duel<R, S>(
    first: &mut Ship,
    second: &mut Ship,
    rules: &NavalRules,
    rng: &mut R,
    sink: &mut S,
) -> Result<DuelReport>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    let mut dice = Dice::new(rng);
    let mut narrator = Narrator::new(sink);
    resolve_duel(first, second, rules, &mut dice, &mut narrator)
}

pub(crate) fn resolve_duel<R, S>(
    first: &mut Ship,
    second: &mut Ship,
    rules: &NavalRules,
    dice: &mut Dice<'_, R>,
    narrator: &mut Narrator<'_, S>,
) -> Result<DuelReport>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    narrator.log(
        BattleEventKind::DuelStarted {
            ship: first.id.clone(),
            opponent: second.id.clone(),
        },
        format!("Ship combat: {} vs {}", first.id, second.id),
    );

    let mut band = RangeBand::new(rules.opening_band);
    let mut bands = Vec::new();

    for round in 1..=rules.duel_rounds {
        let report = |outcome, bands| DuelReport {
            outcome,
            rounds: round,
            bands,
        };

        // Maneuver
        let m1 = dice.d6()? as i32 + capability::maneuver(first);
        let m2 = dice.d6()? as i32 + capability::maneuver(second);
        band = maneuver_result(band, m1, m2);
        bands.push(band.value());
        narrator.log(
            BattleEventKind::Maneuver { band: band.value() },
            format!(
                "Maneuver: {} ({m1}) vs {} ({m2}), range {}",
                first.id,
                second.id,
                band.value()
            ),
        );

        if band.is_disengaged() {
            narrator.log(BattleEventKind::Disengaged, "Ships disengage".into());
            return Ok(report(DuelOutcome::Disengaged, bands));
        }

        if band.is_boarding() {
            let b1 = dice.d6()? as i32 + capability::boarding(first);
            let b2 = dice.d6()? as i32 + capability::boarding(second);
            narrator.log(
                BattleEventKind::Boarding,
                format!("Boarding: {} ({b1}) vs {} ({b2})", first.id, second.id),
            );

            match boarding_result(b1, b2, rules.boarding_margin) {
                Some(victor) => {
                    let (taker, prize) = match victor {
                        DuelSide::First => (&first.id, &second.id),
                        DuelSide::Second => (&second.id, &first.id),
                    };
                    narrator.log(
                        BattleEventKind::ShipCaptured {
                            ship: prize.clone(),
                        },
                        format!("{taker} captures {prize}"),
                    );
                    return Ok(report(DuelOutcome::Captured { victor }, bands));
                }
                None => {
                    narrator.note("Boarding fails, combat continues".into());
                    continue;
                }
            }
        }

        // Gunnery
        let g1 = dice.d6()? as i32 + capability::gunnery(first, band.value());
        let g2 = dice.d6()? as i32 + capability::gunnery(second, band.value());
        let hit1 = g1 >= rules.hit_target;
        let hit2 = g2 >= rules.hit_target;
        narrator.log(
            BattleEventKind::Gunnery,
            format!(
                "Gunnery: {} ({g1}) {}, {} ({g2}) {}",
                first.id,
                if hit1 { "HIT" } else { "MISS" },
                second.id,
                if hit2 { "HIT" } else { "MISS" }
            ),
        );

        if hit1 && take_damage(second, dice, narrator)? {
            let outcome = DuelOutcome::Sunk {
                victor: DuelSide::First,
            };
            return Ok(report(outcome, bands));
        }
        if hit2 && take_damage(first, dice, narrator)? {
            let outcome = DuelOutcome::Sunk {
                victor: DuelSide::Second,
            };
            return Ok(report(outcome, bands));
        }
    }

    Ok(DuelReport {
        outcome: DuelOutcome::Exhausted,
        rounds: rules.duel_rounds,
        bands,
    })
}

/// Roll damage against `target`; returns true when it sinks
fn take_damage<R, S>(
    target: &mut Ship,
    dice: &mut Dice<'_, R>,
    narrator: &mut Narrator<'_, S>,
) -> Result<bool>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    let roll = dice.d6()?;
    let reinforced = target.enhancement.has(AbilityTag::ReinforcedHulls);

    match damage_result(roll, reinforced) {
        DamageResult::Glancing => {
            narrator.note(format!("{}: glancing blow", target.id));
            Ok(false)
        }
        DamageResult::Debuff(effect) => {
            target.damage_effects.push(effect);
            narrator.log(
                BattleEventKind::Damage {
                    ship: target.id.clone(),
                    effect: effect.name().to_string(),
                },
                format!("{}: {effect}", target.id),
            );
            Ok(false)
        }
        DamageResult::Sunk => {
            narrator.log(
                BattleEventKind::ShipSunk {
                    ship: target.id.clone(),
                },
                format!("{}: SUNK", target.id),
            );
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;
    use crate::events::{BattleEventLog, NullSink};

    #[test]
    fn test_band_clamps() {
        assert_eq!(RangeBand::new(9).value(), MAX_BAND);
        assert_eq!(RangeBand::new(MAX_BAND).opened().value(), MAX_BAND);
        assert_eq!(RangeBand::BOARDING.closed(), RangeBand::BOARDING);
    }

    #[test]
    fn test_closing_stops_at_one() {
        let one = RangeBand::new(1);
        assert_eq!(one.closed(), one);
        assert_eq!(RangeBand::new(2).closed(), one);
        assert_eq!(RangeBand::BOARDING.opened(), one);
    }

    #[test]
    fn test_maneuver_tie_keeps_band() {
        let band = RangeBand::new(2);
        assert_eq!(maneuver_result(band, 4, 4), band);
        assert_eq!(maneuver_result(band, 5, 4).value(), 1);
        assert_eq!(maneuver_result(band, 4, 5).value(), 3);
    }

    #[test]
    fn test_damage_table() {
        assert_eq!(damage_result(6, false), DamageResult::Glancing);
        assert_eq!(
            damage_result(5, false),
            DamageResult::Debuff(DamageEffect::BlastedDeck)
        );
        assert_eq!(
            damage_result(2, false),
            DamageResult::Debuff(DamageEffect::HullBreach)
        );
        assert_eq!(damage_result(1, false), DamageResult::Sunk);
        // Reinforced hulls turn a sinking roll into a breach
        assert_eq!(
            damage_result(1, true),
            DamageResult::Debuff(DamageEffect::HullBreach)
        );
        assert_eq!(damage_result(5, true), DamageResult::Glancing);
    }

    #[test]
    fn test_boarding_margin() {
        assert_eq!(boarding_result(5, 3, 3), None);
        assert_eq!(boarding_result(6, 3, 3), Some(DuelSide::First));
        assert_eq!(boarding_result(1, 4, 3), Some(DuelSide::Second));
    }

    #[test]
    fn test_all_ties_retreat_after_five_rounds() {
        let mut a = Ship::new("a");
        let mut b = Ship::new("b");
        // Maneuver ties, gunnery 3 + 1 misses
        let mut source = ScriptedSource::new([3; 20]);

        let report =
            fight_duel(&mut a, &mut b, &NavalRules::default(), &mut source, &mut NullSink).unwrap();

        assert_eq!(report.outcome, DuelOutcome::Exhausted);
        assert!(report.outcome.both_retreat());
        assert_eq!(report.rounds, 5);
        assert_eq!(report.bands, vec![2; 5]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_opening_range_disengages() {
        let mut a = Ship::new("a");
        let mut b = Ship::new("b");
        // b wins maneuver: 2 -> 3, gunnery misses; b wins again: 3 -> 4
        let mut source = ScriptedSource::new([1, 6, 1, 1, 1, 6]);
        let mut log = BattleEventLog::new();

        let report =
            fight_duel(&mut a, &mut b, &NavalRules::default(), &mut source, &mut log).unwrap();

        assert_eq!(report.outcome, DuelOutcome::Disengaged);
        assert_eq!(report.bands, vec![3, 4]);
        assert_eq!(log.count(|k| matches!(k, BattleEventKind::Disengaged)), 1);
    }

    #[test]
    fn test_first_hit_sinks_before_return_fire() {
        let mut a = Ship::new("a");
        let mut b = Ship::new("b");
        // tie, a hits (6 + 1), b would hit (6 + 1), damage 1 sinks b
        let mut source = ScriptedSource::new([3, 3, 6, 6, 1]);

        let report =
            fight_duel(&mut a, &mut b, &NavalRules::default(), &mut source, &mut NullSink).unwrap();

        assert_eq!(
            report.outcome,
            DuelOutcome::Sunk {
                victor: DuelSide::First
            }
        );
        assert!(a.damage_effects.is_empty());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_damage_recorded_on_target() {
        let mut a = Ship::new("a");
        let mut b = Ship::new("b");
        // tie, both hit, b takes raking fire, a takes a hull breach,
        // then b opens twice to disengage
        let mut source = ScriptedSource::new([3, 3, 6, 6, 3, 2, 1, 6, 1, 1, 1, 6]);

        let report =
            fight_duel(&mut a, &mut b, &NavalRules::default(), &mut source, &mut NullSink).unwrap();

        assert_eq!(report.outcome, DuelOutcome::Disengaged);
        assert_eq!(b.damage_effects, vec![DamageEffect::RakingFire]);
        assert_eq!(a.damage_effects, vec![DamageEffect::HullBreach]);
    }

    #[test]
    fn test_marines_never_close_past_one() {
        let mut marines = Ship::new("m").with_enhancement("Marine Detachment").unwrap();
        let mut b = Ship::new("b");
        // Marines win every maneuver; gunnery 1 + 2 misses
        let mut source = ScriptedSource::new([6, 1, 1, 1].repeat(5));

        let report =
            fight_duel(&mut marines, &mut b, &NavalRules::default(), &mut source, &mut NullSink)
                .unwrap();

        assert_eq!(report.outcome, DuelOutcome::Exhausted);
        assert_eq!(report.bands, vec![1; 5]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_boarding_from_opening_band_zero() {
        let rules = NavalRules {
            opening_band: 0,
            ..NavalRules::default()
        };
        let mut marines = Ship::new("m").with_enhancement("Marine Detachment").unwrap();
        let mut b = Ship::new("b");
        let mut source = ScriptedSource::new([
            3, 3, // tie, stay at 0
            1, 1, // boarding 1 + 2 vs 1: margin 2 fails
            3, 3, // tie, stay at 0
            2, 1, // boarding 2 + 2 vs 1: margin 3 captures
        ]);

        let report = fight_duel(&mut marines, &mut b, &rules, &mut source, &mut NullSink).unwrap();

        assert_eq!(
            report.outcome,
            DuelOutcome::Captured {
                victor: DuelSide::First
            }
        );
        assert_eq!(report.bands, vec![0, 0]);
        assert_eq!(report.rounds, 2);
    }
}
