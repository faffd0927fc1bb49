//! Land battle execution loop
//!
//! terrain -> sides -> each round: [skirmish (round 1)] -> roster check ->
//! pitch -> tally check -> rally -> roster check

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use ahash::AHashSet;
use serde::Serialize;

use crate::battle::constants::{LOST_BRIGADE_ROLL, PROMOTION_REROLL_ON};
use crate::battle::morale::{check_rally, process_rout};
use crate::battle::resolution::{pitch_result, pitch_total, promote, resolve_skirmish};
use crate::battle::terrain::{LandTerrainProfile, Terrain, TerrainEffect};
use crate::battle::units::Army;
use crate::capability;
use crate::core::config::{EngineConfig, LandRules};
use crate::core::error::{EngineError, Result};
use crate::core::types::{CommanderId, ForceId, Round, UnitId};
use crate::dice::{Dice, RandomSource};
use crate::events::{BattleEventKind, EventSink, Narrator};

/// How a land battle was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryKind {
    PitchTally,      // Decisive running tally
    RosterExhausted, // Enemy line emptied
}

/// Battle outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory {
        winner: ForceId,
        loser: ForceId,
        kind: VictoryKind,
    },
    Stalemate,
}

impl BattleOutcome {
    pub fn winner(&self) -> Option<&ForceId> {
        match self {
            BattleOutcome::Victory { winner, .. } => Some(winner),
            BattleOutcome::Stalemate => None,
        }
    }

    pub fn loser(&self) -> Option<&ForceId> {
        match self {
            BattleOutcome::Victory { loser, .. } => Some(loser),
            BattleOutcome::Stalemate => None,
        }
    }

    pub fn is_stalemate(&self) -> bool {
        matches!(self, BattleOutcome::Stalemate)
    }

    /// Winner id, or "Stalemate"
    pub fn winner_label(&self) -> String {
        self.winner().map_or_else(|| "Stalemate".to_string(), ToString::to_string)
    }

    /// Loser id, or "Stalemate"
    pub fn loser_label(&self) -> String {
        self.loser().map_or_else(|| "Stalemate".to_string(), ToString::to_string)
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Victory { winner, loser, kind } => {
                write!(f, "{winner} defeats {loser} ({kind:?})")
            }
            BattleOutcome::Stalemate => f.write_str("Stalemate"),
        }
    }
}

/// Immutable record of a finished land battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Brigades cashiered in the action report, keyed by army
    pub casualties: BTreeMap<ForceId, Vec<UnitId>>,
    pub captured_generals: Vec<CommanderId>,
    pub promoted_generals: Vec<CommanderId>,
    /// Brigades destroyed by an overrun during the skirmish
    pub destroyed_in_overrun: Vec<UnitId>,
    pub rounds: Round,
    pub final_tally: i32,
    pub terrain: Terrain,
}

/// Resolve a land battle with the published rules
pub fn resolve_land_battle<R, S>(
    army_a: &mut Army,
    army_b: &mut Army,
    terrain: Terrain,
    rng: &mut R,
    sink: &mut S,
) -> Result<BattleResult>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    resolve_land_battle_with(&EngineConfig::default(), army_a, army_b, terrain, rng, sink)
}

/// Resolve a land battle under a custom rule set
///
/// Routed flags, general levels and capture flags are updated in place.
pub fn resolve_land_battle_with<R, S>(
    config: &EngineConfig,
    army_a: &mut Army,
    army_b: &mut Army,
    terrain: Terrain,
    rng: &mut R,
    sink: &mut S,
) -> Result<BattleResult>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    army_a.validate()?;
    army_b.validate()?;
    if army_a.id == army_b.id {
        return Err(EngineError::invalid_input(format!(
            "both armies are named '{}'",
            army_a.id
        )));
    }
    let profile = config.terrain.land(terrain)?;

    let span = tracing::info_span!("land_battle", %terrain, a = %army_a.id, b = %army_b.id);
    let _enter = span.enter();

    let battle = LandBattle {
        armies: [army_a, army_b],
        rules: &config.land,
        profile,
        terrain,
        dice: Dice::new(rng),
        narrator: Narrator::new(sink),
        active: [Vec::new(), Vec::new()],
        engaged: [AHashSet::new(), AHashSet::new()],
        positive: 0,
        tally: 0,
        round: 0,
        destroyed: Vec::new(),
    };
    battle.run()
}

/// Per-battle state; side 0 is the first army, side 1 the second
struct LandBattle<'a, R: RandomSource + ?Sized, S: EventSink + ?Sized> {
    armies: [&'a mut Army; 2],
    rules: &'a LandRules,
    profile: &'a LandTerrainProfile,
    terrain: Terrain,
    dice: Dice<'a, R>,
    narrator: Narrator<'a, S>,

    // Roster indices on the line this round
    active: [Vec<usize>; 2],
    // Roster indices that were ever on the line
    engaged: [AHashSet<usize>; 2],

    positive: usize,
    tally: i32,
    round: Round,
    destroyed: Vec<UnitId>,
}

impl<'a, R: RandomSource + ?Sized, S: EventSink + ?Sized> LandBattle<'a, R, S> {
    fn run(mut self) -> Result<BattleResult> {
        self.narrator.log(
            BattleEventKind::BattleStarted,
            format!(
                "Land battle on {}: {} ({} brigades) vs {} ({} brigades), combat width {}",
                self.terrain,
                self.armies[0].general.name,
                self.armies[0].brigades.len(),
                self.armies[1].general.name,
                self.armies[1].brigades.len(),
                self.profile.combat_width
            ),
        );

        self.phase_terrain()?;
        for side in 0..2 {
            let line = self.front_line(side);
            self.engage(side, &line);
            self.active[side] = line;
        }
        self.assign_sides()?;

        while self.round < self.rules.max_rounds {
            self.round += 1;
            self.narrator.round = self.round;
            self.narrator
                .log(BattleEventKind::RoundStarted, format!("--- Round {} ---", self.round));

            if self.round == 1 {
                self.phase_skirmish()?;
            }

            self.drop_routed();
            if let Some(loser) = self.exhausted_side() {
                return Ok(self.finish_exhausted(loser));
            }

            let result = self.phase_pitch()?;
            self.tally += result;
            self.narrator.log(
                BattleEventKind::PitchResolved {
                    result,
                    tally: self.tally,
                },
                format!("Pitch result {result}, tally {}", self.tally),
            );

            if let Some(winner) = self.check_decisive() {
                return self.phase_resolution(winner);
            }

            self.phase_rally()?;
            if let Some(loser) = self.exhausted_side() {
                return Ok(self.finish_exhausted(loser));
            }

            // The tally carries over from round 1 only
            if self.round > 1 {
                self.tally = 0;
            }
        }

        Ok(self.finish_stalemate())
    }

    /// First `combat_width` standing brigades in roster order
    fn front_line(&self, side: usize) -> Vec<usize> {
        self.armies[side]
            .brigades
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.routed)
            .map(|(i, _)| i)
            .take(self.profile.combat_width)
            .collect()
    }

    fn engage(&mut self, side: usize, line: &[usize]) {
        self.engaged[side].extend(line.iter().copied());
    }

    fn phase_terrain(&mut self) -> Result<()> {
        if !self.profile.has(TerrainEffect::LostBrigades) {
            return Ok(());
        }
        tracing::debug!("Terrain phase: brigades may get lost");

        for side in 0..2 {
            for i in 0..self.armies[side].brigades.len() {
                if self.dice.d6()? == LOST_BRIGADE_ROLL {
                    let brigade = &mut self.armies[side].brigades[i];
                    process_rout(brigade);
                    let unit = brigade.id.clone();
                    self.narrator.log(
                        BattleEventKind::UnitLost { unit: unit.clone() },
                        format!("{unit} gets lost in the {}", self.terrain),
                    );
                }
            }
        }
        Ok(())
    }

    fn assign_sides(&mut self) -> Result<()> {
        self.positive = if self.dice.coin()? { 0 } else { 1 };
        let positive = self.armies[self.positive].id.clone();
        let negative = &self.armies[1 - self.positive];
        self.narrator.log(
            BattleEventKind::SideAssigned {
                positive: positive.clone(),
            },
            format!("Positive side: {positive}, negative side: {}", negative.id),
        );
        Ok(())
    }

    /// Best skirmishers on the line; ties keep roster order
    fn skirmishers(&self, side: usize) -> Vec<usize> {
        let brigades = &self.armies[side].brigades;
        let mut line = self.active[side].clone();
        line.sort_by_key(|&i| Reverse(capability::skirmish(&brigades[i])));
        line.truncate(self.rules.skirmishers_per_side);
        line
    }

    fn phase_skirmish(&mut self) -> Result<()> {
        tracing::debug!(round = self.round, "Skirmish phase");
        self.narrator.log(
            BattleEventKind::PhaseStarted {
                phase: "skirmish".into(),
            },
            "=== SKIRMISH PHASE ===".into(),
        );

        // Both sides pick skirmishers before anyone is routed
        let picks = [self.skirmishers(0), self.skirmishers(1)];
        for (side, skirmishers) in picks.into_iter().enumerate() {
            let enemy = 1 - side;
            for attacker in skirmishers {
                if self.active[enemy].is_empty() {
                    break;
                }
                let target = self.dice.pick(self.active[enemy].len())?;
                let defender = self.active[enemy][target];
                self.skirmish(side, attacker, defender)?;
            }
        }
        Ok(())
    }

    fn skirmish(&mut self, side: usize, attacker: usize, defender: usize) -> Result<()> {
        let enemy = 1 - side;
        let attack_roll = self.dice.d6()?;
        let defense_roll = self.dice.d6()?;

        let result = resolve_skirmish(
            &self.armies[side].brigades[attacker],
            &self.armies[enemy].brigades[defender],
            attack_roll,
            defense_roll,
            self.rules,
        );
        let attacker_id = self.armies[side].brigades[attacker].id.clone();
        let defender_id = self.armies[enemy].brigades[defender].id.clone();

        self.narrator.log(
            BattleEventKind::Skirmish {
                attacker: attacker_id.clone(),
                defender: defender_id.clone(),
            },
            format!(
                "Skirmish: {attacker_id} ({}) vs {defender_id} ({})",
                result.attacker_total, result.defender_total
            ),
        );

        if !result.routs {
            return Ok(());
        }
        process_rout(&mut self.armies[enemy].brigades[defender]);
        self.narrator.log(
            BattleEventKind::UnitRouted {
                unit: defender_id.clone(),
            },
            format!("{defender_id} is routed"),
        );

        if result.overrun {
            let roll = self.dice.d6()?;
            let destroyed = roll <= self.rules.overrun_destroy_max;
            self.narrator.log(
                BattleEventKind::Overrun {
                    unit: defender_id.clone(),
                    destroyed,
                },
                if destroyed {
                    format!("Overrun! {defender_id} rolls {roll} and is destroyed")
                } else {
                    format!("Overrun! {defender_id} rolls {roll} and escapes")
                },
            );
            if destroyed {
                self.destroyed.push(defender_id);
            }
        }
        Ok(())
    }

    fn drop_routed(&mut self) {
        for side in 0..2 {
            let brigades = &self.armies[side].brigades;
            self.active[side].retain(|&i| !brigades[i].routed);
        }
    }

    fn exhausted_side(&self) -> Option<usize> {
        (0..2).find(|&side| self.active[side].is_empty())
    }

    fn side_pitch(&mut self, side: usize) -> Result<i32> {
        let rolls = self.dice.d6s(self.active[side].len())?;
        let army = &*self.armies[side];
        let total = pitch_total(
            &rolls,
            self.active[side].iter().map(|&i| &army.brigades[i]),
            &army.general,
        );
        let name = army.general.name.clone();
        self.narrator
            .note(format!("{name}: rolls {rolls:?}, total {total}"));
        Ok(total)
    }

    fn phase_pitch(&mut self) -> Result<i32> {
        tracing::debug!(round = self.round, tally = self.tally, "Pitch phase");
        self.narrator.log(
            BattleEventKind::PhaseStarted {
                phase: "pitch".into(),
            },
            "=== PITCH PHASE ===".into(),
        );

        let positive = self.side_pitch(self.positive)?;
        let negative = self.side_pitch(1 - self.positive)?;
        Ok(pitch_result(positive, negative))
    }

    fn check_decisive(&self) -> Option<usize> {
        if self.tally >= self.rules.decisive_tally {
            Some(self.positive)
        } else if self.tally <= -self.rules.decisive_tally {
            Some(1 - self.positive)
        } else {
            None
        }
    }

    fn phase_rally(&mut self) -> Result<()> {
        tracing::debug!(round = self.round, "Rally phase");
        self.narrator.log(
            BattleEventKind::PhaseStarted {
                phase: "rally".into(),
            },
            "=== RALLY PHASE ===".into(),
        );

        let penalty = self.profile.has(TerrainEffect::RallyPenalty);
        let mut held: [Vec<usize>; 2] = [Vec::new(), Vec::new()];

        for side in 0..2 {
            for idx in 0..self.active[side].len() {
                let i = self.active[side][idx];
                let roll = self.dice.d6()?;
                let brigade = &mut self.armies[side].brigades[i];
                let check = check_rally(brigade, roll, penalty, self.rules.rally_target);
                let unit = brigade.id.clone();

                if check.stays {
                    held[side].push(i);
                    self.narrator.log(
                        BattleEventKind::UnitRallied { unit: unit.clone() },
                        format!("{unit} rally roll {}: stays in battle", check.net),
                    );
                } else {
                    process_rout(brigade);
                    self.narrator.log(
                        BattleEventKind::UnitRouted { unit: unit.clone() },
                        format!("{unit} rally roll {}: routs", check.net),
                    );
                }
            }
        }

        if !self.profile.has(TerrainEffect::NoReinforcements) {
            for side in 0..2 {
                let needed = self.profile.combat_width.saturating_sub(held[side].len());
                if needed == 0 {
                    continue;
                }
                let reserve: Vec<usize> = self.armies[side]
                    .brigades
                    .iter()
                    .enumerate()
                    .filter(|(i, b)| !b.routed && !self.active[side].contains(i))
                    .map(|(i, _)| i)
                    .take(needed)
                    .collect();

                let force = self.armies[side].id.clone();
                self.narrator.log(
                    BattleEventKind::Reinforced {
                        force: force.clone(),
                        count: reserve.len(),
                    },
                    format!("{force} brings in {} reinforcements", reserve.len()),
                );
                self.engage(side, &reserve);
                held[side].extend(reserve);
            }
        }

        self.active = held;
        Ok(())
    }

    fn phase_resolution(mut self, winner: usize) -> Result<BattleResult> {
        let loser = 1 - winner;
        tracing::debug!(winner = %self.armies[winner].id, tally = self.tally, "Decisive tally");
        self.narrator.log(
            BattleEventKind::PhaseStarted {
                phase: "action_report".into(),
            },
            format!("Decisive victory for {}", self.armies[winner].general.name),
        );

        let mut casualties = BTreeMap::new();
        for (side, max_roll) in [
            (winner, self.rules.winner_casualty_max),
            (loser, self.rules.loser_casualty_max),
        ] {
            let mut lost = Vec::new();
            for i in 0..self.armies[side].brigades.len() {
                let brigade = &self.armies[side].brigades[i];
                if brigade.routed || !self.engaged[side].contains(&i) {
                    continue;
                }
                let unit = brigade.id.clone();
                let roll = self.dice.d6()?;
                if roll <= max_roll {
                    self.narrator.log(
                        BattleEventKind::Casualty { unit: unit.clone() },
                        format!("Casualty: {unit} (rolled {roll})"),
                    );
                    lost.push(unit);
                }
            }
            casualties.insert(self.armies[side].id.clone(), lost);
        }

        let mut captured_generals = Vec::new();
        let mut promoted_generals = Vec::new();

        let mut roll = self.dice.d6()?;
        if roll == PROMOTION_REROLL_ON {
            self.narrator
                .note(format!("{} rolled {roll}, rerolling", self.armies[winner].general.name));
            roll = self.dice.d6()?;
        }
        if roll == self.rules.promotion_roll {
            promoted_generals.push(self.promote(winner));
        }

        let roll = self.dice.d6()?;
        if roll == self.rules.capture_roll {
            let general = &mut self.armies[loser].general;
            general.captured = true;
            let id = general.id.clone();
            let name = general.name.clone();
            self.narrator.log(
                BattleEventKind::GeneralCaptured {
                    general: id.clone(),
                },
                format!("{name} is captured"),
            );
            captured_generals.push(id);
        } else if roll == self.rules.promotion_roll {
            promoted_generals.push(self.promote(loser));
        }

        let outcome = BattleOutcome::Victory {
            winner: self.armies[winner].id.clone(),
            loser: self.armies[loser].id.clone(),
            kind: VictoryKind::PitchTally,
        };
        Ok(self.finish(outcome, casualties, captured_generals, promoted_generals))
    }

    fn promote(&mut self, side: usize) -> CommanderId {
        let general = &mut self.armies[side].general;
        let level = promote(general, self.rules.max_general_level);
        let id = general.id.clone();
        let name = general.name.clone();
        self.narrator.log(
            BattleEventKind::GeneralPromoted {
                general: id.clone(),
                level,
            },
            format!("{name} promoted to level {level}"),
        );
        id
    }

    fn finish_exhausted(mut self, loser: usize) -> BattleResult {
        let winner = 1 - loser;
        let force = self.armies[loser].id.clone();
        tracing::debug!(loser = %force, round = self.round, "Line broken");
        self.narrator.log(
            BattleEventKind::LineBroken {
                force: force.clone(),
            },
            format!("{force} has no active brigades remaining"),
        );

        let casualties = BTreeMap::from([
            (self.armies[0].id.clone(), Vec::new()),
            (self.armies[1].id.clone(), Vec::new()),
        ]);
        let outcome = BattleOutcome::Victory {
            winner: self.armies[winner].id.clone(),
            loser: force,
            kind: VictoryKind::RosterExhausted,
        };
        self.finish(outcome, casualties, Vec::new(), Vec::new())
    }

    fn finish_stalemate(self) -> BattleResult {
        self.finish(BattleOutcome::Stalemate, BTreeMap::new(), Vec::new(), Vec::new())
    }

    fn finish(
        mut self,
        outcome: BattleOutcome,
        casualties: BTreeMap<ForceId, Vec<UnitId>>,
        captured_generals: Vec<CommanderId>,
        promoted_generals: Vec<CommanderId>,
    ) -> BattleResult {
        tracing::info!(rounds = self.round, "Land battle finished: {}", outcome);
        self.narrator
            .log(BattleEventKind::BattleEnded, format!("Battle ends: {outcome}"));

        BattleResult {
            outcome,
            casualties,
            captured_generals,
            promoted_generals,
            destroyed_in_overrun: self.destroyed,
            rounds: self.round,
            final_tally: self.tally,
            terrain: self.terrain,
        }
    }
}
