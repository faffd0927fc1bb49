//! Fleet battle loop
//!
//! Each round: active ships -> random pairings -> duels -> tally. The battle
//! is decided the moment one side's victories strictly exceed half the
//! terrain's victory limit.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::battle::terrain::{SeaTerrain, SeaTerrainProfile};
use crate::core::config::{EngineConfig, NavalRules};
use crate::core::error::{EngineError, Result};
use crate::core::types::{ForceId, Round, UnitId};
use crate::dice::{Dice, RandomSource};
use crate::events::{BattleEventKind, EventSink, Narrator};
use crate::naval::arena::{ShipArena, ShipFate, ShipIdx};
use crate::naval::duel::{resolve_duel, DuelOutcome, DuelSide};
use crate::naval::fleet::Armada;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavalOutcome {
    Victory { winner: ForceId, loser: ForceId },
    Inconclusive,
}

impl NavalOutcome {
    pub fn winner(&self) -> Option<&ForceId> {
        match self {
            NavalOutcome::Victory { winner, .. } => Some(winner),
            NavalOutcome::Inconclusive => None,
        }
    }

    pub fn loser(&self) -> Option<&ForceId> {
        match self {
            NavalOutcome::Victory { loser, .. } => Some(loser),
            NavalOutcome::Inconclusive => None,
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, NavalOutcome::Inconclusive)
    }
}

impl fmt::Display for NavalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavalOutcome::Victory { winner, loser } => write!(f, "{winner} defeats {loser}"),
            NavalOutcome::Inconclusive => f.write_str("Inconclusive"),
        }
    }
}

/// Immutable record of a finished naval battle
///
/// Loss lists are only filled for a decided battle. Damage effects stay on
/// the caller's ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavalBattleResult {
    pub outcome: NavalOutcome,
    /// Every ship lost, sunk or captured, keyed by armada
    pub sunk_ships: BTreeMap<ForceId, Vec<UnitId>>,
    /// The captured subset of `sunk_ships`
    pub captured_ships: BTreeMap<ForceId, Vec<UnitId>>,
    pub victories: BTreeMap<ForceId, u32>,
    pub rounds: Round,
    pub sea_terrain: SeaTerrain,
}

/// Resolve a naval battle with the published rules
pub fn resolve_naval_battle<R, S>(
    fleet_a: &mut Armada,
    fleet_b: &mut Armada,
    sea_terrain: SeaTerrain,
    rng: &mut R,
    sink: &mut S,
) -> Result<NavalBattleResult>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    resolve_naval_battle_with(&EngineConfig::default(), fleet_a, fleet_b, sea_terrain, rng, sink)
}

/// Resolve a naval battle under a custom rule set
pub fn resolve_naval_battle_with<R, S>(
    config: &EngineConfig,
    fleet_a: &mut Armada,
    fleet_b: &mut Armada,
    sea_terrain: SeaTerrain,
    rng: &mut R,
    sink: &mut S,
) -> Result<NavalBattleResult>
where
    R: RandomSource + ?Sized,
    S: EventSink + ?Sized,
{
    fleet_a.validate()?;
    fleet_b.validate()?;
    if fleet_a.id == fleet_b.id {
        return Err(EngineError::invalid_input(format!(
            "both armadas are named '{}'",
            fleet_a.id
        )));
    }
    let profile = *config.terrain.sea(sea_terrain)?;

    let span = tracing::info_span!("naval_battle", %sea_terrain, a = %fleet_a.id, b = %fleet_b.id);
    let _enter = span.enter();

    let arena = ShipArena::new([fleet_a.ships.len(), fleet_b.ships.len()]);
    let battle = NavalBattle {
        fleets: [fleet_a, fleet_b],
        rules: &config.naval,
        profile,
        sea_terrain,
        dice: Dice::new(rng),
        narrator: Narrator::new(sink),
        arena,
        victories: [0, 0],
        round: 0,
    };
    battle.run()
}

struct NavalBattle<'a, R: RandomSource + ?Sized, S: EventSink + ?Sized> {
    fleets: [&'a mut Armada; 2],
    rules: &'a NavalRules,
    profile: SeaTerrainProfile,
    sea_terrain: SeaTerrain,
    dice: Dice<'a, R>,
    narrator: Narrator<'a, S>,
    arena: ShipArena,
    victories: [u32; 2],
    round: Round,
}

impl<'a, R: RandomSource + ?Sized, S: EventSink + ?Sized> NavalBattle<'a, R, S> {
    fn run(mut self) -> Result<NavalBattleResult> {
        let half = self.profile.half_limit();
        self.narrator.log(
            BattleEventKind::BattleStarted,
            format!(
                "Naval battle in {}: {} ({} ships) vs {} ({} ships), width {}, limit {}",
                self.sea_terrain,
                self.fleets[0].admiral.name,
                self.fleets[0].ships.len(),
                self.fleets[1].admiral.name,
                self.fleets[1].ships.len(),
                self.profile.combat_width,
                self.profile.victory_limit
            ),
        );

        while self.round < self.rules.max_rounds && self.leading_tally() < half {
            self.round += 1;
            self.narrator.round = self.round;
            self.narrator.log(
                BattleEventKind::RoundStarted,
                format!("--- Naval round {} ---", self.round),
            );

            let width = self.profile.combat_width;
            let active = [
                self.arena.active(0, width).to_vec(),
                self.arena.active(1, width).to_vec(),
            ];
            if active.iter().any(Vec::is_empty) {
                self.narrator.note("A fleet has no ships left to send".into());
                break;
            }

            for (first, second) in self.matchups(&active)? {
                self.duel(first, second)?;

                if let Some(side) = (0..2).find(|&s| self.victories[s] > half) {
                    self.log_victories();
                    return Ok(self.finish(Some(side)));
                }
            }
            self.log_victories();
        }

        Ok(self.finish(None))
    }

    fn leading_tally(&self) -> u32 {
        self.victories[0].max(self.victories[1])
    }

    /// Random pairs, sampling both lines without replacement
    fn matchups(&mut self, active: &[Vec<ShipIdx>; 2]) -> Result<Vec<(ShipIdx, ShipIdx)>> {
        let count = active[0].len().min(active[1].len());
        let picks_a = self.dice.sample(active[0].len(), count)?;
        let picks_b = self.dice.sample(active[1].len(), count)?;

        Ok(picks_a
            .into_iter()
            .zip(picks_b)
            .map(|(a, b)| (active[0][a], active[1][b]))
            .collect())
    }

    fn duel(&mut self, first: ShipIdx, second: ShipIdx) -> Result<()> {
        let (slot_a, slot_b) = (self.arena.slot(first), self.arena.slot(second));
        let [fleet_a, fleet_b] = &mut self.fleets;
        let ship_a = &mut fleet_a.ships[slot_a];
        let ship_b = &mut fleet_b.ships[slot_b];

        let report = resolve_duel(ship_a, ship_b, self.rules, &mut self.dice, &mut self.narrator)?;
        tracing::debug!(
            round = self.round,
            a = %ship_a.id,
            b = %ship_b.id,
            outcome = ?report.outcome,
            "Duel resolved"
        );

        let (winner, victor, loser, struck) = match report.outcome.victor() {
            None => return Ok(()),
            Some(DuelSide::First) => (0, ship_a.id.clone(), ship_b.id.clone(), second),
            Some(DuelSide::Second) => (1, ship_b.id.clone(), ship_a.id.clone(), first),
        };

        let fate = match report.outcome {
            DuelOutcome::Captured { .. } => ShipFate::Captured,
            _ => ShipFate::Sunk,
        };
        self.arena.strike(struck, fate);
        self.victories[winner] += 1;
        self.narrator.note(format!("{victor} defeats {loser}"));
        Ok(())
    }

    fn log_victories(&mut self) {
        let line = format!(
            "Victories: {} {}, {} {}",
            self.fleets[0].admiral.name,
            self.victories[0],
            self.fleets[1].admiral.name,
            self.victories[1]
        );
        self.narrator.log(BattleEventKind::VictoriesUpdated, line);
    }

    fn finish(mut self, winner: Option<usize>) -> NavalBattleResult {
        let victories = BTreeMap::from([
            (self.fleets[0].id.clone(), self.victories[0]),
            (self.fleets[1].id.clone(), self.victories[1]),
        ]);

        let mut sunk_ships = BTreeMap::new();
        let mut captured_ships = BTreeMap::new();
        let (outcome, closing_line) = match winner {
            Some(side) => {
                for fleet in 0..2 {
                    let ships = &self.fleets[fleet].ships;
                    let mut lost = Vec::new();
                    let mut taken = Vec::new();
                    for (slot, fate) in self.arena.losses(fleet) {
                        lost.push(ships[slot].id.clone());
                        if fate == ShipFate::Captured {
                            taken.push(ships[slot].id.clone());
                        }
                    }
                    sunk_ships.insert(self.fleets[fleet].id.clone(), lost);
                    captured_ships.insert(self.fleets[fleet].id.clone(), taken);
                }
                let outcome = NavalOutcome::Victory {
                    winner: self.fleets[side].id.clone(),
                    loser: self.fleets[1 - side].id.clone(),
                };
                let line = format!("{} wins the naval battle", self.fleets[side].admiral.name);
                (outcome, line)
            }
            None => (
                NavalOutcome::Inconclusive,
                "Naval battle ends inconclusively".to_string(),
            ),
        };

        tracing::info!(rounds = self.round, "Naval battle finished: {}", outcome);
        self.narrator.log(BattleEventKind::BattleEnded, closing_line);

        NavalBattleResult {
            outcome,
            sunk_ships,
            captured_ships,
            victories,
            rounds: self.round,
            sea_terrain: self.sea_terrain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;
    use crate::events::{BattleEventLog, NullSink};
    use crate::naval::fleet::{Admiral, Ship};

    fn armada(id: &str, ships: usize) -> Armada {
        let admiral = Admiral::new(format!("{id}-adm"), format!("Admiral {id}"));
        let mut armada = Armada::new(id, admiral);
        for n in 0..ships {
            armada.add_ship(Ship::new(format!("{id}{n}")));
        }
        armada
    }

    #[test]
    fn test_empty_armada_rejected() {
        let mut a = armada("a", 0);
        let mut b = armada("b", 1);
        let err = resolve_naval_battle(
            &mut a,
            &mut b,
            SeaTerrain::Canal,
            &mut ScriptedSource::new([]),
            &mut NullSink,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_all_retreats_run_out_the_clock() {
        let mut a = armada("a", 1);
        let mut b = armada("b", 1);
        // Every duel: maneuver ties and misses for five internal rounds
        let mut source = ScriptedSource::new(vec![3; 20 * 10]);
        let mut log = BattleEventLog::new();

        let result =
            resolve_naval_battle(&mut a, &mut b, SeaTerrain::Canal, &mut source, &mut log).unwrap();

        assert!(result.outcome.is_inconclusive());
        assert_eq!(result.rounds, 10);
        assert!(result.sunk_ships.is_empty());
        assert_eq!(result.victories[&ForceId::from("a")], 0);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_decided_mid_round() {
        let mut config = EngineConfig::default();
        config.terrain.sea.insert(
            SeaTerrain::Straights,
            SeaTerrainProfile {
                combat_width: 2,
                victory_limit: 2,
            },
        );
        let mut a = armada("a", 2);
        let mut b = armada("b", 3);
        let mut source = ScriptedSource::new([
            1, 1, // pairings: a0-b0, a1-b1
            3, 3, 6, 1, 1, // a0 sinks b0
            3, 3, 6, 1, 1, // a1 sinks b1: 2 > 1
        ]);

        let result = resolve_naval_battle_with(
            &config,
            &mut a,
            &mut b,
            SeaTerrain::Straights,
            &mut source,
            &mut NullSink,
        )
        .unwrap();

        assert_eq!(result.outcome.winner(), Some(&ForceId::from("a")));
        assert_eq!(
            result.sunk_ships[&ForceId::from("b")],
            vec![UnitId::from("b0"), UnitId::from("b1")]
        );
        assert!(result.sunk_ships[&ForceId::from("a")].is_empty());
        assert!(result.captured_ships[&ForceId::from("b")].is_empty());
        assert_eq!(result.rounds, 1);
        assert_eq!(source.remaining(), 0);
    }
}
