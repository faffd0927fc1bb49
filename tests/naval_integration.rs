//! Naval battle integration tests

use battle_sim::battle::{SeaTerrain, SeaTerrainProfile};
use battle_sim::core::config::NavalRules;
use battle_sim::core::types::{ForceId, UnitId};
use battle_sim::dice::ScriptedSource;
use battle_sim::events::{BattleEventKind, BattleEventLog, NullSink};
use battle_sim::naval::*;
use battle_sim::EngineConfig;

fn armada(id: &str, ships: usize) -> Armada {
    let mut armada = Armada::new(id, Admiral::new(format!("adm_{id}"), format!("Admiral {id}")));
    for n in 0..ships {
        armada.add_ship(Ship::new(format!("{id}{n}")));
    }
    armada
}

fn marines(id: &str) -> Ship {
    Ship::new(id).with_enhancement("Marine Detachment").unwrap()
}

/// Published rules, but every duel opens alongside at band 0
fn alongside() -> NavalRules {
    NavalRules {
        opening_band: 0,
        ..NavalRules::default()
    }
}

#[test]
fn test_canal_single_win_is_inconclusive() {
    // Canal: limit 2, so one win only equals half
    let mut a = armada("a", 1);
    let mut b = armada("b", 1);
    let mut source = ScriptedSource::new([3, 3, 6, 1, 1]);
    let mut log = BattleEventLog::new();

    let result =
        resolve_naval_battle(&mut a, &mut b, SeaTerrain::Canal, &mut source, &mut log).unwrap();

    assert!(result.outcome.is_inconclusive());
    assert_eq!(result.rounds, 1);
    assert_eq!(result.victories[&ForceId::from("a")], 1);
    assert_eq!(result.victories[&ForceId::from("b")], 0);
    assert!(result.sunk_ships.is_empty());
    assert!(result.captured_ships.is_empty());
    assert_eq!(log.count(|k| matches!(k, BattleEventKind::ShipSunk { .. })), 1);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_capture_counts_as_a_loss() {
    let mut config = EngineConfig::default();
    config.terrain.sea.insert(
        SeaTerrain::Straights,
        SeaTerrainProfile {
            combat_width: 2,
            victory_limit: 2,
        },
    );
    config.naval = alongside();
    let mut a = Armada::new("a", Admiral::new("adm_a", "Admiral a"))
        .with_ship(marines("a0"))
        .with_ship(Ship::new("a1"));
    let mut b = armada("b", 2);

    let mut source = ScriptedSource::new([
        1, 1, // a0-b0, a1-b1
        3, 3, 2, 1, // tie at 0, marines board: 4 vs 1
        1, 6, 6, 1, 1, // b1 opens to 1, a1 hits (6 + 2) and sinks it
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
    assert_eq!(result.captured_ships[&ForceId::from("b")], vec![UnitId::from("b0")]);
    assert!(result.captured_ships[&ForceId::from("a")].is_empty());
    assert_eq!(result.victories[&ForceId::from("a")], 2);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_damage_stays_on_the_ships() {
    let mut config = EngineConfig::default();
    config.naval.max_rounds = 1;
    let mut a = armada("a", 1);
    let mut b = Armada::new("b", Admiral::new("adm_b", "Admiral b"))
        .with_ship(Ship::new("b0").with_enhancement("Reinforced Hulls").unwrap());

    let mut source = ScriptedSource::new([
        3, 3, 6, 6, // both hit at range 2
        1, // a's shot on b: 1 + 1 reinforced = hull breach
        5, // b's shot on a: blasted deck
        1, 6, 1, 1, // opened to 3, both miss
        1, 6, // opened to 4
    ]);

    let result = resolve_naval_battle_with(
        &config,
        &mut a,
        &mut b,
        SeaTerrain::Canal,
        &mut source,
        &mut NullSink,
    )
    .unwrap();

    assert!(result.outcome.is_inconclusive());
    assert_eq!(a.ships[0].damage_effects, vec![DamageEffect::BlastedDeck]);
    assert_eq!(b.ships[0].damage_effects, vec![DamageEffect::HullBreach]);
    assert_eq!(source.remaining(), 0);

    a.reset_status();
    assert!(a.ships[0].damage_effects.is_empty());
}

#[test]
fn test_boarding_margin_of_two_fails() {
    let mut first = marines("m");
    let mut second = Ship::new("s");
    // Tie at 0 every round; boarding 1 + 2 vs 1 is only two ahead
    let mut source = ScriptedSource::new([3, 3, 1, 1].repeat(5));

    let report =
        fight_duel(&mut first, &mut second, &alongside(), &mut source, &mut NullSink).unwrap();

    assert_eq!(report.outcome, DuelOutcome::Exhausted);
    assert_eq!(report.bands, vec![0; 5]);
    assert!(report.outcome.both_retreat());
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_defender_can_capture_boarders() {
    let mut first = marines("m");
    let mut second = Ship::new("s");
    // Boarding 1 + 2 vs 6: the second ship wins by three
    let mut source = ScriptedSource::new([3, 3, 1, 6]);

    let report =
        fight_duel(&mut first, &mut second, &alongside(), &mut source, &mut NullSink).unwrap();

    assert_eq!(
        report.outcome,
        DuelOutcome::Captured {
            victor: DuelSide::Second
        }
    );
    assert_eq!(report.rounds, 1);
}

#[test]
fn test_closing_never_reaches_boarding_range() {
    // Marines only help once alongside; winning the maneuver stops at 1
    let mut first = marines("m");
    let mut second = Ship::new("s");
    let script: Vec<u32> = [6, 1, 1, 1].repeat(5);
    let mut source = ScriptedSource::new(script);

    let report = fight_duel(
        &mut first,
        &mut second,
        &NavalRules::default(),
        &mut source,
        &mut NullSink,
    )
    .unwrap();

    assert_eq!(report.outcome, DuelOutcome::Exhausted);
    assert_eq!(report.bands, vec![1; 5]);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_same_armada_id_rejected() {
    let mut a = armada("x", 1);
    let mut b = armada("x", 1);
    let err = resolve_naval_battle(
        &mut a,
        &mut b,
        SeaTerrain::OpenSeas,
        &mut ScriptedSource::new([]),
        &mut NullSink,
    )
    .unwrap_err();
    assert!(err.is_invalid_input());
}
