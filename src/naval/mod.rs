//! Naval battle system - fleet rounds of random ship duels

pub mod arena;
pub mod duel;
pub mod engagement;
pub mod fleet;

pub use arena::{ShipArena, ShipFate, ShipIdx};
pub use duel::{
    boarding_result, damage_result, fight_duel, maneuver_result, DamageResult, DuelOutcome,
    DuelReport, DuelSide, RangeBand, MAX_BAND,
};
pub use engagement::{
    resolve_naval_battle, resolve_naval_battle_with, NavalBattleResult, NavalOutcome,
};
pub use fleet::{Admiral, Armada, DamageEffect, Ship};
