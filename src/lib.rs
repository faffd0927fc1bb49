//! Battle Sim - dice-driven land and naval combat resolution

pub mod battle;
pub mod capability;
pub mod catalog;
pub mod core;
pub mod dice;
pub mod events;
pub mod muster;
pub mod naval;

pub use battle::{resolve_land_battle, resolve_land_battle_with, BattleResult};
pub use core::config::EngineConfig;
pub use core::error::{EngineError, Result};
pub use naval::{resolve_naval_battle, resolve_naval_battle_with, NavalBattleResult};
