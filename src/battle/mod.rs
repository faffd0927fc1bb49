//! Land battle system - dice-driven phase resolution
//!
//! A battle runs terrain effects, a round-1 skirmish, then repeated
//! pitch and rally phases until a decisive tally, an emptied line, or the
//! round limit.

pub mod constants;
pub mod execution;
pub mod morale;
pub mod resolution;
pub mod terrain;
pub mod unit_type;
pub mod units;

// Re-exports for convenient access
pub use constants::*;
pub use execution::{
    resolve_land_battle, resolve_land_battle_with, BattleOutcome, BattleResult, VictoryKind,
};
pub use morale::{check_rally, process_rout, RallyCheckResult};
pub use resolution::{pitch_result, pitch_total, promote, resolve_skirmish, SkirmishResult};
pub use terrain::{
    LandTerrainProfile, SeaTerrain, SeaTerrainProfile, Terrain, TerrainEffect, TerrainTables,
};
pub use unit_type::{BrigadeProperties, BrigadeType};
pub use units::{Army, Brigade, General};
