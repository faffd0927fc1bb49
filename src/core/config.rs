//! Rule configuration with documented constants
//!
//! Every threshold the resolvers consult lives here. The defaults are the
//! published rules; a TOML file can override any subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::constants::*;
use crate::battle::terrain::TerrainTables;
use crate::core::error::{EngineError, Result};

/// Complete rule set handed to both resolvers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub land: LandRules,
    pub naval: NavalRules,
    pub terrain: TerrainTables,
}

/// Land battle thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandRules {
    // === ROUND LOOP ===
    /// Rounds fought before the battle is called a stalemate
    pub max_rounds: u32,

    /// Running pitch tally that ends the battle
    ///
    /// The positive side wins at `>= decisive_tally`, the negative side at
    /// `<= -decisive_tally`. Checked once per round, after the pitch phase.
    pub decisive_tally: i32,

    // === SKIRMISH ===
    /// Skirmishers each side sends out in round 1
    pub skirmishers_per_side: usize,

    /// Winning margin that triggers an overrun destruction roll
    pub overrun_margin: i32,

    /// Highest destruction roll that destroys an overrun brigade
    pub overrun_destroy_max: u32,

    // === RALLY ===
    /// Net rally roll a brigade needs to stay on the line
    pub rally_target: i32,

    // === RESOLUTION ===
    /// Highest destruction roll that cashiers a winning brigade
    pub winner_casualty_max: u32,

    /// Highest destruction roll that cashiers a losing brigade
    pub loser_casualty_max: u32,

    /// Roll a general needs to be promoted
    pub promotion_roll: u32,

    /// Roll that sees a losing general captured
    pub capture_roll: u32,

    /// Level cap for promotions
    pub max_general_level: u32,
}

impl Default for LandRules {
    fn default() -> Self {
        Self {
            max_rounds: MAX_LAND_ROUNDS,
            decisive_tally: DECISIVE_TALLY,
            skirmishers_per_side: SKIRMISHERS_PER_SIDE,
            overrun_margin: OVERRUN_MARGIN,
            overrun_destroy_max: OVERRUN_DESTROY_MAX,
            rally_target: RALLY_TARGET,
            winner_casualty_max: WINNER_CASUALTY_MAX,
            loser_casualty_max: LOSER_CASUALTY_MAX,
            promotion_roll: PROMOTION_ROLL,
            capture_roll: CAPTURE_ROLL,
            max_general_level: MAX_GENERAL_LEVEL,
        }
    }
}

/// Naval battle thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavalRules {
    /// Fleet rounds before the battle is called inconclusive
    pub max_rounds: u32,

    /// Internal rounds a single ship duel may last
    pub duel_rounds: u32,

    /// Range band every duel opens at
    pub opening_band: u8,

    /// Net gunnery roll that scores a hit
    pub hit_target: i32,

    /// Boarding margin that captures the opposing ship
    pub boarding_margin: i32,
}

impl Default for NavalRules {
    fn default() -> Self {
        Self {
            max_rounds: MAX_NAVAL_ROUNDS,
            duel_rounds: DUEL_ROUNDS,
            opening_band: OPENING_BAND,
            hit_target: HIT_TARGET,
            boarding_margin: BOARDING_MARGIN,
        }
    }
}

impl EngineConfig {
    /// Create a config with the published rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; omitted keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.land.max_rounds == 0 || self.naval.max_rounds == 0 {
            return Err(EngineError::InvalidConfig("max_rounds must be positive".into()));
        }

        if self.land.decisive_tally <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "decisive_tally ({}) must be positive",
                self.land.decisive_tally
            )));
        }

        if self.land.winner_casualty_max > self.land.loser_casualty_max {
            return Err(EngineError::InvalidConfig(format!(
                "winner_casualty_max ({}) should be <= loser_casualty_max ({})",
                self.land.winner_casualty_max, self.land.loser_casualty_max
            )));
        }

        if self.naval.duel_rounds == 0 {
            return Err(EngineError::InvalidConfig("duel_rounds must be positive".into()));
        }

        if self.naval.opening_band > crate::naval::duel::MAX_BAND {
            return Err(EngineError::InvalidConfig(format!(
                "opening_band ({}) is outside 0..={}",
                self.naval.opening_band,
                crate::naval::duel::MAX_BAND
            )));
        }

        Ok(())
    }
}
