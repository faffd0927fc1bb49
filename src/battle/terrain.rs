//! Battle terrain types and their effect tables
//!
//! Land terrain sets the combat width and a handful of rule tags. Sea terrain
//! sets the combat width and the victory-margin threshold.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Land terrain a battle is fought on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Plains,
    Desert,
    Tundra,
    Forest,
    Highlands,
    Jungle,
    Marshland,
    Mountain,
}

impl Terrain {
    pub const ALL: [Terrain; 8] = [
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Forest,
        Terrain::Highlands,
        Terrain::Jungle,
        Terrain::Marshland,
        Terrain::Mountain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Desert => "desert",
            Terrain::Tundra => "tundra",
            Terrain::Forest => "forest",
            Terrain::Highlands => "highlands",
            Terrain::Jungle => "jungle",
            Terrain::Marshland => "marshland",
            Terrain::Mountain => "mountain",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| EngineError::invalid_input(format!("unknown terrain '{s}'")))
    }
}

/// Sea terrain a naval battle is fought in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SeaTerrain {
    #[default]
    OpenSeas,
    CoastalWaters,
    Straights,
    Canal,
}

impl SeaTerrain {
    pub const ALL: [SeaTerrain; 4] = [
        SeaTerrain::OpenSeas,
        SeaTerrain::CoastalWaters,
        SeaTerrain::Straights,
        SeaTerrain::Canal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SeaTerrain::OpenSeas => "open_seas",
            SeaTerrain::CoastalWaters => "coastal_waters",
            SeaTerrain::Straights => "straights",
            SeaTerrain::Canal => "canal",
        }
    }
}

impl fmt::Display for SeaTerrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeaTerrain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        SeaTerrain::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| EngineError::invalid_input(format!("unknown sea terrain '{s}'")))
    }
}

/// Rule tags a land terrain can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainEffect {
    NoReinforcements, // Routed lines are not topped up
    RallyPenalty,     // -1 on rally rolls
    SkirmishPenalty,
    SeeRetreat,
    LostBrigades, // Brigades get lost before battle on a 1
    DestructionBonus,
    DefenseBonus,
}

/// Combat width and effect tags for one land terrain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTerrainProfile {
    pub combat_width: usize,
    #[serde(default)]
    pub effects: Vec<TerrainEffect>,
}

impl LandTerrainProfile {
    pub fn new(combat_width: usize, effects: &[TerrainEffect]) -> Self {
        Self {
            combat_width,
            effects: effects.to_vec(),
        }
    }

    pub fn has(&self, effect: TerrainEffect) -> bool {
        self.effects.contains(&effect)
    }
}

/// Combat width and victory-margin threshold for one sea terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeaTerrainProfile {
    pub combat_width: usize,
    pub victory_limit: u32,
}

impl SeaTerrainProfile {
    /// Victories a side must strictly exceed to win
    pub fn half_limit(&self) -> u32 {
        self.victory_limit / 2
    }
}

/// Read-only lookup from terrain to its profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTables {
    pub land: BTreeMap<Terrain, LandTerrainProfile>,
    pub sea: BTreeMap<SeaTerrain, SeaTerrainProfile>,
}

impl Default for TerrainTables {
    fn default() -> Self {
        use TerrainEffect::*;

        let land = BTreeMap::from([
            (Terrain::Plains, LandTerrainProfile::new(8, &[])),
            (Terrain::Desert, LandTerrainProfile::new(8, &[NoReinforcements])),
            (Terrain::Tundra, LandTerrainProfile::new(7, &[RallyPenalty])),
            (Terrain::Forest, LandTerrainProfile::new(6, &[SkirmishPenalty])),
            (Terrain::Highlands, LandTerrainProfile::new(6, &[SeeRetreat])),
            (Terrain::Jungle, LandTerrainProfile::new(5, &[LostBrigades])),
            (Terrain::Marshland, LandTerrainProfile::new(5, &[DestructionBonus])),
            (Terrain::Mountain, LandTerrainProfile::new(4, &[DefenseBonus])),
        ]);

        let sea = BTreeMap::from([
            (
                SeaTerrain::OpenSeas,
                SeaTerrainProfile {
                    combat_width: 4,
                    victory_limit: 8,
                },
            ),
            (
                SeaTerrain::CoastalWaters,
                SeaTerrainProfile {
                    combat_width: 3,
                    victory_limit: 6,
                },
            ),
            (
                SeaTerrain::Straights,
                SeaTerrainProfile {
                    combat_width: 2,
                    victory_limit: 4,
                },
            ),
            (
                SeaTerrain::Canal,
                SeaTerrainProfile {
                    combat_width: 1,
                    victory_limit: 2,
                },
            ),
        ]);

        Self { land, sea }
    }
}

impl TerrainTables {
    /// Profile for a land terrain; missing entries and zero widths are rejected
    pub fn land(&self, terrain: Terrain) -> Result<&LandTerrainProfile> {
        let profile = self.land.get(&terrain).ok_or_else(|| {
            EngineError::invalid_input(format!("terrain '{terrain}' has no effect table entry"))
        })?;
        if profile.combat_width == 0 {
            return Err(EngineError::invalid_input(format!(
                "terrain '{terrain}' has a zero combat width"
            )));
        }
        Ok(profile)
    }

    /// Profile for a sea terrain; missing entries and zero widths are rejected
    pub fn sea(&self, terrain: SeaTerrain) -> Result<&SeaTerrainProfile> {
        let profile = self.sea.get(&terrain).ok_or_else(|| {
            EngineError::invalid_input(format!("sea terrain '{terrain}' has no effect table entry"))
        })?;
        if profile.combat_width == 0 {
            return Err(EngineError::invalid_input(format!(
                "sea terrain '{terrain}' has a zero combat width"
            )));
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plains_widest_without_effects() {
        let tables = TerrainTables::default();
        let plains = tables.land(Terrain::Plains).unwrap();
        assert_eq!(plains.combat_width, 8);
        assert!(plains.effects.is_empty());
    }

    #[test]
    fn test_mountain_narrowest() {
        let tables = TerrainTables::default();
        let narrowest = Terrain::ALL
            .iter()
            .map(|t| tables.land(*t).unwrap().combat_width)
            .min();
        assert_eq!(narrowest, Some(tables.land(Terrain::Mountain).unwrap().combat_width));
    }

    #[test]
    fn test_rule_tags_on_expected_terrain() {
        let tables = TerrainTables::default();
        assert!(tables.land(Terrain::Jungle).unwrap().has(TerrainEffect::LostBrigades));
        assert!(tables.land(Terrain::Tundra).unwrap().has(TerrainEffect::RallyPenalty));
        assert!(tables.land(Terrain::Desert).unwrap().has(TerrainEffect::NoReinforcements));
        assert!(!tables.land(Terrain::Plains).unwrap().has(TerrainEffect::RallyPenalty));
    }

    #[test]
    fn test_canal_half_limit() {
        let tables = TerrainTables::default();
        let canal = tables.sea(SeaTerrain::Canal).unwrap();
        assert_eq!(canal.combat_width, 1);
        assert_eq!(canal.half_limit(), 1);
    }

    #[test]
    fn test_missing_entry_is_invalid_input() {
        let mut tables = TerrainTables::default();
        tables.land.remove(&Terrain::Forest);
        assert!(tables.land(Terrain::Forest).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_zero_width_is_invalid_input() {
        let mut tables = TerrainTables::default();
        tables.sea.insert(
            SeaTerrain::Canal,
            SeaTerrainProfile {
                combat_width: 0,
                victory_limit: 2,
            },
        );
        assert!(tables.sea(SeaTerrain::Canal).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("jungle".parse::<Terrain>().unwrap(), Terrain::Jungle);
        assert_eq!("open_seas".parse::<SeaTerrain>().unwrap(), SeaTerrain::OpenSeas);
        assert!("swamp".parse::<Terrain>().unwrap_err().is_invalid_input());
    }
}
