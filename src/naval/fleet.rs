//! Naval forces: Ship → Armada, led by an Admiral

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{EnhancementSlot, TraitSlot};
use crate::core::error::{EngineError, Result};
use crate::core::types::{CommanderId, ForceId, UnitId};

/// Named debuff left on a ship by a damaging hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageEffect {
    BlastedDeck,      // -1 boarding
    AmmunitionStrike, // -2 gunnery
    RakingFire,       // -1 next damage
    HullBreach,       // fail maneuver, -2 damage
}

impl DamageEffect {
    pub fn name(&self) -> &'static str {
        match self {
            DamageEffect::BlastedDeck => "blasted_deck",
            DamageEffect::AmmunitionStrike => "ammunition_strike",
            DamageEffect::RakingFire => "raking_fire",
            DamageEffect::HullBreach => "hull_breach",
        }
    }
}

impl fmt::Display for DamageEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    pub id: UnitId,
    pub enhancement: EnhancementSlot,
    pub is_flagship: bool,
    pub damage_effects: Vec<DamageEffect>,
}

impl Ship {
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            id: id.into(),
            enhancement: EnhancementSlot::Empty,
            is_flagship: false,
            damage_effects: Vec::new(),
        }
    }

    pub fn with_enhancement(mut self, name: &str) -> Result<Self> {
        self.enhancement = EnhancementSlot::for_ship(name)?;
        Ok(self)
    }

    pub fn flagship(mut self) -> Self {
        self.is_flagship = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admiral {
    pub id: CommanderId,
    pub name: String,
    #[serde(rename = "trait")]
    pub trait_: TraitSlot,
}

impl Admiral {
    pub fn new(id: impl Into<CommanderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trait_: TraitSlot::Empty,
        }
    }

    pub fn with_trait(mut self, name: &str) -> Result<Self> {
        self.trait_ = TraitSlot::admiral(name)?;
        Ok(self)
    }
}

/// A naval force; ship order is the order ships join the line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Armada {
    pub id: ForceId,
    pub admiral: Admiral,
    pub ships: Vec<Ship>,
}

impl Armada {
    pub fn new(id: impl Into<ForceId>, admiral: Admiral) -> Self {
        Self {
            id: id.into(),
            admiral,
            ships: Vec::new(),
        }
    }

    pub fn with_ship(mut self, ship: Ship) -> Self {
        self.ships.push(ship);
        self
    }

    pub fn add_ship(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub fn flagship(&self) -> Option<&Ship> {
        self.ships.iter().find(|s| s.is_flagship)
    }

    /// Clear damage left over from a previous battle
    pub fn reset_status(&mut self) {
        for ship in &mut self.ships {
            ship.damage_effects.clear();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ships.is_empty() {
            return Err(EngineError::invalid_input(format!(
                "armada '{}' has no ships",
                self.id
            )));
        }

        let mut seen = AHashSet::with_capacity(self.ships.len());
        for ship in &self.ships {
            if !seen.insert(&ship.id) {
                return Err(EngineError::invalid_input(format!(
                    "armada '{}' lists ship '{}' twice",
                    self.id, ship.id
                )));
            }
        }

        Ok(())
    }
}
