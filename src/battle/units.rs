//! Land forces: Brigade → Army, led by a General
//!
//! Brigades carry transient status flags that the resolver mutates during a
//! battle. Callers reusing an army across battles reset them with
//! [`Army::reset_status`].

use ahash::AHashSet;
use serde::Serialize;

use crate::battle::unit_type::BrigadeType;
use crate::catalog::{EnhancementSlot, TraitSlot};
use crate::core::error::{EngineError, Result};
use crate::core::types::{CommanderId, ForceId, UnitId};

/// A single land combat unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brigade {
    pub id: UnitId,
    pub brigade_type: BrigadeType,
    pub enhancement: EnhancementSlot,

    // Status
    pub routed: bool,
    pub fatigued: bool,
    pub garrisoned: bool,
}

impl Brigade {
    pub fn new(id: impl Into<UnitId>, brigade_type: BrigadeType) -> Self {
        Self {
            id: id.into(),
            brigade_type,
            enhancement: EnhancementSlot::Empty,
            routed: false,
            fatigued: false,
            garrisoned: false,
        }
    }

    /// Fit a named enhancement; it must belong to this brigade type
    pub fn with_enhancement(mut self, name: &str) -> Result<Self> {
        self.enhancement = EnhancementSlot::for_brigade(name, self.brigade_type)?;
        Ok(self)
    }

    pub fn fatigued(mut self) -> Self {
        self.fatigued = true;
        self
    }

    pub fn garrisoned(mut self) -> Self {
        self.garrisoned = true;
        self
    }

    pub fn is_cavalry(&self) -> bool {
        self.brigade_type == BrigadeType::Cavalry
    }
}

/// Commander of an army
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct General {
    pub id: CommanderId,
    pub name: String,
    pub level: u32,
    #[serde(rename = "trait")]
    pub trait_: TraitSlot,
    pub captured: bool,
}

impl General {
    pub fn new(id: impl Into<CommanderId>, name: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            trait_: TraitSlot::Empty,
            captured: false,
        }
    }

    pub fn with_trait(mut self, name: &str) -> Result<Self> {
        self.trait_ = TraitSlot::general(name)?;
        Ok(self)
    }
}

/// A land force: one general and an ordered roster of brigades
///
/// Roster order decides the opening line and the reinforcement draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Army {
    pub id: ForceId,
    pub general: General,
    pub brigades: Vec<Brigade>,
}

impl Army {
    pub fn new(id: impl Into<ForceId>, general: General) -> Self {
        Self {
            id: id.into(),
            general,
            brigades: Vec::new(),
        }
    }

    pub fn with_brigade(mut self, brigade: Brigade) -> Self {
        self.brigades.push(brigade);
        self
    }

    pub fn add_brigade(&mut self, brigade: Brigade) {
        self.brigades.push(brigade);
    }

    /// Brigades still able to fight
    pub fn standing(&self) -> impl Iterator<Item = &Brigade> {
        self.brigades.iter().filter(|b| !b.routed)
    }

    /// Clear the flags a battle leaves behind
    pub fn reset_status(&mut self) {
        for brigade in &mut self.brigades {
            brigade.routed = false;
        }
    }

    /// Reject empty rosters and duplicate brigade ids
    pub fn validate(&self) -> Result<()> {
        if self.brigades.is_empty() {
            return Err(EngineError::invalid_input(format!(
                "army '{}' has no brigades",
                self.id
            )));
        }

        let mut seen = AHashSet::with_capacity(self.brigades.len());
        for brigade in &self.brigades {
            if !seen.insert(&brigade.id) {
                return Err(EngineError::invalid_input(format!(
                    "army '{}' lists brigade '{}' twice",
                    self.id, brigade.id
                )));
            }
        }

        Ok(())
    }
}
