//! Brigade types and their base bonuses

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of land brigade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrigadeType {
    Cavalry, // Fast, good skirmishers
    Heavy,   // Line infantry, hard to shift
    Light,   // Best skirmishers, steady in rally
}

/// Base bonuses for a brigade type, before enhancements and status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrigadeProperties {
    pub skirmish: i32,
    pub defense: i32,
    pub pitch: i32,
    pub rally: i32,
}

impl BrigadeType {
    pub const ALL: [BrigadeType; 3] = [
        BrigadeType::Cavalry,
        BrigadeType::Heavy,
        BrigadeType::Light,
    ];

    pub fn default_properties(&self) -> BrigadeProperties {
        match self {
            BrigadeType::Cavalry => BrigadeProperties {
                skirmish: 1,
                defense: 0,
                pitch: 1,
                rally: 0,
            },
            BrigadeType::Heavy => BrigadeProperties {
                skirmish: 0,
                defense: 2,
                pitch: 1,
                rally: 1,
            },
            BrigadeType::Light => BrigadeProperties {
                skirmish: 2,
                defense: 0,
                pitch: 0,
                rally: 1,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BrigadeType::Cavalry => "cavalry",
            BrigadeType::Heavy => "heavy",
            BrigadeType::Light => "light",
        }
    }
}

impl fmt::Display for BrigadeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_best_skirmisher() {
        let light = BrigadeType::Light.default_properties().skirmish;
        assert!(BrigadeType::ALL
            .iter()
            .all(|t| t.default_properties().skirmish <= light));
    }

    #[test]
    fn test_only_heavy_defends() {
        assert_eq!(BrigadeType::Heavy.default_properties().defense, 2);
        assert_eq!(BrigadeType::Cavalry.default_properties().defense, 0);
        assert_eq!(BrigadeType::Light.default_properties().defense, 0);
    }
}
