//! Rally checks
//!
//! After each pitch every brigade on the line rolls to stay in the fight.
//! Failing the check routs it for the rest of the battle.

use crate::battle::constants::RALLY_TERRAIN_PENALTY;
use crate::battle::units::Brigade;
use crate::capability;

/// Result of a rally check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RallyCheckResult {
    pub roll: u32,
    pub net: i32,
    pub stays: bool,
}

/// Check whether a brigade holds the line
///
/// `net = roll + rally bonus - terrain penalty`; the brigade stays when
/// `net >= target`.
pub fn check_rally(
    brigade: &Brigade,
    roll: u32,
    rally_penalty: bool,
    target: i32,
) -> RallyCheckResult {
    let penalty = if rally_penalty { RALLY_TERRAIN_PENALTY } else { 0 };
    let net = roll as i32 + capability::rally(brigade) - penalty;

    RallyCheckResult {
        roll,
        net,
        stays: net >= target,
    }
}

/// Mark a brigade as routed
pub fn process_rout(brigade: &mut Brigade) {
    brigade.routed = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::constants::RALLY_TARGET;
    use crate::battle::unit_type::BrigadeType;

    #[test]
    fn test_six_holds_five_routs() {
        // Cavalry has no rally bonus
        let cav = Brigade::new("c", BrigadeType::Cavalry);
        assert!(check_rally(&cav, 6, false, RALLY_TARGET).stays);
        assert!(!check_rally(&cav, 5, false, RALLY_TARGET).stays);
    }

    #[test]
    fn test_rally_penalty_turns_six_into_rout() {
        let cav = Brigade::new("c", BrigadeType::Cavalry);
        let result = check_rally(&cav, 6, true, RALLY_TARGET);
        assert_eq!(result.net, 5);
        assert!(!result.stays);
    }

    #[test]
    fn test_rally_bonus_counts() {
        let guard = Brigade::new("lg", BrigadeType::Cavalry)
            .with_enhancement("Life Guard")
            .unwrap();
        assert!(check_rally(&guard, 4, false, RALLY_TARGET).stays);
        assert!(!check_rally(&guard, 3, false, RALLY_TARGET).stays);
    }

    #[test]
    fn test_process_rout() {
        let mut b = Brigade::new("b", BrigadeType::Light);
        process_rout(&mut b);
        assert!(b.routed);
    }
}
