//! Battle rule constants - all tunable values in one place
//!
//! These values are ADDITIVE, never multiplicative. They seed the defaults
//! of [`crate::core::config::EngineConfig`].

// Land round loop
pub const MAX_LAND_ROUNDS: u32 = 10;
pub const DECISIVE_TALLY: i32 = 20;

// Terrain
pub const LOST_BRIGADE_ROLL: u32 = 1; // Jungle: lost on this roll

// Skirmish
pub const SKIRMISHERS_PER_SIDE: usize = 2;
pub const OVERRUN_MARGIN: i32 = 3;
pub const OVERRUN_DESTROY_MAX: u32 = 3;

// Rally
pub const RALLY_TARGET: i32 = 6;
pub const RALLY_TERRAIN_PENALTY: i32 = 1;

// Status adjustments
pub const FATIGUE_PENALTY: i32 = 1;
pub const GARRISON_DEFENSE_BONUS: i32 = 2;
pub const GARRISON_RALLY_BONUS: i32 = 1;

// Action report
pub const WINNER_CASUALTY_MAX: u32 = 2;
pub const LOSER_CASUALTY_MAX: u32 = 3;
pub const PROMOTION_ROLL: u32 = 6;
pub const PROMOTION_REROLL_ON: u32 = 1; // Winner rerolls once on this
pub const CAPTURE_ROLL: u32 = 1;
pub const MAX_GENERAL_LEVEL: u32 = 5;

// Naval
pub const MAX_NAVAL_ROUNDS: u32 = 10;
pub const DUEL_ROUNDS: u32 = 5;
pub const OPENING_BAND: u8 = 2;
pub const HIT_TARGET: i32 = 5;
pub const BOARDING_MARGIN: i32 = 3;
pub const FLAGSHIP_BONUS: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_loses_fewer_than_loser() {
        assert!(WINNER_CASUALTY_MAX < LOSER_CASUALTY_MAX);
    }

    #[test]
    fn test_rally_reachable_on_a_d6() {
        assert!(RALLY_TARGET <= 6);
        assert!(RALLY_TARGET - RALLY_TERRAIN_PENALTY > 0);
    }

    #[test]
    fn test_naval_rounds_positive() {
        assert!(MAX_NAVAL_ROUNDS > 0);
        assert!(DUEL_ROUNDS > 0);
    }
}
