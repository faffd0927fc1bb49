//! Random force generation for quick battles

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::battle::unit_type::BrigadeType;
use crate::battle::units::{Army, Brigade, General};
use crate::catalog::{
    brigade_enhancements, EnhancementSlot, TraitSlot, ADMIRAL_TRAITS, GENERAL_TRAITS,
    SHIP_ENHANCEMENTS,
};
use crate::naval::fleet::{Admiral, Armada, Ship};

// Cavalry / Heavy / Light
const BRIGADE_WEIGHTS: [u32; 3] = [25, 40, 35];
const ENHANCEMENT_CHANCE: f64 = 0.4;

/// Random army of 3-8 brigades under a level 1-3 general
pub fn muster_army(prefix: &str, rng: &mut ChaCha8Rng) -> Army {
    let general = General {
        trait_: GENERAL_TRAITS
            .choose(rng)
            .map_or(TraitSlot::Empty, TraitSlot::Named),
        ..General::new(
            format!("gen_{prefix}"),
            format!("General {prefix}"),
            rng.gen_range(1..=3),
        )
    };

    let mut army = Army::new(format!("army_{prefix}"), general);
    let brigade_count = rng.gen_range(3..=8);

    // Weights are non-zero constants
    let types = WeightedIndex::new(BRIGADE_WEIGHTS).ok();
    for i in 0..brigade_count {
        let brigade_type = types
            .as_ref()
            .map_or(BrigadeType::Heavy, |w| BrigadeType::ALL[w.sample(rng)]);

        let mut brigade = Brigade::new(format!("brigade_{prefix}_{i}"), brigade_type);
        if rng.gen_bool(ENHANCEMENT_CHANCE) {
            brigade.enhancement = brigade_enhancements(brigade_type)
                .choose(rng)
                .map_or(EnhancementSlot::Empty, EnhancementSlot::Named);
        }
        army.add_brigade(brigade);
    }

    army
}

/// Random armada of 2-6 ships with one flagship
pub fn muster_armada(prefix: &str, rng: &mut ChaCha8Rng) -> Armada {
    let admiral = Admiral {
        trait_: ADMIRAL_TRAITS
            .choose(rng)
            .map_or(TraitSlot::Empty, TraitSlot::Named),
        ..Admiral::new(format!("adm_{prefix}"), format!("Admiral {prefix}"))
    };

    let mut armada = Armada::new(format!("armada_{prefix}"), admiral);
    let ship_count = rng.gen_range(2..=6);

    for i in 0..ship_count {
        let mut ship = Ship::new(format!("ship_{prefix}_{i}"));
        // One extra slot for no enhancement at all
        let pick = rng.gen_range(0..=SHIP_ENHANCEMENTS.len());
        if let Some(enhancement) = SHIP_ENHANCEMENTS.get(pick) {
            ship.enhancement = EnhancementSlot::Named(enhancement);
        }
        armada.add_ship(ship);
    }

    if let Some(flagship) = armada.ships.choose_mut(rng) {
        flagship.is_flagship = true;
    }

    armada
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_army_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let army = muster_army("Red", &mut rng);
            assert!((3..=8).contains(&army.brigades.len()));
            assert!((1..=3).contains(&army.general.level));
            assert!(army.general.trait_.get().is_some());
            assert!(army.validate().is_ok());
            for b in &army.brigades {
                if let Some(e) = b.enhancement.get() {
                    assert!(brigade_enhancements(b.brigade_type).contains(e));
                }
            }
        }
    }

    #[test]
    fn test_armada_has_one_flagship() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let armada = muster_armada("Blue", &mut rng);
            assert!((2..=6).contains(&armada.ships.len()));
            assert_eq!(armada.ships.iter().filter(|s| s.is_flagship).count(), 1);
            assert!(armada.validate().is_ok());
        }
    }

    #[test]
    fn test_same_seed_same_forces() {
        let a = muster_army("Red", &mut ChaCha8Rng::seed_from_u64(3));
        let b = muster_army("Red", &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
