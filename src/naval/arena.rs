//! Ship arena for a fleet battle
//!
//! Every ship gets a stable [`ShipIdx`] at the start of the battle. Pools are
//! ordered index lists; a ship leaves its pool when sunk or captured and its
//! fate is recorded in its berth.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipIdx(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipFate {
    Afloat,
    Sunk,
    Captured,
}

#[derive(Debug, Clone)]
struct Berth {
    fleet: usize,
    slot: usize, // Position in the armada's ship list
    fate: ShipFate,
}

#[derive(Debug, Clone)]
pub struct ShipArena {
    berths: Vec<Berth>,
    pools: [Vec<ShipIdx>; 2],
}

impl ShipArena {
    /// Arena for two fleets of the given sizes, every ship afloat
    pub fn new(sizes: [usize; 2]) -> Self {
        let mut berths = Vec::with_capacity(sizes[0] + sizes[1]);
        let mut pools: [Vec<ShipIdx>; 2] = [Vec::new(), Vec::new()];

        for (fleet, &size) in sizes.iter().enumerate() {
            for slot in 0..size {
                pools[fleet].push(ShipIdx(berths.len()));
                berths.push(Berth {
                    fleet,
                    slot,
                    fate: ShipFate::Afloat,
                });
            }
        }

        Self { berths, pools }
    }

    /// Remaining ships of a fleet, in pool order
    pub fn pool(&self, fleet: usize) -> &[ShipIdx] {
        &self.pools[fleet]
    }

    /// Ships on the line this round: the head of the pool
    pub fn active(&self, fleet: usize, width: usize) -> &[ShipIdx] {
        let pool = &self.pools[fleet];
        &pool[..width.min(pool.len())]
    }

    pub fn slot(&self, idx: ShipIdx) -> usize {
        self.berths[idx.0].slot
    }

    pub fn fleet(&self, idx: ShipIdx) -> usize {
        self.berths[idx.0].fleet
    }

    pub fn fate(&self, idx: ShipIdx) -> ShipFate {
        self.berths[idx.0].fate
    }

    /// Take a ship out of its pool for good
    pub fn strike(&mut self, idx: ShipIdx, fate: ShipFate) {
        let berth = &mut self.berths[idx.0];
        berth.fate = fate;
        self.pools[berth.fleet].retain(|&i| i != idx);
    }

    /// Roster slots a fleet has lost, in roster order, with their fate
    pub fn losses(&self, fleet: usize) -> impl Iterator<Item = (usize, ShipFate)> + '_ {
        self.berths
            .iter()
            .filter(move |b| b.fleet == fleet && b.fate != ShipFate::Afloat)
            .map(|b| (b.slot, b.fate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_in_roster_order() {
        let arena = ShipArena::new([2, 3]);
        assert_eq!(arena.pool(0).len(), 2);
        assert_eq!(arena.pool(1).len(), 3);

        let slots: Vec<_> = arena.pool(1).iter().map(|&i| arena.slot(i)).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert!(arena.pool(1).iter().all(|&i| arena.fleet(i) == 1));
    }

    #[test]
    fn test_active_capped_by_width() {
        let arena = ShipArena::new([5, 1]);
        assert_eq!(arena.active(0, 2).len(), 2);
        assert_eq!(arena.active(1, 2).len(), 1);
    }

    #[test]
    fn test_strike_removes_and_records() {
        let mut arena = ShipArena::new([3, 1]);
        let second = arena.pool(0)[1];
        arena.strike(second, ShipFate::Captured);

        assert_eq!(arena.pool(0).len(), 2);
        assert_eq!(arena.fate(second), ShipFate::Captured);
        assert_eq!(arena.losses(0).collect::<Vec<_>>(), vec![(1, ShipFate::Captured)]);
        assert_eq!(arena.losses(1).count(), 0);
        // The next ship moves up the line
        assert_eq!(arena.slot(arena.active(0, 2)[1]), 2);
    }
}
