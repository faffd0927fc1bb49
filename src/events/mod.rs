//! Battle narration
//!
//! Resolvers append events to an [`EventSink`]; callers drain and render them.
//! Recording never touches terminal I/O.

use serde::{Deserialize, Serialize};

use crate::core::types::{CommanderId, ForceId, Round, UnitId};

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: Round,
    pub kind: BattleEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEventKind {
    BattleStarted,
    RoundStarted,
    PhaseStarted { phase: String },
    SideAssigned { positive: ForceId },
    UnitLost { unit: UnitId },
    Skirmish { attacker: UnitId, defender: UnitId },
    UnitRouted { unit: UnitId },
    Overrun { unit: UnitId, destroyed: bool },
    PitchResolved { result: i32, tally: i32 },
    UnitRallied { unit: UnitId },
    Reinforced { force: ForceId, count: usize },
    LineBroken { force: ForceId },
    Casualty { unit: UnitId },
    GeneralPromoted { general: CommanderId, level: u32 },
    GeneralCaptured { general: CommanderId },
    DuelStarted { ship: UnitId, opponent: UnitId },
    Maneuver { band: u8 },
    Disengaged,
    Boarding,
    ShipCaptured { ship: UnitId },
    Gunnery,
    Damage { ship: UnitId, effect: String },
    ShipSunk { ship: UnitId },
    VictoriesUpdated,
    BattleEnded,
    Note,
}

/// Append-only destination for battle events
pub trait EventSink {
    fn record(&mut self, event: BattleEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: BattleEvent) {
        (**self).record(event)
    }
}

/// Ordered in-memory log of battle events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: BattleEventKind, description: String, round: Round) {
        self.events.push(BattleEvent {
            round,
            kind,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Narration lines in recording order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }

    /// Take every recorded event, leaving the log empty
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&BattleEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }
}

impl EventSink for BattleEventLog {
    fn record(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: BattleEvent) {}
}

/// Stamps events with the current round and mirrors them to `tracing`
pub(crate) struct Narrator<'s, S: EventSink + ?Sized> {
    sink: &'s mut S,
    pub round: Round,
}

impl<'s, S: EventSink + ?Sized> Narrator<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self { sink, round: 0 }
    }

    pub fn log(&mut self, kind: BattleEventKind, description: String) {
        tracing::trace!(round = self.round, "{}", description);
        self.sink.record(BattleEvent {
            round: self.round,
            kind,
            description,
        });
    }

    pub fn note(&mut self, description: String) {
        self.log(BattleEventKind::Note, description);
    }
}
