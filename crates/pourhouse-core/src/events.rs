//! Visit notifications for UI, logging, and rendering collaborators.
//!
//! The engine only produces these; nothing it does depends on them being
//! consumed. Collaborators drain the log whenever they like.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use pourhouse_logic::clock::GameClock;

/// What happened to a patron group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueEventKind {
    /// A new group walked in.
    Arrived,
    /// Rejected at the door: fee too steep or no table worth waiting for.
    TurnedAway,
    /// Got a table.
    Seated,
    /// Order placed with a staff member.
    Ordered,
    /// Full order on the table.
    Served,
    /// Finished consuming, about to settle up.
    ReadyToPay,
    /// Bill settled, revenue recorded.
    Paid,
    /// Left normally after lingering.
    Left,
    /// Ran out of patience and stormed out mid-visit.
    WalkedOut,
}

/// One notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueEvent {
    pub id: u32,
    pub kind: VenueEventKind,
    /// Bit representation of the patron group entity. Unique across the
    /// run: despawned slots are recycled with a fresh generation.
    pub group_id: u64,
    /// Bit representation of the venue entity.
    pub venue_id: u64,
    pub at: GameClock,
    /// Free-form context: group size, departure reason, order total.
    pub detail: String,
}

/// Accumulates notifications between drains.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<VenueEvent>,
    next_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: VenueEventKind,
        group: Entity,
        venue: Entity,
        at: GameClock,
        detail: impl Into<String>,
    ) {
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(VenueEvent {
            id,
            kind,
            group_id: group.to_bits().get(),
            venue_id: venue.to_bits().get(),
            at,
            detail: detail.into(),
        });
    }

    /// Hand accumulated events to a collaborator and clear the log.
    pub fn drain(&mut self) -> Vec<VenueEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VenueEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
