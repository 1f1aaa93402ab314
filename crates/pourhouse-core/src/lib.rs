//! Pourhouse Core - Venue Simulation Engine
//!
//! An ECS-based simulation of the patrons inside a hospitality venue:
//! arrival, seating, ordering, consumption, payment, and departure, with
//! the revenue and reputation feedback each visit generates.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: venues, staff members, patron groups
//! - **Components**: pure data (Venue, Inventory, Staff, Visit, Mood, ...)
//! - **Systems**: arrival generation, the lifecycle state machine, the
//!   order engine, and the mood model
//!
//! # Example
//!
//! ```rust,no_run
//! use pourhouse_core::prelude::*;
//! use pourhouse_core::catalog::default_catalog;
//! use pourhouse_core::generation::{spawn_venue, VenueBlueprint};
//! use pourhouse_logic::venues::VenueType;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//!
//! let catalog = default_catalog().unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! spawn_venue(
//!     &mut sim.world,
//!     &VenueBlueprint::typical(VenueType::Bar, "The Anchor"),
//!     &catalog,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! // One in-game day.
//! sim.run_ticks(96);
//! for event in sim.events.drain() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod catalog;
pub mod components;
pub mod engine;
pub mod events;
pub mod generation;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{Ledger, SimConfig, Simulation};
    pub use crate::events::{EventLog, VenueEvent, VenueEventKind};
}
