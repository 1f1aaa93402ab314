//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod patron;
mod staff;
mod venue;

pub use patron::*;
pub use staff::*;
pub use venue::*;
