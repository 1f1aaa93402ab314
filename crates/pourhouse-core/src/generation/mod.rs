//! Generation - procedural creation of venues, staff, and patron groups.

mod names;
mod patrons;
mod venue;

pub use names::*;
pub use patrons::*;
pub use venue::*;
