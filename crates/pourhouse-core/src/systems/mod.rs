//! Systems - logic that operates on components

mod arrival;
mod lifecycle;
mod mood;
mod orders;

pub use arrival::*;
pub use lifecycle::*;
pub use mood::*;
pub use orders::*;
