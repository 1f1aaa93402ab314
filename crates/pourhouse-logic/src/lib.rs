//! Pure simulation rules for Pourhouse.
//!
//! This crate contains the tuning tables and numeric rules that drive the
//! customer simulation, independent of any ECS, database, or runtime.
//! Functions take plain data and return results, making them unit-testable
//! and portable between the headless harness and the engine crate.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`arrivals`] | Hourly arrival rates and the per-tick group draw |
//! | [`clock`] | In-game calendar, 15-minute ticks, minute differences |
//! | [`mood`] | Patience decay, ambience penalties, final satisfaction |
//! | [`patrons`] | Customer types, group sizing, lifecycle phases |
//! | [`service`] | Preparation and consumption timing, staff roles, upsell |
//! | [`venues`] | Venue types and their arrival/spending/ambience tuning |

pub mod arrivals;
pub mod clock;
pub mod mood;
pub mod patrons;
pub mod service;
pub mod venues;
