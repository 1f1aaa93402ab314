//! Venue types and their tuning tables.
//!
//! Each venue type has its own arrival profile, spending band, ambience
//! expectations, and canonical service role. All numeric tuning for a
//! venue type lives here; the engine crate only reads it.

use serde::{Deserialize, Serialize};

use crate::service::StaffRole;

/// Weekend (Friday/Saturday) arrival multiplier.
pub const WEEKEND_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    Bar,
    Restaurant,
    Nightclub,
    FastFood,
}

/// All venue types, in catalog order.
pub const ALL_VENUE_TYPES: [VenueType; 4] = [
    VenueType::Bar,
    VenueType::Restaurant,
    VenueType::Nightclub,
    VenueType::FastFood,
];

impl VenueType {
    /// Base hourly arrival rate in customer groups, before multipliers.
    pub fn base_arrival_rate(self) -> f32 {
        match self {
            VenueType::Bar => 8.0,
            VenueType::Restaurant => 10.0,
            VenueType::Nightclub => 12.0,
            VenueType::FastFood => 15.0,
        }
    }

    /// Hour-of-day demand curve. Each type has its own peak windows.
    pub fn hour_multiplier(self, hour: u32) -> f32 {
        match self {
            VenueType::Bar => match hour {
                17..=19 => 1.5,
                20..=23 => 2.0,
                0..=1 => 1.2,
                12..=16 => 0.8,
                _ => 0.3,
            },
            VenueType::Restaurant => match hour {
                12..=14 => 2.0,
                18..=21 => 2.5,
                11 | 15..=17 => 0.8,
                22 => 0.6,
                _ => 0.3,
            },
            VenueType::Nightclub => match hour {
                22..=23 => 2.5,
                0..=3 => 3.0,
                20..=21 => 1.2,
                _ => 0.1,
            },
            VenueType::FastFood => match hour {
                12..=14 => 1.8,
                18..=20 => 1.5,
                8..=11 | 15..=17 | 21..=23 => 1.0,
                _ => 0.5,
            },
        }
    }

    /// What one person is expected to spend here, used for the
    /// value-for-money term of final satisfaction.
    pub fn expected_spend(self) -> f32 {
        match self {
            VenueType::Bar => 20.0,
            VenueType::Restaurant => 30.0,
            VenueType::Nightclub => 25.0,
            VenueType::FastFood => 10.0,
        }
    }

    /// Per-person budget draw band, before customer-type and city modifiers.
    pub fn budget_range(self) -> (f32, f32) {
        match self {
            VenueType::Bar => (15.0, 40.0),
            VenueType::Restaurant => (20.0, 50.0),
            VenueType::Nightclub => (20.0, 60.0),
            VenueType::FastFood => (8.0, 20.0),
        }
    }

    /// Whether food orders are taken at all.
    pub fn serves_food(self) -> bool {
        matches!(self, VenueType::Restaurant | VenueType::FastFood)
    }

    /// The role that takes orders here.
    pub fn service_role(self) -> StaffRole {
        match self {
            VenueType::Restaurant | VenueType::FastFood => StaffRole::Waiter,
            VenueType::Bar | VenueType::Nightclub => StaffRole::Bartender,
        }
    }

    /// Multiplier on how long patrons take to finish their order.
    pub fn consumption_factor(self) -> f32 {
        match self {
            VenueType::FastFood => 0.7,
            VenueType::Bar | VenueType::Nightclub => 1.2,
            VenueType::Restaurant => 1.0,
        }
    }

    /// Band patrons of this venue draw their music preference from (0-100).
    pub fn music_preference_range(self) -> (f32, f32) {
        match self {
            VenueType::Bar => (40.0, 80.0),
            VenueType::Restaurant => (10.0, 50.0),
            VenueType::Nightclub => (70.0, 100.0),
            VenueType::FastFood => (20.0, 60.0),
        }
    }

    /// Band patrons of this venue draw their lighting preference from (0-100).
    pub fn lighting_preference_range(self) -> (f32, f32) {
        match self {
            VenueType::Bar => (20.0, 60.0),
            VenueType::Restaurant => (50.0, 90.0),
            VenueType::Nightclub => (10.0, 40.0),
            VenueType::FastFood => (60.0, 100.0),
        }
    }

    /// Catalog key for this venue type.
    pub fn key(self) -> &'static str {
        match self {
            VenueType::Bar => "bar",
            VenueType::Restaurant => "restaurant",
            VenueType::Nightclub => "nightclub",
            VenueType::FastFood => "fast_food",
        }
    }

    /// Parse a catalog key.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_VENUE_TYPES.into_iter().find(|vt| vt.key() == key)
    }
}

/// Whether `hour` falls within opening hours. A closing hour at or before
/// the opening hour means the venue runs past midnight.
pub fn hours_contain(opening_hour: u32, closing_hour: u32, hour: u32) -> bool {
    if opening_hour == closing_hour {
        // Open around the clock.
        return true;
    }
    if opening_hour < closing_hour {
        (opening_hour..closing_hour).contains(&hour)
    } else {
        hour >= opening_hour || hour < closing_hour
    }
}
