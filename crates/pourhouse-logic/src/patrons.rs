//! Customer types, group sizing, and the visit lifecycle phases.
//!
//! A patron group gets exactly one [`CustomerType`] at generation, which
//! scales its patience, spending, and sampling weight by time of day and
//! venue type. Group sizes come from per-type cumulative probability
//! tables.

use serde::{Deserialize, Serialize};

use crate::venues::VenueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    /// Locals dropping in on a normal night.
    Regular,
    /// Visitors out to see the city; bigger groups, looser wallets.
    Tourist,
    /// Lunch meetings and after-work dinners; impatient, high spend.
    Business,
    /// Cheap nights out in larger packs.
    Student,
}

pub const ALL_CUSTOMER_TYPES: [CustomerType; 4] = [
    CustomerType::Regular,
    CustomerType::Tourist,
    CustomerType::Business,
    CustomerType::Student,
];

impl CustomerType {
    /// Multiplier on the initial patience draw.
    pub fn patience_modifier(self) -> f32 {
        match self {
            CustomerType::Regular => 1.0,
            CustomerType::Tourist => 1.1,
            CustomerType::Business => 0.8,
            CustomerType::Student => 1.2,
        }
    }

    /// Multiplier on the per-person budget draw.
    pub fn spending_modifier(self) -> f32 {
        match self {
            CustomerType::Regular => 1.0,
            CustomerType::Tourist => 1.2,
            CustomerType::Business => 1.5,
            CustomerType::Student => 0.6,
        }
    }

    /// Cumulative probability table of group sizes.
    pub fn group_size_table(self) -> &'static [(u32, f32)] {
        match self {
            CustomerType::Regular => &[(1, 0.30), (2, 0.65), (3, 0.85), (4, 1.0)],
            CustomerType::Tourist => &[(2, 0.35), (3, 0.60), (4, 0.85), (6, 1.0)],
            CustomerType::Business => &[(1, 0.20), (2, 0.55), (3, 0.85), (4, 1.0)],
            CustomerType::Student => &[(2, 0.25), (3, 0.50), (4, 0.75), (6, 1.0)],
        }
    }

    /// Group size for a uniform roll in [0, 1).
    pub fn sample_group_size(self, roll: f32) -> u32 {
        let table = self.group_size_table();
        for &(size, cumulative) in table {
            if roll < cumulative {
                return size;
            }
        }
        table.last().map(|&(size, _)| size).unwrap_or(1)
    }

    /// Sampling weight of this type at a given venue and hour.
    pub fn arrival_weight(self, venue: VenueType, hour: u32) -> f32 {
        match self {
            CustomerType::Regular => 1.0,
            CustomerType::Tourist => {
                let daytime = if (10..=18).contains(&hour) { 1.3 } else { 0.9 };
                let place = match venue {
                    VenueType::Restaurant | VenueType::Bar => 1.2,
                    _ => 1.0,
                };
                daytime * place
            }
            CustomerType::Business => {
                let mealtime = if (12..=14).contains(&hour) || (18..=21).contains(&hour) {
                    1.5
                } else {
                    0.5
                };
                let place = match venue {
                    VenueType::Restaurant => 1.3,
                    VenueType::Nightclub => 0.4,
                    _ => 1.0,
                };
                mealtime * place
            }
            CustomerType::Student => {
                let late = if hour >= 20 || hour < 2 { 1.5 } else { 0.8 };
                let place = match venue {
                    VenueType::Nightclub | VenueType::Bar => 1.4,
                    VenueType::FastFood => 1.4,
                    VenueType::Restaurant => 0.7,
                };
                late * place
            }
        }
    }

    /// Band the quality-vs-price importance is drawn from (0-100).
    pub fn quality_importance_range(self) -> (f32, f32) {
        match self {
            CustomerType::Regular => (30.0, 70.0),
            CustomerType::Tourist => (40.0, 80.0),
            CustomerType::Business => (60.0, 95.0),
            CustomerType::Student => (10.0, 40.0),
        }
    }

    /// Band the speed importance is drawn from (0-100).
    pub fn speed_importance_range(self) -> (f32, f32) {
        match self {
            CustomerType::Regular => (30.0, 70.0),
            CustomerType::Tourist => (20.0, 50.0),
            CustomerType::Business => (60.0, 95.0),
            CustomerType::Student => (30.0, 60.0),
        }
    }
}

/// Pick a customer type by weighted sampling; `roll` is uniform in [0, 1).
pub fn sample_customer_type(venue: VenueType, hour: u32, roll: f32) -> CustomerType {
    let weights: Vec<f32> = ALL_CUSTOMER_TYPES
        .iter()
        .map(|ct| ct.arrival_weight(venue, hour))
        .collect();
    let total: f32 = weights.iter().sum();
    let mut target = roll * total;
    for (ct, weight) in ALL_CUSTOMER_TYPES.into_iter().zip(weights) {
        if target < weight {
            return ct;
        }
        target -= weight;
    }
    CustomerType::Regular
}

/// Lifecycle phase of a patron group's visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// At the door: fee check, then trying to get a table.
    Entering,
    /// At a table, settling in before ordering.
    Seated,
    /// Ready to order, needs a staff member.
    Ordering,
    /// Order placed, items being prepared.
    Waiting,
    /// Served, at least one food item on the table.
    Eating,
    /// Served, drinks only.
    Drinking,
    /// Finished, settling the bill.
    Paying,
    /// Bill settled, lingering before heading out.
    Leaving,
}

impl Phase {
    /// Short label used in departure reasons and event details.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Entering => "entering",
            Phase::Seated => "seated",
            Phase::Ordering => "ordering",
            Phase::Waiting => "waiting",
            Phase::Eating => "eating",
            Phase::Drinking => "drinking",
            Phase::Paying => "paying",
            Phase::Leaving => "leaving",
        }
    }
}
