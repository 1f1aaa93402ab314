//! Service timing, staff roles, and upsell rules.

use serde::{Deserialize, Serialize};

use crate::venues::VenueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Waiter,
    Bartender,
    Cook,
    Security,
}

impl StaffRole {
    /// How many patron groups one person of this role can serve at once.
    pub fn concurrent_cap(self) -> usize {
        match self {
            StaffRole::Waiter => 3,
            StaffRole::Bartender => 5,
            StaffRole::Cook | StaffRole::Security => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Drink,
    Food,
}

/// Minutes before a group that just sat down is ready to order.
pub const ORDER_READY_MINUTES: (u32, u32) = (5, 15);

/// Minutes a paid-up group lingers before actually leaving.
pub const LEAVING_LINGER_MINUTES: i64 = 5;

/// Customer-service skill a waiter needs before upsells are attempted.
pub const UPSELL_SKILL_GATE: f32 = 70.0;

/// Minutes to prepare one item, scaled by the server's speed skill (0-100).
pub fn prep_minutes(kind: ItemKind, venue: VenueType, speed_skill: f32) -> f32 {
    let base = match kind {
        ItemKind::Drink => 5.0,
        ItemKind::Food => {
            if venue == VenueType::FastFood {
                10.0
            } else {
                20.0
            }
        }
    };
    base / (0.5 + speed_skill / 100.0)
}

/// Minutes a group takes to get through its served order.
pub fn consumption_minutes(drinks: usize, foods: usize, venue: VenueType, group_size: u32) -> f32 {
    let base = drinks as f32 * 10.0 + foods as f32 * 20.0;
    base * venue.consumption_factor() * (1.0 + 0.1 * (group_size.saturating_sub(1)) as f32)
}

/// Probability of an upsell attempt succeeding, given customer-service skill.
pub fn upsell_probability(customer_service: f32) -> f32 {
    ((customer_service - UPSELL_SKILL_GATE) / 100.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prep_minutes_skill_scaling() {
        // Skill 100 halves-and-then-some a 5 minute drink: 5 / 1.5.
        let fast = prep_minutes(ItemKind::Drink, VenueType::Bar, 100.0);
        assert!((fast - 5.0 / 1.5).abs() < 0.01);
        // Skill 0 doubles it: 5 / 0.5.
        let slow = prep_minutes(ItemKind::Drink, VenueType::Bar, 0.0);
        assert!((slow - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_food_prep_is_faster_at_fast_food() {
        let ff = prep_minutes(ItemKind::Food, VenueType::FastFood, 50.0);
        let rest = prep_minutes(ItemKind::Food, VenueType::Restaurant, 50.0);
        assert!((ff * 2.0 - rest).abs() < 0.01);
    }

    #[test]
    fn test_consumption_scales_with_group() {
        let solo = consumption_minutes(1, 1, VenueType::Restaurant, 1);
        let four = consumption_minutes(1, 1, VenueType::Restaurant, 4);
        assert!((solo - 30.0).abs() < 0.01);
        assert!((four - 30.0 * 1.3).abs() < 0.01);
    }

    #[test]
    fn test_upsell_probability_gated() {
        assert_eq!(upsell_probability(60.0), 0.0);
        assert_eq!(upsell_probability(70.0), 0.0);
        assert!((upsell_probability(90.0) - 0.2).abs() < f32::EPSILON);
    }
}
