//! Patience decay, ambience penalties, and the final satisfaction score.
//!
//! Patience has no lower bound; crossing zero is the forced-departure
//! trigger. Satisfaction is clamped to 0-100 wherever it is written.

use crate::patrons::Phase;
use crate::venues::VenueType;

/// Ambience mismatch wider than this starts to grate.
pub const AMBIENCE_TOLERANCE: f32 = 30.0;

/// Venue popularity hit when a group walks out with no patience left.
pub const WALKOUT_POPULARITY_PENALTY: f32 = 0.2;

/// Venue average-satisfaction hit when a group walks out.
pub const WALKOUT_SATISFACTION_PENALTY: f32 = 0.5;

/// Per-tick patience decay for a group in the given phase.
pub fn patience_decay(phase: Phase) -> f32 {
    match phase {
        Phase::Entering => 0.5,
        Phase::Seated => 0.2,
        Phase::Ordering => 0.3,
        Phase::Waiting => 0.4,
        Phase::Eating | Phase::Drinking => 0.1,
        Phase::Paying => 0.3,
        Phase::Leaving => 0.0,
    }
}

/// Per-tick patience penalty for a grubby venue (cleanliness 0-100).
pub fn cleanliness_penalty(cleanliness: f32) -> f32 {
    (50.0 - cleanliness).max(0.0) / 100.0
}

/// Penalties from one ambience channel (music or lighting) being off
/// from a patron's preference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmbiencePenalty {
    pub patience: f32,
    pub satisfaction: f32,
}

/// Mismatch penalty for a single channel; zero inside the tolerance band.
pub fn ambience_penalty(preference: f32, setting: f32) -> AmbiencePenalty {
    let excess = (preference - setting).abs() - AMBIENCE_TOLERANCE;
    if excess <= 0.0 {
        return AmbiencePenalty::default();
    }
    AmbiencePenalty {
        patience: excess / 200.0,
        satisfaction: excess / 100.0,
    }
}

/// How long a group will wait for its order before souring, in minutes.
pub fn wait_tolerance(patience: f32) -> f32 {
    20.0 + 30.0 * patience / 100.0
}

/// Satisfaction adjustment applied when the full order lands on the table.
pub fn serve_time_adjustment(wait_minutes: i64) -> f32 {
    if wait_minutes < 10 {
        10.0
    } else if wait_minutes < 20 {
        5.0
    } else if wait_minutes > 30 {
        -((wait_minutes - 30) as f32) / 2.0
    } else {
        0.0
    }
}

/// Everything the checkout-time satisfaction formula looks at.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    /// Satisfaction accumulated over the visit so far.
    pub accumulated: f32,
    /// Friendliness of the assigned server (0-100), if one was resolved.
    pub staff_friendliness: Option<f32>,
    /// Average skill of the assigned server (0-100), if one was resolved.
    pub staff_avg_skill: Option<f32>,
    pub service_quality: f32,
    pub venue_type: VenueType,
    /// What each person actually spent.
    pub actual_spend_per_person: f32,
    pub quality_importance: f32,
    pub atmosphere: f32,
    /// Group of one or two that landed a large table.
    pub small_group_large_table: bool,
    /// Ordered items that matched a stored drink/food preference.
    pub preference_matches: u32,
}

/// Final satisfaction at payment time, clamped to 0-100.
pub fn checkout_satisfaction(input: &CheckoutInput) -> f32 {
    let mut score = input.accumulated;

    if let Some(friendliness) = input.staff_friendliness {
        if friendliness > 0.0 {
            score += friendliness / 2.0;
        }
    }
    if let Some(avg_skill) = input.staff_avg_skill {
        score += (avg_skill - 50.0) / 5.0;
    }

    let expected = input.venue_type.expected_spend();
    let value_ratio = (input.service_quality / 100.0 * expected)
        / input.actual_spend_per_person.max(0.1)
        * (0.5 + input.quality_importance / 100.0);
    score += (value_ratio - 1.0) * 20.0;

    score += (input.atmosphere - 50.0) / 5.0;

    if input.small_group_large_table {
        score += 5.0;
    }
    score += 5.0 * input.preference_matches as f32;

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_rates_by_phase() {
        assert_eq!(patience_decay(Phase::Entering), 0.5);
        assert_eq!(patience_decay(Phase::Waiting), 0.4);
        assert_eq!(patience_decay(Phase::Eating), 0.1);
        assert_eq!(patience_decay(Phase::Leaving), 0.0);
    }

    #[test]
    fn test_cleanliness_penalty_kicks_in_below_50() {
        assert_eq!(cleanliness_penalty(80.0), 0.0);
        assert_eq!(cleanliness_penalty(50.0), 0.0);
        assert!((cleanliness_penalty(20.0) - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ambience_penalty_band() {
        assert_eq!(ambience_penalty(50.0, 70.0), AmbiencePenalty::default());
        let p = ambience_penalty(90.0, 20.0); // excess 40
        assert!((p.patience - 0.2).abs() < 0.001);
        assert!((p.satisfaction - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_serve_time_adjustment() {
        assert_eq!(serve_time_adjustment(5), 10.0);
        assert_eq!(serve_time_adjustment(15), 5.0);
        assert_eq!(serve_time_adjustment(25), 0.0);
        assert_eq!(serve_time_adjustment(40), -5.0);
    }

    #[test]
    fn test_checkout_satisfaction_clamps() {
        let mut input = CheckoutInput {
            accumulated: 95.0,
            staff_friendliness: Some(90.0),
            staff_avg_skill: Some(90.0),
            service_quality: 90.0,
            venue_type: VenueType::Restaurant,
            actual_spend_per_person: 10.0,
            quality_importance: 80.0,
            atmosphere: 90.0,
            small_group_large_table: true,
            preference_matches: 3,
        };
        assert_eq!(checkout_satisfaction(&input), 100.0);

        input.accumulated = 0.0;
        input.staff_friendliness = None;
        input.staff_avg_skill = Some(0.0);
        input.actual_spend_per_person = 200.0;
        input.atmosphere = 0.0;
        input.small_group_large_table = false;
        input.preference_matches = 0;
        assert_eq!(checkout_satisfaction(&input), 0.0);
    }

    #[test]
    fn test_good_value_raises_score() {
        let base = CheckoutInput {
            accumulated: 70.0,
            staff_friendliness: None,
            staff_avg_skill: None,
            service_quality: 100.0,
            venue_type: VenueType::Restaurant,
            actual_spend_per_person: 30.0,
            quality_importance: 50.0,
            atmosphere: 50.0,
            small_group_large_table: false,
            preference_matches: 0,
        };
        let cheap = CheckoutInput {
            actual_spend_per_person: 15.0,
            ..base.clone()
        };
        assert!(checkout_satisfaction(&cheap) > checkout_satisfaction(&base));
    }
}
