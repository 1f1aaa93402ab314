//! Arrival rate math.
//!
//! Produces the expected number of new patron groups per tick for a venue
//! from its type curve, popularity, day of week, and the city around it.

use crate::clock::DayOfWeek;
use crate::venues::{VenueType, WEEKEND_MULTIPLIER};

/// Hourly arrival rate in groups for a venue at the given hour.
///
/// `popularity` is the venue's 0-100 popularity stat; `city_popularity` is
/// the external city-wide multiplier (1.0 = neutral).
pub fn hourly_rate(
    venue: VenueType,
    popularity: f32,
    hour: u32,
    day: DayOfWeek,
    city_popularity: f32,
) -> f32 {
    let popularity_factor = 0.5 + 1.5 * popularity / 100.0;
    let weekend = if day.is_weekend() { WEEKEND_MULTIPLIER } else { 1.0 };
    venue.base_arrival_rate() * popularity_factor * venue.hour_multiplier(hour) * weekend * city_popularity
}

/// Groups arriving in one 15-minute tick; `roll` is uniform in [0, 1).
///
/// The draw is `floor(rate/4 * roll)`, which undercounts the hourly rate.
/// Kept as-is: venue pacing is tuned around it.
pub fn groups_this_tick(hourly_rate: f32, roll: f32) -> u32 {
    (hourly_rate / 4.0 * roll).floor().max(0.0) as u32
}
