//! Arrival system - rolls new patron groups for every open venue.

use hecs::{Entity, World};
use rand::Rng;

use pourhouse_logic::arrivals;
use pourhouse_logic::clock::GameClock;
use pourhouse_logic::venues::VenueType;

use crate::components::{GroupProfile, Patron, Venue};
use crate::engine::SimConfig;
use crate::events::{EventLog, VenueEventKind};
use crate::generation::spawn_patron_group;

/// Generate arrivals for this tick. New groups are spawned into the world
/// but take their first lifecycle step on the next tick.
pub fn arrival_system(
    world: &mut World,
    clock: &GameClock,
    tick: u64,
    config: &SimConfig,
    rng: &mut impl Rng,
    events: &mut EventLog,
) {
    // Snapshot venues first; spawning borrows the world mutably.
    let venues: Vec<(Entity, VenueType, f32, bool)> = world
        .query::<&Venue>()
        .iter()
        .map(|(entity, venue)| {
            (
                entity,
                venue.venue_type,
                venue.popularity,
                venue.is_open(clock.hour),
            )
        })
        .collect();

    let mut active = world.query::<&Patron>().iter().count();

    for (venue_entity, venue_type, popularity, open) in venues {
        if !open {
            continue;
        }

        let rate = arrivals::hourly_rate(
            venue_type,
            popularity,
            clock.hour,
            clock.day_of_week,
            config.city_popularity,
        );
        let incoming = arrivals::groups_this_tick(rate, rng.gen());

        for _ in 0..incoming {
            if active >= config.max_patron_groups {
                log::debug!("patron cap {} reached, suppressing arrivals", config.max_patron_groups);
                return;
            }
            let Some(group) = spawn_patron_group(
                world,
                venue_entity,
                clock,
                tick,
                config.city_affluence,
                rng,
            ) else {
                continue;
            };
            active += 1;

            let group_size = world
                .get::<&GroupProfile>(group)
                .map(|profile| profile.group_size)
                .unwrap_or(1);
            events.record(
                VenueEventKind::Arrived,
                group,
                venue_entity,
                *clock,
                format!("party of {}", group_size),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::generation::{spawn_venue, VenueBlueprint};
    use pourhouse_logic::clock::DayOfWeek;
    use rand::SeedableRng;

    fn setup(popularity: f32) -> (World, Entity) {
        let mut world = World::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let catalog = default_catalog().unwrap();
        let venue = spawn_venue(
            &mut world,
            &VenueBlueprint::typical(VenueType::Nightclub, "Velvet Room"),
            &catalog,
            &mut rng,
        )
        .unwrap();
        world.get::<&mut Venue>(venue).unwrap().popularity = popularity;
        (world, venue)
    }

    #[test]
    fn test_closed_venue_generates_nothing() {
        let (mut world, _) = setup(100.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut events = EventLog::new();
        // Nightclub is shut at 10:00.
        let clock = GameClock::new(10, 0, DayOfWeek::Friday);
        for _ in 0..50 {
            arrival_system(&mut world, &clock, 1, &SimConfig::default(), &mut rng, &mut events);
        }
        assert_eq!(world.query::<&Patron>().iter().count(), 0);
    }

    #[test]
    fn test_peak_hour_generates_groups() {
        let (mut world, _) = setup(100.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut events = EventLog::new();
        let clock = GameClock::new(23, 0, DayOfWeek::Friday);
        for tick in 0..50 {
            arrival_system(&mut world, &clock, tick, &SimConfig::default(), &mut rng, &mut events);
        }
        let spawned = world.query::<&Patron>().iter().count();
        assert!(spawned > 0);
        assert_eq!(
            events.iter().filter(|e| e.kind == VenueEventKind::Arrived).count(),
            spawned
        );
    }

    #[test]
    fn test_patron_cap_is_respected() {
        let (mut world, _) = setup(100.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut events = EventLog::new();
        let config = SimConfig {
            max_patron_groups: 3,
            ..SimConfig::default()
        };
        let clock = GameClock::new(23, 0, DayOfWeek::Saturday);
        for tick in 0..200 {
            arrival_system(&mut world, &clock, tick, &config, &mut rng, &mut events);
        }
        assert!(world.query::<&Patron>().iter().count() <= 3);
    }
}
