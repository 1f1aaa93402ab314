//! Simulation engine - main entry point for running the venue simulation.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pourhouse_logic::clock::{GameClock, TICK_MINUTES};

use crate::components::{Patron, Staff, Venue};
use crate::events::EventLog;
use crate::systems::{arrival_system, lifecycle_system, mood_system, seated_occupancy};

/// Engine-level tuning and external (city) multipliers.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the engine's random stream; same seed, same run.
    pub seed: u64,
    /// Hard cap on concurrently active patron groups across all venues.
    pub max_patron_groups: usize,
    /// City-wide arrival multiplier (1.0 = neutral).
    pub city_popularity: f32,
    /// City-wide spending multiplier (1.0 = neutral).
    pub city_affluence: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_patron_groups: 64,
            city_popularity: 1.0,
            city_affluence: 1.0,
        }
    }
}

impl SimConfig {
    /// Reject configurations that indicate a content bug.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_patron_groups == 0 {
            return Err(ConfigError::NoPatronCapacity);
        }
        for (name, value) in [
            ("city_popularity", self.city_popularity),
            ("city_affluence", self.city_affluence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier { name, value });
            }
        }
        Ok(())
    }
}

/// Errors raised for invalid engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    NoPatronCapacity,
    InvalidMultiplier { name: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoPatronCapacity => {
                write!(f, "max_patron_groups must be at least 1")
            }
            ConfigError::InvalidMultiplier { name, value } => {
                write!(f, "{} must be finite and positive, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Player-side money sink. Entrance fees and settled bills land here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ledger {
    pub cash: f32,
}

/// The venue simulation.
///
/// Owns the ECS world, the clock, the random stream, and the event log.
/// Everything advances through [`Simulation::tick`], one 15-minute step
/// at a time, single-threaded; intra-tick ordering (who gets the last
/// table, who gets the idle waiter) is first-come-first-served and
/// reproducible for a given seed.
pub struct Simulation {
    /// ECS world containing venues, staff, and patron groups.
    pub world: World,
    /// Accumulated notifications for UI/logging collaborators.
    pub events: EventLog,
    /// Player money credited by fees and payments.
    pub ledger: Ledger,
    clock: GameClock,
    tick: u64,
    rng: StdRng,
    config: SimConfig,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            events: EventLog::new(),
            ledger: Ledger::default(),
            clock: GameClock::default(),
            tick: 0,
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Start from a specific clock reading.
    pub fn with_clock(mut self, clock: GameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Advance the simulation by one 15-minute tick.
    ///
    /// Order within a tick: clock, arrivals, lifecycle, mood. The roster
    /// is snapshotted before arrivals, so a group generated at tick T
    /// takes its first step at T+1, and each live group is visited
    /// exactly once however many removals happen mid-pass.
    pub fn tick(&mut self) {
        self.tick += 1;
        self.clock.advance(TICK_MINUTES);

        let roster: Vec<Entity> = self
            .world
            .query::<&Patron>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();

        arrival_system(
            &mut self.world,
            &self.clock,
            self.tick,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );
        lifecycle_system(
            &mut self.world,
            &roster,
            &self.clock,
            &mut self.rng,
            &mut self.ledger,
            &mut self.events,
        );
        mood_system(&mut self.world, &roster, &self.clock, &mut self.events);

        log::debug!(
            "tick {}: {:02}:{:02} day {}, {} active groups, {} events pending",
            self.tick,
            self.clock.hour,
            self.clock.minute,
            self.clock.day,
            self.patron_count(),
            self.events.len()
        );
    }

    /// Advance by `count` ticks.
    pub fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Count active patron groups.
    pub fn patron_count(&self) -> usize {
        self.world.query::<&Patron>().iter().count()
    }

    /// Count staff on a venue's roster.
    pub fn staff_count(&self, venue: Entity) -> usize {
        self.world
            .query::<&Staff>()
            .iter()
            .filter(|(_, staff)| staff.venue == venue)
            .count()
    }

    /// People currently seated at a venue.
    pub fn occupancy(&self, venue: Entity) -> u32 {
        seated_occupancy(&self.world, venue)
    }

    /// All venue entities.
    pub fn venues(&self) -> Vec<Entity> {
        self.world
            .query::<&Venue>()
            .iter()
            .map(|(entity, _)| entity)
            .collect()
    }
}
