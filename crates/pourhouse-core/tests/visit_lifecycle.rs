//! Integration tests for the full patron visit pipeline.
//!
//! Exercises: arrival -> seating -> ordering -> waiting -> consuming
//! -> paying -> leaving, plus the invariants the engine guarantees at
//! every externally observable point.

use std::collections::HashSet;

use hecs::Entity;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pourhouse_core::catalog::default_catalog;
use pourhouse_core::generation::{spawn_venue, VenueBlueprint};
use pourhouse_core::prelude::*;
use pourhouse_core::systems::lifecycle_system;
use pourhouse_logic::clock::{DayOfWeek, GameClock};
use pourhouse_logic::patrons::{CustomerType, Phase};
use pourhouse_logic::service::ItemKind;
use pourhouse_logic::venues::VenueType;

// ── Helpers ────────────────────────────────────────────────────────────

/// A simulation at noon on a Monday with arrivals effectively disabled,
/// so scripted groups are the only actors.
fn quiet_sim() -> Simulation {
    Simulation::new(SimConfig {
        seed: 7,
        max_patron_groups: 64,
        city_popularity: 0.0001,
        city_affluence: 1.0,
    })
    .unwrap()
    .with_clock(GameClock::new(12, 0, DayOfWeek::Monday))
}

struct GroupSpec {
    size: u32,
    budget: f32,
    patience: f32,
    phase: Phase,
}

fn script_group(sim: &mut Simulation, venue: Entity, spec: GroupSpec) -> Entity {
    let arrived_at = *sim.clock();
    let seated = spec.phase != Phase::Entering;
    sim.world.spawn((
        Patron,
        GroupProfile {
            customer_type: CustomerType::Regular,
            group_size: spec.size,
            venue,
            spending_budget: spec.budget,
            total_spending: 0.0,
            joined_tick: 0,
        },
        VisitTimers::new(arrived_at),
        Visit {
            phase: spec.phase,
            fee_settled: seated,
            order_ready_after: Some(5),
            server: None,
            table: seated.then_some(TableSpot {
                id: 1,
                size: TableSize::Medium,
            }),
        },
        Mood {
            patience: spec.patience,
            satisfaction: 70.0,
        },
        Preferences {
            music: 50.0,
            lighting: 50.0,
            quality_importance: 50.0,
            speed_importance: 50.0,
            drinks: vec![],
            foods: vec![],
        },
        Order::default(),
    ))
}

fn open_venue(sim: &mut Simulation, venue_type: VenueType) -> Entity {
    // Open around the clock so scripted visits never hit closing time.
    sim.world.spawn((
        Venue::new(venue_type, "Fixture", 60).with_hours(0, 0),
        Inventory::default(),
    ))
}

fn stock_drink(sim: &mut Simulation, venue: Entity, name: &str, price: f32, stock: u32) {
    sim.world
        .get::<&mut Inventory>(venue)
        .unwrap()
        .drinks
        .push(StockItem {
            name: name.into(),
            stock,
            sell_price: price,
        });
}

fn stock_food(sim: &mut Simulation, venue: Entity, name: &str, price: f32, stock: u32) {
    sim.world
        .get::<&mut Inventory>(venue)
        .unwrap()
        .food
        .push(StockItem {
            name: name.into(),
            stock,
            sell_price: price,
        });
}

fn hire_waiter(sim: &mut Simulation, venue: Entity, speed: f32, customer_service: f32) -> Entity {
    sim.world.spawn((Staff {
        venue,
        name: "Test Waiter".into(),
        role: pourhouse_logic::service::StaffRole::Waiter,
        is_working: true,
        skills: StaffSkills {
            speed,
            customer_service,
        },
        friendliness: 50.0,
    },))
}

fn phase_of(sim: &Simulation, group: Entity) -> Phase {
    sim.world.get::<&Visit>(group).unwrap().phase
}

// ── Boundary scenarios ─────────────────────────────────────────────────

#[test]
fn entrance_fee_beyond_budget_rejects_the_group() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Nightclub);
    sim.world.get::<&mut Venue>(venue).unwrap().entrance_fee = 10.0;

    // Four people with 2 per person: a 10 cover is five times the 20%
    // threshold of the per-person budget.
    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 4,
            budget: 2.0,
            patience: 90.0,
            phase: Phase::Entering,
        },
    );

    sim.tick();

    assert!(!sim.world.contains(group));
    assert_eq!(sim.ledger.cash, 0.0);
    let kinds: Vec<VenueEventKind> = sim.events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![VenueEventKind::TurnedAway]);
}

#[test]
fn empty_venue_always_seats_and_rewards() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Restaurant);
    hire_waiter(&mut sim, venue, 50.0, 50.0);

    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 30.0,
            patience: 90.0,
            phase: Phase::Entering,
        },
    );

    sim.tick();

    // Zero occupancy means the table roll cannot fail.
    assert_eq!(phase_of(&sim, group), Phase::Seated);
    let mood = sim.world.get::<&Mood>(group).unwrap();
    assert_eq!(mood.satisfaction, 75.0);
    drop(mood);
    let visit = sim.world.get::<&Visit>(group).unwrap();
    assert!(visit.table.is_some());
    assert!(visit.server.is_some());
}

#[test]
fn skilled_staff_preps_a_drink_within_one_tick() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Bar);
    stock_drink(&mut sim, venue, "House Lager", 5.0, 10);
    let barkeep = hire_waiter(&mut sim, venue, 100.0, 50.0);

    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 1,
            budget: 30.0,
            patience: 90.0,
            phase: Phase::Waiting,
        },
    );
    {
        let mut timers = sim.world.get::<&mut VisitTimers>(group).unwrap();
        timers.order_placed_at = Some(*sim.clock());
    }
    {
        let mut visit = sim.world.get::<&mut Visit>(group).unwrap();
        visit.server = Some(barkeep);
    }
    sim.world.get::<&mut Order>(group).unwrap().items.push(OrderItem {
        kind: ItemKind::Drink,
        name: "House Lager".into(),
        price: 5.0,
        prepared: false,
    });

    sim.tick();

    // Effective prep is 5 / (0.5 + 1.0) = 3.3 minutes; the 15-minute tick
    // covers it.
    let order = sim.world.get::<&Order>(group).unwrap();
    assert!(order.items[0].prepared);
    drop(order);
    assert_eq!(phase_of(&sim, group), Phase::Drinking);
    assert!(sim.world.get::<&VisitTimers>(group).unwrap().served_at.is_some());
}

#[test]
fn over_budget_order_evicts_most_expensive_items() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Bar);
    stock_drink(&mut sim, venue, "Pale Ale", 6.0, 10);
    hire_waiter(&mut sim, venue, 50.0, 50.0);

    // Three people at 6 each is 18; budget is 5 per person = 15.
    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 3,
            budget: 5.0,
            patience: 90.0,
            phase: Phase::Ordering,
        },
    );

    sim.tick();

    assert_eq!(phase_of(&sim, group), Phase::Waiting);
    let profile = sim.world.get::<&GroupProfile>(group).unwrap();
    let order = sim.world.get::<&Order>(group).unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total(), 12.0);
    assert_eq!(profile.total_spending, 12.0);
    assert!(profile.total_spending <= profile.spending_budget * profile.group_size as f32);
    drop((profile, order));

    // The evicted ale went back on the shelf.
    let inventory = sim.world.get::<&Inventory>(venue).unwrap();
    assert_eq!(inventory.drinks[0].stock, 8);
}

#[test]
fn patience_hitting_zero_forces_departure_and_dents_the_venue() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Restaurant);
    stock_food(&mut sim, venue, "Steak Frites", 26.0, 10);

    // Unstaffed kitchen: a 20-minute dish preps at 40 minutes, so the
    // group is still waiting when the decay lands.
    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 30.0,
            patience: 0.4,
            phase: Phase::Waiting,
        },
    );
    {
        let mut timers = sim.world.get::<&mut VisitTimers>(group).unwrap();
        timers.order_placed_at = Some(*sim.clock());
    }
    sim.world.get::<&mut Order>(group).unwrap().items.push(OrderItem {
        kind: ItemKind::Food,
        name: "Steak Frites".into(),
        price: 26.0,
        prepared: false,
    });

    sim.tick();

    assert!(!sim.world.contains(group));
    let venue_data = sim.world.get::<&Venue>(venue).unwrap();
    assert!((venue_data.popularity - 49.8).abs() < 0.001);
    assert!((venue_data.customer_satisfaction - 69.5).abs() < 0.001);
    drop(venue_data);

    let walkouts: Vec<&VenueEvent> = sim
        .events
        .iter()
        .filter(|e| e.kind == VenueEventKind::WalkedOut)
        .collect();
    assert_eq!(walkouts.len(), 1);
    assert!(walkouts[0].detail.contains("waiting"));
}

// ── Full visit walkthrough ─────────────────────────────────────────────

#[test]
fn a_staffed_restaurant_turns_a_visit_into_revenue() {
    let mut sim = quiet_sim();
    let catalog = default_catalog().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let venue = spawn_venue(
        &mut sim.world,
        &VenueBlueprint::typical(VenueType::Restaurant, "Chez Test").with_capacity(60),
        &catalog,
        &mut rng,
    )
    .unwrap();
    // Keep the fixture open around the clock so the visit can run long.
    {
        let mut venue_data = sim.world.get::<&mut Venue>(venue).unwrap();
        venue_data.opening_hour = 0;
        venue_data.closing_hour = 0;
    }

    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 40.0,
            patience: 95.0,
            phase: Phase::Entering,
        },
    );

    // A generous day's worth of ticks; the visit completes well within.
    let mut seen = HashSet::new();
    for _ in 0..96 {
        if sim.world.contains(group) {
            seen.insert(phase_of(&sim, group));
        }
        sim.tick();
        if !sim.world.contains(group) {
            break;
        }
    }

    assert!(!sim.world.contains(group), "visit should have completed");
    for phase in [
        Phase::Seated,
        Phase::Ordering,
        Phase::Waiting,
        Phase::Paying,
        Phase::Leaving,
    ] {
        assert!(seen.contains(&phase), "never observed {:?}", phase);
    }

    let venue_data = sim.world.get::<&Venue>(venue).unwrap();
    assert!(venue_data.daily_revenue > 0.0);
    assert_eq!(venue_data.total_customers_served, 2);
    assert_eq!(venue_data.daily_revenue, venue_data.weekly_revenue);
    drop(venue_data);
    assert!(sim.ledger.cash > 0.0);

    let kinds: Vec<VenueEventKind> = sim.events.iter().map(|e| e.kind).collect();
    for expected in [
        VenueEventKind::Seated,
        VenueEventKind::Ordered,
        VenueEventKind::Served,
        VenueEventKind::ReadyToPay,
        VenueEventKind::Paid,
        VenueEventKind::Left,
    ] {
        assert!(kinds.contains(&expected), "missing {:?}", expected);
    }
}

// ── Engine invariants ──────────────────────────────────────────────────

#[test]
fn waiting_with_no_elapsed_time_changes_nothing() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Restaurant);

    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 30.0,
            patience: 80.0,
            phase: Phase::Waiting,
        },
    );
    {
        let mut timers = sim.world.get::<&mut VisitTimers>(group).unwrap();
        timers.order_placed_at = Some(*sim.clock());
    }
    {
        let mut order = sim.world.get::<&mut Order>(group).unwrap();
        order.items.push(OrderItem {
            kind: ItemKind::Drink,
            name: "House Red".into(),
            price: 7.0,
            prepared: true,
        });
        order.items.push(OrderItem {
            kind: ItemKind::Food,
            name: "Steak Frites".into(),
            price: 26.0,
            prepared: false,
        });
    }

    // Drive the lifecycle handler directly, twice, without moving the clock.
    let clock = *sim.clock();
    let mut rng = StdRng::seed_from_u64(0);
    let mut ledger = Ledger::default();
    let mut events = EventLog::new();
    for _ in 0..2 {
        lifecycle_system(
            &mut sim.world,
            &[group],
            &clock,
            &mut rng,
            &mut ledger,
            &mut events,
        );
        let order = sim.world.get::<&Order>(group).unwrap();
        assert!(order.items[0].prepared, "prepared item must stay prepared");
        assert!(!order.items[1].prepared, "no time passed, nothing new preps");
        drop(order);
        assert_eq!(phase_of(&sim, group), Phase::Waiting);
    }
    assert!(events.is_empty());
}

#[test]
fn deleted_venue_silently_drops_its_patrons() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Bar);
    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 30.0,
            patience: 90.0,
            phase: Phase::Seated,
        },
    );

    sim.world.despawn(venue).unwrap();
    sim.tick();

    assert!(!sim.world.contains(group));
    // Silent removal: no departure notification of any kind.
    assert!(sim.events.is_empty());
}

#[test]
fn closing_time_sends_everyone_home() {
    let mut sim = quiet_sim();
    let venue = open_venue(&mut sim, VenueType::Restaurant);
    {
        let mut venue_data = sim.world.get::<&mut Venue>(venue).unwrap();
        venue_data.opening_hour = 11;
        venue_data.closing_hour = 13;
    }
    let group = script_group(
        &mut sim,
        venue,
        GroupSpec {
            size: 2,
            budget: 30.0,
            patience: 90.0,
            phase: Phase::Seated,
        },
    );

    // 12:00 -> past 13:00 closing.
    sim.run_ticks(5);

    assert!(
        !sim.world.contains(group) || phase_of(&sim, group) == Phase::Leaving,
        "groups inside at closing must be heading out"
    );
    sim.run_ticks(2);
    assert!(!sim.world.contains(group));
}

#[test]
fn soak_run_upholds_budget_satisfaction_and_terminal_invariants() {
    let mut sim = Simulation::new(SimConfig {
        seed: 42,
        max_patron_groups: 40,
        city_popularity: 1.0,
        city_affluence: 1.0,
    })
    .unwrap();

    let catalog = default_catalog().unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    for venue_type in [
        VenueType::Bar,
        VenueType::Restaurant,
        VenueType::Nightclub,
        VenueType::FastFood,
    ] {
        spawn_venue(
            &mut sim.world,
            &VenueBlueprint::typical(venue_type, venue_type.key()),
            &catalog,
            &mut rng,
        )
        .unwrap();
    }

    let mut departed: HashSet<u64> = HashSet::new();
    let mut total_events = 0usize;

    // Three simulated days.
    for _ in 0..288 {
        sim.tick();

        for (_, (profile, order, mood, visit)) in sim
            .world
            .query::<(&GroupProfile, &Order, &Mood, &Visit)>()
            .iter()
        {
            assert!(profile.group_size >= 1);
            assert!(
                (0.0..=100.0).contains(&mood.satisfaction),
                "satisfaction out of bounds: {}",
                mood.satisfaction
            );
            if !order.is_empty() {
                assert!(
                    profile.total_spending
                        <= profile.spending_budget * profile.group_size as f32 + 1e-3,
                    "order total {} exceeds budget {} x {}",
                    profile.total_spending,
                    profile.spending_budget,
                    profile.group_size
                );
            }
            // A group generated this tick must not have been advanced yet.
            if profile.joined_tick == sim.current_tick() {
                assert_eq!(visit.phase, Phase::Entering);
                assert!(!visit.fee_settled);
            }
        }

        for event in sim.events.drain() {
            total_events += 1;
            assert!(
                !departed.contains(&event.group_id),
                "event {:?} for a group that already departed",
                event.kind
            );
            if matches!(
                event.kind,
                VenueEventKind::TurnedAway | VenueEventKind::Left | VenueEventKind::WalkedOut
            ) {
                departed.insert(event.group_id);
            }
        }
    }

    assert!(total_events > 0, "soak produced no activity at all");
    assert!(!departed.is_empty(), "nobody completed a visit in three days");
    assert!(sim.patron_count() <= 40);
}
