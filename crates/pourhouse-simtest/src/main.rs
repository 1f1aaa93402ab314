//! Pourhouse Headless Simulation Harness
//!
//! Validates the simulation rules and the engine loop without a game
//! client. Runs entirely in-process — no rendering, no persistence.
//!
//! Usage:
//!   cargo run -p pourhouse-simtest
//!   cargo run -p pourhouse-simtest -- --verbose

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use pourhouse_core::catalog::load_catalog;
use pourhouse_core::generation::{generate_venue_name, spawn_venue, VenueBlueprint};
use pourhouse_core::prelude::*;
use pourhouse_logic::arrivals;
use pourhouse_logic::clock::{DayOfWeek, GameClock};
use pourhouse_logic::mood::{checkout_satisfaction, patience_decay, CheckoutInput};
use pourhouse_logic::patrons::{Phase, ALL_CUSTOMER_TYPES};
use pourhouse_logic::service::{consumption_minutes, prep_minutes, ItemKind};
use pourhouse_logic::venues::{VenueType, ALL_VENUE_TYPES};

// ── Menu catalog (same JSON the engine ships) ───────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/menu_catalog.json");

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawCatalogEntry {
    venue_type: String,
    drinks: Vec<RawItem>,
    #[serde(default)]
    food: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawItem {
    name: String,
    price: f32,
    stock: u32,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    venues: Vec<RawCatalogEntry>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Pourhouse Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Menu catalog validation
    results.extend(validate_catalog(verbose));

    // 2. Clock & calendar behavior
    results.extend(validate_clock(verbose));

    // 3. Arrival curve sweep
    results.extend(validate_arrival_curves(verbose));

    // 4. Mood & satisfaction rules
    results.extend(validate_mood_rules(verbose));

    // 5. Service timing rules
    results.extend(validate_service_rules(verbose));

    // 6. Scripted single-visit walkthrough
    results.extend(run_visit_walkthrough(verbose));

    // 7. Week-long engine soak
    results.extend(run_week_soak(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Menu catalog ─────────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Menu Catalog ---");
    let mut results = Vec::new();

    let raw: RawCatalog = match serde_json::from_str(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check(
                "catalog_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    results.push(TestResult::check(
        "catalog_covers_all_venue_types",
        raw.venues.len() == ALL_VENUE_TYPES.len(),
        format!("{} entries", raw.venues.len()),
    ));

    let catalog = match load_catalog(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check("catalog_validate", false, e.to_string()));
            return results;
        }
    };
    results.push(TestResult::check(
        "catalog_validate",
        true,
        "loader accepted the shipped catalog",
    ));

    for vt in ALL_VENUE_TYPES {
        let menu = catalog.menu(vt);
        let ok = menu.map_or(false, |m| {
            !m.drinks.is_empty() && (vt.serves_food() == !m.food.is_empty())
        });
        results.push(TestResult::check(
            &format!("menu_{}", vt.key()),
            ok,
            format!(
                "{} drinks, {} food",
                menu.map_or(0, |m| m.drinks.len()),
                menu.map_or(0, |m| m.food.len())
            ),
        ));
    }

    results
}

// ── 2. Clock ────────────────────────────────────────────────────────────

fn validate_clock(_verbose: bool) -> Vec<TestResult> {
    println!("--- Clock & Calendar ---");
    let mut results = Vec::new();

    let mut clock = GameClock::new(23, 45, DayOfWeek::Sunday);
    clock.advance(15);
    results.push(TestResult::check(
        "midnight_rollover",
        clock.hour == 0 && clock.minute == 0 && clock.day_of_week == DayOfWeek::Monday,
        format!("{:02}:{:02} {:?}", clock.hour, clock.minute, clock.day_of_week),
    ));

    let a = GameClock::new(23, 30, DayOfWeek::Friday);
    let mut b = a;
    b.advance(45);
    results.push(TestResult::check(
        "cross_midnight_minutes",
        GameClock::minutes_between(&a, &b) == 45,
        format!("{} minutes", GameClock::minutes_between(&a, &b)),
    ));

    // 96 ticks of 15 minutes is exactly one day.
    let mut c = GameClock::default();
    let start_day = c.day;
    for _ in 0..96 {
        c.advance(15);
    }
    results.push(TestResult::check(
        "ninety_six_ticks_per_day",
        c.day == start_day + 1 && c.hour == GameClock::default().hour,
        format!("day {} hour {}", c.day, c.hour),
    ));

    results
}

// ── 3. Arrival curves ───────────────────────────────────────────────────

fn validate_arrival_curves(verbose: bool) -> Vec<TestResult> {
    println!("--- Arrival Curves ---");
    let mut results = Vec::new();

    // Every venue type must have a real peak somewhere in the day.
    for vt in ALL_VENUE_TYPES {
        let peak = (0..24)
            .map(|h| arrivals::hourly_rate(vt, 50.0, h, DayOfWeek::Wednesday, 1.0))
            .fold(0.0f32, f32::max);
        let trough = (0..24)
            .map(|h| arrivals::hourly_rate(vt, 50.0, h, DayOfWeek::Wednesday, 1.0))
            .fold(f32::INFINITY, f32::min);
        if verbose {
            println!("  {:?}: peak {:.1}/hr, trough {:.1}/hr", vt, peak, trough);
        }
        results.push(TestResult::check(
            &format!("curve_{}", vt.key()),
            peak > trough * 2.0 && peak > 0.0,
            format!("peak {:.1}, trough {:.1}", peak, trough),
        ));
    }

    // Friday outdraws Wednesday at the same hour.
    let wed = arrivals::hourly_rate(VenueType::Bar, 50.0, 21, DayOfWeek::Wednesday, 1.0);
    let fri = arrivals::hourly_rate(VenueType::Bar, 50.0, 21, DayOfWeek::Friday, 1.0);
    results.push(TestResult::check(
        "weekend_boost",
        (fri / wed - 1.5).abs() < 0.01,
        format!("fri/wed = {:.2}", fri / wed),
    ));

    // The tick draw never exceeds a quarter of the hourly rate.
    let mut worst = 0u32;
    for i in 0..1000 {
        let roll = i as f32 / 1000.0;
        worst = worst.max(arrivals::groups_this_tick(24.0, roll));
    }
    results.push(TestResult::check(
        "tick_draw_bounded",
        worst <= 6,
        format!("max draw {} for rate 24/hr", worst),
    ));

    // Customer type weights remain positive everywhere.
    let mut all_positive = true;
    for vt in ALL_VENUE_TYPES {
        for hour in 0..24 {
            for ct in ALL_CUSTOMER_TYPES {
                if ct.arrival_weight(vt, hour) <= 0.0 {
                    all_positive = false;
                }
            }
        }
    }
    results.push(TestResult::check(
        "type_weights_positive",
        all_positive,
        "weighted sampling always has mass",
    ));

    results
}

// ── 4. Mood rules ───────────────────────────────────────────────────────

fn validate_mood_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mood Rules ---");
    let mut results = Vec::new();

    // Waiting drains faster than being served.
    results.push(TestResult::check(
        "waiting_drains_fastest_midvisit",
        patience_decay(Phase::Waiting) > patience_decay(Phase::Seated)
            && patience_decay(Phase::Waiting) > patience_decay(Phase::Eating),
        format!(
            "waiting {} vs seated {} vs eating {}",
            patience_decay(Phase::Waiting),
            patience_decay(Phase::Seated),
            patience_decay(Phase::Eating)
        ),
    ));

    // Checkout score stays in range across a parameter sweep.
    let mut in_range = true;
    for accumulated in [0.0, 40.0, 70.0, 100.0] {
        for spend in [1.0, 10.0, 30.0, 120.0] {
            for quality in [0.0, 50.0, 100.0] {
                let score = checkout_satisfaction(&CheckoutInput {
                    accumulated,
                    staff_friendliness: Some(80.0),
                    staff_avg_skill: Some(20.0),
                    service_quality: 70.0,
                    venue_type: VenueType::Restaurant,
                    actual_spend_per_person: spend,
                    quality_importance: quality,
                    atmosphere: 65.0,
                    small_group_large_table: false,
                    preference_matches: 1,
                });
                if !(0.0..=100.0).contains(&score) {
                    in_range = false;
                }
            }
        }
    }
    results.push(TestResult::check(
        "checkout_score_bounded",
        in_range,
        "0..=100 across sweep",
    ));

    // Overspending relative to venue expectations hurts the score.
    let score_at_spend = |spend: f32| {
        checkout_satisfaction(&CheckoutInput {
            accumulated: 70.0,
            staff_friendliness: None,
            staff_avg_skill: None,
            service_quality: 80.0,
            venue_type: VenueType::FastFood,
            actual_spend_per_person: spend,
            quality_importance: 50.0,
            atmosphere: 50.0,
            small_group_large_table: false,
            preference_matches: 0,
        })
    };
    let cheap = score_at_spend(5.0);
    let gouged = score_at_spend(40.0);
    results.push(TestResult::check(
        "value_for_money_matters",
        cheap > gouged,
        format!("cheap {:.1} vs gouged {:.1}", cheap, gouged),
    ));

    results
}

// ── 5. Service timing ───────────────────────────────────────────────────

fn validate_service_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Service Timing ---");
    let mut results = Vec::new();

    let skilled = prep_minutes(ItemKind::Food, VenueType::Restaurant, 100.0);
    let green = prep_minutes(ItemKind::Food, VenueType::Restaurant, 0.0);
    results.push(TestResult::check(
        "skill_speeds_up_prep",
        skilled < green && (green - 40.0).abs() < 0.01,
        format!("{:.1} min skilled vs {:.1} min green", skilled, green),
    ));

    results.push(TestResult::check(
        "fast_food_preps_fast",
        prep_minutes(ItemKind::Food, VenueType::FastFood, 50.0)
            < prep_minutes(ItemKind::Food, VenueType::Restaurant, 50.0),
        "fast food kitchen is quicker",
    ));

    let solo = consumption_minutes(1, 0, VenueType::Bar, 1);
    let party = consumption_minutes(1, 0, VenueType::Bar, 6);
    results.push(TestResult::check(
        "groups_linger_longer",
        party > solo,
        format!("{:.1} min solo vs {:.1} min party of six", solo, party),
    ));

    results
}

// ── 6. Scripted visit walkthrough ───────────────────────────────────────

fn run_visit_walkthrough(verbose: bool) -> Vec<TestResult> {
    println!("--- Visit Walkthrough (1 restaurant, 1 party) ---");
    let mut results = Vec::new();

    // Arrivals effectively off; the scripted party is the only actor.
    // Noon start keeps the whole visit inside restaurant opening hours.
    let mut sim = match Simulation::new(SimConfig {
        seed: 11,
        max_patron_groups: 8,
        city_popularity: 0.0001,
        city_affluence: 1.0,
    }) {
        Ok(sim) => sim.with_clock(GameClock::new(12, 0, DayOfWeek::Tuesday)),
        Err(e) => {
            results.push(TestResult::check("walkthrough_setup", false, e.to_string()));
            return results;
        }
    };

    let catalog = match load_catalog(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check("walkthrough_setup", false, e.to_string()));
            return results;
        }
    };
    let mut rng = StdRng::seed_from_u64(77);
    let venue = match spawn_venue(
        &mut sim.world,
        &VenueBlueprint::typical(VenueType::Restaurant, "Walkthrough Test"),
        &catalog,
        &mut rng,
    ) {
        Ok(v) => v,
        Err(e) => {
            results.push(TestResult::check("walkthrough_setup", false, e.to_string()));
            return results;
        }
    };

    let arrived_at = *sim.clock();
    let group = sim.world.spawn((
        Patron,
        GroupProfile {
            customer_type: pourhouse_logic::patrons::CustomerType::Regular,
            group_size: 2,
            venue,
            spending_budget: 40.0,
            total_spending: 0.0,
            joined_tick: sim.current_tick(),
        },
        VisitTimers::new(arrived_at),
        Visit::arriving(),
        Mood::new(95.0),
        Preferences {
            music: 30.0,
            lighting: 70.0,
            quality_importance: 50.0,
            speed_importance: 50.0,
            drinks: vec![],
            foods: vec![],
        },
        Order::default(),
    ));

    // A full in-game day is far more than one visit needs.
    let mut milestones = Vec::new();
    for _ in 0..96 {
        sim.tick();
        for event in sim.events.drain() {
            if verbose {
                println!(
                    "  {:02}:{:02} {:?} {}",
                    event.at.hour, event.at.minute, event.kind, event.detail
                );
            }
            milestones.push(event.kind);
        }
        if !sim.world.contains(group) {
            break;
        }
    }

    results.push(TestResult::check(
        "walkthrough_completes",
        !sim.world.contains(group),
        format!("{} milestones", milestones.len()),
    ));

    let expected = [
        VenueEventKind::Seated,
        VenueEventKind::Ordered,
        VenueEventKind::Served,
        VenueEventKind::ReadyToPay,
        VenueEventKind::Paid,
        VenueEventKind::Left,
    ];
    let mut cursor = 0;
    for kind in &milestones {
        if cursor < expected.len() && *kind == expected[cursor] {
            cursor += 1;
        }
    }
    results.push(TestResult::check(
        "walkthrough_milestones_in_order",
        cursor == expected.len(),
        format!("{}/{} milestones in order", cursor, expected.len()),
    ));

    let venue_data = sim.world.get::<&Venue>(venue).unwrap();
    results.push(TestResult::check(
        "walkthrough_revenue_recorded",
        venue_data.daily_revenue > 0.0 && venue_data.total_customers_served == 2,
        format!(
            "revenue {:.2}, {} served",
            venue_data.daily_revenue, venue_data.total_customers_served
        ),
    ));

    results
}

// ── 7. Week soak ────────────────────────────────────────────────────────

fn run_week_soak(verbose: bool) -> Vec<TestResult> {
    println!("--- Week Soak (4 venues, 7 days) ---");
    let mut results = Vec::new();

    let mut sim = match Simulation::new(SimConfig {
        seed: 2024,
        max_patron_groups: 48,
        city_popularity: 1.0,
        city_affluence: 1.0,
    }) {
        Ok(sim) => sim,
        Err(e) => {
            results.push(TestResult::check("soak_setup", false, e.to_string()));
            return results;
        }
    };

    let catalog = match load_catalog(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check("soak_setup", false, e.to_string()));
            return results;
        }
    };
    let mut rng = StdRng::seed_from_u64(404);
    for vt in ALL_VENUE_TYPES {
        let name = generate_venue_name(vt, &mut rng);
        if let Err(e) = spawn_venue(
            &mut sim.world,
            &VenueBlueprint::typical(vt, name),
            &catalog,
            &mut rng,
        ) {
            results.push(TestResult::check("soak_setup", false, e.to_string()));
            return results;
        }
    }

    let mut budget_violations = 0usize;
    let mut satisfaction_violations = 0usize;
    let mut cap_violations = 0usize;
    let mut completed_visits = 0usize;
    let mut walkouts = 0usize;
    let mut turned_away = 0usize;

    // Seven simulated days at 96 ticks each.
    for _ in 0..(7 * 96) {
        sim.tick();

        for (_, (profile, order, mood)) in
            sim.world.query::<(&GroupProfile, &Order, &Mood)>().iter()
        {
            if !order.is_empty()
                && profile.total_spending
                    > profile.spending_budget * profile.group_size as f32 + 1e-3
            {
                budget_violations += 1;
            }
            if !(0.0..=100.0).contains(&mood.satisfaction) {
                satisfaction_violations += 1;
            }
        }
        if sim.patron_count() > 48 {
            cap_violations += 1;
        }

        for event in sim.events.drain() {
            match event.kind {
                VenueEventKind::Left => completed_visits += 1,
                VenueEventKind::WalkedOut => walkouts += 1,
                VenueEventKind::TurnedAway => turned_away += 1,
                _ => {}
            }
        }
    }

    results.push(TestResult::check(
        "soak_budget_invariant",
        budget_violations == 0,
        format!("{} violations", budget_violations),
    ));
    results.push(TestResult::check(
        "soak_satisfaction_bounds",
        satisfaction_violations == 0,
        format!("{} violations", satisfaction_violations),
    ));
    results.push(TestResult::check(
        "soak_patron_cap",
        cap_violations == 0,
        format!("{} ticks over cap", cap_violations),
    ));
    results.push(TestResult::check(
        "soak_visits_complete",
        completed_visits > 0,
        format!(
            "{} completed, {} walkouts, {} turned away",
            completed_visits, walkouts, turned_away
        ),
    ));

    let mut total_revenue = 0.0f32;
    let mut total_served = 0u32;
    for (_, venue) in sim.world.query::<&Venue>().iter() {
        total_revenue += venue.daily_revenue;
        total_served += venue.total_customers_served;
        if verbose {
            println!(
                "  {}: revenue {:.2}, served {}, popularity {:.1}, avg satisfaction {:.1}",
                venue.name,
                venue.daily_revenue,
                venue.total_customers_served,
                venue.popularity,
                venue.customer_satisfaction
            );
        }
    }
    // Cash is revenue plus entrance fees, so it can only exceed revenue.
    results.push(TestResult::check(
        "soak_economy_flows",
        total_revenue > 0.0 && sim.ledger.cash >= total_revenue - 0.01,
        format!(
            "revenue {:.2} across venues, {} customers served, cash {:.2}",
            total_revenue, total_served, sim.ledger.cash
        ),
    ));

    results
}
