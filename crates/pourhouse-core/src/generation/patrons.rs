//! Patron group generation.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use pourhouse_logic::clock::GameClock;
use pourhouse_logic::patrons::{sample_customer_type, CustomerType};
use pourhouse_logic::service::ItemKind;

use crate::components::{
    GroupProfile, Inventory, Mood, Order, Patron, Preferences, Venue, Visit, VisitTimers,
};

/// Spawn one patron group arriving at `venue` now.
///
/// Returns `None` when the venue cannot be resolved (deleted between the
/// rate draw and the spawn). The group first acts on the tick after
/// `joined_tick`.
pub fn spawn_patron_group(
    world: &mut World,
    venue: Entity,
    clock: &GameClock,
    joined_tick: u64,
    city_affluence: f32,
    rng: &mut impl Rng,
) -> Option<Entity> {
    let venue_type = world.get::<&Venue>(venue).ok()?.venue_type;

    let (drink_names, food_names) = match world.get::<&Inventory>(venue) {
        Ok(inventory) => (
            inventory.in_stock_names(ItemKind::Drink),
            inventory.in_stock_names(ItemKind::Food),
        ),
        Err(_) => (Vec::new(), Vec::new()),
    };

    let customer_type = sample_customer_type(venue_type, clock.hour, rng.gen());
    let group_size = customer_type.sample_group_size(rng.gen());
    let patience = initial_patience(customer_type, rng);

    let (budget_lo, budget_hi) = venue_type.budget_range();
    let spending_budget =
        rng.gen_range(budget_lo..budget_hi) * customer_type.spending_modifier() * city_affluence;

    let (music_lo, music_hi) = venue_type.music_preference_range();
    let (light_lo, light_hi) = venue_type.lighting_preference_range();
    let (quality_lo, quality_hi) = customer_type.quality_importance_range();
    let (speed_lo, speed_hi) = customer_type.speed_importance_range();

    let drink_count = rng.gen_range(1..=3);
    let food_count = rng.gen_range(1..=2);
    let preferred_drinks = sample_names(&drink_names, drink_count, rng);
    let preferred_foods = if venue_type.serves_food() {
        sample_names(&food_names, food_count, rng)
    } else {
        Vec::new()
    };

    let preferences = Preferences {
        music: rng.gen_range(music_lo..=music_hi),
        lighting: rng.gen_range(light_lo..=light_hi),
        quality_importance: rng.gen_range(quality_lo..=quality_hi),
        speed_importance: rng.gen_range(speed_lo..=speed_hi),
        drinks: preferred_drinks,
        foods: preferred_foods,
    };

    let profile = GroupProfile {
        customer_type,
        group_size,
        venue,
        spending_budget,
        total_spending: 0.0,
        joined_tick,
    };

    Some(world.spawn((
        Patron,
        profile,
        VisitTimers::new(*clock),
        Visit::arriving(),
        Mood::new(patience),
        preferences,
        Order::default(),
    )))
}

/// Initial patience: 80-99 scaled by the customer type, floored.
fn initial_patience(customer_type: CustomerType, rng: &mut impl Rng) -> f32 {
    (rng.gen_range(80..=99) as f32 * customer_type.patience_modifier()).floor()
}

fn sample_names(pool: &[String], count: usize, rng: &mut impl Rng) -> Vec<String> {
    pool.choose_multiple(rng, count.min(pool.len()))
        .cloned()
        .collect()
}
