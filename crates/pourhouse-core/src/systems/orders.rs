//! Order engine - item selection, budget eviction, and upselling.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use pourhouse_logic::service::{self, ItemKind, StaffRole};
use pourhouse_logic::venues::VenueType;

use crate::components::{GroupProfile, Inventory, Order, OrderItem, Preferences, Staff, Venue};

/// Build the group's order against the venue inventory and its budget.
///
/// Mutates inventory stock and, on success, finalizes `Order` and
/// `GroupProfile::total_spending`. Returns false when nothing affordable
/// was left; the caller treats that as an affordability failure.
pub fn place_order(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    server: Option<Entity>,
    rng: &mut impl Rng,
) -> bool {
    let (group_size, budget_total) = match world.get::<&GroupProfile>(group) {
        Ok(profile) => (
            profile.group_size,
            profile.spending_budget * profile.group_size as f32,
        ),
        Err(_) => return false,
    };
    let venue_type = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => venue.venue_type,
        Err(_) => return false,
    };
    let (preferred_drinks, preferred_foods) = match world.get::<&Preferences>(group) {
        Ok(prefs) => (prefs.drinks.clone(), prefs.foods.clone()),
        Err(_) => (Vec::new(), Vec::new()),
    };
    let upsell_skill = server.and_then(|staff_entity| {
        world.get::<&Staff>(staff_entity).ok().and_then(|staff| {
            (staff.role == StaffRole::Waiter).then_some(staff.skills.customer_service)
        })
    });

    let mut items = Vec::new();
    {
        let Ok(mut inventory) = world.get::<&mut Inventory>(venue_entity) else {
            return false;
        };

        // One drink per person, one food per person where food is served.
        for _ in 0..group_size {
            if let Some(item) = take_item(&mut inventory, ItemKind::Drink, &preferred_drinks, rng) {
                items.push(item);
            }
            if venue_type.serves_food() {
                if let Some(item) = take_item(&mut inventory, ItemKind::Food, &preferred_foods, rng)
                {
                    items.push(item);
                }
            }
        }

        // Evict the most expensive item until the tab fits the budget.
        let mut total: f32 = items.iter().map(|item| item.price).sum();
        while total > budget_total && !items.is_empty() {
            let priciest = items
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.price.total_cmp(&b.1.price))
                .map(|(index, _)| index)
                .unwrap_or(0);
            let evicted = items.remove(priciest);
            total -= evicted.price;
            if let Some(stock_item) = inventory.find_mut(evicted.kind, &evicted.name) {
                stock_item.stock += 1;
            }
        }

        if let Some(skill) = upsell_skill {
            maybe_upsell(&mut inventory, &mut items, &mut total, venue_type, skill, budget_total, rng);
        }
    }

    if items.is_empty() {
        return false;
    }

    let total: f32 = items.iter().map(|item| item.price).sum();
    if let Ok(mut order) = world.get::<&mut Order>(group) {
        order.items = items;
    }
    if let Ok(mut profile) = world.get::<&mut GroupProfile>(group) {
        profile.total_spending = total;
    }
    true
}

/// Take one in-stock item, preferring the stored preference list.
fn take_item(
    inventory: &mut Inventory,
    kind: ItemKind,
    preferred: &[String],
    rng: &mut impl Rng,
) -> Option<OrderItem> {
    let section = inventory.section_mut(kind);

    let index = preferred
        .iter()
        .find_map(|name| {
            section
                .iter()
                .position(|item| item.stock > 0 && &item.name == name)
        })
        .or_else(|| {
            let in_stock: Vec<usize> = section
                .iter()
                .enumerate()
                .filter(|(_, item)| item.stock > 0)
                .map(|(index, _)| index)
                .collect();
            in_stock.choose(rng).copied()
        })?;

    let stock_item = &mut section[index];
    stock_item.stock -= 1;
    Some(OrderItem {
        kind,
        name: stock_item.name.clone(),
        price: stock_item.sell_price,
        prepared: false,
    })
}

/// A skilled waiter may talk the table into one more premium drink.
/// Restaurant and bar only, and only with real budget headroom left.
fn maybe_upsell(
    inventory: &mut Inventory,
    items: &mut Vec<OrderItem>,
    total: &mut f32,
    venue_type: VenueType,
    customer_service: f32,
    budget_total: f32,
    rng: &mut impl Rng,
) {
    if !matches!(venue_type, VenueType::Restaurant | VenueType::Bar) {
        return;
    }
    if customer_service <= service::UPSELL_SKILL_GATE {
        return;
    }
    if *total >= 0.8 * budget_total {
        return;
    }
    if rng.gen::<f32>() >= service::upsell_probability(customer_service) {
        return;
    }

    // The priciest in-stock drink above 20% of the current spend that the
    // remaining budget still covers.
    let floor = 0.2 * *total;
    let headroom = budget_total - *total;
    let candidate = inventory
        .drinks
        .iter_mut()
        .filter(|item| item.stock > 0 && item.sell_price > floor && item.sell_price <= headroom)
        .max_by(|a, b| a.sell_price.total_cmp(&b.sell_price));

    if let Some(stock_item) = candidate {
        stock_item.stock -= 1;
        *total += stock_item.sell_price;
        items.push(OrderItem {
            kind: ItemKind::Drink,
            name: stock_item.name.clone(),
            price: stock_item.sell_price,
            prepared: false,
        });
    }
}
