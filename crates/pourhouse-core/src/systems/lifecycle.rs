//! Lifecycle system - walks every patron group through its visit.
//!
//! One exhaustive phase match per group per tick. All transitions live
//! here, as does the staff assignment heuristic. Removal happens by
//! despawning the group entity; the roster snapshot taken by the engine
//! guarantees each live group is visited exactly once per tick.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;

use pourhouse_logic::clock::GameClock;
use pourhouse_logic::mood::{checkout_satisfaction, serve_time_adjustment, wait_tolerance, CheckoutInput};
use pourhouse_logic::patrons::Phase;
use pourhouse_logic::service::{
    self, consumption_minutes, prep_minutes, ItemKind, LEAVING_LINGER_MINUTES, ORDER_READY_MINUTES,
};
use pourhouse_logic::venues::VenueType;

use crate::components::{
    GroupProfile, Mood, Order, Preferences, Staff, TableSize, TableSpot, Venue, Visit, VisitTimers,
};
use crate::engine::Ledger;
use crate::events::{EventLog, VenueEventKind};
use crate::systems::place_order;

/// Advance every group in the roster by one lifecycle step.
pub fn lifecycle_system(
    world: &mut World,
    roster: &[Entity],
    clock: &GameClock,
    rng: &mut impl Rng,
    ledger: &mut Ledger,
    events: &mut EventLog,
) {
    for &group in roster {
        if !world.contains(group) {
            continue;
        }
        advance_group(world, group, clock, rng, ledger, events);
    }
}

/// One lifecycle step for one group.
pub fn advance_group(
    world: &mut World,
    group: Entity,
    clock: &GameClock,
    rng: &mut impl Rng,
    ledger: &mut Ledger,
    events: &mut EventLog,
) {
    let Ok(venue_entity) = world.get::<&GroupProfile>(group).map(|profile| profile.venue) else {
        return;
    };

    // A venue deleted mid-visit drops its patrons on the spot.
    let venue_open = world
        .get::<&Venue>(venue_entity)
        .map(|venue| venue.is_open(clock.hour))
        .ok();
    let Some(venue_open) = venue_open else {
        log::warn!("venue of group {} vanished, removing group", group.id());
        let _ = world.despawn(group);
        return;
    };

    let Ok(phase) = world.get::<&Visit>(group).map(|visit| visit.phase) else {
        return;
    };

    // Closing time: everyone still inside heads for the door next tick.
    if !venue_open && phase != Phase::Leaving {
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.phase = Phase::Leaving;
        }
        if let Ok(mut timers) = world.get::<&mut VisitTimers>(group) {
            if timers.leaving_since.is_none() {
                timers.leaving_since = Some(*clock);
            }
        }
        return;
    }

    log::trace!("group {} stepping through {:?}", group.id(), phase);
    match phase {
        Phase::Entering => handle_entering(world, group, venue_entity, clock, rng, ledger, events),
        Phase::Seated => handle_seated(world, group, clock),
        Phase::Ordering => handle_ordering(world, group, venue_entity, clock, rng, events),
        Phase::Waiting => handle_waiting(world, group, venue_entity, clock, events),
        Phase::Eating | Phase::Drinking => handle_consuming(world, group, venue_entity, clock, events),
        Phase::Paying => handle_paying(world, group, venue_entity, clock, ledger, events),
        Phase::Leaving => handle_leaving(world, group, venue_entity, clock, events),
    }
}

/// People currently seated at a venue, counted per head.
pub fn seated_occupancy(world: &World, venue: Entity) -> u32 {
    world
        .query::<(&GroupProfile, &Visit)>()
        .iter()
        .filter(|(_, (profile, visit))| profile.venue == venue && visit.table.is_some())
        .map(|(_, (profile, _))| profile.group_size)
        .sum()
}

/// Pick the least-loaded eligible staff member for a venue.
///
/// On-duty staff in the venue's canonical service role are considered
/// first, any on-duty staff as a fallback; anyone at their role's
/// concurrent-group cap is skipped. Ties go to roster order.
pub fn assign_server(world: &World, venue: Entity, venue_type: VenueType) -> Option<Entity> {
    let mut loads: HashMap<Entity, usize> = HashMap::new();
    for (_, visit) in world.query::<&Visit>().iter() {
        if let Some(server) = visit.server {
            *loads.entry(server).or_insert(0) += 1;
        }
    }

    let on_duty: Vec<(Entity, service::StaffRole)> = world
        .query::<&Staff>()
        .iter()
        .filter(|(_, staff)| staff.venue == venue && staff.is_working)
        .map(|(entity, staff)| (entity, staff.role))
        .collect();

    let preferred = venue_type.service_role();
    let preferred_pool: Vec<(Entity, service::StaffRole)> = on_duty
        .iter()
        .filter(|(_, role)| *role == preferred)
        .copied()
        .collect();
    let pool = if preferred_pool.is_empty() {
        on_duty
    } else {
        preferred_pool
    };

    let mut best: Option<(Entity, usize)> = None;
    for (candidate, role) in pool {
        let load = loads.get(&candidate).copied().unwrap_or(0);
        if load >= role.concurrent_cap() {
            continue;
        }
        if best.map_or(true, |(_, best_load)| load < best_load) {
            best = Some((candidate, load));
        }
    }
    best.map(|(entity, _)| entity)
}

/// Whether a previously assigned staff member can still serve this venue.
fn staff_can_serve(world: &World, staff: Entity, venue: Entity) -> bool {
    world
        .get::<&Staff>(staff)
        .map(|s| s.venue == venue && s.is_working)
        .unwrap_or(false)
}

fn handle_entering(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    rng: &mut impl Rng,
    ledger: &mut Ledger,
    events: &mut EventLog,
) {
    let (fee, group_size, budget, fee_settled) = {
        let Ok(visit) = world.get::<&Visit>(group) else { return };
        let Ok(profile) = world.get::<&GroupProfile>(group) else { return };
        let Ok(venue) = world.get::<&Venue>(venue_entity) else { return };
        (
            venue.entrance_fee,
            profile.group_size,
            profile.spending_budget,
            visit.fee_settled,
        )
    };

    if !fee_settled {
        if fee > 0.0 && fee > 0.2 * budget {
            events.record(
                VenueEventKind::TurnedAway,
                group,
                venue_entity,
                *clock,
                "cover charge beyond budget",
            );
            let _ = world.despawn(group);
            return;
        }
        if fee > 0.0 {
            if let Ok(mut profile) = world.get::<&mut GroupProfile>(group) {
                profile.spending_budget -= fee;
            }
            ledger.cash += fee * group_size as f32;
        }
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.fee_settled = true;
        }
    }

    let capacity = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => venue.capacity.max(1),
        Err(_) => return,
    };
    let occupancy = seated_occupancy(world, venue_entity);
    let table_chance = (1.0 - occupancy as f32 / capacity as f32).max(0.0);

    if rng.gen::<f32>() < table_chance {
        let venue_type = match world.get::<&Venue>(venue_entity) {
            Ok(venue) => venue.venue_type,
            Err(_) => return,
        };
        let server = assign_server(world, venue_entity, venue_type);

        let mut size = TableSize::for_group(group_size);
        if rng.gen_bool(0.2) {
            size = size.upgraded();
        }
        let table = TableSpot {
            id: rng.gen_range(1..1000),
            size,
        };

        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.table = Some(table);
            visit.server = server;
            visit.phase = Phase::Seated;
            visit.order_ready_after =
                Some(rng.gen_range(ORDER_READY_MINUTES.0..=ORDER_READY_MINUTES.1));
        }
        if let Ok(mut mood) = world.get::<&mut Mood>(group) {
            mood.adjust_satisfaction(5.0);
            if server.is_none() {
                mood.spend_patience(5.0);
            }
        }
        events.record(
            VenueEventKind::Seated,
            group,
            venue_entity,
            *clock,
            format!("party of {}", group_size),
        );
    } else {
        let patience = match world.get::<&Mood>(group) {
            Ok(mood) => mood.patience,
            Err(_) => return,
        };
        if patience > 50.0 {
            // Worth the wait; try again next tick.
            if let Ok(mut mood) = world.get::<&mut Mood>(group) {
                mood.spend_patience(10.0);
            }
        } else {
            events.record(
                VenueEventKind::TurnedAway,
                group,
                venue_entity,
                *clock,
                "no free table",
            );
            let _ = world.despawn(group);
        }
    }
}

fn handle_seated(world: &mut World, group: Entity, clock: &GameClock) {
    let (arrived_at, ready_after) = {
        let Ok(timers) = world.get::<&VisitTimers>(group) else { return };
        let Ok(visit) = world.get::<&Visit>(group) else { return };
        (timers.arrived_at, visit.order_ready_after.unwrap_or(0))
    };
    if GameClock::minutes_between(&arrived_at, clock) >= ready_after as i64 {
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.phase = Phase::Ordering;
        }
    }
}

fn handle_ordering(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    rng: &mut impl Rng,
    events: &mut EventLog,
) {
    let venue_type = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => venue.venue_type,
        Err(_) => return,
    };

    let current = match world.get::<&Visit>(group) {
        Ok(visit) => visit.server,
        Err(_) => return,
    };
    let server = match current {
        Some(staff) if staff_can_serve(world, staff, venue_entity) => Some(staff),
        _ => assign_server(world, venue_entity, venue_type),
    };
    if server != current {
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.server = server;
        }
    }

    let Some(server_entity) = server else {
        // Nobody free to take the order; retry next tick.
        if let Ok(mut mood) = world.get::<&mut Mood>(group) {
            mood.spend_patience(2.0);
        }
        return;
    };

    if place_order(world, group, venue_entity, Some(server_entity), rng) {
        if let Ok(mut timers) = world.get::<&mut VisitTimers>(group) {
            timers.order_placed_at = Some(*clock);
        }
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.phase = Phase::Waiting;
        }
        let total = world
            .get::<&GroupProfile>(group)
            .map(|profile| profile.total_spending)
            .unwrap_or(0.0);
        events.record(
            VenueEventKind::Ordered,
            group,
            venue_entity,
            *clock,
            format!("tab {:.2}", total),
        );
    } else {
        // Nothing on the menu fits the budget.
        if let Ok(mut mood) = world.get::<&mut Mood>(group) {
            mood.spend_patience(20.0);
        }
    }
}

fn handle_waiting(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    events: &mut EventLog,
) {
    let venue_type = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => venue.venue_type,
        Err(_) => return,
    };
    let Some(order_placed_at) = world
        .get::<&VisitTimers>(group)
        .ok()
        .and_then(|timers| timers.order_placed_at)
    else {
        return;
    };

    // Staff may have clocked off since the order went in; an unstaffed
    // kitchen preps at the skill-0 rate.
    let speed_skill = world
        .get::<&Visit>(group)
        .ok()
        .and_then(|visit| visit.server)
        .and_then(|staff| world.get::<&Staff>(staff).ok().map(|s| s.skills.speed))
        .unwrap_or(0.0);

    let elapsed = GameClock::minutes_between(&order_placed_at, clock);

    let (all_prepared, has_food) = {
        let Ok(mut order) = world.get::<&mut Order>(group) else { return };
        for item in &mut order.items {
            if !item.prepared
                && elapsed as f32 >= prep_minutes(item.kind, venue_type, speed_skill)
            {
                item.prepared = true;
            }
        }
        (order.all_prepared(), order.has_food())
    };

    if all_prepared {
        if let Ok(mut timers) = world.get::<&mut VisitTimers>(group) {
            timers.served_at = Some(*clock);
        }
        if let Ok(mut mood) = world.get::<&mut Mood>(group) {
            mood.adjust_satisfaction(serve_time_adjustment(elapsed));
        }
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.phase = if has_food { Phase::Eating } else { Phase::Drinking };
        }
        events.record(
            VenueEventKind::Served,
            group,
            venue_entity,
            *clock,
            format!("after {} min", elapsed),
        );
    } else if let Ok(mut mood) = world.get::<&mut Mood>(group) {
        if elapsed as f32 > wait_tolerance(mood.patience) {
            mood.adjust_satisfaction(-1.0);
        }
    }
}

fn handle_consuming(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    events: &mut EventLog,
) {
    let venue_type = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => venue.venue_type,
        Err(_) => return,
    };
    let Some(served_at) = world
        .get::<&VisitTimers>(group)
        .ok()
        .and_then(|timers| timers.served_at)
    else {
        return;
    };

    let (drinks, foods, group_size) = {
        let Ok(order) = world.get::<&Order>(group) else { return };
        let Ok(profile) = world.get::<&GroupProfile>(group) else { return };
        (
            order.count_of(ItemKind::Drink),
            order.count_of(ItemKind::Food),
            profile.group_size,
        )
    };

    let target = consumption_minutes(drinks, foods, venue_type, group_size);
    let elapsed = GameClock::minutes_between(&served_at, clock);
    if elapsed as f32 >= target {
        if let Ok(mut timers) = world.get::<&mut VisitTimers>(group) {
            timers.paid_at = Some(*clock);
        }
        if let Ok(mut visit) = world.get::<&mut Visit>(group) {
            visit.phase = Phase::Paying;
        }
        events.record(
            VenueEventKind::ReadyToPay,
            group,
            venue_entity,
            *clock,
            "",
        );
    }
}

fn handle_paying(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    ledger: &mut Ledger,
    events: &mut EventLog,
) {
    let (total, group_size) = {
        let Ok(profile) = world.get::<&GroupProfile>(group) else { return };
        (profile.total_spending, profile.group_size)
    };

    if let Ok(mut venue) = world.get::<&mut Venue>(venue_entity) {
        venue.record_sale(total);
        venue.total_customers_served += group_size;
    }
    ledger.cash += total;

    let staff_info = world
        .get::<&Visit>(group)
        .ok()
        .and_then(|visit| visit.server)
        .and_then(|staff| {
            world
                .get::<&Staff>(staff)
                .ok()
                .map(|s| (s.friendliness, s.skills.average()))
        });

    let (service_quality, atmosphere, venue_type) = match world.get::<&Venue>(venue_entity) {
        Ok(venue) => (venue.service_quality, venue.atmosphere, venue.venue_type),
        Err(_) => return,
    };

    let preference_matches = {
        let Ok(order) = world.get::<&Order>(group) else { return };
        let Ok(prefs) = world.get::<&Preferences>(group) else { return };
        order
            .items
            .iter()
            .filter(|item| prefs.matches(item.kind, &item.name))
            .count() as u32
    };

    let small_group_large_table = group_size <= 2
        && world
            .get::<&Visit>(group)
            .ok()
            .and_then(|visit| visit.table)
            .map(|table| table.size == TableSize::Large)
            .unwrap_or(false);

    let quality_importance = world
        .get::<&Preferences>(group)
        .map(|prefs| prefs.quality_importance)
        .unwrap_or(50.0);

    if let Ok(mut mood) = world.get::<&mut Mood>(group) {
        let input = CheckoutInput {
            accumulated: mood.satisfaction,
            staff_friendliness: staff_info.map(|(friendliness, _)| friendliness),
            staff_avg_skill: staff_info.map(|(_, avg)| avg),
            service_quality,
            venue_type,
            actual_spend_per_person: total / group_size as f32,
            quality_importance,
            atmosphere,
            small_group_large_table,
            preference_matches,
        };
        mood.set_satisfaction(checkout_satisfaction(&input));
    }

    if let Ok(mut timers) = world.get::<&mut VisitTimers>(group) {
        timers.leaving_since = Some(*clock);
    }
    if let Ok(mut visit) = world.get::<&mut Visit>(group) {
        visit.phase = Phase::Leaving;
    }
    events.record(
        VenueEventKind::Paid,
        group,
        venue_entity,
        *clock,
        format!("paid {:.2}", total),
    );
}

fn handle_leaving(
    world: &mut World,
    group: Entity,
    venue_entity: Entity,
    clock: &GameClock,
    events: &mut EventLog,
) {
    let leaving_since = {
        let Ok(mut timers) = world.get::<&mut VisitTimers>(group) else { return };
        match timers.leaving_since {
            Some(since) => since,
            None => {
                timers.leaving_since = Some(*clock);
                return;
            }
        }
    };

    if GameClock::minutes_between(&leaving_since, clock) < LEAVING_LINGER_MINUTES {
        return;
    }

    let satisfaction = match world.get::<&Mood>(group) {
        Ok(mood) => mood.satisfaction,
        Err(_) => return,
    };
    if let Ok(mut venue) = world.get::<&mut Venue>(venue_entity) {
        venue.nudge_popularity((satisfaction - 50.0) / 1000.0);
        venue.blend_satisfaction(satisfaction);
    }
    events.record(
        VenueEventKind::Left,
        group,
        venue_entity,
        *clock,
        format!("satisfaction {:.0}", satisfaction),
    );
    let _ = world.despawn(group);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::StaffSkills;
    use pourhouse_logic::service::StaffRole;

    fn hire(world: &mut World, venue: Entity, role: StaffRole, working: bool) -> Entity {
        world.spawn((Staff {
            venue,
            name: "Test".into(),
            role,
            is_working: working,
            skills: StaffSkills {
                speed: 50.0,
                customer_service: 50.0,
            },
            friendliness: 50.0,
        },))
    }

    fn patron_with_server(world: &mut World, venue: Entity, server: Option<Entity>) -> Entity {
        world.spawn((
            GroupProfile {
                customer_type: pourhouse_logic::patrons::CustomerType::Regular,
                group_size: 2,
                venue,
                spending_budget: 30.0,
                total_spending: 0.0,
                joined_tick: 0,
            },
            Visit {
                phase: Phase::Ordering,
                fee_settled: true,
                order_ready_after: Some(5),
                server,
                table: Some(TableSpot {
                    id: 1,
                    size: TableSize::Small,
                }),
            },
        ))
    }

    #[test]
    fn test_assign_server_prefers_canonical_role() {
        let mut world = World::new();
        let venue = world.spawn((Venue::new(VenueType::Restaurant, "Chez Test", 50),));
        let _cook = hire(&mut world, venue, StaffRole::Cook, true);
        let waiter = hire(&mut world, venue, StaffRole::Waiter, true);

        assert_eq!(assign_server(&world, venue, VenueType::Restaurant), Some(waiter));
    }

    #[test]
    fn test_assign_server_balances_load() {
        let mut world = World::new();
        let venue = world.spawn((Venue::new(VenueType::Restaurant, "Chez Test", 50),));
        let busy = hire(&mut world, venue, StaffRole::Waiter, true);
        let idle = hire(&mut world, venue, StaffRole::Waiter, true);
        patron_with_server(&mut world, venue, Some(busy));

        assert_eq!(assign_server(&world, venue, VenueType::Restaurant), Some(idle));
    }

    #[test]
    fn test_assign_server_respects_cap() {
        let mut world = World::new();
        let venue = world.spawn((Venue::new(VenueType::Restaurant, "Chez Test", 50),));
        let only = hire(&mut world, venue, StaffRole::Waiter, true);
        for _ in 0..3 {
            patron_with_server(&mut world, venue, Some(only));
        }
        // Waiters cap at three concurrent groups.
        assert_eq!(assign_server(&world, venue, VenueType::Restaurant), None);
    }

    #[test]
    fn test_assign_server_falls_back_to_any_on_duty() {
        let mut world = World::new();
        let venue = world.spawn((Venue::new(VenueType::Restaurant, "Chez Test", 50),));
        let _off_duty = hire(&mut world, venue, StaffRole::Waiter, false);
        let cook = hire(&mut world, venue, StaffRole::Cook, true);

        assert_eq!(assign_server(&world, venue, VenueType::Restaurant), Some(cook));
    }

    #[test]
    fn test_occupancy_counts_heads_not_groups() {
        let mut world = World::new();
        let venue = world.spawn((Venue::new(VenueType::Bar, "The Anchor", 50),));
        patron_with_server(&mut world, venue, None);
        patron_with_server(&mut world, venue, None);
        assert_eq!(seated_occupancy(&world, venue), 4);
    }
}
