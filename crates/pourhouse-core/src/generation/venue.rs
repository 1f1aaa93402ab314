//! Venue and staff roster generation.
//!
//! Builds playable venue fixtures: a venue entity stocked from the menu
//! catalog, plus a staff roster sized for its type. Venue CRUD proper is
//! the host game's job; this covers what the engine and its harnesses need
//! to stand up a world.

use hecs::{Entity, World};
use rand::Rng;

use pourhouse_logic::service::StaffRole;
use pourhouse_logic::venues::VenueType;

use crate::catalog::{CatalogError, MenuCatalog};
use crate::components::{Inventory, Staff, StaffSkills, StockItem, Venue};
use crate::generation::generate_staff_name;

/// How to build one venue and its roster.
#[derive(Debug, Clone)]
pub struct VenueBlueprint {
    pub venue_type: VenueType,
    pub name: String,
    pub capacity: u32,
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub entrance_fee: f32,
    pub waiters: u32,
    pub bartenders: u32,
    pub cooks: u32,
    pub security: u32,
}

impl VenueBlueprint {
    /// A sensible default venue of the given type.
    pub fn typical(venue_type: VenueType, name: impl Into<String>) -> Self {
        let name = name.into();
        match venue_type {
            VenueType::Bar => Self {
                venue_type,
                name,
                capacity: 40,
                opening_hour: 16,
                closing_hour: 2,
                entrance_fee: 0.0,
                waiters: 0,
                bartenders: 3,
                cooks: 0,
                security: 0,
            },
            VenueType::Restaurant => Self {
                venue_type,
                name,
                capacity: 60,
                opening_hour: 11,
                closing_hour: 23,
                entrance_fee: 0.0,
                waiters: 4,
                bartenders: 1,
                cooks: 2,
                security: 0,
            },
            VenueType::Nightclub => Self {
                venue_type,
                name,
                capacity: 150,
                opening_hour: 21,
                closing_hour: 4,
                entrance_fee: 10.0,
                waiters: 0,
                bartenders: 5,
                cooks: 0,
                security: 2,
            },
            VenueType::FastFood => Self {
                venue_type,
                name,
                capacity: 30,
                opening_hour: 8,
                closing_hour: 23,
                entrance_fee: 0.0,
                waiters: 3,
                bartenders: 0,
                cooks: 2,
                security: 0,
            },
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_entrance_fee(mut self, fee: f32) -> Self {
        self.entrance_fee = fee;
        self
    }
}

/// Spawn a venue stocked from the catalog, with its staff roster.
/// Returns the venue entity.
pub fn spawn_venue(
    world: &mut World,
    blueprint: &VenueBlueprint,
    catalog: &MenuCatalog,
    rng: &mut impl Rng,
) -> Result<Entity, CatalogError> {
    let menu = catalog
        .menu(blueprint.venue_type)
        .ok_or(CatalogError::MissingVenueType(blueprint.venue_type.key()))?;

    let inventory = Inventory {
        drinks: menu
            .drinks
            .iter()
            .map(|item| StockItem {
                name: item.name.clone(),
                stock: item.stock,
                sell_price: item.price,
            })
            .collect(),
        food: menu
            .food
            .iter()
            .map(|item| StockItem {
                name: item.name.clone(),
                stock: item.stock,
                sell_price: item.price,
            })
            .collect(),
    };

    let venue = Venue::new(blueprint.venue_type, blueprint.name.clone(), blueprint.capacity)
        .with_hours(blueprint.opening_hour, blueprint.closing_hour)
        .with_entrance_fee(blueprint.entrance_fee);

    let venue_entity = world.spawn((venue, inventory));

    spawn_staff(world, venue_entity, StaffRole::Waiter, blueprint.waiters, rng);
    spawn_staff(world, venue_entity, StaffRole::Bartender, blueprint.bartenders, rng);
    spawn_staff(world, venue_entity, StaffRole::Cook, blueprint.cooks, rng);
    spawn_staff(world, venue_entity, StaffRole::Security, blueprint.security, rng);

    Ok(venue_entity)
}

/// Spawn `count` working staff of one role for a venue.
pub fn spawn_staff(
    world: &mut World,
    venue: Entity,
    role: StaffRole,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let mut hired = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let staff = Staff {
            venue,
            name: generate_staff_name(rng),
            role,
            is_working: true,
            skills: StaffSkills::random(rng, role),
            friendliness: rng.gen_range(30.0..95.0),
        };
        hired.push(world.spawn((staff,)));
    }
    hired
}
