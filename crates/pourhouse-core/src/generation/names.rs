//! Staff and venue name generation.

use rand::seq::SliceRandom;
use rand::Rng;

use pourhouse_logic::venues::VenueType;

/// Generate a random staff name.
pub fn generate_staff_name(rng: &mut impl Rng) -> String {
    let given = STAFF_GIVEN.choose(rng).copied().unwrap_or("Alex");
    let family = STAFF_FAMILY.choose(rng).copied().unwrap_or("Mercer");
    format!("{} {}", given, family)
}

/// Generate a plausible trading name for a venue of the given type.
pub fn generate_venue_name(venue_type: VenueType, rng: &mut impl Rng) -> String {
    match venue_type {
        VenueType::Bar => {
            let adjective = BAR_ADJECTIVES.choose(rng).copied().unwrap_or("Rusty");
            let noun = BAR_NOUNS.choose(rng).copied().unwrap_or("Anchor");
            format!("The {} {}", adjective, noun)
        }
        VenueType::Restaurant => {
            let family = STAFF_FAMILY.choose(rng).copied().unwrap_or("Moreau");
            format!("{}'s Table", family)
        }
        VenueType::Nightclub => CLUB_NAMES.choose(rng).copied().unwrap_or("Velvet Room").to_string(),
        VenueType::FastFood => FAST_FOOD_NAMES
            .choose(rng)
            .copied()
            .unwrap_or("Patty Shack")
            .to_string(),
    }
}

static STAFF_GIVEN: &[&str] = &[
    "Alex", "Bea", "Cormac", "Dara", "Esme", "Franka", "Gus", "Harriet", "Imre", "Jonas", "Kasia",
    "Lior", "Marisol", "Nestor", "Odette", "Piet", "Quinn", "Rosa", "Sandor", "Tove",
];

static STAFF_FAMILY: &[&str] = &[
    "Abara", "Bellweather", "Castellano", "Duarte", "Eriksen", "Fontaine", "Grieve", "Holloway",
    "Iwata", "Jansen", "Kovacs", "Lindqvist", "Moreau", "Nakai", "Oyelaran", "Price",
];

static BAR_ADJECTIVES: &[&str] = &[
    "Rusty", "Crooked", "Thirsty", "Salty", "Copper", "Broken", "Gilded", "Last",
];

static BAR_NOUNS: &[&str] = &[
    "Anchor", "Compass", "Barrel", "Lantern", "Stag", "Kettle", "Harp", "Orchard",
];

static CLUB_NAMES: &[&str] = &[
    "Velvet Room", "Afterglow", "Static", "Mirage", "Low Orbit", "Pulse", "The Vault", "Neon Garden",
];

static FAST_FOOD_NAMES: &[&str] = &[
    "Patty Shack", "Crispy Coop", "Slice Works", "Wrap Kings", "Griddle Stop", "Bun Central",
];
