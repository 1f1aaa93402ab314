//! Menu catalog loading and validation.
//!
//! The catalog is content data (`data/menu_catalog.json`): per venue type,
//! the drinks and food a freshly generated venue stocks. A malformed
//! catalog is a content bug, so loading fails fast with a descriptive
//! error instead of limping along.

use serde::Deserialize;

use pourhouse_logic::venues::{VenueType, ALL_VENUE_TYPES};

/// One catalog menu line.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: f32,
    /// Opening stock for a newly generated venue.
    pub stock: u32,
}

#[derive(Debug, Deserialize)]
struct RawVenueMenu {
    venue_type: String,
    #[serde(default)]
    drinks: Vec<CatalogItem>,
    #[serde(default)]
    food: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    venues: Vec<RawVenueMenu>,
}

/// Validated menu for one venue type.
#[derive(Debug, Clone)]
pub struct VenueMenu {
    pub venue_type: VenueType,
    pub drinks: Vec<CatalogItem>,
    pub food: Vec<CatalogItem>,
}

/// The validated catalog: exactly one menu per venue type.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    menus: Vec<VenueMenu>,
}

impl MenuCatalog {
    pub fn menu(&self, venue_type: VenueType) -> Option<&VenueMenu> {
        self.menus.iter().find(|menu| menu.venue_type == venue_type)
    }

    pub fn menus(&self) -> &[VenueMenu] {
        &self.menus
    }
}

/// Errors raised while loading the menu catalog.
#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    UnknownVenueType(String),
    DuplicateVenueType(String),
    MissingVenueType(&'static str),
    EmptySection {
        venue_type: &'static str,
        section: &'static str,
    },
    InvalidPrice {
        venue_type: &'static str,
        item: String,
        price: f32,
    },
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "catalog parse error: {}", e),
            CatalogError::UnknownVenueType(key) => {
                write!(f, "unknown venue type in catalog: {:?}", key)
            }
            CatalogError::DuplicateVenueType(key) => {
                write!(f, "venue type listed twice in catalog: {:?}", key)
            }
            CatalogError::MissingVenueType(key) => {
                write!(f, "catalog has no menu for venue type {:?}", key)
            }
            CatalogError::EmptySection { venue_type, section } => {
                write!(f, "catalog {} for {} must not be empty", section, venue_type)
            }
            CatalogError::InvalidPrice {
                venue_type,
                item,
                price,
            } => {
                write!(
                    f,
                    "catalog item {:?} for {} has non-positive price {}",
                    item, venue_type, price
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Parse and validate a catalog from JSON text.
pub fn load_catalog(json: &str) -> Result<MenuCatalog, CatalogError> {
    let raw: RawCatalog = serde_json::from_str(json)?;

    let mut menus: Vec<VenueMenu> = Vec::with_capacity(raw.venues.len());
    for entry in raw.venues {
        let venue_type = VenueType::from_key(&entry.venue_type)
            .ok_or_else(|| CatalogError::UnknownVenueType(entry.venue_type.clone()))?;
        if menus.iter().any(|menu| menu.venue_type == venue_type) {
            return Err(CatalogError::DuplicateVenueType(entry.venue_type));
        }
        menus.push(VenueMenu {
            venue_type,
            drinks: entry.drinks,
            food: entry.food,
        });
    }

    for venue_type in ALL_VENUE_TYPES {
        let menu = menus
            .iter()
            .find(|menu| menu.venue_type == venue_type)
            .ok_or(CatalogError::MissingVenueType(venue_type.key()))?;

        if menu.drinks.is_empty() {
            return Err(CatalogError::EmptySection {
                venue_type: venue_type.key(),
                section: "drinks",
            });
        }
        if venue_type.serves_food() && menu.food.is_empty() {
            return Err(CatalogError::EmptySection {
                venue_type: venue_type.key(),
                section: "food",
            });
        }
        for item in menu.drinks.iter().chain(menu.food.iter()) {
            if item.price <= 0.0 {
                return Err(CatalogError::InvalidPrice {
                    venue_type: venue_type.key(),
                    item: item.name.clone(),
                    price: item.price,
                });
            }
        }
    }

    Ok(MenuCatalog { menus })
}

/// The catalog shipped with the engine.
pub fn default_catalog() -> Result<MenuCatalog, CatalogError> {
    load_catalog(include_str!("../../../data/menu_catalog.json"))
}
