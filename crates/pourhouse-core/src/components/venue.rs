//! Venue-side components: the venue itself and its drink/food inventory.

use serde::{Deserialize, Serialize};

use pourhouse_logic::service::ItemKind;
use pourhouse_logic::venues::{self, VenueType};

/// A venue the simulation runs patrons through. Aggregate stats
/// (popularity, satisfaction, revenue) are written back by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub venue_type: VenueType,
    pub name: String,
    /// Seating capacity in people.
    pub capacity: u32,
    pub opening_hour: u32,
    pub closing_hour: u32,
    /// Current music volume, 0-100.
    pub music_volume: f32,
    /// Current lighting level, 0-100.
    pub lighting_level: f32,
    pub entrance_fee: f32,
    /// 0-100; below 50 it starts costing patron patience.
    pub cleanliness: f32,
    /// 0-100; feeds the checkout satisfaction score.
    pub atmosphere: f32,
    /// 0-100; feeds the value-for-money term.
    pub service_quality: f32,
    /// 0-100; drives arrivals and drifts with departing patrons.
    pub popularity: f32,
    /// Rolling average satisfaction of departed patrons, 0-100.
    pub customer_satisfaction: f32,
    pub daily_revenue: f32,
    pub weekly_revenue: f32,
    pub monthly_revenue: f32,
    pub total_customers_served: u32,
}

impl Venue {
    pub fn new(venue_type: VenueType, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            venue_type,
            name: name.into(),
            capacity,
            opening_hour: 10,
            closing_hour: 23,
            music_volume: 50.0,
            lighting_level: 50.0,
            entrance_fee: 0.0,
            cleanliness: 80.0,
            atmosphere: 60.0,
            service_quality: 60.0,
            popularity: 50.0,
            customer_satisfaction: 70.0,
            daily_revenue: 0.0,
            weekly_revenue: 0.0,
            monthly_revenue: 0.0,
            total_customers_served: 0,
        }
    }

    pub fn with_hours(mut self, opening: u32, closing: u32) -> Self {
        self.opening_hour = opening;
        self.closing_hour = closing;
        self
    }

    pub fn with_entrance_fee(mut self, fee: f32) -> Self {
        self.entrance_fee = fee;
        self
    }

    pub fn is_open(&self, hour: u32) -> bool {
        venues::hours_contain(self.opening_hour, self.closing_hour, hour)
    }

    /// Record a settled bill across the revenue windows.
    pub fn record_sale(&mut self, amount: f32) {
        self.daily_revenue += amount;
        self.weekly_revenue += amount;
        self.monthly_revenue += amount;
    }

    /// Drift popularity, keeping it in 0-100.
    pub fn nudge_popularity(&mut self, delta: f32) {
        self.popularity = (self.popularity + delta).clamp(0.0, 100.0);
    }

    /// Fold one departing group's satisfaction into the rolling average.
    pub fn blend_satisfaction(&mut self, satisfaction: f32) {
        self.customer_satisfaction = self.customer_satisfaction * 0.95 + satisfaction * 0.05;
    }
}

/// One stocked menu line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub name: String,
    pub stock: u32,
    pub sell_price: f32,
}

/// The venue's sellable inventory, split by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub drinks: Vec<StockItem>,
    pub food: Vec<StockItem>,
}

impl Inventory {
    pub fn section(&self, kind: ItemKind) -> &[StockItem] {
        match kind {
            ItemKind::Drink => &self.drinks,
            ItemKind::Food => &self.food,
        }
    }

    pub fn section_mut(&mut self, kind: ItemKind) -> &mut Vec<StockItem> {
        match kind {
            ItemKind::Drink => &mut self.drinks,
            ItemKind::Food => &mut self.food,
        }
    }

    pub fn find_mut(&mut self, kind: ItemKind, name: &str) -> Option<&mut StockItem> {
        self.section_mut(kind).iter_mut().find(|item| item.name == name)
    }

    /// Names of everything currently in stock, for preference sampling.
    pub fn in_stock_names(&self, kind: ItemKind) -> Vec<String> {
        self.section(kind)
            .iter()
            .filter(|item| item.stock > 0)
            .map(|item| item.name.clone())
            .collect()
    }
}
