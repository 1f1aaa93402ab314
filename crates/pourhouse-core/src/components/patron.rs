//! Patron-group components: GroupProfile, Visit, Mood, Preferences, Order.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use pourhouse_logic::clock::GameClock;
use pourhouse_logic::patrons::{CustomerType, Phase};
use pourhouse_logic::service::ItemKind;

/// Marker component identifying an entity as a patron group.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Patron;

/// Who the group is and what it has spent. One entity per party; the whole
/// party shares a table, an order, and a lifecycle phase.
#[derive(Debug, Clone)]
pub struct GroupProfile {
    pub customer_type: CustomerType,
    /// People in the party. Never below 1.
    pub group_size: u32,
    /// The venue being visited. Re-validated on every use; the venue can be
    /// deleted mid-visit.
    pub venue: Entity,
    /// Per-person budget. Entrance fees are deducted from it.
    pub spending_budget: f32,
    /// Running total across the whole party, set when the order is placed.
    pub total_spending: f32,
    /// Engine tick the group was generated on. The group first acts on the
    /// following tick.
    pub joined_tick: u64,
}

/// Clock snapshots taken at each lifecycle transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisitTimers {
    pub arrived_at: GameClock,
    pub order_placed_at: Option<GameClock>,
    pub served_at: Option<GameClock>,
    pub paid_at: Option<GameClock>,
    pub leaving_since: Option<GameClock>,
}

impl VisitTimers {
    pub fn new(arrived_at: GameClock) -> Self {
        Self {
            arrived_at,
            order_placed_at: None,
            served_at: None,
            paid_at: None,
            leaving_since: None,
        }
    }
}

/// Size bucket of an assigned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableSize {
    Small,
    Medium,
    Large,
}

impl TableSize {
    /// Smallest bucket that fits the party.
    pub fn for_group(group_size: u32) -> Self {
        match group_size {
            0..=2 => TableSize::Small,
            3..=4 => TableSize::Medium,
            _ => TableSize::Large,
        }
    }

    /// One bucket up, saturating at Large.
    pub fn upgraded(self) -> Self {
        match self {
            TableSize::Small => TableSize::Medium,
            TableSize::Medium | TableSize::Large => TableSize::Large,
        }
    }
}

/// Ephemeral table descriptor. Not a slot in a real layout; generated when
/// the group is seated and discarded with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableSpot {
    pub id: u32,
    pub size: TableSize,
}

/// Where the group is in its visit, plus its transient assignments.
#[derive(Debug, Clone)]
pub struct Visit {
    pub phase: Phase,
    /// Entrance fee already settled; the entering phase can repeat while
    /// waiting for a table and must not charge twice.
    pub fee_settled: bool,
    /// Minutes after arrival before the group is ready to order. Drawn when
    /// the group is seated.
    pub order_ready_after: Option<u32>,
    /// Assigned staff member. Weak: staff can be fired or clock off between
    /// ticks, so this is re-resolved on every use.
    pub server: Option<Entity>,
    pub table: Option<TableSpot>,
}

impl Visit {
    pub fn arriving() -> Self {
        Self {
            phase: Phase::Entering,
            fee_settled: false,
            order_ready_after: None,
            server: None,
            table: None,
        }
    }
}

/// Patience and satisfaction. Patience is unbounded below; hitting zero
/// forces the group out. Satisfaction is clamped to 0-100 at every write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mood {
    pub patience: f32,
    pub satisfaction: f32,
}

impl Mood {
    /// Starting satisfaction for every new group.
    pub const BASE_SATISFACTION: f32 = 70.0;

    pub fn new(patience: f32) -> Self {
        Self {
            patience,
            satisfaction: Self::BASE_SATISFACTION,
        }
    }

    /// Adjust satisfaction, keeping it in 0-100. Negative amounts penalize.
    pub fn adjust_satisfaction(&mut self, amount: f32) {
        self.satisfaction = (self.satisfaction + amount).clamp(0.0, 100.0);
    }

    /// Overwrite satisfaction with a computed score, clamped.
    pub fn set_satisfaction(&mut self, value: f32) {
        self.satisfaction = value.clamp(0.0, 100.0);
    }

    /// Spend patience. No floor: the deficit is the departure trigger, not
    /// a display value.
    pub fn spend_patience(&mut self, amount: f32) {
        self.patience -= amount;
    }

    pub fn is_out_of_patience(&self) -> bool {
        self.patience <= 0.0
    }
}

/// What the group wants from the venue, fixed at generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Preferred music volume, 0-100.
    pub music: f32,
    /// Preferred lighting level, 0-100.
    pub lighting: f32,
    /// Quality-over-price weighting, 0-100.
    pub quality_importance: f32,
    /// Speed-of-service weighting, 0-100.
    pub speed_importance: f32,
    /// Drink names drawn from the venue inventory at creation time.
    pub drinks: Vec<String>,
    /// Food names drawn from the venue inventory at creation time.
    pub foods: Vec<String>,
}

impl Preferences {
    /// Whether an ordered item matches a stored preference.
    pub fn matches(&self, kind: ItemKind, name: &str) -> bool {
        match kind {
            ItemKind::Drink => self.drinks.iter().any(|d| d == name),
            ItemKind::Food => self.foods.iter().any(|f| f == name),
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub kind: ItemKind,
    pub name: String,
    pub price: f32,
    /// False until the simulated preparation time has elapsed.
    pub prepared: bool,
}

/// The group's shared order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn total(&self) -> f32 {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn all_prepared(&self) -> bool {
        self.items.iter().all(|item| item.prepared)
    }

    pub fn has_food(&self) -> bool {
        self.items.iter().any(|item| item.kind == ItemKind::Food)
    }

    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_satisfaction_clamps() {
        let mut mood = Mood::new(90.0);
        mood.adjust_satisfaction(50.0);
        assert_eq!(mood.satisfaction, 100.0);
        mood.adjust_satisfaction(-150.0);
        assert_eq!(mood.satisfaction, 0.0);
    }

    #[test]
    fn test_patience_has_no_floor() {
        let mut mood = Mood::new(5.0);
        mood.spend_patience(20.0);
        assert!(mood.patience < 0.0);
        assert!(mood.is_out_of_patience());
    }

    #[test]
    fn test_table_size_buckets() {
        assert_eq!(TableSize::for_group(1), TableSize::Small);
        assert_eq!(TableSize::for_group(2), TableSize::Small);
        assert_eq!(TableSize::for_group(4), TableSize::Medium);
        assert_eq!(TableSize::for_group(6), TableSize::Large);
        assert_eq!(TableSize::Large.upgraded(), TableSize::Large);
    }

    #[test]
    fn test_order_queries() {
        let order = Order {
            items: vec![
                OrderItem {
                    kind: ItemKind::Drink,
                    name: "House Red".into(),
                    price: 7.0,
                    prepared: true,
                },
                OrderItem {
                    kind: ItemKind::Food,
                    name: "Steak Frites".into(),
                    price: 24.0,
                    prepared: false,
                },
            ],
        };
        assert_eq!(order.total(), 31.0);
        assert!(order.has_food());
        assert!(!order.all_prepared());
        assert_eq!(order.count_of(ItemKind::Drink), 1);
    }
}
