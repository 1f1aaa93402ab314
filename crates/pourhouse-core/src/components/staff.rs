//! Staff components.

use hecs::Entity;
use rand::Rng;
use serde::{Deserialize, Serialize};

use pourhouse_logic::service::StaffRole;

/// Skills that affect service, 0-100 each.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StaffSkills {
    pub speed: f32,
    pub customer_service: f32,
}

impl StaffSkills {
    /// Generate random skills with a bias toward the given specialty.
    pub fn random(rng: &mut impl Rng, role: StaffRole) -> Self {
        let mut skills = Self {
            speed: rng.gen_range(20.0..70.0),
            customer_service: rng.gen_range(20.0..70.0),
        };
        match role {
            StaffRole::Waiter => skills.customer_service = rng.gen_range(40.0..95.0),
            StaffRole::Bartender => skills.speed = rng.gen_range(40.0..95.0),
            StaffRole::Cook | StaffRole::Security => {}
        }
        skills
    }

    pub fn average(&self) -> f32 {
        (self.speed + self.customer_service) / 2.0
    }
}

/// A staff member on a venue's roster. The load of a staff member is never
/// cached here; it is counted from patron assignments on demand.
#[derive(Debug, Clone)]
pub struct Staff {
    /// The employing venue.
    pub venue: Entity,
    pub name: String,
    pub role: StaffRole,
    /// Clocked in right now.
    pub is_working: bool,
    pub skills: StaffSkills,
    /// 0-100; feeds the checkout satisfaction score.
    pub friendliness: f32,
}
