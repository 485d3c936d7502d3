//! Employee roster model.

use serde::{Deserialize, Serialize};

use crate::time_utils::format_utc_rfc3339;

/// Six-digit PIN every new employee starts with.
pub const DEFAULT_PIN: &str = "000000";

/// Number of entries in the frontend color palette; `color_index` is
/// always in `0..COLOR_COUNT`.
pub const COLOR_COUNT: u32 = 7;

/// Access role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Employee profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Document ID (generated UUID, or a fixed id for seeded rosters)
    pub id: String,
    /// Display name
    pub name: String,
    /// Access role; admins manage the roster but are never scheduled
    pub role: Role,
    /// Index into the frontend color palette
    pub color_index: u32,
    /// Login PIN; stays at `DEFAULT_PIN` until the employee changes it.
    /// The scheduling core passes this through without interpreting it.
    #[serde(default = "default_pin")]
    pub pin: String,
    /// When the employee was added (RFC3339)
    pub created_at: String,
}

fn default_pin() -> String {
    DEFAULT_PIN.to_string()
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Default roster written on first startup when the collection is empty.
pub fn seed_roster(now: chrono::DateTime<chrono::Utc>) -> Vec<Employee> {
    let created_at = format_utc_rfc3339(now);
    let entry = |id: &str, name: &str, role: Role, color_index: u32| Employee {
        id: id.to_string(),
        name: name.to_string(),
        role,
        color_index,
        pin: DEFAULT_PIN.to_string(),
        created_at: created_at.clone(),
    };

    vec![
        entry("u1", "Tanaka", Role::User, 0),
        entry("u2", "Sato", Role::User, 1),
        entry("u3", "Suzuki", Role::User, 2),
        entry("admin", "Manager", Role::Admin, 4),
    ]
}
