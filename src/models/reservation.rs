use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Priority,
}

impl Priority {
    pub fn is_priority(self) -> bool {
        matches!(self, Priority::Priority)
    }
}

/// Зафиксированная бронь. Наборы мест разных броней не пересекаются.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub seat_numbers: Vec<u32>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(seat_numbers: Vec<u32>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            seat_numbers,
            priority,
            created_at: Utc::now(),
        }
    }
}
