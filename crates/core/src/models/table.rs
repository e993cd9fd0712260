use serde::{Deserialize, Serialize};

/// A seating resource. Reference data: created at setup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    pub id: i32,
    pub capacity: i32,
}

impl Table {
    pub fn seats(&self, guests: i32) -> bool {
        self.capacity >= guests
    }
}
