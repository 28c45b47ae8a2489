//! Process-unique identifiers

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use oro_domain::ports::IdGenerator;

use crate::serialization::temporal::to_ticks;

/// Strictly increasing ids seeded from the current tick count
///
/// A tick is 100 ns since 0001-01-01T00:00:00 UTC, so ids of generators
/// created later start higher.
#[derive(Debug)]
pub struct TickIdGenerator {
    last: AtomicI64,
}

impl TickIdGenerator {
    /// Generator seeded from the current time
    pub fn new() -> Self {
        Self::starting_at(to_ticks(&Utc::now().naive_utc()))
    }

    /// Generator whose first id is `seed + 1`
    pub fn starting_at(seed: i64) -> Self {
        Self {
            last: AtomicI64::new(seed),
        }
    }
}

impl Default for TickIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TickIdGenerator {
    fn generate_unique_id(&self) -> i64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }
}
