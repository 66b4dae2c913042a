//! Counter record entity.

/// The singleton allocation counter.
///
/// Exactly one logical instance exists per deployment. `next_id` is
/// monotonically non-decreasing and advances by exactly 1 per successful
/// allocation; the value itself acts as the optimistic-concurrency token for
/// conditional updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterRecord {
    pub next_id: u64,
}

impl CounterRecord {
    /// Creates the counter at its configured seed. Seeding above zero
    /// guarantees a minimum code length from the first allocation onward.
    pub fn seeded(seed: u64) -> Self {
        Self { next_id: seed }
    }
}
