//! Stat counters spent and adjusted by the player.

use tilecraft_core::{StatKey, DEFAULT_STAT_VALUE};

/// Four independent non-negative counters keyed by [`StatKey`].
///
/// Counters saturate at zero and have no upper bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCounters {
    values: [u32; 4],
}

impl StatCounters {
    /// Creates counters holding [`DEFAULT_STAT_VALUE`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [DEFAULT_STAT_VALUE; 4],
        }
    }

    /// Current value of a counter.
    #[must_use]
    pub const fn get(&self, key: StatKey) -> u32 {
        self.values[key.index()]
    }

    /// Adds one to a counter and returns the new value.
    pub fn increment(&mut self, key: StatKey) -> u32 {
        self.adjust(key, 1)
    }

    /// Subtracts one from a counter, stopping at zero, and returns the new value.
    pub fn decrement(&mut self, key: StatKey) -> u32 {
        self.adjust(key, -1)
    }

    /// Applies a signed change, saturating at zero, and returns the new value.
    pub fn adjust(&mut self, key: StatKey, delta: i32) -> u32 {
        let slot = &mut self.values[key.index()];
        *slot = slot.saturating_add_signed(delta);
        *slot
    }

    /// Overwrites a counter.
    pub fn set(&mut self, key: StatKey, value: u32) {
        self.values[key.index()] = value;
    }

    /// Restores every counter to [`DEFAULT_STAT_VALUE`].
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Iterates `(key, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        StatKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Default for StatCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_default() {
        let stats = StatCounters::new();
        for (_, value) in stats.iter() {
            assert_eq!(value, DEFAULT_STAT_VALUE);
        }
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut stats = StatCounters::new();
        for _ in 0..DEFAULT_STAT_VALUE + 3 {
            let _ = stats.decrement(StatKey::Attack);
        }
        assert_eq!(stats.get(StatKey::Attack), 0);
        assert_eq!(stats.adjust(StatKey::Attack, -40), 0);
        assert_eq!(stats.get(StatKey::Magic), DEFAULT_STAT_VALUE);
    }

    #[test]
    fn increment_has_no_upper_bound() {
        let mut stats = StatCounters::new();
        assert_eq!(stats.adjust(StatKey::Defense, 100), DEFAULT_STAT_VALUE + 100);
        assert_eq!(stats.increment(StatKey::Defense), DEFAULT_STAT_VALUE + 101);
    }

    #[test]
    fn reset_restores_all_counters() {
        let mut stats = StatCounters::new();
        stats.set(StatKey::Movement, 0);
        let _ = stats.increment(StatKey::Magic);
        stats.reset();
        assert_eq!(stats, StatCounters::new());
    }
}
