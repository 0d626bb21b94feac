//! Configuration types.
//!
//! - `KomiTable`: black's score adjustment per board size
//! - `RulesConfig`: board size and komi used by the rules engine
//! - `SessionConfig`: timing of the synchronization loop
//!
//! The two players of a session must agree on `RulesConfig` in advance;
//! it is not stored with the game record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Board size used when nothing else is configured.
pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Komi (points subtracted from black's final score), keyed by board size.
///
/// Sizes missing from the table get no adjustment.
///
/// ```
/// use go_clash::core::KomiTable;
///
/// let komi = KomiTable::default();
/// assert_eq!(komi.for_size(9), 3.5);
/// assert_eq!(komi.for_size(19), 5.5);
/// assert_eq!(komi.for_size(7), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KomiTable {
    entries: BTreeMap<u8, f64>,
}

impl Default for KomiTable {
    fn default() -> Self {
        Self::empty().with(9, 3.5).with(13, 4.5).with(19, 5.5)
    }
}

impl KomiTable {
    /// A table with no adjustments.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Set the adjustment for one board size.
    #[must_use]
    pub fn with(mut self, size: u8, komi: f64) -> Self {
        self.entries.insert(size, komi);
        self
    }

    /// Adjustment for a board size (0 when unlisted).
    #[must_use]
    pub fn for_size(&self, size: u8) -> f64 {
        self.entries.get(&size).copied().unwrap_or(0.0)
    }
}

/// Rules engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Board side length (default: 9).
    pub board_size: u8,

    /// Komi per board size.
    pub komi: KomiTable,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            komi: KomiTable::default(),
        }
    }
}

impl RulesConfig {
    /// Use a different board size.
    ///
    /// # Panics
    ///
    /// Panics if the size is outside `2..=26`.
    #[must_use]
    pub fn with_board_size(mut self, size: u8) -> Self {
        assert!(
            (crate::core::MIN_BOARD_SIZE..=crate::core::MAX_BOARD_SIZE).contains(&size),
            "Board size must be 2-26"
        );
        self.board_size = size;
        self
    }

    /// Use a different komi table.
    #[must_use]
    pub fn with_komi(mut self, komi: KomiTable) -> Self {
        self.komi = komi;
        self
    }

    /// Komi applied at the configured board size.
    #[must_use]
    pub fn komi(&self) -> f64 {
        self.komi.for_size(self.board_size)
    }
}

/// Synchronization loop timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Wait between polls while the other side is thinking (default: 3000 ms).
    pub poll_interval_ms: u64,

    /// Minimum latency of each polling read (default: 1500 ms).
    pub slow_read_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
            slow_read_delay_ms: 1500,
        }
    }
}

impl SessionConfig {
    /// Use a different poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Use a different slow-read delay.
    #[must_use]
    pub fn with_slow_read_delay(mut self, delay: Duration) -> Self {
        self.slow_read_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Poll interval as a `Duration`.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Slow-read delay as a `Duration`.
    #[must_use]
    pub fn slow_read_delay(&self) -> Duration {
        Duration::from_millis(self.slow_read_delay_ms)
    }
}
