//! # Controller configuration.
//!
//! ## Sentinel values
//! - `pending_warn_threshold = 0` → no warning on buffer growth
//! - `bus_capacity = 0` → clamped to 1 by the bus

/// Configuration for the [`Controller`](crate::Controller).
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `pending_warn_threshold`: Buffer length at which a warning is logged (`0` = never)
///
/// The pending action buffer itself is unbounded; the threshold only makes a
/// model that stopped draining visible in the logs.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Capacity of the diagnostic event bus.
    ///
    /// Receivers that lag behind more than `bus_capacity` events skip the oldest.
    pub bus_capacity: usize,

    /// Number of buffered actions that triggers a warning.
    ///
    /// The warning fires once per crossing and re-arms after the next drain.
    pub pending_warn_threshold: usize,
}

impl ControllerConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the warning threshold as an `Option`.
    ///
    /// - `None` → disabled
    /// - `Some(n)` → warn when the buffer reaches `n` actions
    #[inline]
    pub fn pending_warn_limit(&self) -> Option<usize> {
        if self.pending_warn_threshold == 0 {
            None
        } else {
            Some(self.pending_warn_threshold)
        }
    }
}

impl Default for ControllerConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 256`
    /// - `pending_warn_threshold = 0` (disabled)
    fn default() -> Self {
        Self {
            bus_capacity: 256,
            pending_warn_threshold: 0,
        }
    }
}
