//! Drag escalation tuning.
//!
//! A press on a card becomes a drag when the button has been held for
//! [`drag_delay_ms`](InteractionConfig::drag_delay_ms) or the pointer has
//! moved further than [`drag_threshold`](InteractionConfig::drag_threshold),
//! whichever happens first.
//!
//! The threshold is a squared distance in terminal cells, so the default of
//! `4` means "more than two cells away".

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default hold time before a press becomes a drag.
pub const DEFAULT_DRAG_DELAY_MS: u64 = 150;

/// Default squared displacement that turns a press into a drag.
pub const DEFAULT_DRAG_THRESHOLD: u32 = 4;

/// Shortest allowed hold time.
pub const MIN_DRAG_DELAY_MS: u64 = 50;

/// Longest allowed hold time.
pub const MAX_DRAG_DELAY_MS: u64 = 1000;

/// Smallest allowed squared threshold.
pub const MIN_DRAG_THRESHOLD: u32 = 1;

/// Largest allowed squared threshold.
pub const MAX_DRAG_THRESHOLD: u32 = 100;

/// Pointer interaction settings.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cardstack_config::InteractionConfig;
///
/// let config = InteractionConfig::default();
/// assert_eq!(config.drag_delay(), Duration::from_millis(150));
/// assert!(config.exceeds_threshold(3, 0));
/// assert!(!config.exceeds_threshold(2, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Hold time in milliseconds before a press becomes a drag.
    #[serde(default = "default_drag_delay_ms")]
    pub drag_delay_ms: u64,

    /// Squared displacement, in cells, before a press becomes a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: u32,
}

fn default_drag_delay_ms() -> u64 {
    DEFAULT_DRAG_DELAY_MS
}

fn default_drag_threshold() -> u32 {
    DEFAULT_DRAG_THRESHOLD
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_delay_ms: DEFAULT_DRAG_DELAY_MS,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl InteractionConfig {
    /// Returns the hold time as a [`Duration`].
    #[must_use]
    pub fn drag_delay(&self) -> Duration {
        Duration::from_millis(self.drag_delay_ms)
    }

    /// Returns `true` if a displacement of `(dx, dy)` cells starts a drag.
    #[must_use]
    pub fn exceeds_threshold(&self, dx: i32, dy: i32) -> bool {
        let (dx, dy) = (i64::from(dx), i64::from(dy));
        dx * dx + dy * dy > i64::from(self.drag_threshold)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInteraction`](crate::ConfigError::InvalidInteraction)
    /// if either value is outside its allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if !(MIN_DRAG_DELAY_MS..=MAX_DRAG_DELAY_MS).contains(&self.drag_delay_ms) {
            return Err(crate::ConfigError::InvalidInteraction {
                reason: format!(
                    "drag_delay_ms {} is outside {MIN_DRAG_DELAY_MS}..={MAX_DRAG_DELAY_MS}",
                    self.drag_delay_ms
                ),
            });
        }

        if !(MIN_DRAG_THRESHOLD..=MAX_DRAG_THRESHOLD).contains(&self.drag_threshold) {
            return Err(crate::ConfigError::InvalidInteraction {
                reason: format!(
                    "drag_threshold {} is outside {MIN_DRAG_THRESHOLD}..={MAX_DRAG_THRESHOLD}",
                    self.drag_threshold
                ),
            });
        }

        Ok(())
    }
}
