//! Game configuration parameters
//!
//! All tunable timing and decay parameters for the pen. The core works
//! in abstract ticks; only the terminal front-end maps a tick to wall
//! clock via `tick_interval_ms`.

use serde::{Deserialize, Serialize};

use crate::pet::StatDelta;

/// Core game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // --- Decay ---
    /// Ticks between passive decay applications per pet
    pub decay_interval_ticks: u64,
    /// How much each stat drops per decay application
    pub decay_step: i16,

    // --- Removal ---
    /// Ticks between a pet running away and its card leaving the view
    pub farewell_delay_ticks: u64,

    // --- Timing ---
    /// Wall-clock width of one tick in the front-end loop (milliseconds)
    pub tick_interval_ms: u64,
}

impl GameConfig {
    /// The delta one decay application adds to all three stats.
    pub fn decay_delta(&self) -> StatDelta {
        StatDelta::new(-self.decay_step, -self.decay_step, -self.decay_step)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Decay
            decay_interval_ticks: 10,
            decay_step: 15,

            // Removal
            farewell_delay_ticks: 1,

            // Timing
            tick_interval_ms: 1000, // one tick per second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = GameConfig::default();
        assert!(c.decay_step > 0);
        assert!(c.decay_interval_ticks > 0);
        assert!(c.tick_interval_ms > 0);
        assert!(
            c.farewell_delay_ticks < c.decay_interval_ticks,
            "the farewell must resolve before the next decay window"
        );
    }

    #[test]
    fn decay_delta_is_uniformly_negative() {
        let c = GameConfig::default();
        let d = c.decay_delta();
        assert_eq!(d, StatDelta::new(-15, -15, -15));
    }

    #[test]
    fn serde_roundtrip() {
        let c = GameConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.decay_interval_ticks, c2.decay_interval_ticks);
        assert_eq!(c.decay_step, c2.decay_step);
        assert_eq!(c.farewell_delay_ticks, c2.farewell_delay_ticks);
        assert_eq!(c.tick_interval_ms, c2.tick_interval_ms);
    }
}
