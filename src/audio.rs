//! Ambient-audio policy.
//!
//! Latched decision state for the ambient track, kept as explicit
//! instance fields so the behaviour is deterministic and testable
//! without any audio runtime. The rules:
//!
//! - an action ducks the ambient track at most once; the latch only
//!   clears on a pen reset
//! - a manual toggle always wins: ambient never auto-resumes while the
//!   user has muted it
//! - action and reset cues are unconditional — only the ambient track
//!   is governed here
//!
//! The policy decides; the caller talks to the
//! [`AudioPort`](crate::app::ports::AudioPort).

/// Verdict returned by [`AudioPolicy::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientToggle {
    Resume,
    Pause,
}

/// Latched ambient-audio state.
pub struct AudioPolicy {
    manually_muted: bool,
    ducked_by_action: bool,
    /// What the ambient track was last told to do.
    ambient_playing: bool,
}

impl Default for AudioPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPolicy {
    /// Ambient starts playing, unducked, unmuted.
    pub fn new() -> Self {
        Self {
            manually_muted: false,
            ducked_by_action: false,
            ambient_playing: true,
        }
    }

    /// An action happened: should the ambient track stop?
    ///
    /// Ducks at most once per latch window; muted users are left alone.
    pub fn duck_for_action(&mut self) -> bool {
        if self.manually_muted || self.ducked_by_action {
            return false;
        }
        self.ducked_by_action = true;
        self.ambient_playing = false;
        true
    }

    /// The pen was reset: clears the duck latch. Returns whether the
    /// ambient track should resume (it does not for muted users).
    pub fn on_reset(&mut self) -> bool {
        self.ducked_by_action = false;
        if self.manually_muted {
            return false;
        }
        self.ambient_playing = true;
        true
    }

    /// Manual music toggle. Pausing sets the mute latch; resuming
    /// clears it (the duck latch stays until the next reset, matching
    /// the one-duck-per-window rule).
    pub fn toggle(&mut self) -> AmbientToggle {
        if self.ambient_playing {
            self.manually_muted = true;
            self.ambient_playing = false;
            AmbientToggle::Pause
        } else {
            self.manually_muted = false;
            self.ambient_playing = true;
            AmbientToggle::Resume
        }
    }

    pub fn is_ambient_playing(&self) -> bool {
        self.ambient_playing
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
