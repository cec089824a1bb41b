//! Bell-and-log audio adapter.
//!
//! A terminal has no mixer, so cues become the terminal bell and the
//! ambient track becomes log lines. A desktop build would implement
//! [`AudioPort`] against a real audio backend instead; the core cannot
//! tell the difference.

use std::io::{Write, stdout};

use log::info;

use crate::app::ports::AudioPort;

/// Rings the terminal bell for cues; tracks ambient state in the log.
pub struct TerminalCues {
    bell_enabled: bool,
}

impl TerminalCues {
    pub fn new(bell_enabled: bool) -> Self {
        Self { bell_enabled }
    }

    fn bell(&self) {
        if self.bell_enabled {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

impl AudioPort for TerminalCues {
    fn play_action_cue(&mut self) {
        self.bell();
    }

    fn play_reset_cue(&mut self) {
        self.bell();
    }

    fn stop_ambient(&mut self) {
        info!("ambient track paused");
    }

    fn resume_ambient(&mut self) {
        info!("ambient track restarted");
    }
}
