//! PawPen terminal front-end.
//!
//! Wires the terminal adapters onto the application core and runs the
//! input/tick loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │                                                      │
//! │   TerminalView          TerminalCues                 │
//! │   (PresentationPort)    (AudioPort)                  │
//! │                                                      │
//! │  ─────────── Port Trait Boundary ────────────        │
//! │                                                      │
//! │  ┌────────────────────────────────────────────┐      │
//! │  │          AppService (pure logic)           │      │
//! │  │  Registry · Scheduler · Actions · Audio    │      │
//! │  └────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Keys map to commands, the wall clock maps to ticks; everything else
//! lives behind the ports.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use pawpen::actions::ActionKind;
use pawpen::adapters::cue::TerminalCues;
use pawpen::adapters::terminal::TerminalView;
use pawpen::app::commands::AppCommand;
use pawpen::app::service::AppService;
use pawpen::config::GameConfig;
use pawpen::pet::PetKind;

const NAME_MAX: usize = 18;

/// What the keyboard is currently driving.
enum InputMode {
    /// Keys are commands.
    Normal,
    /// Keys build a pet name.
    Naming { buf: String, kind_idx: usize },
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    // Raw mode owns the screen; diagnostics are opt-in via RUST_LOG
    // with stderr redirected to a file.
    Builder::from_env(Env::default().default_filter_or("error")).init();

    let config = GameConfig::default();
    let tick = Duration::from_millis(config.tick_interval_ms);
    let mut service = AppService::new(config);

    let mut view = TerminalView::begin()?;
    let mut cues = TerminalCues::new(true);

    let mut mode = InputMode::Normal;
    let mut selected: usize = 0;
    let mut next_tick = Instant::now() + tick;

    loop {
        view.draw(&status_line(&mode, selected, &service))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key(key, &mut mode, &mut selected, &mut service, &mut view, &mut cues)
                {
                    break;
                }
            }
        }

        while Instant::now() >= next_tick {
            service.tick(&mut view);
            next_tick += tick;
        }
    }

    view.end()?;
    Ok(())
}

/// Handle one key press. Returns `true` to quit.
fn handle_key(
    key: KeyEvent,
    mode: &mut InputMode,
    selected: &mut usize,
    service: &mut AppService,
    view: &mut TerminalView,
    cues: &mut TerminalCues,
) -> bool {
    use pawpen::app::ports::PresentationPort;

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') => {
                *mode = InputMode::Naming {
                    buf: String::new(),
                    kind_idx: 0,
                };
            }
            KeyCode::Char(c @ '1'..='4') => {
                *selected = (c as usize) - ('1' as usize);
            }
            KeyCode::Char('f') => send_action(ActionKind::Feed, *selected, service, view, cues),
            KeyCode::Char('n') => send_action(ActionKind::Nap, *selected, service, view, cues),
            KeyCode::Char('p') => send_action(ActionKind::Play, *selected, service, view, cues),
            KeyCode::Char('r') => {
                let _ = service.handle_command(AppCommand::Reset, view, cues);
            }
            KeyCode::Char('m') => {
                let _ = service.handle_command(AppCommand::ToggleAmbient, view, cues);
            }
            _ => {}
        },
        InputMode::Naming { buf, kind_idx } => match key.code {
            KeyCode::Esc => *mode = InputMode::Normal,
            KeyCode::Tab => *kind_idx = (*kind_idx + 1) % PetKind::ALL.len(),
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Enter => {
                let cmd = AppCommand::CreatePet {
                    name: buf.clone(),
                    kind: PetKind::ALL[*kind_idx],
                };
                if let Err(e) = service.handle_command(cmd, view, cues) {
                    // Surface the rejection where the user is looking.
                    view.log_activity(&e.to_string());
                }
                *mode = InputMode::Normal;
            }
            KeyCode::Char(c) => {
                if buf.len() < NAME_MAX {
                    buf.push(c);
                }
            }
            _ => {}
        },
    }
    false
}

/// Route a care action at the currently selected card.
fn send_action(
    action: ActionKind,
    selected: usize,
    service: &mut AppService,
    view: &mut TerminalView,
    cues: &mut TerminalCues,
) {
    let Some(id) = service.pets().nth(selected).map(pawpen::pet::PetEntity::id) else {
        return;
    };
    let _ = service.handle_command(AppCommand::PetAction { pet: id, action }, view, cues);
}

fn status_line(mode: &InputMode, selected: usize, service: &AppService) -> String {
    match mode {
        InputMode::Normal => {
            let music = if service.is_ambient_playing() {
                "on"
            } else {
                "off"
            };
            format!(
                "c create · 1-4 select (now {}) · f feed · n nap · p play · r reset · m music [{music}] · q quit",
                selected + 1
            )
        }
        InputMode::Naming { buf, kind_idx } => {
            format!(
                "name: {buf}_   (Tab: kind = {}, Enter to create, Esc to cancel)",
                PetKind::ALL[*kind_idx].label()
            )
        }
    }
}
