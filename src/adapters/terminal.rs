//! Crossterm presentation adapter.
//!
//! Implements [`PresentationPort`] as a card-per-pet terminal view with
//! an activity-log tail, drawn into the alternate screen. The adapter
//! snapshots what it needs from each entity when notified, so drawing
//! never reaches back into the core.

use std::collections::VecDeque;
use std::io::{self, Stdout, Write, stdout};

use crossterm::style::{Attribute, Print, ResetColor, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::app::ports::PresentationPort;
use crate::pet::{ImageKey, PetEntity, PetId, PetKind, STAT_MAX, Stats};

/// Lines kept in the activity-log tail.
const LOG_LINES: usize = 6;

/// Snapshot of one pet card.
struct Card {
    id: PetId,
    name: String,
    kind: PetKind,
    stats: Stats,
    image: ImageKey,
}

/// Card-per-pet terminal view.
pub struct TerminalView {
    out: Stdout,
    cards: Vec<Card>,
    log: VecDeque<String>,
}

impl TerminalView {
    /// Enter the alternate screen and raw mode.
    pub fn begin() -> anyhow::Result<Self> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(Self {
            out,
            cards: Vec::new(),
            log: VecDeque::new(),
        })
    }

    /// Restore the terminal. Also called from `Drop` as a backstop.
    pub fn end(&mut self) -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    fn card_mut(&mut self, id: PetId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Draw the whole screen. `status` is the front-end's input line
    /// (key help or the name being typed).
    pub fn draw(&mut self, status: &str) -> io::Result<()> {
        queue!(
            self.out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print("PawPen"),
            SetAttribute(Attribute::Reset),
        )?;

        let mut row: u16 = 2;
        if self.cards.is_empty() {
            queue!(
                self.out,
                cursor::MoveTo(2, row),
                Print("The pen is empty. Press 'c' to create a pet.")
            )?;
            row += 2;
        }
        // Borrow dance: render into strings first, then queue.
        let mut lines: Vec<String> = Vec::new();
        for (i, card) in self.cards.iter().enumerate() {
            lines.push(format!(
                "[{}] {} the {}   {}",
                i + 1,
                card.name,
                card.kind.label(),
                face(card.image),
            ));
            lines.push(format!(
                "    energy {}  fullness {}  happiness {}",
                bar(card.stats.energy),
                bar(card.stats.fullness),
                bar(card.stats.happiness),
            ));
            let warn = warning_line(card.stats);
            if !warn.is_empty() {
                lines.push(format!("    {warn}"));
            }
            lines.push(String::new());
        }
        for line in &lines {
            queue!(self.out, cursor::MoveTo(2, row), Print(line))?;
            row += 1;
        }

        row += 1;
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            SetAttribute(Attribute::Dim),
            Print("── activity ─────────────────────────────"),
            SetAttribute(Attribute::Reset),
        )?;
        row += 1;
        for msg in &self.log {
            queue!(self.out, cursor::MoveTo(2, row), Print(msg))?;
            row += 1;
        }

        row += 1;
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            SetAttribute(Attribute::Dim),
            Print(status),
            SetAttribute(Attribute::Reset),
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

impl PresentationPort for TerminalView {
    fn render_new_pet(&mut self, pet: &PetEntity) {
        self.cards.push(Card {
            id: pet.id(),
            name: pet.name().to_string(),
            kind: pet.kind(),
            stats: pet.stats(),
            image: ImageKey::Entry,
        });
    }

    fn update_stats(&mut self, pet: &PetEntity) {
        let stats = pet.stats();
        if let Some(card) = self.card_mut(pet.id()) {
            card.stats = stats;
        }
    }

    fn show_image(&mut self, pet: &PetEntity, key: ImageKey) {
        if let Some(card) = self.card_mut(pet.id()) {
            card.image = key;
        }
    }

    fn log_activity(&mut self, message: &str) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(message.to_string());
    }

    fn remove_from_view(&mut self, id: PetId) {
        self.cards.retain(|c| c.id != id);
    }
}

/// Ten-segment stat bar, e.g. `[██████····]  60`.
fn bar(value: i16) -> String {
    let filled = (usize::from(value.clamp(0, STAT_MAX) as u16) * 10) / STAT_MAX as usize;
    let mut s = String::from("[");
    for i in 0..10 {
        s.push(if i < filled { '█' } else { '·' });
    }
    s.push_str(&format!("] {value:>3}"));
    s
}

/// Warning hints shown under the stat bars.
fn warning_line(stats: Stats) -> String {
    let w = stats.warnings();
    let mut line = String::new();
    if w.low_energy {
        line.push_str("Low Energy! ");
    }
    if w.hungry {
        line.push_str("Hungry! ");
    }
    if w.sad {
        line.push_str("Sad! ");
    }
    line.trim_end().to_string()
}

/// A face per card image — the terminal's stand-in for the GIF swap.
fn face(key: ImageKey) -> &'static str {
    match key {
        ImageKey::Entry => "(o_o)",
        ImageKey::Eating => "(^o^) *nom*",
        ImageKey::Sleeping => "(-_-) zZz",
        ImageKey::Playing => "\\(^v^)/",
        ImageKey::Running => "(>_<) !!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_ten_segments() {
        assert!(bar(100).starts_with("[██████████]"));
        assert!(bar(0).starts_with("[··········]"));
        assert!(bar(55).starts_with("[█████·····]"));
    }

    #[test]
    fn warning_line_matches_flags() {
        let stats = Stats {
            energy: 10,
            fullness: 90,
            happiness: 15,
        };
        assert_eq!(warning_line(stats), "Low Energy! Sad!");
    }
}
