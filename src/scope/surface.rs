//! Long-lived terminal surface driving the per-cycle redraws.

use super::chart::{render_chart, ScopeFrame};
use crate::logging::log_debug;
use crate::run::{CycleControl, ScopeSink};
use crate::terminal_restore::InteractiveGuard;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const RUNNING_FOOTER: &str = "q / Esc / Ctrl-C to stop";
const STOPPED_FOOTER: &str = "stopped - press any key to close";

/// The one long-lived display resource: a raw-mode alternate-screen terminal
/// plus the guard that releases it exactly once.
pub struct ScopeSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: InteractiveGuard,
    device_name: String,
    sample_rate: u32,
    last_frame: Option<ScopeFrame>,
}

impl ScopeSurface {
    pub fn new(device_name: &str, sample_rate: u32) -> Result<Self> {
        let guard =
            InteractiveGuard::acquire().context("failed to enter interactive display mode")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("failed to create terminal surface")?;
        terminal.clear().context("failed to clear terminal")?;
        Ok(Self {
            terminal,
            guard,
            device_name: device_name.to_string(),
            sample_rate,
            last_frame: None,
        })
    }

    fn draw_scope(&mut self, scope: &ScopeFrame, footer: &str) -> Result<()> {
        let status = format!(
            " {} | {} Hz | cycle {} | {} samples/ch | peak {:.1} dBFS | rms {:.1} dBFS | {footer}",
            self.device_name,
            self.sample_rate,
            scope.cycle,
            scope.samples_per_channel,
            scope.peak_db,
            scope.rms_db,
        );
        self.terminal
            .draw(|frame| {
                let areas = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(1)])
                    .split(frame.size());
                render_chart(frame, areas[0], scope);
                frame.render_widget(Paragraph::new(status.as_str()), areas[1]);
            })
            .context("failed to draw scope frame")?;
        Ok(())
    }
}

impl ScopeSink for ScopeSurface {
    fn render(&mut self, frame: &ScopeFrame) -> Result<()> {
        self.draw_scope(frame, RUNNING_FOOTER)?;
        // Only the latest frame is kept, for resize redraws and the final
        // flush; the previous one is dropped here.
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn pause(&mut self, interval: Duration) -> Result<CycleControl> {
        let deadline = Instant::now() + interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(CycleControl::Continue);
            }
            // Yield to terminal events for the rest of the pause so the
            // display stays responsive while we wait.
            if event::poll(deadline - now).context("failed to poll terminal events")? {
                match event::read().context("failed to read terminal event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if is_interrupt_key(key.code, key.modifiers) {
                            return Ok(CycleControl::Interrupt);
                        }
                    }
                    Event::Resize(_, _) => {
                        if let Some(last) = self.last_frame.clone() {
                            self.draw_scope(&last, RUNNING_FOOTER)?;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(last) = self.last_frame.clone() {
            // Final flush: hold the last trace on screen until a key arrives,
            // then release the terminal.
            self.draw_scope(&last, STOPPED_FOOTER)?;
            loop {
                match event::read().context("failed to read terminal event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => break,
                    _ => {}
                }
            }
        }
        log_debug("releasing scope surface");
        self.guard.release();
        Ok(())
    }
}

pub(crate) fn is_interrupt_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::is_interrupt_key;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn quit_keys_request_interrupt() {
        assert!(is_interrupt_key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(is_interrupt_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(is_interrupt_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn ordinary_keys_do_not_interrupt() {
        assert!(!is_interrupt_key(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!is_interrupt_key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!is_interrupt_key(KeyCode::Enter, KeyModifiers::NONE));
    }
}
