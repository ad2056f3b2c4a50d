//! Scoped ownership of the terminal's interactive display mode.
//!
//! Raw mode and the alternate screen are process-wide terminal state, so the
//! guard tracks what it changed in atomics and undoes it exactly once, whether
//! the run ends normally, by error, or by panic.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        OnceLock,
    },
};

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALT_SCREEN_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// RAII guard for interactive display mode.
///
/// `acquire` switches the terminal into raw mode on the alternate screen with
/// the cursor hidden; dropping the guard (or calling [`restore_terminal`] from
/// the panic hook) puts everything back. Restoration is idempotent.
pub struct InteractiveGuard;

impl InteractiveGuard {
    pub fn acquire() -> io::Result<Self> {
        install_terminal_panic_hook();
        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);
        Ok(InteractiveGuard)
    }

    pub fn release(&self) {
        restore_terminal();
    }
}

impl Drop for InteractiveGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo whatever interactive-mode changes are still in effect. Safe to call
/// more than once and from the panic hook.
pub fn restore_terminal() {
    if RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if ALT_SCREEN_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::logging::log_panic(info);
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::restore_terminal;

    #[test]
    fn restore_is_idempotent_when_nothing_was_acquired() {
        // Both flags are false here, so this must be a harmless no-op twice.
        restore_terminal();
        restore_terminal();
    }
}
