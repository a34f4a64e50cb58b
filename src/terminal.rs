//! Raw-mode alternate-screen lifecycle for the terminal front end.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::warn;

/// Holds the terminal in raw mode on the alternate screen with the cursor
/// hidden. Dropping the guard puts everything back.
pub struct TerminalGuard<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on a failure drops the guard, which undoes the raw mode.
        let mut guard = Self { out, active: true };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Restores the terminal and reports the first step that failed.
    pub fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal(&mut self.out)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(err) = restore_terminal(&mut self.out) {
                warn!(error = %err, "terminal restore failed");
            }
        }
    }
}

/// Shows the cursor, leaves the alternate screen and disables raw mode.
/// Every step runs even if an earlier one fails; the first error wins.
pub fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    let steps = [
        out.execute(Show).map(|_| ()),
        out.execute(LeaveAlternateScreen).map(|_| ()),
        terminal::disable_raw_mode(),
    ];
    steps.into_iter().collect()
}
