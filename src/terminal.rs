use crossterm::cursor::Show;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use std::io::{self, stdout, Write};
use tracing::warn;

/// Raw mode plus alternate screen for as long as the guard lives.
///
/// Dropping it restores the terminal, including when setup fails halfway.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { _private: () };
        crossterm::execute!(stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore(&mut stdout()) {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Leave raw mode and the alternate screen and show the cursor.
///
/// Every step runs even if an earlier one fails; the first error is returned.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    crossterm::execute!(out, LeaveAlternateScreen, Show)?;
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_leaves_alternate_screen_and_shows_cursor() {
        let mut out = Vec::new();
        restore(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }
}
