//! Single-line terminal progress bar on stderr.

use std::io::{self, Stderr, Write};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
    tty::IsTty,
};

const FALLBACK_WIDTH: usize = 80;

/// Columns from a terminal size query, or 80 when it failed or reported zero.
fn width_or_fallback(size: io::Result<(u16, u16)>) -> usize {
    size.ok()
        .map(|(columns, _)| columns as usize)
        .filter(|&w| w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Current width of the controlling terminal
pub fn terminal_width() -> usize {
    width_or_fallback(terminal::size())
}

/// Render `[####....] done/total` into exactly `width` characters where possible.
pub fn render_bar(done: u64, total: u64, width: usize) -> String {
    let label = format!(" {done}/{total}");
    let inner = width.saturating_sub(label.len() + 2).max(1);
    let filled = if total == 0 {
        inner
    } else {
        (inner as u128 * done.min(total) as u128 / total as u128) as usize
    };
    format!("[{}{}]{label}", "#".repeat(filled), ".".repeat(inner - filled))
}

/// Hides the cursor while alive and restores it on drop, including on early return.
pub struct Progress {
    out: Option<Stderr>,
    total: u64,
}

impl Progress {
    /// Active only when `enabled` and stderr is a terminal
    pub fn new(total: u64, enabled: bool) -> Self {
        let stderr = io::stderr();
        let mut out = (enabled && stderr.is_tty()).then_some(stderr);
        if let Some(stderr) = out.as_mut() {
            // Progress output is best effort.
            let _ = execute!(stderr, cursor::Hide);
        }
        Self { out, total }
    }

    /// Redraw after `done` generations, sized to the terminal as it is now
    pub fn update(&mut self, done: u64) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        // Leave the last column free so the bar never wraps.
        let bar = render_bar(done, self.total, terminal_width().saturating_sub(1));
        let _ = queue!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(bar)
        );
        let _ = out.flush();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = execute!(out, Print("\n"), cursor::Show);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fills_proportionally() {
        assert_eq!(render_bar(0, 10, 20), "[.............] 0/10");
        assert_eq!(render_bar(10, 10, 22), "[##############] 10/10");
        assert_eq!(render_bar(5, 10, 20).len(), 20);
    }

    #[test]
    fn test_bar_survives_tiny_width() {
        assert_eq!(render_bar(1, 2, 0), "[.] 1/2");
    }

    #[test]
    fn test_width_follows_reported_terminal_size() {
        assert_eq!(width_or_fallback(Ok((132, 40))), 132);
        assert_eq!(width_or_fallback(Ok((41, 10))), 41);
        assert_eq!(render_bar(3, 6, width_or_fallback(Ok((132, 40)))).len(), 132);
    }

    #[test]
    fn test_width_falls_back_without_a_terminal() {
        assert_eq!(width_or_fallback(Err(io::Error::other("not a tty"))), 80);
        assert_eq!(width_or_fallback(Ok((0, 0))), 80);
    }

    #[test]
    fn test_disabled_progress_writes_nothing() {
        let mut progress = Progress::new(3, false);
        assert!(progress.out.is_none());
        progress.update(1);
    }
}
