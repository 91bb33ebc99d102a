// src/render/display.rs

use super::ResultsTable;
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    style::Print,
    terminal,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Position,
    widgets::Paragraph,
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Stdout};
use tracing::debug;

/// Hides the cursor for the lifetime of the display. On drop the cursor is
/// shown again one line below the last drawn table.
struct CursorGuard;

impl CursorGuard {
    fn hide() -> io::Result<Self> {
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Print("\r\n"), Show);
        debug!("terminal restored");
    }
}

/// Terminal surface that redraws the latest table in place. It draws into
/// the normal screen buffer, so the last table stays visible after exit.
pub struct LiveDisplay<B: Backend> {
    terminal: Terminal<B>,
    current: Option<ResultsTable>,
    // dropped after `terminal`
    _cursor: Option<CursorGuard>,
}

impl LiveDisplay<CrosstermBackend<Stdout>> {
    pub fn stdout() -> Result<Self> {
        let (_, rows) = terminal::size().context("reading terminal size")?;
        // one line is left for the farewell message
        let height = rows.saturating_sub(1).max(3);
        let cursor = CursorGuard::hide().context("hiding cursor")?;
        let mut display = Self::inline(CrosstermBackend::new(io::stdout()), height)
            .context("setting up terminal")?;
        display._cursor = Some(cursor);
        Ok(display)
    }
}

impl<B: Backend> LiveDisplay<B> {
    /// A display covering the whole backend area.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            current: None,
            _cursor: None,
        }
    }

    /// A display `height` lines tall, starting at the cursor.
    pub fn inline(backend: B, height: u16) -> Result<Self> {
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?;
        Ok(Self::new(terminal))
    }

    /// Replace what is shown. Nothing of the previous table survives.
    pub fn update(&mut self, table: ResultsTable) {
        self.current = Some(table);
    }

    pub fn current(&self) -> Option<&ResultsTable> {
        self.current.as_ref()
    }

    pub fn draw(&mut self) -> Result<()> {
        let current = self.current.as_ref();
        self.terminal
            .draw(|frame| match current {
                Some(table) => frame.render_widget(table, frame.area()),
                None => frame.render_widget(
                    Paragraph::new("waiting for first results ..."),
                    frame.area(),
                ),
            })
            .context("drawing results table")?;
        Ok(())
    }

    /// Leaves the drawn table in place and parks the cursor on its last line.
    fn release(&mut self) -> Result<()> {
        let area = self.terminal.get_frame().area();
        self.terminal
            .set_cursor_position(Position::new(0, area.bottom().saturating_sub(1)))?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for LiveDisplay<B> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            debug!("releasing display: {:#}", e);
        }
    }
}
