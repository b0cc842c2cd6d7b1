//! # Terminal I/O Abstraction
//!
//! Input events and screen output sit behind two traits so the interactive
//! controller can be driven by scripted events in tests.
//!
//! ```text
//! Production:  TuiController ──▶ TerminalEventStream ──▶ crossterm::event
//!                            ──▶ TerminalRenderStream ──▶ crossterm::queue!()
//!
//! Testing:     TuiController ──▶ MockEventStream     ──▶ VecDeque<Event>
//!                            ──▶ MockRenderStream    ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

#[cfg(test)]
pub mod mock;
pub mod terminal;

pub use terminal::{TerminalEventStream, TerminalRenderStream};

#[cfg(test)]
pub use mock::{MockEventStream, MockRenderStream, RenderCommand};

/// Terminal size as (width, height)
pub type TerminalSize = (u16, u16);

/// Source of input events
pub trait EventStream: Send {
    /// True if an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; call only after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Screen the controller draws on
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Move the cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;

    /// Replace the screen contents with `lines`, one per row
    fn draw_frame(&mut self, lines: &[String]) -> Result<()> {
        self.clear_screen()?;
        for (row, line) in (0..=u16::MAX).zip(lines) {
            self.move_cursor(0, row)?;
            write!(self, "{line}")?;
        }
        self.flush()?;
        Ok(())
    }
}
