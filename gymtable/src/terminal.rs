use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::error::Result;
use crate::event::Event;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Full-screen terminal with double-buffered, diffed output.
///
/// Raw mode, the alternate screen and mouse capture are enabled for the
/// lifetime of the value and restored on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    /// Forces a full repaint on the next frame.
    dirty: bool,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
            dirty: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait up to `timeout` for input and return everything pending.
    pub fn poll(&self, timeout: Duration) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        if event::poll(timeout)? {
            events.extend(Event::from_crossterm(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.extend(Event::from_crossterm(event::read()?));
            }
        }

        Ok(events)
    }

    /// Paint a frame. `paint` draws into a cleared buffer covering the
    /// whole screen; only cells that changed since the last frame are
    /// written out.
    pub fn draw<T>(&mut self, paint: impl FnOnce(&mut Buffer) -> T) -> Result<T> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            self.dirty = true;
        }

        self.current_buffer.clear();
        let out = paint(&mut self.current_buffer);

        if self.dirty {
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            // Make every cell differ from the previous frame.
            self.previous_buffer
                .fill(self.previous_buffer.area(), crate::buffer::Cell::new('\0'));
            self.dirty = false;
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);

        Ok(out)
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::WHITE;
        let mut last_bg = Rgb::BLACK;
        let mut last_style = TextStyle::new();

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(rgb(last_fg)),
            SetBackgroundColor(rgb(last_bg))
        )?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.style != last_style {
                // Attributes don't switch off individually on every
                // terminal; reset and re-apply.
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                for (on, attr) in [
                    (cell.style.bold, Attribute::Bold),
                    (cell.style.dim, Attribute::Dim),
                    (cell.style.italic, Attribute::Italic),
                    (cell.style.underline, Attribute::Underlined),
                ] {
                    if on {
                        queue!(self.stdout, SetAttribute(attr))?;
                    }
                }
                queue!(
                    self.stdout,
                    SetForegroundColor(rgb(cell.fg)),
                    SetBackgroundColor(rgb(cell.bg))
                )?;
                last_style = cell.style;
                last_fg = cell.fg;
                last_bg = cell.bg;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(rgb(cell.fg)))?;
                last_fg = cell.fg;
            }

            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(rgb(cell.bg)))?;
                last_bg = cell.bg;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn rgb(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
