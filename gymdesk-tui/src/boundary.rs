//! Per-page error boundary.
//!
//! Page work that runs caller code (table callbacks, cell renderers) goes
//! through [`ErrorBoundary::run`]. A panic trips the boundary: the page is
//! replaced by a fallback view until the user reloads it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use gymtable::{Buffer, Color, ColorContext, DefaultTheme, Rect, Style};
use thiserror::Error;

use crate::pages::PageKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{page} page crashed: {message}")]
pub struct BoundaryError {
    pub page: PageKind,
    pub message: String,
}

/// Extract panic message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[derive(Debug)]
pub struct ErrorBoundary {
    page: PageKind,
    error: Option<BoundaryError>,
}

impl ErrorBoundary {
    pub fn new(page: PageKind) -> Self {
        Self { page, error: None }
    }

    /// Run `f`, capturing a panic instead of unwinding further.
    ///
    /// Returns `None` when `f` panicked or the boundary was already tripped.
    pub fn run<T>(&mut self, f: impl FnOnce() -> T) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Some(value),
            Err(payload) => {
                let error = BoundaryError {
                    page: self.page,
                    message: extract_panic_message(&payload),
                };
                log::error!("{error}");
                self.error = Some(error);
                None
            }
        }
    }

    pub fn error(&self) -> Option<&BoundaryError> {
        self.error.as_ref()
    }

    pub fn is_tripped(&self) -> bool {
        self.error.is_some()
    }

    /// Clear the captured error, returning it.
    pub fn reset(&mut self) -> Option<BoundaryError> {
        let error = self.error.take();
        if let Some(e) = &error {
            log::info!("{} page recovered from: {}", e.page, e.message);
        }
        error
    }

    /// Paint the fallback view shown in place of a crashed page.
    pub fn render_fallback(&self, area: Rect, buf: &mut Buffer) {
        let Some(error) = &self.error else { return };
        if area.is_empty() {
            return;
        }

        let theme = DefaultTheme::new();
        let ctx = ColorContext::new(&theme);
        let base = Style::new()
            .background(Color::var("background"))
            .foreground(Color::var("foreground"));
        buf.fill(area, ctx.cell(&base));

        let lines = [
            (
                format!("Something went wrong on the {} page.", error.page),
                base.clone().foreground(Color::var("danger")).bold(),
            ),
            (error.message.clone(), base.clone()),
            (
                "Press r to reload.".to_string(),
                base.clone().foreground(Color::var("muted")),
            ),
        ];

        let right = area.right();
        for (offset, (text, style)) in lines.iter().enumerate() {
            let y = area.y + 1 + 2 * offset as u16;
            if y >= area.bottom() {
                break;
            }
            let text = gymtable::text::single_line(text);
            buf.write_str(area.x + 2, y, &text, right, ctx.cell(style));
        }
    }
}
