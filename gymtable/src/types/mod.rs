mod color;
mod enums;
mod style;
mod theme;

pub use color::{Color, Rgb};
pub use enums::{TextAlign, TextStyle};
pub use style::Style;
pub use theme::{ColorContext, DefaultTheme, EmptyTheme, Theme};
