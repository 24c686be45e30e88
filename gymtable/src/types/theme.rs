use crate::types::{Color, Rgb};

/// A theme provides named color variables.
pub trait Theme: Send + Sync {
    /// Resolve a color variable name to a concrete color.
    /// Returns None if the variable is not defined.
    fn resolve(&self, name: &str) -> Option<&Color>;
}

/// Theme that resolves nothing.
pub struct EmptyTheme;

impl Theme for EmptyTheme {
    fn resolve(&self, _name: &str) -> Option<&Color> {
        None
    }
}

/// Dark dashboard palette.
pub struct DefaultTheme {
    pub background: Color,
    pub foreground: Color,
    pub surface: Color,
    pub border: Color,
    pub primary: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl DefaultTheme {
    pub const fn new() -> Self {
        Self {
            background: Color::hex(0x15161C),
            foreground: Color::hex(0xE6E6E6),
            surface: Color::hex(0x1F2029),
            border: Color::hex(0x4A4C5C),
            primary: Color::hex(0xA277FF),
            muted: Color::hex(0x8A8C99),
            success: Color::hex(0x61FFCA),
            warning: Color::hex(0xFFCA85),
            danger: Color::hex(0xFF6767),
        }
    }
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DefaultTheme {
    fn resolve(&self, name: &str) -> Option<&Color> {
        match name {
            "background" => Some(&self.background),
            "foreground" => Some(&self.foreground),
            "surface" => Some(&self.surface),
            "border" => Some(&self.border),
            "primary" => Some(&self.primary),
            "muted" => Some(&self.muted),
            "success" => Some(&self.success),
            "warning" => Some(&self.warning),
            "danger" => Some(&self.danger),
            _ => None,
        }
    }
}

/// Resolves color variables against a theme.
pub struct ColorContext<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ColorContext<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    /// Resolve a color to RGB, following variables through the theme.
    /// Unknown variables resolve to black.
    pub fn resolve(&self, color: &Color) -> Rgb {
        self.resolve_depth(color, 0)
    }

    fn resolve_depth(&self, color: &Color, depth: u8) -> Rgb {
        match color {
            // A theme mapping a var to itself must not recurse forever.
            Color::Var(name) if depth < 8 => match self.theme.resolve(name) {
                Some(resolved) => self.resolve_depth(resolved, depth + 1),
                None => Rgb::default(),
            },
            Color::Var(_) => Rgb::default(),
            concrete => concrete.to_rgb(),
        }
    }
}
