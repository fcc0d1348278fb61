use crossterm::style::Color;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Box border color (thicker 3x3 separators)
    pub box_border: Color,
    /// Given (immutable) cell color
    pub given: Color,
    /// Blank index badge color
    pub badge: Color,
    /// Background for a correctly filled blank
    pub correct_bg: Color,
    /// Background for an incorrectly filled blank
    pub wrong_bg: Color,
    /// Selected blank background
    pub selected_bg: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Whether this is the dark variant
    pub is_dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            box_border: Color::Rgb { r: 130, g: 140, b: 170 },
            given: Color::Rgb { r: 255, g: 255, b: 255 },
            badge: Color::Rgb { r: 140, g: 150, b: 180 },
            correct_bg: Color::Rgb { r: 30, g: 90, b: 45 },
            wrong_bg: Color::Rgb { r: 110, g: 40, b: 40 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            is_dark: true,
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            box_border: Color::Rgb { r: 60, g: 60, b: 80 },
            given: Color::Rgb { r: 0, g: 0, b: 0 },
            badge: Color::Rgb { r: 130, g: 130, b: 150 },
            correct_bg: Color::Rgb { r: 200, g: 247, b: 197 },
            wrong_bg: Color::Rgb { r: 247, g: 197, b: 197 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            is_dark: false,
        }
    }
}
