//! Theme system

use ratatui::style::Color;

/// Fixed semantic colors for delta highlighting
#[derive(Debug, Clone, Copy)]
pub struct DeltaColors {
    pub gain: Color,
    pub loss: Color,
}

impl DeltaColors {
    pub const DEFAULT: Self = Self {
        gain: Color::Rgb(120, 200, 140),
        loss: Color::Rgb(230, 130, 130),
    };
}

/// Color palette for TUI rendering
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg_primary: Color,

    pub border_default: Color,
    pub border_focus: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub success: Color,
    pub error: Color,
    pub info: Color,

    pub accent_cyan: Color,
    pub accent_yellow: Color,
}

impl ThemeColors {
    /// Default theme
    pub const DEFAULT: Self = Self {
        bg_primary: Color::Rgb(22, 24, 38),

        border_default: Color::Rgb(130, 135, 160),
        border_focus: Color::Rgb(120, 220, 170),

        text_primary: Color::Rgb(230, 233, 248),
        text_secondary: Color::Rgb(185, 190, 210),
        text_muted: Color::Rgb(140, 145, 168),

        success: Color::Rgb(110, 220, 120),
        error: Color::Rgb(250, 120, 130),
        info: Color::Rgb(110, 200, 245),

        accent_cyan: Color::Rgb(100, 215, 235),
        accent_yellow: Color::Rgb(235, 195, 100),
    };
}

/// Theme container providing access to the color palette
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    #[inline]
    pub const fn colors(&self) -> ThemeColors {
        ThemeColors::DEFAULT
    }
}
