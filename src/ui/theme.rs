use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the console.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_search: ColorSpec,
    pub footer_form: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_access: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// The handful of colors each palette is built from.
///
struct Palette {
    primary: ColorSpec,
    secondary: ColorSpec,
    accent: ColorSpec,
    banner: ColorSpec,
    text: ColorSpec,
    text_secondary: ColorSpec,
    text_muted: ColorSpec,
    background: ColorSpec,
    success: ColorSpec,
    warning: ColorSpec,
    error: ColorSpec,
    info: ColorSpec,
}

impl Palette {
    fn into_theme(self, name: &str) -> Theme {
        Theme {
            name: name.to_string(),
            primary: self.primary,
            secondary: self.secondary,
            accent: self.accent,
            banner: self.banner,
            text: self.text,
            text_secondary: self.text_secondary,
            text_muted: self.text_muted,
            success: self.success,
            warning: self.warning,
            error: self.error,
            info: self.info,
            border_active: self.primary,
            border_normal: self.text_muted,
            highlight_bg: self.info,
            highlight_fg: self.background,
            footer_search: self.info,
            footer_form: self.warning,
            footer_delete: self.error,
            footer_access: self.primary,
            footer_normal: ColorSpec::rgb(0, 0, 0),
        }
    }
}

impl Theme {
    /// Get the default theme (Tokyo Night).
    ///
    pub fn default() -> Self {
        Self::tokyo_night()
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Palette {
            primary: ColorSpec::rgb(125, 207, 255),
            secondary: ColorSpec::rgb(158, 206, 106),
            accent: ColorSpec::rgb(255, 159, 196),
            banner: ColorSpec::rgb(255, 159, 196),
            text: ColorSpec::rgb(169, 177, 214),
            text_secondary: ColorSpec::rgb(192, 202, 245),
            text_muted: ColorSpec::rgb(117, 121, 148),
            background: ColorSpec::rgb(26, 27, 38),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(255, 202, 40),
            error: ColorSpec::rgb(247, 118, 142),
            info: ColorSpec::rgb(125, 207, 255),
        }
        .into_theme("tokyo-night")
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Palette {
            primary: ColorSpec::rgb(189, 147, 249),
            secondary: ColorSpec::rgb(139, 233, 253),
            accent: ColorSpec::rgb(255, 121, 198),
            banner: ColorSpec::rgb(255, 121, 198),
            text: ColorSpec::rgb(248, 248, 242),
            text_secondary: ColorSpec::rgb(189, 147, 249),
            text_muted: ColorSpec::rgb(98, 114, 164),
            background: ColorSpec::rgb(40, 42, 54),
            success: ColorSpec::rgb(80, 250, 123),
            warning: ColorSpec::rgb(255, 184, 108),
            error: ColorSpec::rgb(255, 85, 85),
            info: ColorSpec::rgb(139, 233, 253),
        }
        .into_theme("dracula")
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Palette {
            primary: ColorSpec::rgb(203, 166, 247),
            secondary: ColorSpec::rgb(166, 227, 161),
            accent: ColorSpec::rgb(250, 179, 135),
            banner: ColorSpec::rgb(245, 189, 230),
            text: ColorSpec::rgb(205, 214, 244),
            text_secondary: ColorSpec::rgb(186, 194, 222),
            text_muted: ColorSpec::rgb(166, 173, 200),
            background: ColorSpec::rgb(17, 17, 27),
            success: ColorSpec::rgb(166, 227, 161),
            warning: ColorSpec::rgb(249, 226, 175),
            error: ColorSpec::rgb(243, 139, 168),
            info: ColorSpec::rgb(137, 180, 250),
        }
        .into_theme("catppuccin-mocha")
    }

    /// Rose Pine Dawn theme, for light terminals.
    ///
    pub fn rose_pine_dawn() -> Self {
        Palette {
            primary: ColorSpec::rgb(161, 119, 255),
            secondary: ColorSpec::rgb(59, 247, 209),
            accent: ColorSpec::rgb(255, 109, 146),
            banner: ColorSpec::rgb(255, 109, 146),
            text: ColorSpec::rgb(88, 82, 96),
            text_secondary: ColorSpec::rgb(121, 117, 147),
            text_muted: ColorSpec::rgb(152, 147, 165),
            background: ColorSpec::rgb(0, 0, 0),
            success: ColorSpec::rgb(59, 247, 209),
            warning: ColorSpec::rgb(255, 210, 0),
            error: ColorSpec::rgb(235, 111, 146),
            info: ColorSpec::rgb(61, 174, 233),
        }
        .into_theme("rose-pine-dawn")
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<&'static str> {
        vec!["tokyo-night", "dracula", "catppuccin-mocha", "rose-pine-dawn"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default().name, "tokyo-night");
    }
}
