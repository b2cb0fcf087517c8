pub mod colors;

pub use colors::Color;

use dash_config::ThemeConfig;

/// Colours resolved from [`ThemeConfig`].
///
/// Calling [`Palette::from_config`] is infallible; invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Chart polyline.
    pub line:  Color,
    /// Gauge arc chords.
    pub fill:  Color,
    /// Gauge background track.
    pub track: Color,
}

impl Palette {
    /// Build a [`Palette`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            line:  Color::from_hex(&cfg.line).unwrap_or(Color::MAUVE),
            fill:  Color::from_hex(&cfg.fill).unwrap_or(Color::MAUVE),
            track: Color::from_hex(&cfg.track).unwrap_or(Color::SURFACE),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hex_falls_back() {
        let cfg = ThemeConfig {
            line:  "not-a-colour".into(),
            fill:  "#00ff00".into(),
            track: "".into(),
        };
        let palette = Palette::from_config(&cfg);
        assert_eq!(palette.line, Color::MAUVE);
        assert_eq!(palette.fill, Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 });
        assert_eq!(palette.track, Color::SURFACE);
    }
}
