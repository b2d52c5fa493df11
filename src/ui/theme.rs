use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord", "dracula"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub accent_secondary: Color,
    pub bg_dark: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,

    // ── AI ───────────────────────────────────────────────────
    pub ai_accent: Color,
    pub ai_response: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme (the console's own palette).
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 179, 237),
            accent_secondary: Color::Rgb(129, 230, 217),
            bg_dark: Color::Rgb(22, 22, 30),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            info: Color::Rgb(99, 179, 237),
            border: Color::Rgb(55, 55, 75),
            ai_accent: Color::Rgb(217, 143, 255),
            ai_response: Color::Rgb(200, 210, 230),
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),            // yellow
            accent_secondary: Color::Rgb(142, 192, 124), // green
            bg_dark: Color::Rgb(40, 40, 40),             // bg0
            text_primary: Color::Rgb(235, 219, 178),     // fg
            text_dim: Color::Rgb(168, 153, 132),         // fg4
            text_muted: Color::Rgb(102, 92, 84),         // bg4
            success: Color::Rgb(142, 192, 124),          // green
            warning: Color::Rgb(250, 189, 47),           // yellow bright
            danger: Color::Rgb(251, 73, 52),             // red
            info: Color::Rgb(131, 165, 152),             // blue
            border: Color::Rgb(80, 73, 69),
            ai_accent: Color::Rgb(211, 134, 155), // purple
            ai_response: Color::Rgb(235, 219, 178),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(143, 188, 187), // nord7
            bg_dark: Color::Rgb(46, 52, 64),             // nord0
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14 green
            warning: Color::Rgb(235, 203, 139), // nord13 yellow
            danger: Color::Rgb(191, 97, 106),   // nord11 red
            info: Color::Rgb(129, 161, 193),    // nord9
            border: Color::Rgb(76, 86, 106),    // nord3
            ai_accent: Color::Rgb(180, 142, 173), // nord15 purple
            ai_response: Color::Rgb(216, 222, 233), // nord4
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),          // cyan
            accent_secondary: Color::Rgb(80, 250, 123), // green
            bg_dark: Color::Rgb(40, 42, 54),            // background
            text_primary: Color::Rgb(248, 248, 242),    // foreground
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164), // comment
            success: Color::Rgb(80, 250, 123),    // green
            warning: Color::Rgb(241, 250, 140),   // yellow
            danger: Color::Rgb(255, 85, 85),      // red
            info: Color::Rgb(139, 233, 253),      // cyan
            border: Color::Rgb(98, 114, 164),     // comment
            ai_accent: Color::Rgb(189, 147, 249), // purple
            ai_response: Color::Rgb(248, 248, 242),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Cycle to the next built-in theme.
    pub fn next_builtin(&self) -> Self {
        let idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .unwrap_or(0);
        let next_idx = (idx + 1) % BUILTIN_THEME_NAMES.len();
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap()
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active_style(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional — missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    accent_secondary: Option<String>,
    bg_dark: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    info: Option<String>,
    border: Option<String>,
    ai_accent: Option<String>,
    ai_response: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            accent_secondary: parse_color(&self.accent_secondary).unwrap_or(base.accent_secondary),
            bg_dark: parse_color(&self.bg_dark).unwrap_or(base.bg_dark),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            text_muted: parse_color(&self.text_muted).unwrap_or(base.text_muted),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            info: parse_color(&self.info).unwrap_or(base.info),
            border: parse_color(&self.border).unwrap_or(base.border),
            ai_accent: parse_color(&self.ai_accent).unwrap_or(base.ai_accent),
            ai_response: parse_color(&self.ai_response).unwrap_or(base.ai_response),
        }
    }
}

/// Parse a "#rrggbb" or "rrggbb" hex string into a Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_with_hash() {
        assert_eq!(
            parse_color(&Some("#ff8800".to_string())),
            Some(Color::Rgb(255, 136, 0))
        );
    }

    #[test]
    fn parse_color_without_hash() {
        assert_eq!(
            parse_color(&Some("639fed".to_string())),
            Some(Color::Rgb(99, 159, 237))
        );
    }

    #[test]
    fn parse_color_invalid_length() {
        assert_eq!(parse_color(&Some("#fff".to_string())), None);
    }

    #[test]
    fn parse_color_invalid_hex() {
        assert_eq!(parse_color(&Some("#zzzzzz".to_string())), None);
    }

    #[test]
    fn parse_color_none() {
        assert_eq!(parse_color(&None), None);
    }

    #[test]
    fn by_name_all_builtins() {
        for name in BUILTIN_THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(&theme.name, name);
        }
    }

    #[test]
    fn by_name_case_insensitive() {
        assert!(Theme::by_name("NORD").is_some());
    }

    #[test]
    fn by_name_unknown() {
        assert!(Theme::by_name("daylight").is_none());
    }

    #[test]
    fn next_builtin_cycles_through_all() {
        let mut theme = Theme::default_dark();
        for expected in BUILTIN_THEME_NAMES.iter().cycle().skip(1).take(4) {
            theme = theme.next_builtin();
            assert_eq!(&theme.name, expected);
        }
    }

    #[test]
    fn theme_file_missing_fields_inherit_default() {
        let file: ThemeFile = toml::from_str(r##"accent = "#112233""##).unwrap();
        let theme = file.into_theme("custom");
        assert_eq!(theme.accent, Color::Rgb(17, 34, 51));
        assert_eq!(theme.danger, Theme::default_dark().danger);
        assert_eq!(theme.name, "custom");
    }
}
