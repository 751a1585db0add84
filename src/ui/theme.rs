use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["nexus", "nord", "gruvbox", "dracula"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,
    pub bg_panel: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,

    // ── Chat ─────────────────────────────────────────────────
    pub user_accent: Color,
    pub ai_accent: Color,
    pub ai_response: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Dark violet palette of the NEXUS web client.
    pub fn nexus() -> Self {
        Self {
            name: "nexus".to_string(),
            accent: Color::Rgb(139, 92, 246),       // nexus-500
            bg_dark: Color::Rgb(15, 10, 30),        // nexus-900
            bg_panel: Color::Rgb(26, 20, 45),       // nexus-800
            text_primary: Color::Rgb(226, 232, 240), // slate-200
            text_dim: Color::Rgb(148, 163, 184),    // slate-400
            text_muted: Color::Rgb(100, 116, 139),  // slate-500
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            border: Color::Rgb(51, 45, 74),
            user_accent: Color::Rgb(51, 65, 85),    // slate-700
            ai_accent: Color::Rgb(167, 139, 250),   // nexus-400
            ai_response: Color::Rgb(203, 213, 225), // slate-300
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),       // nord8 frost
            bg_dark: Color::Rgb(46, 52, 64),         // nord0
            bg_panel: Color::Rgb(59, 66, 82),        // nord1
            text_primary: Color::Rgb(229, 233, 240), // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14
            warning: Color::Rgb(235, 203, 139), // nord13
            danger: Color::Rgb(191, 97, 106),   // nord11
            border: Color::Rgb(76, 86, 106),    // nord3
            user_accent: Color::Rgb(129, 161, 193), // nord9
            ai_accent: Color::Rgb(180, 142, 173),   // nord15
            ai_response: Color::Rgb(216, 222, 233), // nord4
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),        // yellow
            bg_dark: Color::Rgb(40, 40, 40),         // bg0
            bg_panel: Color::Rgb(50, 48, 47),        // bg0_s
            text_primary: Color::Rgb(235, 219, 178), // fg
            text_dim: Color::Rgb(168, 153, 132),     // fg4
            text_muted: Color::Rgb(102, 92, 84),     // bg4
            success: Color::Rgb(142, 192, 124),
            warning: Color::Rgb(250, 189, 47),
            danger: Color::Rgb(251, 73, 52),
            border: Color::Rgb(80, 73, 69),
            user_accent: Color::Rgb(131, 165, 152), // blue
            ai_accent: Color::Rgb(211, 134, 155),   // purple
            ai_response: Color::Rgb(235, 219, 178),
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(189, 147, 249), // purple
            bg_dark: Color::Rgb(40, 42, 54),   // background
            bg_panel: Color::Rgb(68, 71, 90),  // current line
            text_primary: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(189, 189, 200),
            text_muted: Color::Rgb(98, 114, 164), // comment
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(241, 250, 140),
            danger: Color::Rgb(255, 85, 85),
            border: Color::Rgb(68, 71, 90),
            user_accent: Color::Rgb(139, 233, 253), // cyan
            ai_accent: Color::Rgb(255, 121, 198),   // pink
            ai_response: Color::Rgb(248, 248, 242),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "nexus" | "default" => Some(Self::nexus()),
            "nord" => Some(Self::nord()),
            "gruvbox" => Some(Self::gruvbox()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Cycle to the next built-in theme. Custom themes cycle back to the first.
    pub fn next_builtin(&self) -> Self {
        let next_idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .map(|idx| (idx + 1) % BUILTIN_THEME_NAMES.len())
            .unwrap_or(0);
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap_or_default()
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

    pub fn badge_style(&self, bg: Color) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
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
        Self::nexus()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional — missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    bg_dark: Option<String>,
    bg_panel: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    border: Option<String>,
    user_accent: Option<String>,
    ai_accent: Option<String>,
    ai_response: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::nexus();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            bg_dark: parse_color(&self.bg_dark).unwrap_or(base.bg_dark),
            bg_panel: parse_color(&self.bg_panel).unwrap_or(base.bg_panel),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            text_muted: parse_color(&self.text_muted).unwrap_or(base.text_muted),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            border: parse_color(&self.border).unwrap_or(base.border),
            user_accent: parse_color(&self.user_accent).unwrap_or(base.user_accent),
            ai_accent: parse_color(&self.ai_accent).unwrap_or(base.ai_accent),
            ai_response: parse_color(&self.ai_response).unwrap_or(base.ai_response),
        }
    }
}

/// Parse a hex color string like "#8B5CF6" or "8B5CF6" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
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
    use std::io::Write;

    // ── parse_color ───────────────────────────────────────────────

    #[test]
    fn parse_color_with_hash() {
        assert_eq!(
            parse_color(&Some("#8b5cf6".into())),
            Some(Color::Rgb(139, 92, 246))
        );
    }

    #[test]
    fn parse_color_without_hash() {
        assert_eq!(
            parse_color(&Some("0F0A1E".into())),
            Some(Color::Rgb(15, 10, 30))
        );
    }

    #[test]
    fn parse_color_none() {
        assert_eq!(parse_color(&None), None);
    }

    #[test]
    fn parse_color_invalid() {
        assert_eq!(parse_color(&Some("#fff".into())), None);
        assert_eq!(parse_color(&Some("#zzzzzz".into())), None);
        assert_eq!(parse_color(&Some("ééé".into())), None);
    }

    // ── Lookup and cycling ────────────────────────────────────────

    #[test]
    fn by_name_all_builtins() {
        for name in BUILTIN_THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name, *name);
        }
    }

    #[test]
    fn by_name_case_insensitive_and_default_alias() {
        assert_eq!(Theme::by_name("NORD").unwrap().name, "nord");
        assert_eq!(Theme::by_name("default").unwrap().name, "nexus");
    }

    #[test]
    fn by_name_unknown() {
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn next_builtin_cycles_through_all() {
        let mut theme = Theme::nexus();
        let mut seen = vec![theme.name.clone()];
        for _ in 1..BUILTIN_THEME_NAMES.len() {
            theme = theme.next_builtin();
            seen.push(theme.name.clone());
        }
        assert_eq!(seen, BUILTIN_THEME_NAMES);
        assert_eq!(theme.next_builtin().name, "nexus");
    }

    #[test]
    fn next_builtin_from_custom_goes_to_first() {
        let mut custom = Theme::nexus();
        custom.name = "mine".into();
        assert_eq!(custom.next_builtin().name, "nexus");
    }

    // ── Custom themes ─────────────────────────────────────────────

    #[test]
    fn from_toml_file_inherits_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("midnight.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "accent = \"#112233\"").unwrap();

        let theme = Theme::from_toml_file(&path).unwrap();
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.accent, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.bg_dark, Theme::nexus().bg_dark);
    }

    #[test]
    fn from_toml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Theme::from_toml_file(&dir.path().join("none.toml")).is_none());
    }

    #[test]
    fn default_is_nexus() {
        assert_eq!(Theme::default().name, "nexus");
    }
}
