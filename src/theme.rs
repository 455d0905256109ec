//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom color overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Item table
    pub row_selected_bg: Color,
    pub row_selected_fg: Color,
    pub folder_fg: Color,
    pub file_fg: Color,
    pub version_fg: Color,
    pub meta_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Chrome
    pub border_fg: Color,
    pub header_fg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors (not configurable)
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub busy_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        row_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        row_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        folder_fg: Color::Rgb(137, 180, 250),       // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),
        version_fg: Color::Rgb(180, 190, 254),      // #b4befe (lavender)
        meta_fg: Color::Rgb(147, 153, 178),         // #9399b2 (overlay2)

        status_bg: Color::Rgb(49, 50, 68),          // #313244 (surface0)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112),         // #585b70 (surface2)
        header_fg: Color::Rgb(203, 166, 247),       // #cba6f7 (mauve)
        dialog_border_fg: Color::Rgb(137, 220, 235), // #89dceb (sky)

        error_fg: Color::Rgb(243, 139, 168),        // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175),      // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161),      // #a6e3a1 (green)
        busy_fg: Color::Rgb(250, 179, 135),         // #fab387 (peach)
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        row_selected_bg: Color::Rgb(188, 192, 204), // #bcc0cc (surface1)
        row_selected_fg: Color::Rgb(76, 79, 105),
        folder_fg: Color::Rgb(30, 102, 245),        // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),
        version_fg: Color::Rgb(16, 4, 255),         // #1004ff
        meta_fg: Color::Rgb(124, 127, 147),         // #7c7f93 (overlay2)

        status_bg: Color::Rgb(204, 208, 218),       // #ccd0da (surface0)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190),       // #acb0be (surface2)
        header_fg: Color::Rgb(136, 57, 239),        // #8839ef (mauve)
        dialog_border_fg: Color::Rgb(4, 165, 229),  // #04a5e5 (sky)

        error_fg: Color::Rgb(210, 15, 57),          // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29),       // #df8e1d (yellow)
        success_fg: Color::Rgb(64, 160, 43),        // #40a02b (green)
        busy_fg: Color::Rgb(254, 100, 11),          // #fe640b (peach)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn override_color(slot: &mut Color, hex: Option<&String>) {
    if let Some(color) = hex.and_then(|h| parse_hex_color(h)) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark palette
/// - `"light"`: light palette
/// - `"custom"`: dark palette with the custom hex values applied on top
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut theme.row_selected_bg, custom.row_selected_bg.as_ref());
    override_color(&mut theme.row_selected_fg, custom.row_selected_fg.as_ref());
    override_color(&mut theme.folder_fg, custom.folder_fg.as_ref());
    override_color(&mut theme.file_fg, custom.file_fg.as_ref());
    override_color(&mut theme.version_fg, custom.version_fg.as_ref());
    override_color(&mut theme.border_fg, custom.border_fg.as_ref());
    override_color(&mut theme.status_bg, custom.status_bg.as_ref());
    override_color(&mut theme.status_fg, custom.status_fg.as_ref());
    override_color(&mut theme.dialog_border_fg, custom.dialog_border_fg.as_ref());
}

// ── Tests ────────────────────────────────────────────────────────────────────
