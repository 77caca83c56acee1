use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle};
use std::collections::BTreeMap;
use tracing::debug;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Clinical Light".to_string(),
            dark_mode: false,
        }
    }
}

/// Status bar background (#2c3e50)
pub const STATUS_BAR_BG: Color32 = Color32::from_rgb(44, 62, 80);

/// Sidebar background (#34495e)
pub const SIDEBAR_BG: Color32 = Color32::from_rgb(52, 73, 94);

/// Sidebar heading text (#bdc3c7)
pub const SIDEBAR_TEXT: Color32 = Color32::from_rgb(189, 195, 199);

/// Status bar text (#ecf0f1)
pub const STATUS_TEXT: Color32 = Color32::from_rgb(236, 240, 241);

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = if theme.dark_mode { Color32::from_rgb(31, 31, 31) } else { Color32::from_rgb(245, 246, 247) };
    let widget_bg = if theme.dark_mode { Color32::from_rgb(40, 40, 40) } else { Color32::from_rgb(236, 240, 241) };
    let text_color = if theme.dark_mode { Color32::from_rgb(220, 220, 220) } else { STATUS_BAR_BG };
    let accent = accent_color();

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.faint_bg_color = widget_bg;

    visuals.widgets.noninteractive.bg_fill = widget_bg;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(17.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
    debug!("Applied theme {}", theme.name);
}

/// Buttons and highlights (#2980b9)
pub fn accent_color() -> Color32 {
    Color32::from_rgb(41, 128, 185)
}

/// Error notices (#e74c3c)
pub fn error_color() -> Color32 {
    Color32::from_rgb(231, 76, 60)
}

/// Warning notices (#e67e22)
pub fn warning_color() -> Color32 {
    Color32::from_rgb(230, 126, 34)
}

/// Connected status and confirmations (#2ecc71)
pub fn success_color() -> Color32 {
    Color32::from_rgb(46, 204, 113)
}
