//! # Theme Registry
//!
//! A flat table of named style presets. Each preset is an immutable record;
//! resolution is a total function: unknown ids fall back to the
//! `"standard"` entry, never an error. Per-request color overrides are
//! applied to a copy at draw time and never touch the registry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An RGB color in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. Malformed components read as zero.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// The two page-chrome families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Certificate-style concentric frame; no color fill.
    Bordered,
    /// Filled color band across the top of page one, thin bar on
    /// continuation pages.
    Banner,
}

/// Semantic font family, mapped to a concrete face by the text module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Serif,
    Mono,
}

/// One named style preset.
#[derive(Debug, Clone)]
pub struct ThemeStyle {
    pub id: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub header_background: Color,
    pub header_text: Color,
    pub stripe: Color,
    pub border: Color,
    pub corner_radius: f64,
    pub show_footer_rule: bool,
    pub body_font: FontFamily,
    pub header_font: FontFamily,
    pub layout: Layout,
}

impl ThemeStyle {
    /// Certificate rendition of this preset: bordered chrome and
    /// primary-colored headings, whatever the preset's own layout. Warranty
    /// documents compose with this.
    pub fn certificate(&self) -> ThemeStyle {
        let mut style = self.clone();
        style.layout = Layout::Bordered;
        style.header_background = Color::WHITE;
        style.header_text = style.primary;
        style
    }

    /// Apply per-request color overrides to a copy. The banner background
    /// follows the primary override so the chrome and table header stay in
    /// step.
    pub fn with_overrides(&self, primary: Option<Color>, secondary: Option<Color>) -> ThemeStyle {
        let mut style = self.clone();
        if let Some(p) = primary {
            style.primary = p;
            if style.layout == Layout::Banner {
                style.header_background = p;
            }
        }
        if let Some(s) = secondary {
            style.secondary = s;
        }
        style
    }
}

pub const DEFAULT_THEME: &str = "standard";

/// Banner preset: filled header band, sans type, striped table rows.
fn banner(id: &'static str, primary: &str, secondary: &str, stripe: &str) -> ThemeStyle {
    let primary = Color::hex(primary);
    ThemeStyle {
        id,
        primary,
        secondary: Color::hex(secondary),
        text: Color::hex("#1F2430"),
        header_background: primary,
        header_text: Color::WHITE,
        stripe: Color::hex(stripe),
        border: Color::hex(secondary),
        corner_radius: 3.0,
        show_footer_rule: true,
        body_font: FontFamily::Sans,
        header_font: FontFamily::Sans,
        layout: Layout::Banner,
    }
}

/// Bordered preset: certificate frame, serif headings, no fills beyond the
/// table header and stripes.
fn bordered(id: &'static str, primary: &str, secondary: &str, border: &str) -> ThemeStyle {
    let primary = Color::hex(primary);
    ThemeStyle {
        id,
        primary,
        secondary: Color::hex(secondary),
        text: Color::hex("#24221C"),
        header_background: Color::WHITE,
        header_text: primary,
        stripe: Color::hex("#F4F2EC"),
        border: Color::hex(border),
        corner_radius: 0.0,
        show_footer_rule: false,
        body_font: FontFamily::Serif,
        header_font: FontFamily::Serif,
        layout: Layout::Bordered,
    }
}

static PRESETS: Lazy<Vec<ThemeStyle>> = Lazy::new(|| {
    vec![
        // The guaranteed default.
        banner("standard", "#2F3B52", "#6B7280", "#F0F2F6"),
        // Banner family.
        banner("modern", "#1A73E8", "#5F6368", "#EEF4FE"),
        banner("slate", "#475569", "#94A3B8", "#F1F5F9"),
        banner("graphite", "#374151", "#9CA3AF", "#F3F4F6"),
        banner("midnight", "#111827", "#6B7280", "#EDEFF3"),
        banner("navy", "#1E3A8A", "#64748B", "#EDF1FA"),
        banner("royal", "#4338CA", "#818CF8", "#EEEEFC"),
        banner("sky", "#0284C7", "#38BDF8", "#EBF7FE"),
        banner("teal", "#0F766E", "#5EEAD4", "#ECF9F7"),
        banner("lagoon", "#0E7490", "#67E8F9", "#EBF8FB"),
        banner("forest", "#166534", "#4ADE80", "#EFF8F1"),
        banner("emerald", "#047857", "#6EE7B7", "#ECF9F4"),
        banner("olive", "#4D7C0F", "#A3B18A", "#F4F7EE"),
        banner("lime", "#65A30D", "#BEF264", "#F5FAEA"),
        banner("gold", "#B45309", "#F59E0B", "#FDF5E9"),
        banner("amber", "#D97706", "#FBBF24", "#FEF6E7"),
        banner("sunset", "#C2410C", "#FB923C", "#FEF1E9"),
        banner("terracotta", "#9A3412", "#C2410C", "#FBEFE8"),
        banner("crimson", "#B91C1C", "#F87171", "#FDEEEE"),
        banner("ruby", "#9F1239", "#FB7185", "#FCEDF1"),
        banner("rose", "#BE185D", "#F472B6", "#FDEEF5"),
        banner("plum", "#7E22CE", "#C084FC", "#F7F0FD"),
        banner("violet", "#6D28D9", "#A78BFA", "#F3EFFD"),
        banner("indigo", "#3730A3", "#818CF8", "#EFEFFB"),
        banner("steel", "#334155", "#64748B", "#F0F3F7"),
        banner("copper", "#92400E", "#D97706", "#FBF2E7"),
        ThemeStyle {
            body_font: FontFamily::Mono,
            header_font: FontFamily::Mono,
            ..banner("blueprint", "#1D4ED8", "#60A5FA", "#EDF3FE")
        },
        // Bordered family.
        bordered("classic", "#1F2937", "#6B7280", "#9CA3AF"),
        bordered("heritage", "#3F2D20", "#8B6F47", "#8B6F47"),
        bordered("ledger", "#14342B", "#5B7065", "#5B7065"),
        bordered("parchment", "#5C4A1E", "#A1874F", "#C0A871"),
        bordered("ivory", "#44403C", "#78716C", "#A8A29E"),
        bordered("oxford", "#1E3A5F", "#4A6FA5", "#4A6FA5"),
        bordered("burgundy", "#6B1F2A", "#A04A55", "#A04A55"),
        bordered("evergreen", "#1E4632", "#567D5F", "#567D5F"),
        bordered("charcoal", "#2B2B2B", "#666666", "#555555"),
        bordered("gallant", "#433865", "#7A6FA0", "#7A6FA0"),
        bordered("frost", "#36506C", "#7C97B2", "#9FB4C8"),
        ThemeStyle {
            body_font: FontFamily::Sans,
            ..bordered("minimal", "#111111", "#777777", "#DDDDDD")
        },
        ThemeStyle {
            body_font: FontFamily::Sans,
            header_font: FontFamily::Sans,
            ..bordered("stone", "#57534E", "#A8A29E", "#D6D3D1")
        },
    ]
});

static REGISTRY: Lazy<HashMap<&'static str, &'static ThemeStyle>> = Lazy::new(|| {
    PRESETS.iter().map(|style| (style.id, style)).collect()
});

/// Resolve a theme id to its preset. Total: unknown ids resolve to
/// [`DEFAULT_THEME`].
pub fn resolve(id: &str) -> &'static ThemeStyle {
    REGISTRY
        .get(id)
        .copied()
        .unwrap_or_else(|| REGISTRY[DEFAULT_THEME])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let c = Color::hex("#1A73E8");
        assert!((c.r - 26.0 / 255.0).abs() < 1e-9);
        assert!((c.g - 115.0 / 255.0).abs() < 1e-9);
        assert!((c.b - 232.0 / 255.0).abs() < 1e-9);
        assert_eq!(Color::hex("#fff"), Color::WHITE);
        assert_eq!(Color::hex("garbage"), Color::BLACK);
    }

    #[test]
    fn test_fallback_determinism() {
        let unknown = resolve("nonexistent-id");
        let standard = resolve("standard");
        assert_eq!(unknown.id, standard.id);
        assert_eq!(unknown.primary, standard.primary);
        assert!(std::ptr::eq(unknown, standard));
    }

    #[test]
    fn test_every_id_resolves_to_itself() {
        for preset in PRESETS.iter() {
            assert_eq!(resolve(preset.id).id, preset.id);
        }
    }

    #[test]
    fn test_preset_count() {
        assert_eq!(PRESETS.len(), 40);
    }

    #[test]
    fn test_override_does_not_mutate_registry() {
        let before = resolve("modern").primary;
        let overridden = resolve("modern").with_overrides(Some(Color::hex("#FF0000")), None);
        assert_eq!(overridden.primary, Color::hex("#FF0000"));
        assert_eq!(overridden.header_background, Color::hex("#FF0000"));
        assert_eq!(resolve("modern").primary, before);
    }

    #[test]
    fn test_bordered_override_keeps_header_background() {
        let overridden = resolve("classic").with_overrides(Some(Color::hex("#FF0000")), None);
        assert_eq!(overridden.header_background, Color::WHITE);
    }
}
