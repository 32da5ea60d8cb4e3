//! # Text Measurement
//!
//! Width metrics and word wrapping for the standard Type1 faces the engine
//! draws with. Billhead never embeds fonts: the semantic [`FontFamily`]
//! identifiers in a theme map onto the Helvetica / Times / Courier families,
//! which every PDF viewer ships.
//!
//! Widths are approximate AFM values at 1000 units/em, which is accurate
//! enough for wrapping and right-alignment of tabular figures. Proper glyph
//! shaping is an explicit non-goal.

use crate::theme::FontFamily;

/// A concrete drawable face. The engine only ever needs the regular and
/// bold cut of each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl FontId {
    /// The PDF BaseFont name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            FontId::Helvetica => "Helvetica",
            FontId::HelveticaBold => "Helvetica-Bold",
            FontId::TimesRoman => "Times-Roman",
            FontId::TimesBold => "Times-Bold",
            FontId::Courier => "Courier",
            FontId::CourierBold => "Courier-Bold",
        }
    }

    /// Stable index used for PDF font resource names (`/F0` … `/F5`).
    pub fn index(&self) -> usize {
        match self {
            FontId::Helvetica => 0,
            FontId::HelveticaBold => 1,
            FontId::TimesRoman => 2,
            FontId::TimesBold => 3,
            FontId::Courier => 4,
            FontId::CourierBold => 5,
        }
    }

    pub fn from_family(family: FontFamily, bold: bool) -> FontId {
        match (family, bold) {
            (FontFamily::Sans, false) => FontId::Helvetica,
            (FontFamily::Sans, true) => FontId::HelveticaBold,
            (FontFamily::Serif, false) => FontId::TimesRoman,
            (FontFamily::Serif, true) => FontId::TimesBold,
            (FontFamily::Mono, false) => FontId::Courier,
            (FontFamily::Mono, true) => FontId::CourierBold,
        }
    }
}

/// Advance width of `ch` in 1000-unit em space.
fn char_units(font: FontId, ch: char) -> f64 {
    match font {
        FontId::Courier | FontId::CourierBold => 600.0,
        FontId::Helvetica => helvetica_units(ch, false),
        FontId::HelveticaBold => helvetica_units(ch, true),
        FontId::TimesRoman => times_units(ch, false),
        FontId::TimesBold => times_units(ch, true),
    }
}

fn helvetica_units(ch: char, bold: bool) -> f64 {
    let regular = match ch {
        ' ' => 278.0,
        '.' | ',' | ':' | ';' | '\'' | '|' | 'i' | 'j' | 'l' => 278.0,
        'f' | 't' | 'I' | '!' | '(' | ')' | '[' | ']' | '/' => 278.0,
        'r' => 333.0,
        '-' => 333.0,
        '"' => 355.0,
        '0'..='9' | '$' | '#' => 556.0,
        '%' => 889.0,
        '&' => 667.0,
        '@' => 1015.0,
        'm' => 833.0,
        'w' => 722.0,
        'M' | 'W' => 889.0,
        'J' => 500.0,
        'A'..='Z' => 700.0,
        'a'..='z' => 528.0,
        _ => 556.0,
    };
    // The bold cut runs a little wider across the board.
    if bold {
        regular * 1.08
    } else {
        regular
    }
}

fn times_units(ch: char, bold: bool) -> f64 {
    let regular = match ch {
        ' ' => 250.0,
        '.' | ',' | ':' | ';' | '\'' => 250.0,
        'i' | 'j' | 'l' | 'I' | '!' | '(' | ')' | '[' | ']' | '/' => 278.0,
        'f' | 't' | 'r' => 333.0,
        '-' => 333.0,
        '0'..='9' | '$' | '#' => 500.0,
        '%' => 833.0,
        '&' => 778.0,
        '@' => 921.0,
        'm' => 778.0,
        'w' => 722.0,
        'M' | 'W' => 889.0,
        'A'..='Z' => 677.0,
        'a'..='z' => 460.0,
        _ => 500.0,
    };
    if bold {
        regular * 1.05
    } else {
        regular
    }
}

/// Measure a string in points at the given size.
pub fn measure(font: FontId, size: f64, text: &str) -> f64 {
    text.chars().map(|ch| char_units(font, ch)).sum::<f64>() / 1000.0 * size
}

/// Greedy word wrap into lines no wider than `max_width` points.
///
/// A word longer than the full width is hard-broken rather than overflowing.
/// Explicit newlines in the input are honored. Always returns at least one
/// line (possibly empty) so callers can reserve line height uniformly.
pub fn wrap(font: FontId, size: f64, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() {
                let candidate = format!("{} {}", current, word);
                if measure(font, size, &candidate) <= max_width {
                    current = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
            }

            // The word opens a line. Hard-break it down to width if it is
            // wider than the line on its own.
            let mut rest = word.to_string();
            while measure(font, size, &rest) > max_width {
                let (head, tail) = split_to_width(font, size, &rest, max_width);
                if tail.is_empty() {
                    break;
                }
                lines.push(head);
                rest = tail;
            }
            current = rest;
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Truncate to `max_width`, appending an ellipsis if anything was cut.
pub fn truncate(font: FontId, size: f64, text: &str, max_width: f64) -> String {
    if measure(font, size, text) <= max_width {
        return text.to_string();
    }
    let ellipsis_w = measure(font, size, "…");
    let mut out = String::new();
    let mut used = 0.0;
    for ch in text.chars() {
        let w = char_units(font, ch) / 1000.0 * size;
        if used + w + ellipsis_w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn split_to_width(font: FontId, size: f64, word: &str, max_width: f64) -> (String, String) {
    let mut head = String::new();
    let mut used = 0.0;
    let mut chars = word.chars();
    for ch in chars.by_ref() {
        let w = char_units(font, ch) / 1000.0 * size;
        if !head.is_empty() && used + w > max_width {
            let mut tail = String::from(ch);
            tail.extend(chars);
            return (head, tail);
        }
        used += w;
        head.push(ch);
    }
    (head, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        let w = measure(FontId::Helvetica, 12.0, " ");
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let regular = measure(FontId::Helvetica, 12.0, "Amount Due");
        let bold = measure(FontId::HelveticaBold, 12.0, "Amount Due");
        assert!(bold > regular);
    }

    #[test]
    fn test_courier_fixed_pitch() {
        let a = measure(FontId::Courier, 10.0, "iiii");
        let b = measure(FontId::Courier, 10.0, "MMMM");
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Install drywall on second floor including taping and mudding";
        let lines = wrap(FontId::Helvetica, 10.0, text, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(FontId::Helvetica, 10.0, line) <= 120.0 + 1e-6);
        }
    }

    #[test]
    fn test_wrap_preserves_newlines() {
        let lines = wrap(FontId::Helvetica, 10.0, "400 Main St\nSuite 12", 300.0);
        assert_eq!(lines, vec!["400 Main St".to_string(), "Suite 12".to_string()]);
    }

    #[test]
    fn test_wrap_empty_reserves_a_line() {
        assert_eq!(wrap(FontId::Helvetica, 10.0, "", 100.0).len(), 1);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap(FontId::Helvetica, 10.0, "Wolkenkratzerfensterputzmittel", 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(FontId::Helvetica, 10.0, line) <= 40.0 + 1e-6);
        }
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let out = truncate(FontId::Helvetica, 10.0, "A very long line item description", 60.0);
        assert!(out.ends_with('…'));
        assert!(measure(FontId::Helvetica, 10.0, &out) <= 60.0 + 1e-6);
    }
}
