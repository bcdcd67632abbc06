use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::ColorToken;

pub const SCALE_STEPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#([0-9a-f]{3,8})$").expect("valid hex regex"));
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba?\((\d+),\s*(\d+),\s*(\d+)").expect("valid rgb regex")
});

/// Heuristic constants for brand-color selection and scale generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    /// A color whose max-min channel spread is below this is gray.
    pub grayish_threshold: u8,
    /// Blend toward white for steps 50, 100, 200, 300, 400.
    pub lighten_factors: [f64; 5],
    /// Blend toward black for steps 600, 700, 800, 900.
    pub darken_factors: [f64; 4],
    pub fallback_primary: String,
    pub fallback_accent: String,
    pub excluded: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            grayish_threshold: 30,
            lighten_factors: [0.9, 0.8, 0.6, 0.4, 0.2],
            darken_factors: [0.2, 0.4, 0.6, 0.8],
            fallback_primary: "#006699".to_string(),
            fallback_accent: "#CC3300".to_string(),
            excluded: vec!["#000000".to_string(), "#FFFFFF".to_string()],
        }
    }
}

impl PaletteConfig {
    pub fn is_grayish(&self, hex: &str) -> bool {
        match hex_to_rgb(hex) {
            Some((r, g, b)) => {
                let max = r.max(g).max(b);
                let min = r.min(g).min(b);
                max - min < self.grayish_threshold
            }
            None => true,
        }
    }

    pub fn is_excluded(&self, hex: &str) -> bool {
        self.excluded
            .iter()
            .any(|value| value.eq_ignore_ascii_case(hex))
    }

    /// Signed blend factor per scale step: positive lightens, negative darkens, 500 is zero.
    fn factors(&self) -> [f64; 10] {
        let [l50, l100, l200, l300, l400] = self.lighten_factors;
        let [d600, d700, d800, d900] = self.darken_factors;
        [l50, l100, l200, l300, l400, 0.0, -d600, -d700, -d800, -d900]
    }

    pub fn color_token(&self, base: &str) -> ColorToken {
        let base = normalize_hex(base).unwrap_or_else(|| base.to_string());
        ColorToken {
            scale: self.scale(&base),
            base,
        }
    }

    /// Ten-step lightness scale by linear interpolation toward white or black.
    pub fn scale(&self, hex: &str) -> BTreeMap<u16, String> {
        let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));

        SCALE_STEPS
            .iter()
            .zip(self.factors())
            .map(|(step, factor)| {
                let shade = if factor >= 0.0 {
                    rgb_to_hex(
                        r + (255.0 - r) * factor,
                        g + (255.0 - g) * factor,
                        b + (255.0 - b) * factor,
                    )
                } else {
                    rgb_to_hex(r * (1.0 + factor), g * (1.0 + factor), b * (1.0 + factor))
                };
                (*step, shade)
            })
            .collect()
    }
}

pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let channel = |value: f64| value.round().clamp(0.0, 255.0) as u8;
    format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
}

pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let normalized = normalize_hex(hex)?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&normalized[range], 16).ok();
    Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

/// Canonical `#RRGGBB` (upper-case); expands `#RGB` and drops any alpha digits.
pub fn normalize_hex(hex: &str) -> Option<String> {
    let captures = HEX_RE.captures(hex.trim())?;
    let digits = captures.get(1)?.as_str();
    let expanded = match digits.len() {
        3 | 4 => digits.chars().take(3).flat_map(|c| [c, c]).collect::<String>(),
        6 | 8 => digits[..6].to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_uppercase()))
}

/// Computed-style color string to hex; `None` for transparent or keyword values.
pub fn parse_css_color(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty()
        || matches!(value, "transparent" | "inherit" | "initial" | "currentcolor")
        || value == "rgba(0, 0, 0, 0)"
    {
        return None;
    }

    if value.starts_with('#') {
        return normalize_hex(value);
    }

    let captures = RGB_RE.captures(value)?;
    let channel = |index: usize| {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };
    Some(rgb_to_hex(channel(1)?, channel(2)?, channel(3)?))
}
