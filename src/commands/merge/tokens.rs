use std::collections::BTreeMap;

use crate::model::{ColorToken, DesignTokens, RawStyleScrape, TokenColors, TokenTypography};

pub const DEFAULT_HEADING_FONT: &str = "Georgia, 'Times New Roman', serif";
pub const DEFAULT_BODY_FONT: &str = "ui-sans-serif, system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";
pub const DEFAULT_MONO_FONT: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, 'Liberation Mono', 'Courier New', monospace";

const DEFAULT_PRIMARY: (&str, [(u16, &str); 10]) = (
    "#006699",
    [
        (50, "#E6F0F5"),
        (100, "#CCE1EB"),
        (200, "#99C3D7"),
        (300, "#66A5C3"),
        (400, "#3387AF"),
        (500, "#006699"),
        (600, "#00527A"),
        (700, "#003D5C"),
        (800, "#00293D"),
        (900, "#00141F"),
    ],
);

const DEFAULT_ACCENT: (&str, [(u16, &str); 10]) = (
    "#CC3300",
    [
        (50, "#FEF3EF"),
        (100, "#FDE7DF"),
        (200, "#FBCFBF"),
        (300, "#F9B79F"),
        (400, "#F79F7F"),
        (500, "#CC3300"),
        (600, "#A32900"),
        (700, "#7A1F00"),
        (800, "#521400"),
        (900, "#290A00"),
    ],
);

fn fixed_token((base, scale): (&str, [(u16, &str); 10])) -> ColorToken {
    ColorToken {
        base: base.to_string(),
        scale: scale
            .iter()
            .map(|(step, hex)| (*step, (*hex).to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// The complete token set used when no reference site was scraped.
pub fn default_tokens() -> DesignTokens {
    DesignTokens {
        colors: TokenColors {
            primary: fixed_token(DEFAULT_PRIMARY),
            accent: fixed_token(DEFAULT_ACCENT),
        },
        typography: TokenTypography {
            heading_font: DEFAULT_HEADING_FONT.to_string(),
            body_font: DEFAULT_BODY_FONT.to_string(),
            mono_font: DEFAULT_MONO_FONT.to_string(),
            google_fonts_url: String::new(),
        },
    }
}

/// Scraped values win field by field; anything missing or empty keeps its default.
pub fn merge_tokens(scrape: Option<&RawStyleScrape>) -> DesignTokens {
    let defaults = default_tokens();
    let Some(scrape) = scrape else {
        return defaults;
    };

    let non_empty = |value: &str, fallback: String| {
        let value = value.trim();
        if value.is_empty() {
            fallback
        } else {
            value.to_string()
        }
    };

    DesignTokens {
        colors: TokenColors {
            primary: scrape
                .colors
                .primary
                .clone()
                .filter(|token| !token.base.is_empty())
                .unwrap_or(defaults.colors.primary),
            accent: scrape
                .colors
                .accent
                .clone()
                .filter(|token| !token.base.is_empty())
                .unwrap_or(defaults.colors.accent),
        },
        typography: TokenTypography {
            heading_font: non_empty(
                &scrape.typography.heading_font,
                defaults.typography.heading_font,
            ),
            body_font: non_empty(&scrape.typography.body_font, defaults.typography.body_font),
            mono_font: defaults.typography.mono_font,
            google_fonts_url: scrape
                .typography
                .google_fonts_urls
                .first()
                .cloned()
                .unwrap_or_default(),
        },
    }
}
