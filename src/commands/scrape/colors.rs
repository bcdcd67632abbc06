use tracing::info;

use super::browser::PageEvaluator;
use super::{Tally, gather, ranked};
use crate::model::{ColorCount, ColorSummary};
use crate::palette::{PaletteConfig, parse_css_color};

const RAW_COLOR_LIMIT: usize = 50;
const SUMMARY_COLOR_LIMIT: usize = 20;

pub const COLOR_SCRIPT: &str = r#"(() => {
  const props = [
    "color",
    "backgroundColor",
    "borderColor",
    "borderTopColor",
    "borderBottomColor",
    "borderLeftColor",
    "borderRightColor",
  ];
  const tally = new Map();
  for (const el of document.querySelectorAll("*")) {
    const style = window.getComputedStyle(el);
    for (const prop of props) {
      const value = style[prop];
      if (value) tally.set(value, (tally.get(value) || 0) + 1);
    }
  }
  return Array.from(tally.entries());
})()"#;

pub async fn scrape_colors<E>(page: &E, palette: &PaletteConfig) -> ColorSummary
where
    E: PageEvaluator + ?Sized,
{
    let tally: Tally = gather(page, "colors", COLOR_SCRIPT).await;
    let summary = summarize_colors(tally, palette);

    info!(
        primary = summary.primary.as_ref().map(|token| token.base.as_str()).unwrap_or_default(),
        accent = summary.accent.as_ref().map(|token| token.base.as_str()).unwrap_or_default(),
        distinct = summary.all.len(),
        "color scraper finished"
    );
    summary
}

/// Ranks raw computed colors, folds them into hex, and picks the two leading brand colors.
pub fn summarize_colors(tally: Tally, palette: &PaletteConfig) -> ColorSummary {
    let visible: Tally = tally
        .into_iter()
        .filter(|(raw, _)| raw != "transparent" && raw != "rgba(0, 0, 0, 0)")
        .collect();

    let mut merged = Tally::new();
    for (raw, count) in ranked(visible).into_iter().take(RAW_COLOR_LIMIT) {
        let Some(hex) = parse_css_color(&raw) else {
            continue;
        };
        if palette.is_excluded(&hex) {
            continue;
        }
        match merged.iter_mut().find(|(existing, _)| *existing == hex) {
            Some(entry) => entry.1 += count,
            None => merged.push((hex, count)),
        }
    }
    let merged = ranked(merged);

    let mut brand = merged
        .iter()
        .filter(|(hex, _)| !palette.is_grayish(hex))
        .map(|(hex, _)| hex.as_str());
    let primary = brand
        .next()
        .unwrap_or(palette.fallback_primary.as_str())
        .to_string();
    let accent = brand
        .next()
        .unwrap_or(palette.fallback_accent.as_str())
        .to_string();

    ColorSummary {
        primary: Some(palette.color_token(&primary)),
        accent: Some(palette.color_token(&accent)),
        all: merged
            .into_iter()
            .take(SUMMARY_COLOR_LIMIT)
            .map(|(hex, count)| ColorCount { hex, count })
            .collect(),
    }
}
