use serde::Deserialize;
use tracing::info;

use super::browser::PageEvaluator;
use super::{Tally, gather, ranked, ranked_values};
use crate::model::TypographySummary;
use crate::util::truncate_chars;

const SIZE_LIMIT: usize = 10;
const LINE_HEIGHT_LIMIT: usize = 5;

pub const TYPOGRAPHY_SCRIPT: &str = r#"(() => {
  const bump = (map, value) => {
    if (value) map.set(value, (map.get(value) || 0) + 1);
  };
  const families = new Map();
  const headingFamilies = new Map();
  const sizes = new Map();
  const weights = new Map();
  const lineHeights = new Map();
  for (const el of document.querySelectorAll("*")) {
    const style = window.getComputedStyle(el);
    bump(families, style.fontFamily);
    bump(sizes, style.fontSize);
    bump(weights, style.fontWeight);
    bump(lineHeights, style.lineHeight);
  }
  for (const el of document.querySelectorAll("h1, h2, h3, h4, h5, h6")) {
    bump(headingFamilies, window.getComputedStyle(el).fontFamily);
  }
  return {
    families: Array.from(families.entries()),
    headingFamilies: Array.from(headingFamilies.entries()),
    sizes: Array.from(sizes.entries()),
    weights: Array.from(weights.entries()),
    lineHeights: Array.from(lineHeights.entries()),
    googleFontsUrls: Array.from(
      document.querySelectorAll('link[href*="fonts.googleapis.com"]'),
      (link) => link.href,
    ),
  };
})()"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyTally {
    pub families: Tally,
    pub heading_families: Tally,
    pub sizes: Tally,
    pub weights: Tally,
    pub line_heights: Tally,
    pub google_fonts_urls: Vec<String>,
}

pub async fn scrape_typography<E>(page: &E) -> TypographySummary
where
    E: PageEvaluator + ?Sized,
{
    let tally: TypographyTally = gather(page, "typography", TYPOGRAPHY_SCRIPT).await;
    let summary = summarize_typography(tally);

    info!(
        body_font = %truncate_chars(&summary.body_font, 60),
        heading_font = %truncate_chars(&summary.heading_font, 60),
        "typography scraper finished"
    );
    summary
}

pub fn summarize_typography(tally: TypographyTally) -> TypographySummary {
    let most_frequent = |entries: Tally| {
        ranked(entries)
            .into_iter()
            .next()
            .map(|(value, _)| value)
            .unwrap_or_default()
    };
    let line_heights: Tally = tally
        .line_heights
        .into_iter()
        .filter(|(value, _)| value != "normal")
        .collect();

    TypographySummary {
        body_font: most_frequent(tally.families),
        heading_font: most_frequent(tally.heading_families),
        sizes: ranked_values(tally.sizes, Some(SIZE_LIMIT)),
        weights: ranked_values(tally.weights, None),
        line_heights: ranked_values(line_heights, Some(LINE_HEIGHT_LIMIT)),
        google_fonts_urls: tally.google_fonts_urls,
    }
}
