use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::cli::ScrapeArgs;
use crate::model::{RankedValue, RawStyleScrape, ScrapeMeta};
use crate::palette::PaletteConfig;
use crate::util::{now_utc_string, write_json_pretty};

mod assets;
mod browser;
mod colors;
mod components;
mod layout;
mod typography;

use assets::scrape_assets;
use browser::{BrowserSession, LaunchSettings, PageEvaluator, evaluate_as};
use colors::scrape_colors;
use components::scrape_components;
use layout::scrape_layout;
use typography::scrape_typography;

pub const SCRAPED_STYLES_FILE: &str = "scraped-styles.json";

/// `[value, count]` pairs in first-seen order, as tallied in the page.
pub(crate) type Tally = Vec<(String, u64)>;

pub fn run(args: ScrapeArgs) -> Result<()> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.data_dir.join(SCRAPED_STYLES_FILE));
    let palette = PaletteConfig {
        grayish_threshold: args.grayish_threshold,
        ..PaletteConfig::default()
    };

    info!(url = %args.url, "scraping reference styles");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let scrape = runtime.block_on(scrape_url(&args, &palette))?;

    write_json_pretty(&output_path, &scrape)?;
    info!(path = %output_path.display(), "wrote scraped styles");

    Ok(())
}

async fn scrape_url(args: &ScrapeArgs, palette: &PaletteConfig) -> Result<RawStyleScrape> {
    let timeout = Duration::from_secs(args.timeout_secs);
    let settings = LaunchSettings {
        chrome_path: args.chrome_path.clone(),
        viewport_width: args.viewport_width,
        viewport_height: args.viewport_height,
        timeout,
    };

    let session = BrowserSession::launch(&settings).await?;
    let scraped = async {
        let page = session.open(&args.url, timeout).await?;
        let meta = ScrapeMeta {
            source: args.url.clone(),
            scraped_at: now_utc_string(),
            viewport: format!("{}x{}", args.viewport_width, args.viewport_height),
        };
        Ok::<_, anyhow::Error>(scrape_page(&page, meta, palette).await)
    }
    .await;
    let closed = session.close().await;

    let scrape = scraped?;
    closed?;
    Ok(scrape)
}

/// Runs all five scrapers concurrently against one loaded page.
pub async fn scrape_page<E>(page: &E, meta: ScrapeMeta, palette: &PaletteConfig) -> RawStyleScrape
where
    E: PageEvaluator + ?Sized,
{
    let (colors, typography, layout, components, assets) = tokio::join!(
        scrape_colors(page, palette),
        scrape_typography(page),
        scrape_layout(page),
        scrape_components(page),
        scrape_assets(page),
    );

    RawStyleScrape {
        meta,
        colors,
        typography,
        layout,
        components,
        assets,
    }
}

/// Evaluates a tally script; a failed evaluation degrades to the empty sample.
async fn gather<T, E>(page: &E, scraper: &'static str, script: &str) -> T
where
    T: DeserializeOwned + Default,
    E: PageEvaluator + ?Sized,
{
    match evaluate_as(page, script).await {
        Ok(sample) => sample,
        Err(err) => {
            warn!(scraper, error = %format!("{err:#}"), "page evaluation failed, using empty sample");
            T::default()
        }
    }
}

/// Stable sort by descending count; ties keep first-seen order.
pub(crate) fn ranked<T>(mut entries: Vec<(T, u64)>) -> Vec<(T, u64)> {
    entries.sort_by(|left, right| right.1.cmp(&left.1));
    entries
}

pub(crate) fn ranked_values(entries: Tally, limit: Option<usize>) -> Vec<RankedValue> {
    ranked(entries)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(value, count)| RankedValue { value, count })
        .collect()
}

/// Leading integer of a CSS length such as `1200px` or `8px 16px`.
pub(crate) fn leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|(index, character)| {
            !(character.is_ascii_digit() || (*index == 0 && matches!(character, '-' | '+')))
        })
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}
