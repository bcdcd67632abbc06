use serde::Deserialize;
use tracing::info;

use super::browser::PageEvaluator;
use super::gather;
use crate::model::{AssetSummary, ImageAsset};

const IMAGE_MIN_SIDE_PX: u32 = 100;
const IMAGE_LIMIT: usize = 10;

pub const ASSET_SCRIPT: &str = r#"(() => {
  const describe = (img) => ({
    src: img.src,
    alt: img.alt,
    width: img.naturalWidth,
    height: img.naturalHeight,
  });
  const favicon = document.querySelector('link[rel="icon"], link[rel="shortcut icon"]');
  return {
    favicon: favicon ? favicon.href : "",
    logos: Array.from(
      document.querySelectorAll(
        'header img, [class*="logo"] img, img[class*="logo"], img[alt*="logo" i], img[src*="logo" i]',
      ),
      describe,
    ),
    images: Array.from(document.querySelectorAll("img"), describe),
  };
})()"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetSample {
    pub favicon: String,
    pub logos: Vec<ImageAsset>,
    pub images: Vec<ImageAsset>,
}

pub async fn scrape_assets<E>(page: &E) -> AssetSummary
where
    E: PageEvaluator + ?Sized,
{
    let sample: AssetSample = gather(page, "assets", ASSET_SCRIPT).await;
    let summary = summarize_assets(sample);

    info!(
        logos = summary.logos.len(),
        images = summary.images.len(),
        favicon = !summary.favicon.is_empty(),
        "asset scraper finished"
    );
    summary
}

pub fn summarize_assets(sample: AssetSample) -> AssetSummary {
    AssetSummary {
        logos: sample.logos,
        favicon: sample.favicon,
        images: sample
            .images
            .into_iter()
            .filter(|image| image.width > IMAGE_MIN_SIDE_PX && image.height > IMAGE_MIN_SIDE_PX)
            .take(IMAGE_LIMIT)
            .collect(),
    }
}
