use anyhow::{Result, bail};
use tracing::info;

use crate::cli::MergeArgs;
use crate::model::{Blueprint, BlueprintMeta, RawExtraction, RawStyleScrape};
use crate::util::{now_utc_string, read_json_optional, truncate_chars};

mod artifacts;
mod content;
mod identity;
mod pages;
#[cfg(test)]
mod tests;
mod tokens;

pub use artifacts::BLUEPRINT_FILE;
use artifacts::{ArtifactPaths, read_stylesheet, render_artifacts, write_artifacts};
use content::build_content;
use identity::{merge_contact, merge_identity};
use pages::{build_navigation, map_content_to_pages};
use tokens::merge_tokens;

const DEFAULT_DESIGN_SOURCE: &str = "defaults";
const UNKNOWN_CONTENT_SOURCE: &str = "unknown";

pub fn run(args: MergeArgs) -> Result<()> {
    let paths = ArtifactPaths::from_args(&args);

    let Some(extract) = read_json_optional::<RawExtraction>(&paths.raw_extract)? else {
        bail!(
            "raw extraction not found at {}; run `whitelabel extract` first",
            paths.raw_extract.display()
        );
    };
    let scrape = read_json_optional::<RawStyleScrape>(&paths.scraped_styles)?;
    if scrape.is_none() {
        info!(
            path = %paths.scraped_styles.display(),
            "no scraped styles found, using default design tokens"
        );
    }

    let blueprint = merge(&extract, scrape.as_ref(), now_utc_string());

    info!(
        company = %blueprint.identity.name,
        email = %blueprint.contact.email,
        primary = %blueprint.tokens.colors.primary.base,
        heading_font = %truncate_chars(&blueprint.tokens.typography.heading_font, 40),
        page_count = blueprint.navigation.pages.len(),
        pages = %blueprint.navigation.pages.keys().collect::<Vec<_>>().join(", "),
        "merged blueprint"
    );

    let stylesheet = read_stylesheet(&paths.stylesheet)?;
    let rendered = render_artifacts(&blueprint, &stylesheet)?;
    write_artifacts(&paths, &blueprint, &rendered)?;

    info!("merge complete");
    Ok(())
}

/// Combines one extraction and an optional style scrape into the site blueprint.
pub fn merge(
    extract: &RawExtraction,
    scrape: Option<&RawStyleScrape>,
    merged_at: String,
) -> Blueprint {
    let identity = merge_identity(extract);
    let contact = merge_contact(&extract.contact);
    let tokens = merge_tokens(scrape);
    let navigation = build_navigation(map_content_to_pages(extract));
    let content = build_content(extract, &identity, &contact);

    let content_source = if extract.meta.source.is_empty() {
        UNKNOWN_CONTENT_SOURCE.to_string()
    } else {
        extract.meta.source.clone()
    };
    let design_source = scrape
        .map(|scrape| scrape.meta.source.as_str())
        .filter(|source| !source.is_empty())
        .unwrap_or(DEFAULT_DESIGN_SOURCE)
        .to_string();

    Blueprint {
        meta: BlueprintMeta {
            merged_at,
            content_source,
            design_source,
        },
        identity,
        contact,
        navigation,
        tokens,
        content,
    }
}
