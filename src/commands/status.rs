use std::path::Path;

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::extract::RAW_EXTRACT_FILE;
use crate::commands::merge::BLUEPRINT_FILE;
use crate::commands::scrape::SCRAPED_STYLES_FILE;
use crate::util::{read_json_optional, resolve_under};

fn array_len(value: &Value, pointer: &str) -> usize {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn text<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn load(path: &Path, label: &str, next_step: &str) -> Result<Option<Value>> {
    let loaded = read_json_optional::<Value>(path)?;
    if loaded.is_none() {
        warn!(path = %path.display(), next_step, "{label} missing");
    }
    Ok(loaded)
}

pub fn run(args: StatusArgs) -> Result<()> {
    let data_dir = resolve_under(&args.site_root, &args.data_dir);
    info!(data_dir = %data_dir.display(), "status requested");

    let extract_path = data_dir.join(RAW_EXTRACT_FILE);
    if let Some(extract) = load(&extract_path, "raw extraction", "whitelabel extract --pdf <PATH>")? {
        info!(
            path = %extract_path.display(),
            source = %text(&extract, "/meta/source"),
            extracted_at = %text(&extract, "/meta/extractedAt"),
            company = %text(&extract, "/identity/name"),
            sections = array_len(&extract, "/sections"),
            tables = array_len(&extract, "/tables"),
            services = array_len(&extract, "/services"),
            team = array_len(&extract, "/team"),
            "raw extraction present"
        );
    }

    let scrape_path = data_dir.join(SCRAPED_STYLES_FILE);
    if let Some(scrape) = load(&scrape_path, "scraped styles", "whitelabel scrape --url <URL>")? {
        info!(
            path = %scrape_path.display(),
            source = %text(&scrape, "/meta/source"),
            scraped_at = %text(&scrape, "/meta/scrapedAt"),
            primary = %text(&scrape, "/colors/primary/base"),
            accent = %text(&scrape, "/colors/accent/base"),
            body_font = %text(&scrape, "/typography/bodyFont"),
            "scraped styles present"
        );
    }

    let blueprint_path = data_dir.join(BLUEPRINT_FILE);
    if let Some(blueprint) = load(&blueprint_path, "blueprint", "whitelabel merge")? {
        let pages = blueprint
            .pointer("/navigation/pages")
            .and_then(Value::as_object)
            .map(|pages| pages.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        info!(
            path = %blueprint_path.display(),
            merged_at = %text(&blueprint, "/meta/mergedAt"),
            design_source = %text(&blueprint, "/meta/designSource"),
            pages = %pages,
            "blueprint present"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pointer_helpers_tolerate_missing_fields() {
        let value = json!({ "sections": [1, 2, 3], "meta": { "source": "deck.pdf" } });

        assert_eq!(array_len(&value, "/sections"), 3);
        assert_eq!(array_len(&value, "/team"), 0);
        assert_eq!(text(&value, "/meta/source"), "deck.pdf");
        assert_eq!(text(&value, "/meta/extractedAt"), "");
    }

    #[test]
    fn status_succeeds_on_empty_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = StatusArgs {
            site_root: dir.path().to_path_buf(),
            data_dir: "data".into(),
        };

        run(args).expect("status never fails on missing outputs");
    }
}
