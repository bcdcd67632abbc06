use std::fs;
use std::path::Path;

use super::artifacts::{ThemeBlock, patch_stylesheet, render_brand_config, render_persona};
use super::identity::parse_address;
use super::pages::slugify;
use super::tokens::default_tokens;
use super::*;
use crate::cli::MergeArgs;
use crate::model::{
    ContactRaw, Identity, ScrapeMeta, Section, ServiceRaw, TeamMemberRaw, TypographySummary,
};
use crate::palette::PaletteConfig;

const MERGED_AT: &str = "2026-01-01T00:00:00.000Z";

const STYLESHEET: &str = r#"@import "tailwindcss";

@theme {
  /* ===== Typography ===== */
  --font-heading: serif;
  --font-sans: sans-serif;
  --radius-card: 0.75rem;
  --color-primary-500: #111111;
}

.btn {
  color: var(--color-primary-500);
}
"#;

fn acme_extract() -> RawExtraction {
    RawExtraction {
        identity: Identity {
            name: "Acme Labs".to_string(),
            ..Identity::default()
        },
        services: vec![ServiceRaw {
            name: "Consulting".to_string(),
            description: "Strategy and delivery advice.".to_string(),
        }],
        contact: ContactRaw {
            email: Some("a@acme.com".to_string()),
            ..ContactRaw::default()
        },
        ..RawExtraction::default()
    }
}

fn section(heading: &str, content: &str) -> Section {
    Section {
        heading: heading.to_string(),
        level: 1,
        content: content.to_string(),
    }
}

fn long_text(seed: &str) -> String {
    format!("{seed} ").repeat(30)
}

fn page_keys(blueprint: &Blueprint) -> Vec<&str> {
    blueprint.navigation.pages.keys().collect()
}

#[test]
fn merge_without_scrape_uses_default_tokens() {
    let blueprint = merge(&acme_extract(), None, MERGED_AT.to_string());

    assert_eq!(blueprint.tokens, default_tokens());
    assert_eq!(blueprint.meta.design_source, "defaults");
    assert_eq!(blueprint.meta.content_source, "unknown");
    assert_eq!(blueprint.meta.merged_at, MERGED_AT);
}

#[test]
fn default_tokens_are_complete() {
    let tokens = default_tokens();

    assert_eq!(tokens.colors.primary.base, "#006699");
    assert_eq!(tokens.colors.accent.base, "#CC3300");
    assert_eq!(tokens.colors.primary.scale.len(), 10);
    assert_eq!(
        tokens.colors.accent.scale.get(&900).map(String::as_str),
        Some("#290A00")
    );
    assert!(tokens.typography.heading_font.starts_with("Georgia"));
    assert!(tokens.typography.mono_font.starts_with("ui-monospace"));
    assert!(tokens.typography.google_fonts_url.is_empty());
}

#[test]
fn scraped_tokens_fall_back_per_field() {
    let palette = PaletteConfig::default();
    let mut scrape = RawStyleScrape {
        meta: ScrapeMeta {
            source: "https://reference.example".to_string(),
            ..ScrapeMeta::default()
        },
        typography: TypographySummary {
            body_font: "Inter, sans-serif".to_string(),
            heading_font: "  ".to_string(),
            google_fonts_urls: vec!["https://fonts.googleapis.com/css2?family=Inter".to_string()],
            ..TypographySummary::default()
        },
        ..RawStyleScrape::default()
    };
    scrape.colors.primary = Some(palette.color_token("#128C7E"));

    let blueprint = merge(&acme_extract(), Some(&scrape), MERGED_AT.to_string());
    let defaults = default_tokens();

    assert_eq!(blueprint.tokens.colors.primary.base, "#128C7E");
    assert_eq!(blueprint.tokens.colors.accent, defaults.colors.accent);
    assert_eq!(blueprint.tokens.typography.body_font, "Inter, sans-serif");
    assert_eq!(
        blueprint.tokens.typography.heading_font,
        defaults.typography.heading_font
    );
    assert_eq!(
        blueprint.tokens.typography.mono_font,
        defaults.typography.mono_font
    );
    assert_eq!(
        blueprint.tokens.typography.google_fonts_url,
        "https://fonts.googleapis.com/css2?family=Inter"
    );
    assert_eq!(blueprint.meta.design_source, "https://reference.example");
}

#[test]
fn home_page_is_always_present() {
    let blueprint = merge(&RawExtraction::default(), None, MERGED_AT.to_string());

    assert_eq!(page_keys(&blueprint), vec!["home"]);
    let home = blueprint.navigation.pages.get("home").expect("home page");
    assert_eq!(home.url, "/");
    assert_eq!(home.title, "Home");
}

#[test]
fn slugify_collapses_punctuation_runs() {
    assert_eq!(slugify("Our Process & Approach!"), "our-process-approach");
    assert_eq!(slugify("  2024 -- Results  "), "2024-results");
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn acme_scenario_produces_expected_pages_and_config() {
    let blueprint = merge(&acme_extract(), None, MERGED_AT.to_string());

    assert_eq!(page_keys(&blueprint), vec!["home", "services", "contact"]);
    assert_eq!(blueprint.tokens, default_tokens());

    let config = render_brand_config(&blueprint);
    assert!(config.contains(r#"name: "Acme Labs""#));
    assert!(config.contains(r#"email: "a@acme.com""#));
    assert!(config.contains(r##"primary: "#006699""##));
    assert!(config.contains("address: {}"));
    assert!(config.starts_with("// White-label brand configuration"));
}

#[test]
fn about_page_follows_keyword_sections_or_description() {
    let mut extract = RawExtraction::default();
    extract.identity.description = "We build things.".to_string();
    let blueprint = merge(&extract, None, MERGED_AT.to_string());
    assert_eq!(page_keys(&blueprint), vec!["home", "about"]);

    let extract = RawExtraction {
        sections: vec![section("Our mission", "Short.")],
        ..RawExtraction::default()
    };
    let blueprint = merge(&extract, None, MERGED_AT.to_string());
    assert_eq!(page_keys(&blueprint), vec!["home", "about"]);
    assert_eq!(blueprint.content.about.content, "Short.");
}

#[test]
fn custom_pages_come_from_long_non_standard_sections() {
    let extract = RawExtraction {
        sections: vec![
            section("Our Process & Approach!", &long_text("process")),
            section("Our process approach", &long_text("duplicate")),
            section("Leadership staff", &long_text("standard")),
            section("Case Studies", "too short"),
            section("???", &long_text("unnamed")),
            section("Case Studies", &long_text("cases")),
        ],
        team: vec![TeamMemberRaw {
            name: "Jane Smith".to_string(),
            title: "CEO".to_string(),
            bio: String::new(),
        }],
        ..RawExtraction::default()
    };

    let blueprint = merge(&extract, None, MERGED_AT.to_string());

    assert_eq!(
        page_keys(&blueprint),
        vec!["home", "team", "our-process-approach", "case-studies"]
    );
    let custom = blueprint
        .navigation
        .pages
        .get("our-process-approach")
        .expect("custom page");
    assert_eq!(custom.title, "Our Process & Approach!");
    assert_eq!(custom.url, "/our-process-approach/");

    let custom_titles: Vec<&str> = blueprint
        .content
        .custom_sections
        .iter()
        .map(|section| section.title.as_str())
        .collect();
    assert_eq!(
        custom_titles,
        vec!["Our Process & Approach!", "Our process approach", "???", "Case Studies"]
    );
    assert_eq!(blueprint.content.team[0].image, "");
}

#[test]
fn footer_groups_bucket_pages_and_drop_empty_groups() {
    let extract = RawExtraction {
        sections: vec![section("History", &long_text("history"))],
        team: vec![TeamMemberRaw {
            name: "Jane Smith".to_string(),
            ..TeamMemberRaw::default()
        }],
        ..RawExtraction::default()
    };

    let blueprint = merge(&extract, None, MERGED_AT.to_string());
    let groups: Vec<(&str, Vec<&str>)> = blueprint
        .navigation
        .footer_groups
        .iter()
        .map(|group| {
            (
                group.heading.as_str(),
                group.items.iter().map(|item| item.url.as_str()).collect(),
            )
        })
        .collect();

    assert_eq!(
        groups,
        vec![
            ("Company", vec!["/", "/about/"]),
            ("Services", vec!["/team/", "/history/"]),
        ]
    );
    assert_eq!(blueprint.navigation.main, blueprint.navigation.all);
    assert_eq!(blueprint.navigation.all.len(), 4);
}

#[test]
fn content_document_carries_hero_and_fixed_blocks() {
    let mut extract = acme_extract();
    extract.identity.name = "  Acme Labs \n".to_string();
    extract.identity.description = " Independent research lab.  ".to_string();

    let blueprint = merge(&extract, None, MERGED_AT.to_string());
    let content = blueprint.content;

    assert_eq!(content.company.name, blueprint.identity.name);

    assert_eq!(content.hero.headline, "Acme Labs");
    assert_eq!(content.hero.subheadline, "Independent research lab.");
    assert_eq!(content.hero.cta_primary.url, "/contact/");
    assert_eq!(content.hero.cta_secondary.text, "Learn More");
    assert_eq!(content.about.content, "Independent research lab.");
    assert_eq!(content.services[0].name, "Consulting");
    assert_eq!(content.contact.email, "a@acme.com");
    assert!(content.testimonials.is_empty());

    let json = serde_json::to_value(&content).expect("serialize content");
    assert!(json.get("custom_sections").is_some());
    assert!(json["hero"].get("cta_primary").is_some());
}

#[test]
fn address_parsing_splits_city_state_and_zip() {
    let address = parse_address("1200 Market Street, Suite 400, Springfield IL 62701")
        .expect("address");
    assert_eq!(address.street, "1200 Market Street, Suite 400");
    assert_eq!(address.city, "Springfield");
    assert_eq!(address.state, "IL");
    assert_eq!(address.zip, "62701");
    assert_eq!(address.country, "US");

    let address = parse_address("100 Main St, Austin, TX 78701-1234").expect("address");
    assert_eq!(address.street, "100 Main St");
    assert_eq!(address.city, "Austin");
    assert_eq!(address.zip, "78701-1234");

    let address = parse_address("9 Harbor Way, Portland").expect("address");
    assert_eq!(address.street, "9 Harbor Way");
    assert_eq!(address.city, "Portland");
    assert!(address.state.is_empty());

    let address = parse_address("9 Harbor Way").expect("address");
    assert_eq!(address.street, "9 Harbor Way");
    assert!(address.city.is_empty());

    assert_eq!(parse_address(" , "), None);
}

#[test]
fn theme_block_upserts_tokens_and_keeps_other_declarations() {
    let patched = patch_stylesheet(STYLESHEET, &default_tokens()).expect("patch");

    assert!(patched.starts_with("@import \"tailwindcss\";\n\n@theme {\n"));
    assert!(patched.ends_with(".btn {\n  color: var(--color-primary-500);\n}\n"));

    let (_, theme) = ThemeBlock::locate(&patched).expect("theme block");
    assert_eq!(theme.get("--font-heading"), Some("Georgia, 'Times New Roman', serif"));
    assert_eq!(theme.get("--radius-card"), Some("0.75rem"));
    assert_eq!(theme.get("--color-primary-500"), Some("#006699"));
    assert_eq!(theme.get("--color-accent-50"), Some("#FEF3EF"));
    assert_eq!(theme.get("--text-body"), Some("1.0625rem"));
    assert_eq!(theme.get("--text-body--line-height"), Some("1.7"));

    let again = patch_stylesheet(&patched, &default_tokens()).expect("patch twice");
    assert_eq!(again, patched);
}

#[test]
fn theme_block_keeps_nested_rules_and_quoted_values_intact() {
    let css = r#"@theme {
  /* closing } inside a comment */
  --animate-spin: spin 1s linear infinite;
  --background-image-noise: url("data:image/svg+xml;base64,PHN2Zz4=");
  @keyframes spin {
    to {
      transform: rotate(360deg);
    }
  }
  --color-primary-500: #111111;
}

.btn {
  color: var(--color-primary-500);
}
"#;

    let patched = patch_stylesheet(css, &default_tokens()).expect("patch");

    assert!(!patched.contains("#111111"));
    assert!(patched.contains(
        "  @keyframes spin {\n    to {\n      transform: rotate(360deg);\n    }\n  }\n"
    ));
    assert!(patched.ends_with("}\n\n.btn {\n  color: var(--color-primary-500);\n}\n"));

    let (span, theme) = ThemeBlock::locate(&patched).expect("theme block");
    assert_eq!(span.start, 0);
    assert_eq!(&patched[span.end..], "\n\n.btn {\n  color: var(--color-primary-500);\n}\n");
    assert_eq!(theme.get("--color-primary-500"), Some("#006699"));
    assert_eq!(theme.get("--animate-spin"), Some("spin 1s linear infinite"));
    assert_eq!(
        theme.get("--background-image-noise"),
        Some(r#"url("data:image/svg+xml;base64,PHN2Zz4=")"#)
    );
    assert_eq!(theme.get("transform"), None);

    let again = patch_stylesheet(&patched, &default_tokens()).expect("patch twice");
    assert_eq!(again, patched);
}

#[test]
fn unclosed_nested_rule_in_theme_block_is_rejected() {
    let error = patch_stylesheet("@theme {\n  @keyframes spin {\n    to {\n}\n", &default_tokens())
        .expect_err("unbalanced braces must fail");
    assert!(error.to_string().contains("not closed"));
}

#[test]
fn stylesheet_without_theme_block_is_rejected() {
    let error = patch_stylesheet("body { margin: 0; }", &default_tokens())
        .expect_err("missing block must fail");
    assert!(error.to_string().contains("@theme"));
}

#[test]
fn persona_uses_defaults_for_missing_industry_and_services() {
    let blueprint = merge(&RawExtraction::default(), None, MERGED_AT.to_string());
    let persona = render_persona(&blueprint);
    assert!(persona.contains("this industry"));
    assert!(persona.contains("the services described on this site"));

    let mut extract = acme_extract();
    extract.identity.industry = "laboratory services".to_string();
    let persona = render_persona(&merge(&extract, None, MERGED_AT.to_string()));
    assert!(persona.contains("Acme Labs"));
    assert!(persona.contains("laboratory services"));
    assert!(persona.contains("providers for Consulting."));
}

fn write_site(root: &Path, stylesheet: &str) {
    fs::create_dir_all(root.join("data")).expect("data dir");
    fs::create_dir_all(root.join("src/css")).expect("css dir");
    fs::write(root.join("src/css/input.css"), stylesheet).expect("stylesheet");
    fs::write(
        root.join("data/raw-extract.json"),
        serde_json::to_vec(&acme_extract()).expect("serialize extract"),
    )
    .expect("raw extract");
}

fn merge_args(root: &Path) -> MergeArgs {
    MergeArgs {
        site_root: root.to_path_buf(),
        data_dir: "data".into(),
        css_path: "src/css/input.css".into(),
    }
}

#[test]
fn run_writes_every_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_site(dir.path(), STYLESHEET);

    run(merge_args(dir.path())).expect("merge succeeds");

    let blueprint: serde_json::Value = serde_json::from_slice(
        &fs::read(dir.path().join("data/merged-blueprint.json")).expect("blueprint"),
    )
    .expect("blueprint json");
    assert_eq!(blueprint["identity"]["name"], "Acme Labs");
    assert_eq!(blueprint["meta"]["designSource"], "defaults");
    assert_eq!(blueprint["navigation"]["pages"]["services"]["url"], "/services/");

    let config = fs::read_to_string(dir.path().join("whitelabel.config.js")).expect("config");
    assert!(config.contains(r#"name: "Acme Labs""#));
    assert!(dir.path().join("src/_data/pageContent.json").is_file());
    assert!(dir.path().join("personas/target-audience.md").is_file());

    let css = fs::read_to_string(dir.path().join("src/css/input.css")).expect("css");
    assert!(css.contains("--color-primary-500: #006699;"));
}

#[test]
fn run_fails_without_raw_extraction() {
    let dir = tempfile::tempdir().expect("tempdir");

    let error = run(merge_args(dir.path())).expect_err("missing extraction is fatal");

    assert!(error.to_string().contains("raw extraction not found"));
    assert!(!dir.path().join("data/merged-blueprint.json").exists());
}

#[test]
fn run_writes_nothing_when_theme_block_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_site(dir.path(), "body { margin: 0; }\n");

    assert!(run(merge_args(dir.path())).is_err());
    assert!(!dir.path().join("data/merged-blueprint.json").exists());
    assert!(!dir.path().join("whitelabel.config.js").exists());
}
