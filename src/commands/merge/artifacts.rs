use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde_json::Value;
use tracing::info;

use crate::cli::MergeArgs;
use crate::commands::extract::RAW_EXTRACT_FILE;
use crate::commands::scrape::SCRAPED_STYLES_FILE;
use crate::model::{Blueprint, ColorToken, Contact, DesignTokens};
use crate::palette::SCALE_STEPS;
use crate::util::{resolve_under, write_json_pretty, write_text};

pub const BLUEPRINT_FILE: &str = "merged-blueprint.json";
const BRAND_CONFIG_FILE: &str = "whitelabel.config.js";
const PAGE_CONTENT_FILE: &str = "src/_data/pageContent.json";
const PERSONA_FILE: &str = "personas/target-audience.md";

const BODY_TEXT_SIZE: &str = "1.0625rem";
const BODY_LINE_HEIGHT: &str = "1.7";

static THEME_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@theme\s*\{").expect("valid theme block regex"));

/// Where merge reads its inputs and writes every derived file.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub raw_extract: PathBuf,
    pub scraped_styles: PathBuf,
    pub blueprint: PathBuf,
    pub brand_config: PathBuf,
    pub page_content: PathBuf,
    pub stylesheet: PathBuf,
    pub persona: PathBuf,
}

impl ArtifactPaths {
    pub fn resolve(site_root: &Path, data_dir: &Path, css_path: &Path) -> Self {
        let data_dir = resolve_under(site_root, data_dir);
        Self {
            raw_extract: data_dir.join(RAW_EXTRACT_FILE),
            scraped_styles: data_dir.join(SCRAPED_STYLES_FILE),
            blueprint: data_dir.join(BLUEPRINT_FILE),
            brand_config: site_root.join(BRAND_CONFIG_FILE),
            page_content: site_root.join(PAGE_CONTENT_FILE),
            stylesheet: resolve_under(site_root, css_path),
            persona: site_root.join(PERSONA_FILE),
        }
    }

    pub fn from_args(args: &MergeArgs) -> Self {
        Self::resolve(&args.site_root, &args.data_dir, &args.css_path)
    }
}

/// Derived text files, fully rendered before anything touches the disk.
#[derive(Debug, Clone)]
pub struct RenderedArtifacts {
    pub brand_config: String,
    pub stylesheet: String,
    pub persona: String,
}

pub fn render_artifacts(blueprint: &Blueprint, stylesheet: &str) -> Result<RenderedArtifacts> {
    Ok(RenderedArtifacts {
        brand_config: render_brand_config(blueprint),
        stylesheet: patch_stylesheet(stylesheet, &blueprint.tokens)?,
        persona: render_persona(blueprint),
    })
}

pub fn write_artifacts(
    paths: &ArtifactPaths,
    blueprint: &Blueprint,
    rendered: &RenderedArtifacts,
) -> Result<()> {
    write_json_pretty(&paths.blueprint, blueprint)?;
    info!(path = %paths.blueprint.display(), "wrote blueprint");

    write_text(&paths.brand_config, &rendered.brand_config)?;
    info!(path = %paths.brand_config.display(), "wrote brand config");

    write_json_pretty(&paths.page_content, &blueprint.content)?;
    info!(path = %paths.page_content.display(), "wrote page content");

    write_text(&paths.stylesheet, &rendered.stylesheet)?;
    info!(path = %paths.stylesheet.display(), "updated theme block");

    write_text(&paths.persona, &rendered.persona)?;
    info!(path = %paths.persona.display(), "wrote audience persona");

    Ok(())
}

pub fn read_stylesheet(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read stylesheet with @theme block: {}", path.display()))
}

fn js_string(value: &str) -> String {
    Value::from(value).to_string()
}

fn render_address(contact: &Contact) -> String {
    let Some(address) = &contact.address else {
        return "{}".to_string();
    };
    format!(
        "{{\n      street: {},\n      city: {},\n      state: {},\n      zip: {},\n      country: {},\n    }}",
        js_string(&address.street),
        js_string(&address.city),
        js_string(&address.state),
        js_string(&address.zip),
        js_string(&address.country),
    )
}

/// `whitelabel.config.js`: a CommonJS module mirroring identity, contact and tokens.
pub fn render_brand_config(blueprint: &Blueprint) -> String {
    let identity = &blueprint.identity;
    let contact = &blueprint.contact;
    let tokens = &blueprint.tokens;

    format!(
        r#"// White-label brand configuration, regenerated by `whitelabel merge`.
// Edits here are overwritten by the next merge; change the source data instead.

module.exports = {{
  company: {{
    name: {name},
    tagline: {tagline},
    description: {description},
    industry: {industry},
    founded: {founded},
  }},
  author: {{
    name: "",
    email: {email},
    jobTitle: "",
  }},
  contact: {{
    email: {email},
    phone: {phone},
    fax: {fax},
    url: {url},
    address: {address},
  }},
  colors: {{
    primary: {primary},
    accent: {accent},
  }},
  fonts: {{
    heading: {heading},
    body: {body},
    mono: {mono},
    googleFontsUrl: {google_fonts_url},
  }},
  siteUrl: "",
  pathPrefix: "/",
}};
"#,
        name = js_string(&identity.name),
        tagline = js_string(&identity.tagline),
        description = js_string(&identity.description),
        industry = js_string(&identity.industry),
        founded = js_string(&identity.founded),
        email = js_string(&contact.email),
        phone = js_string(&contact.phone),
        fax = js_string(&contact.fax),
        url = js_string(&contact.url),
        address = render_address(contact),
        primary = js_string(&tokens.colors.primary.base),
        accent = js_string(&tokens.colors.accent.base),
        heading = js_string(&tokens.typography.heading_font),
        body = js_string(&tokens.typography.body_font),
        mono = js_string(&tokens.typography.mono_font),
        google_fonts_url = js_string(&tokens.typography.google_fonts_url),
    )
}

/// One statement inside `@theme`: a custom property, or a nested rule kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ThemeEntry {
    Declaration { name: String, value: String },
    Nested(String),
}

/// Byte offset just past the comment or quoted string starting at `at`, if one starts there.
fn skip_opaque(bytes: &[u8], at: usize) -> Option<usize> {
    match bytes[at] {
        b'/' if bytes.get(at + 1) == Some(&b'*') => Some(
            bytes[at + 2..]
                .windows(2)
                .position(|pair| pair == b"*/")
                .map_or(bytes.len(), |offset| at + 2 + offset + 2),
        ),
        quote @ (b'"' | b'\'') => {
            let mut index = at + 1;
            while index < bytes.len() {
                match bytes[index] {
                    b'\\' => index += 2,
                    byte if byte == quote => return Some(index + 1),
                    _ => index += 1,
                }
            }
            Some(bytes.len())
        }
        _ => None,
    }
}

/// Offset of the `}` closing a block whose body starts at `start`.
fn matching_close(css: &str, start: usize) -> Option<usize> {
    let bytes = css.as_bytes();
    let mut depth = 0usize;
    let mut index = start;
    while index < bytes.len() {
        if let Some(next) = skip_opaque(bytes, index) {
            index = next;
            continue;
        }
        match bytes[index] {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(index),
            b'}' => depth -= 1,
            _ => {}
        }
        index += 1;
    }
    None
}

fn push_declaration(entries: &mut Vec<ThemeEntry>, statement: &str) {
    let Some((name, value)) = statement.split_once(':') else {
        return;
    };
    let name = name.trim();
    if name.is_empty() {
        return;
    }
    entries.push(ThemeEntry::Declaration {
        name: name.to_string(),
        value: value.trim().to_string(),
    });
}

/// Splits a block body into statements; comments between declarations are dropped.
fn parse_entries(body: &str) -> Result<Vec<ThemeEntry>> {
    let bytes = body.as_bytes();
    let mut entries = Vec::new();
    let mut statement = String::new();
    let mut statement_start: Option<usize> = None;
    let mut copied_to = 0;
    let mut index = 0;

    while index < bytes.len() {
        if let Some(next) = skip_opaque(bytes, index) {
            if bytes[index] == b'/' {
                statement.push_str(&body[copied_to..index]);
                copied_to = next;
            } else {
                statement_start.get_or_insert(index);
            }
            index = next;
            continue;
        }
        match bytes[index] {
            b';' => {
                statement.push_str(&body[copied_to..index]);
                push_declaration(&mut entries, &statement);
                statement.clear();
                statement_start = None;
                copied_to = index + 1;
            }
            b'{' => {
                let Some(close) = matching_close(body, index + 1) else {
                    bail!("nested rule inside @theme block is not closed");
                };
                let start = statement_start.unwrap_or(index);
                entries.push(ThemeEntry::Nested(body[start..=close].to_string()));
                statement.clear();
                statement_start = None;
                copied_to = close + 1;
                index = close + 1;
                continue;
            }
            byte if !byte.is_ascii_whitespace() => {
                statement_start.get_or_insert(index);
            }
            _ => {}
        }
        index += 1;
    }

    statement.push_str(&body[copied_to..]);
    push_declaration(&mut entries, &statement);
    Ok(entries)
}

/// Statements of a stylesheet's `@theme { .. }` block, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeBlock {
    entries: Vec<ThemeEntry>,
}

impl ThemeBlock {
    /// Finds the first `@theme` block; returns its byte span in `css` and the parsed body.
    pub fn locate(css: &str) -> Result<(std::ops::Range<usize>, Self)> {
        let Some(open) = THEME_OPEN_RE.find(css) else {
            bail!("stylesheet has no @theme block to update");
        };
        let Some(body_end) = matching_close(css, open.end()) else {
            bail!("@theme block is not closed");
        };
        let entries = parse_entries(&css[open.end()..body_end])?;

        Ok((open.start()..body_end + 1, Self { entries }))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            ThemeEntry::Declaration {
                name: existing,
                value,
            } if existing == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Replaces the value in place when the property exists, appends it otherwise.
    pub fn upsert(&mut self, name: &str, value: &str) {
        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            ThemeEntry::Declaration {
                name: existing,
                value,
            } if existing == name => Some(value),
            _ => None,
        });
        match existing {
            Some(current) => *current = value.to_string(),
            None => self.entries.push(ThemeEntry::Declaration {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn apply_tokens(&mut self, tokens: &DesignTokens) {
        self.upsert("--font-heading", &tokens.typography.heading_font);
        self.upsert("--font-sans", &tokens.typography.body_font);
        self.upsert("--font-mono", &tokens.typography.mono_font);
        self.upsert("--text-body", BODY_TEXT_SIZE);
        self.upsert("--text-body--line-height", BODY_LINE_HEIGHT);
        self.apply_scale("primary", &tokens.colors.primary);
        self.apply_scale("accent", &tokens.colors.accent);
    }

    fn apply_scale(&mut self, name: &str, token: &ColorToken) {
        for step in SCALE_STEPS {
            let value = token
                .scale
                .get(&step)
                .map(String::as_str)
                .unwrap_or(token.base.as_str());
            self.upsert(&format!("--color-{name}-{step}"), value);
        }
    }

    pub fn render(&self) -> String {
        let mut block = String::from("@theme {\n");
        for entry in &self.entries {
            let _ = match entry {
                ThemeEntry::Declaration { name, value } => writeln!(block, "  {name}: {value};"),
                ThemeEntry::Nested(rule) => writeln!(block, "  {rule}"),
            };
        }
        block.push('}');
        block
    }
}

/// Rewrites the stylesheet's `@theme` block with the merged tokens, leaving the rest untouched.
pub fn patch_stylesheet(css: &str, tokens: &DesignTokens) -> Result<String> {
    let (span, mut theme) = ThemeBlock::locate(css)?;
    theme.apply_tokens(tokens);

    let mut patched = String::with_capacity(css.len());
    patched.push_str(&css[..span.start]);
    patched.push_str(&theme.render());
    patched.push_str(&css[span.end..]);
    Ok(patched)
}

/// Reviewer persona describing who the generated site is written for.
pub fn render_persona(blueprint: &Blueprint) -> String {
    let identity = &blueprint.identity;
    let company = if identity.name.is_empty() {
        "the company"
    } else {
        identity.name.as_str()
    };
    let industry = if identity.industry.is_empty() {
        "this industry"
    } else {
        identity.industry.as_str()
    };
    let service_names = blueprint
        .content
        .services
        .iter()
        .map(|service| service.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let services = if service_names.is_empty() {
        "the services described on this site"
    } else {
        service_names.as_str()
    };

    format!(
        r#"# Target Audience

Read this site as a prospective client of {company}. You work in {industry}
and you are comparing providers for {services}.

You judge providers on demonstrated expertise and a credible track record.
Concrete evidence persuades you: named clients, certifications, specific
capabilities and results. Generic claims and filler copy do not.

When reviewing content or design, ask whether each page helps you decide to
contact {company}. Flag copy that could describe any company, proof that is
buried below the fold, and navigation that hides the pages an evaluator
needs.

Company details live in `src/_data/pageContent.json`; brand settings live in
`whitelabel.config.js`.
"#
    )
}
