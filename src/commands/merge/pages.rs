use std::sync::LazyLock;

use regex::Regex;

use crate::model::{FooterGroup, Navigation, PageLink, PageMap, RawExtraction, Section};

const CUSTOM_SECTION_MIN_CHARS: usize = 100;

static ABOUT_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)about|overview|introduction|company|who we are|mission|history")
        .expect("valid about heading regex")
});
static STANDARD_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)about|overview|introduction|company|services|capabilities|team|contact|leadership|staff",
    )
    .expect("valid standard heading regex")
});
static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

pub fn is_about_section(section: &Section) -> bool {
    ABOUT_HEADING_RE.is_match(&section.heading)
}

/// Substantial sections that fit none of the standard pages.
pub fn is_custom_section(section: &Section) -> bool {
    !STANDARD_HEADING_RE.is_match(&section.heading)
        && section.content.chars().count() > CUSTOM_SECTION_MIN_CHARS
}

pub fn slugify(heading: &str) -> String {
    SLUG_SEPARATOR_RE
        .replace_all(&heading.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

pub fn map_content_to_pages(extract: &RawExtraction) -> PageMap {
    let mut pages = PageMap::default();
    pages.insert("home", PageLink::new("Home", "/"));

    if extract.sections.iter().any(is_about_section) || !extract.identity.description.is_empty()
    {
        pages.insert("about", PageLink::new("About", "/about/"));
    }
    if !extract.services.is_empty() {
        pages.insert("services", PageLink::new("Services", "/services/"));
    }
    if !extract.team.is_empty() {
        pages.insert("team", PageLink::new("Team", "/team/"));
    }

    let contact = &extract.contact;
    if contact.email.is_some() || contact.phone.is_some() || contact.address_raw.is_some() {
        pages.insert("contact", PageLink::new("Contact", "/contact/"));
    }

    for section in extract.sections.iter().filter(|section| is_custom_section(section)) {
        let slug = slugify(&section.heading);
        if slug.is_empty() {
            continue;
        }
        let url = format!("/{slug}/");
        pages.insert(&slug, PageLink::new(&section.heading, &url));
    }

    pages
}

/// Main and full navigation list every page; the footer groups them into three buckets.
pub fn build_navigation(pages: PageMap) -> Navigation {
    let pick = |keys: &[&str]| -> Vec<PageLink> {
        keys.iter()
            .filter_map(|key| pages.get(key).cloned())
            .collect()
    };
    let company = pick(&["home", "about"]);
    let mut services = pick(&["services"]);
    let connect = pick(&["contact"]);

    let grouped: Vec<&str> = company
        .iter()
        .chain(&services)
        .chain(&connect)
        .map(|page| page.url.as_str())
        .collect();
    let others: Vec<PageLink> = pages
        .values()
        .filter(|page| !grouped.contains(&page.url.as_str()))
        .cloned()
        .collect();
    services.extend(others);

    let footer_groups = [("Company", company), ("Services", services), ("Connect", connect)]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(heading, items)| FooterGroup {
            heading: heading.to_string(),
            items,
        })
        .collect();

    let all: Vec<PageLink> = pages.values().cloned().collect();
    Navigation {
        main: all.clone(),
        all,
        footer_groups,
        pages,
    }
}
