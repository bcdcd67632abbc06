use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// raw-extract.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExtraction {
    pub meta: ExtractionMeta,
    pub identity: Identity,
    pub sections: Vec<Section>,
    pub contact: ContactRaw,
    pub tables: Vec<Table>,
    pub services: Vec<ServiceRaw>,
    pub team: Vec<TeamMemberRaw>,
    pub raw_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionMeta {
    pub source: String,
    pub extracted_at: String,
    pub page_count: usize,
    pub text_length: usize,
    pub source_sha256: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub industry: String,
    pub founded: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    /// 1 for upper-case headings, 2 otherwise.
    pub level: u8,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRaw {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRaw {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMemberRaw {
    pub name: String,
    pub title: String,
    pub bio: String,
}

// ---------------------------------------------------------------------------
// scraped-styles.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStyleScrape {
    pub meta: ScrapeMeta,
    pub colors: ColorSummary,
    pub typography: TypographySummary,
    pub layout: LayoutSummary,
    pub components: ComponentSummary,
    pub assets: AssetSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapeMeta {
    pub source: String,
    pub scraped_at: String,
    pub viewport: String,
}

/// A base color and its 50..900 lightness scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub base: String,
    pub scale: BTreeMap<u16, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSummary {
    pub primary: Option<ColorToken>,
    pub accent: Option<ColorToken>,
    pub all: Vec<ColorCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
    pub hex: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedValue {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographySummary {
    pub body_font: String,
    pub heading_font: String,
    pub sizes: Vec<RankedValue>,
    pub weights: Vec<RankedValue>,
    pub line_heights: Vec<RankedValue>,
    pub google_fonts_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSummary {
    pub containers: Vec<String>,
    pub header: RegionInfo,
    pub footer: RegionInfo,
    pub section_spacing: Vec<SectionSpacing>,
    pub body_background: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionInfo {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionSpacing {
    pub padding_top: String,
    pub padding_bottom: String,
    pub margin_top: String,
    pub margin_bottom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSummary {
    pub buttons: Vec<ButtonStyle>,
    pub navigation: Vec<NavItem>,
    pub cards: CardSummary,
    pub links: Option<LinkStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonStyle {
    pub text: String,
    pub background_color: String,
    pub color: String,
    pub border_radius: String,
    pub padding: String,
    pub font_size: String,
    pub font_weight: String,
    pub border: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSummary {
    pub count: usize,
    pub style: Option<CardStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardStyle {
    pub border_radius: String,
    pub box_shadow: String,
    pub padding: String,
    pub background_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkStyle {
    pub color: String,
    pub text_decoration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSummary {
    pub logos: Vec<ImageAsset>,
    pub favicon: String,
    pub images: Vec<ImageAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAsset {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// merged-blueprint.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Blueprint {
    pub meta: BlueprintMeta,
    pub identity: Identity,
    pub contact: Contact,
    pub navigation: Navigation,
    pub tokens: DesignTokens,
    pub content: PageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintMeta {
    pub merged_at: String,
    pub content_source: String,
    pub design_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub fax: String,
    pub url: String,
    pub address: Option<PostalAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
}

impl PageLink {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// Page key to link, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMap {
    entries: Vec<(String, PageLink)>,
}

impl PageMap {
    /// Inserts unless the key is already present; returns whether it was added.
    pub fn insert(&mut self, key: &str, page: PageLink) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries.push((key.to_string(), page));
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    pub fn get(&self, key: &str) -> Option<&PageLink> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, page)| page)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &PageLink> {
        self.entries.iter().map(|(_, page)| page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for PageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, page) in &self.entries {
            map.serialize_entry(key, page)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub pages: PageMap,
    pub main: Vec<PageLink>,
    pub footer_groups: Vec<FooterGroup>,
    pub all: Vec<PageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterGroup {
    pub heading: String,
    pub items: Vec<PageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignTokens {
    pub colors: TokenColors,
    pub typography: TokenTypography,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenColors {
    pub primary: ColorToken,
    pub accent: ColorToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTypography {
    pub heading_font: String,
    pub body_font: String,
    pub mono_font: String,
    pub google_fonts_url: String,
}

// pageContent.json keeps snake_case keys; the site templates read them as-is.

#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub schema: String,
    pub company: Identity,
    pub hero: Hero,
    pub about: AboutBlock,
    pub services: Vec<ServiceRaw>,
    pub team: Vec<TeamEntry>,
    pub contact: Contact,
    pub testimonials: Vec<String>,
    pub clients: Vec<String>,
    pub certifications: Vec<String>,
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta_primary: CallToAction,
    pub cta_secondary: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutBlock {
    pub title: String,
    pub content: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomSection {
    pub title: String,
    pub content: String,
}
