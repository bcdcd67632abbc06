use serde::Deserialize;
use tracing::info;

use super::browser::PageEvaluator;
use super::{gather, leading_int};
use crate::model::{LayoutSummary, RegionInfo, SectionSpacing};

const CONTAINER_MIN_PX: i64 = 600;
const CONTAINER_MAX_PX: i64 = 2000;
const SECTION_SAMPLE_LIMIT: usize = 5;

pub const LAYOUT_SCRIPT: &str = r#"(() => {
  const region = (el, withHeight) => {
    if (!el) return { exists: false };
    const info = {
      exists: true,
      tagName: el.tagName,
      background: window.getComputedStyle(el).backgroundColor,
    };
    if (withHeight) info.height = el.getBoundingClientRect().height + "px";
    return info;
  };
  const maxWidths = [];
  for (const el of document.querySelectorAll("*")) {
    const maxWidth = window.getComputedStyle(el).maxWidth;
    if (maxWidth) maxWidths.push(maxWidth);
  }
  const sections = Array.from(
    document.querySelectorAll("section, main > div, .section"),
    (el) => {
      const style = window.getComputedStyle(el);
      return {
        paddingTop: style.paddingTop,
        paddingBottom: style.paddingBottom,
        marginTop: style.marginTop,
        marginBottom: style.marginBottom,
      };
    },
  );
  return {
    maxWidths,
    header: region(document.querySelector("header, [role='banner'], nav"), true),
    footer: region(document.querySelector("footer, [role='contentinfo']"), false),
    sections,
    bodyBackground: document.body ? window.getComputedStyle(document.body).backgroundColor : "",
  };
})()"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSample {
    pub max_widths: Vec<String>,
    pub header: RegionInfo,
    pub footer: RegionInfo,
    pub sections: Vec<SectionSpacing>,
    pub body_background: String,
}

pub async fn scrape_layout<E>(page: &E) -> LayoutSummary
where
    E: PageEvaluator + ?Sized,
{
    let sample: LayoutSample = gather(page, "layout", LAYOUT_SCRIPT).await;
    let summary = summarize_layout(sample);

    info!(
        containers = %summary.containers.join(", "),
        header = summary.header.exists,
        footer = summary.footer.exists,
        "layout scraper finished"
    );
    summary
}

pub fn summarize_layout(sample: LayoutSample) -> LayoutSummary {
    let mut containers = Vec::<String>::new();
    for max_width in sample.max_widths {
        if max_width == "none" || max_width == "0px" {
            continue;
        }
        let in_range = leading_int(&max_width)
            .is_some_and(|px| (CONTAINER_MIN_PX..=CONTAINER_MAX_PX).contains(&px));
        if in_range && !containers.contains(&max_width) {
            containers.push(max_width);
        }
    }

    LayoutSummary {
        containers,
        header: sample.header,
        footer: sample.footer,
        section_spacing: sample
            .sections
            .into_iter()
            .take(SECTION_SAMPLE_LIMIT)
            .collect(),
        body_background: sample.body_background,
    }
}
