use serde::Deserialize;
use tracing::info;

use super::browser::PageEvaluator;
use super::{gather, leading_int};
use crate::model::{ButtonStyle, CardStyle, CardSummary, ComponentSummary, LinkStyle, NavItem};
use crate::util::truncate_chars;

const BUTTON_LIMIT: usize = 5;
const NAV_LIMIT: usize = 15;
const TEXT_MAX_CHARS: usize = 50;
const CARD_MIN_PADDING_PX: i64 = 10;

pub const COMPONENT_SCRIPT: &str = r#"(() => {
  const buttons = Array.from(
    document.querySelectorAll(
      'button, a.btn, a.button, [class*="btn"], [class*="button"], input[type="submit"]',
    ),
    (el) => {
      const style = window.getComputedStyle(el);
      return {
        text: (el.textContent || "").trim(),
        backgroundColor: style.backgroundColor,
        color: style.color,
        borderRadius: style.borderRadius,
        padding: style.padding,
        fontSize: style.fontSize,
        fontWeight: style.fontWeight,
        border: style.border,
      };
    },
  );
  const navigation = Array.from(document.querySelectorAll("nav a, header a"), (el) => ({
    text: (el.textContent || "").trim(),
    href: el.getAttribute("href"),
  }));
  const cardCandidates = [];
  for (const el of document.querySelectorAll("*")) {
    const style = window.getComputedStyle(el);
    if (style.boxShadow && style.boxShadow !== "none") {
      cardCandidates.push({
        borderRadius: style.borderRadius,
        boxShadow: style.boxShadow,
        padding: style.padding,
        backgroundColor: style.backgroundColor,
        childCount: el.children.length,
      });
    }
  }
  const firstLink = document.querySelector("main a, article a, .content a, p a");
  let link = null;
  if (firstLink) {
    const style = window.getComputedStyle(firstLink);
    link = { color: style.color, textDecoration: style.textDecoration };
  }
  return { buttons, navigation, cardCandidates, link };
})()"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentSample {
    pub buttons: Vec<ButtonStyle>,
    pub navigation: Vec<NavItem>,
    pub card_candidates: Vec<CardCandidate>,
    pub link: Option<LinkStyle>,
}

/// An element carrying a box shadow; card rules are applied afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardCandidate {
    pub border_radius: String,
    pub box_shadow: String,
    pub padding: String,
    pub background_color: String,
    pub child_count: usize,
}

impl CardCandidate {
    fn looks_like_card(&self) -> bool {
        self.box_shadow != "none"
            && leading_int(&self.border_radius).is_some_and(|radius| radius > 0)
            && leading_int(&self.padding).is_some_and(|padding| padding > CARD_MIN_PADDING_PX)
            && self.child_count > 0
    }
}

pub async fn scrape_components<E>(page: &E) -> ComponentSummary
where
    E: PageEvaluator + ?Sized,
{
    let sample: ComponentSample = gather(page, "components", COMPONENT_SCRIPT).await;
    let summary = summarize_components(sample);

    info!(
        buttons = summary.buttons.len(),
        nav_items = summary.navigation.len(),
        cards = summary.cards.count,
        "component scraper finished"
    );
    summary
}

pub fn summarize_components(sample: ComponentSample) -> ComponentSummary {
    let buttons = sample
        .buttons
        .into_iter()
        .take(BUTTON_LIMIT)
        .map(|button| ButtonStyle {
            text: truncate_chars(button.text.trim(), TEXT_MAX_CHARS),
            ..button
        })
        .collect();

    let navigation = sample
        .navigation
        .into_iter()
        .take(NAV_LIMIT)
        .map(|item| NavItem {
            text: truncate_chars(item.text.trim(), TEXT_MAX_CHARS),
            href: item.href,
        })
        .collect();

    let mut cards = CardSummary::default();
    for candidate in sample
        .card_candidates
        .into_iter()
        .filter(CardCandidate::looks_like_card)
    {
        cards.count += 1;
        if cards.style.is_none() {
            cards.style = Some(CardStyle {
                border_radius: candidate.border_radius,
                box_shadow: candidate.box_shadow,
                padding: candidate.padding,
                background_color: candidate.background_color,
            });
        }
    }

    ComponentSummary {
        buttons,
        navigation,
        cards,
        links: sample.link,
    }
}
