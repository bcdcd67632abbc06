use std::sync::LazyLock;

use regex::Regex;

use crate::model::Section;

/// Title given to the single section produced when no heading is found.
pub const FALLBACK_HEADING: &str = "Content";

const HEADING_MIN_CHARS: usize = 2;
const HEADING_MAX_CHARS: usize = 80;

static NUMBERED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s").expect("valid numbered prefix regex"));
static STRIP_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid strip prefix regex"));
static HEADING_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(about|services|contact|team|our |the |introduction|overview|mission|vision|history)",
    )
    .expect("valid heading keyword regex")
});

/// Splits extracted text into heading/body sections in one left-to-right pass.
///
/// Body lines are buffered and joined with spaces; a blank line flushes the
/// buffer into the open section as a paragraph. Lines seen before the first
/// heading stay buffered and land in that first section.
pub fn detect_sections(text: &str) -> Vec<Section> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut sections = Vec::<Section>::new();
    let mut current: Option<Section> = None;
    let mut buffer = Vec::<&str>::new();

    for (index, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            if let Some(section) = current.as_mut() {
                if !buffer.is_empty() {
                    section.content.push_str(&buffer.join(" "));
                    section.content.push_str("\n\n");
                    buffer.clear();
                }
            }
            continue;
        }

        let next_is_blank = lines
            .get(index + 1)
            .map(|next| next.trim().is_empty())
            .unwrap_or(false);

        if is_likely_heading(line, next_is_blank) {
            if let Some(section) = current.take() {
                sections.push(close_section(section, &mut buffer));
            }
            current = Some(Section {
                heading: clean_heading(line),
                level: if is_upper_case(line) { 1 } else { 2 },
                content: String::new(),
            });
        } else {
            buffer.push(line);
        }
    }

    if let Some(section) = current.take() {
        sections.push(close_section(section, &mut buffer));
    } else if !buffer.is_empty() {
        sections.push(Section {
            heading: FALLBACK_HEADING.to_string(),
            level: 1,
            content: buffer.join(" ").trim().to_string(),
        });
    }

    sections
}

fn close_section(mut section: Section, buffer: &mut Vec<&str>) -> Section {
    section.content.push_str(&buffer.join(" "));
    section.content = section.content.trim().to_string();
    buffer.clear();
    section
}

pub fn is_likely_heading(line: &str, next_is_blank: bool) -> bool {
    let length = line.chars().count();
    if length <= HEADING_MIN_CHARS || length >= HEADING_MAX_CHARS {
        return false;
    }
    if line.ends_with('.') || line.ends_with(',') {
        return false;
    }

    is_upper_case(line)
        || NUMBERED_PREFIX_RE.is_match(line)
        || next_is_blank
        || HEADING_KEYWORD_RE.is_match(line)
}

/// More than three ASCII letters, all of them upper-case.
pub fn is_upper_case(text: &str) -> bool {
    let mut letters = 0usize;
    for character in text.chars().filter(char::is_ascii_alphabetic) {
        if character.is_ascii_lowercase() {
            return false;
        }
        letters += 1;
    }
    letters > 3
}

/// Strips a `1.`/`2)` prefix and folds all-caps headings to sentence case.
pub fn clean_heading(text: &str) -> String {
    let cleaned = STRIP_PREFIX_RE.replace(text, "").trim().to_string();
    if !is_upper_case(&cleaned) {
        return cleaned;
    }

    let mut characters = cleaned.chars();
    match characters.next() {
        Some(first) => {
            let mut folded = first.to_string();
            folded.push_str(&characters.as_str().to_lowercase());
            folded
        }
        None => cleaned,
    }
}
