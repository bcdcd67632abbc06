use std::sync::LazyLock;

use regex::Regex;

use super::sections::FALLBACK_HEADING;
use crate::model::{Identity, Section, ServiceRaw, TeamMemberRaw};
use crate::util::truncate_chars;

const DESCRIPTION_MIN_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 300;
const SERVICE_MIN_CHARS: usize = 10;
const SERVICE_NAME_MAX_CHARS: usize = 100;
const SERVICE_DESCRIPTION_MAX_CHARS: usize = 500;

static SERVICE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)services|capabilities|offerings|solutions|what we do|our work")
        .expect("valid service heading regex")
});
static SERVICE_NAME_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:.]\s").expect("valid service name split regex"));
static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•–—-]\s*").expect("valid bullet prefix regex"));
static TEAM_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)team|leadership|staff|people|our team|management")
        .expect("valid team heading regex")
});
static NAME_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+ [A-Z][a-z]+(?:\s[A-Z][a-z]+)?)\s*[-–—,]\s*([^\n]+)")
        .expect("valid name/title regex")
});
static NAME_TITLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-–—,]\s*").expect("valid separator regex"));

/// Name from the first heading, description from the first substantial paragraph.
pub fn extract_identity(sections: &[Section]) -> Identity {
    let name = sections
        .first()
        .map(|section| section.heading.as_str())
        .filter(|heading| !heading.is_empty() && *heading != FALLBACK_HEADING)
        .unwrap_or_default()
        .to_string();

    let description = sections
        .iter()
        .find(|section| section.content.chars().count() > DESCRIPTION_MIN_CHARS)
        .and_then(|section| section.content.split("\n\n").next())
        .map(|paragraph| truncate_chars(paragraph, DESCRIPTION_MAX_CHARS))
        .unwrap_or_default();

    Identity {
        name,
        description,
        ..Identity::default()
    }
}

pub fn extract_services(sections: &[Section]) -> Vec<ServiceRaw> {
    let mut services = Vec::<ServiceRaw>::new();

    for section in sections
        .iter()
        .filter(|section| SERVICE_HEADING_RE.is_match(&section.heading))
    {
        for item in split_service_items(&section.content) {
            let stripped = BULLET_PREFIX_RE.replace(item, "");
            let trimmed = stripped.trim();
            if trimmed.chars().count() <= SERVICE_MIN_CHARS {
                continue;
            }
            services.push(service_from_item(trimmed));
        }
    }

    services
}

fn service_from_item(item: &str) -> ServiceRaw {
    let parts: Vec<&str> = SERVICE_NAME_SPLIT_RE.split(item).collect();
    let head = parts.first().copied().unwrap_or(item);
    let rest = parts.get(1..).unwrap_or_default().join(". ");
    let description = if rest.is_empty() { head } else { rest.as_str() };

    ServiceRaw {
        name: truncate_chars(head, SERVICE_NAME_MAX_CHARS),
        description: truncate_chars(description, SERVICE_DESCRIPTION_MAX_CHARS),
    }
}

/// Splits on paragraph breaks and before each bullet marker (`•`, `–`, `—`, `- `).
pub fn split_service_items(content: &str) -> Vec<&str> {
    let mut items = Vec::<&str>::new();

    for paragraph in content.split("\n\n") {
        let mut start = 0usize;
        let mut characters = paragraph.char_indices().peekable();
        while let Some((index, character)) = characters.next() {
            let is_marker = match character {
                '•' | '–' | '—' => true,
                '-' => characters
                    .peek()
                    .map(|(_, next)| next.is_whitespace())
                    .unwrap_or(false),
                _ => false,
            };
            if is_marker && index > start {
                items.push(&paragraph[start..index]);
                start = index;
            }
        }
        items.push(&paragraph[start..]);
    }

    items
}

/// "First Last — Title" lines inside team-like sections; bios stay empty.
pub fn extract_team(sections: &[Section]) -> Vec<TeamMemberRaw> {
    let mut team = Vec::<TeamMemberRaw>::new();

    for section in sections
        .iter()
        .filter(|section| TEAM_HEADING_RE.is_match(&section.heading))
    {
        for captures in NAME_TITLE_RE.captures_iter(&section.content) {
            let name = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let title = captures
                .get(2)
                .and_then(|m| NAME_TITLE_SEPARATOR_RE.split(m.as_str()).next())
                .map(str::trim)
                .unwrap_or("");

            team.push(TeamMemberRaw {
                name: name.to_string(),
                title: title.to_string(),
                bio: String::new(),
            });
        }
    }

    team
}
