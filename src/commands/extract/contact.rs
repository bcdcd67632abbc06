use std::sync::LazyLock;

use regex::Regex;

use crate::model::ContactRaw;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w{2,}").expect("valid email regex"));
static LABELED_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:phone|tel|call)[:\s]*([+\d\s\-().]{10,})").expect("valid phone regex")
});
static GENERIC_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("valid generic phone regex")
});
static FAX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)fax[:\s]*([+\d\s\-().]{10,})").expect("valid fax regex")
});
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[\w.-]+(?:/[\w.-]*)*/?").expect("valid url regex"));
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+\s+[\w\s]+(?:Street|St|Avenue|Ave|Drive|Dr|Road|Rd|Boulevard|Blvd|Lane|Ln|Way|Court|Ct|Circle|Cir|Suite|Ste|Floor|Fl)[\w\s.,]*\b[A-Z]{2}\s+\d{5}(?:-\d{4})?)",
    )
    .expect("valid address regex")
});

/// First match of each contact field; fields are independent of one another.
pub fn extract_contact_info(text: &str) -> ContactRaw {
    let phone = first_capture(&LABELED_PHONE_RE, text)
        .or_else(|| GENERIC_PHONE_RE.find(text).map(|m| m.as_str().to_string()));

    ContactRaw {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone,
        fax: first_capture(&FAX_RE, text),
        url: URL_RE.find(text).map(|m| m.as_str().to_string()),
        address_raw: first_capture(&ADDRESS_RE, text),
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}
