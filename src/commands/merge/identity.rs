use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Contact, ContactRaw, Identity, PostalAddress, RawExtraction};

const ADDRESS_COUNTRY: &str = "US";

static STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]{2})\s+(\d{5}(?:-\d{4})?)").expect("valid state/zip regex")
});

/// Extracted identity passed through field by field; absent values are empty strings.
pub fn merge_identity(extract: &RawExtraction) -> Identity {
    let identity = &extract.identity;
    Identity {
        name: identity.name.trim().to_string(),
        tagline: identity.tagline.trim().to_string(),
        description: identity.description.trim().to_string(),
        industry: identity.industry.trim().to_string(),
        founded: identity.founded.trim().to_string(),
    }
}

pub fn merge_contact(raw: &ContactRaw) -> Contact {
    let value = |field: &Option<String>| field.as_deref().unwrap_or_default().to_string();
    Contact {
        email: value(&raw.email),
        phone: value(&raw.phone),
        fax: value(&raw.fax),
        url: value(&raw.url),
        address: raw.address_raw.as_deref().and_then(parse_address),
    }
}

/// Splits a one-line US-style address on commas.
///
/// The last segment is searched for `ST 12345`; what precedes the match in that
/// segment is the city, and earlier segments form the street. When the state and
/// zip sit alone in the last segment, the city is taken from the segment before it.
/// Without a state/zip match the last segment is treated as the city.
pub fn parse_address(raw: &str) -> Option<PostalAddress> {
    let segments: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let (last, leading) = segments.split_last()?;

    let mut address = PostalAddress {
        country: ADDRESS_COUNTRY.to_string(),
        ..PostalAddress::default()
    };

    if leading.is_empty() {
        address.street = (*last).to_string();
        return Some(address);
    }

    match STATE_ZIP_RE.captures(last) {
        Some(captures) => {
            let matched = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
            address.state = captures[1].to_string();
            address.zip = captures[2].to_string();
            let city = last.replacen(matched, "", 1).trim().to_string();

            if city.is_empty() && leading.len() >= 2 {
                let (city_segment, street) = leading.split_last()?;
                address.city = (*city_segment).to_string();
                address.street = street.join(", ");
            } else {
                address.city = city;
                address.street = leading.join(", ");
            }
        }
        None => {
            address.city = (*last).to_string();
            address.street = leading.join(", ");
        }
    }

    Some(address)
}
