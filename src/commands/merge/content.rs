use super::pages::{is_about_section, is_custom_section};
use crate::model::{
    AboutBlock, CallToAction, Contact, CustomSection, Hero, Identity, PageContent, RawExtraction,
    ServiceRaw, TeamEntry,
};

const CONTENT_SCHEMA: &str = "White-label site content, schema v1. Regenerated by `whitelabel merge`.";

fn call_to_action(text: &str, url: &str) -> CallToAction {
    CallToAction {
        text: text.to_string(),
        url: url.to_string(),
    }
}

/// Structured page content for the site templates.
pub fn build_content(extract: &RawExtraction, company: &Identity, contact: &Contact) -> PageContent {
    let about_content = extract
        .sections
        .iter()
        .filter(|section| is_about_section(section))
        .map(|section| section.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    PageContent {
        schema: CONTENT_SCHEMA.to_string(),
        company: company.clone(),
        hero: Hero {
            headline: company.name.clone(),
            subheadline: company.description.clone(),
            cta_primary: call_to_action("Contact Us", "/contact/"),
            cta_secondary: call_to_action("Learn More", "/about/"),
        },
        about: AboutBlock {
            title: "About".to_string(),
            content: if about_content.is_empty() {
                company.description.clone()
            } else {
                about_content
            },
            highlights: Vec::new(),
        },
        services: extract
            .services
            .iter()
            .map(|service| ServiceRaw {
                name: service.name.clone(),
                description: service.description.clone(),
            })
            .collect(),
        team: extract
            .team
            .iter()
            .map(|member| TeamEntry {
                name: member.name.clone(),
                title: member.title.clone(),
                bio: member.bio.clone(),
                image: String::new(),
            })
            .collect(),
        contact: contact.clone(),
        testimonials: Vec::new(),
        clients: Vec::new(),
        certifications: Vec::new(),
        custom_sections: extract
            .sections
            .iter()
            .filter(|section| is_custom_section(section))
            .map(|section| CustomSection {
                title: section.heading.clone(),
                content: section.content.clone(),
            })
            .collect(),
    }
}
