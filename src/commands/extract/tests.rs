use super::contact::extract_contact_info;
use super::entities::{extract_identity, extract_services, extract_team, split_service_items};
use super::pdf_text::split_pages;
use super::sections::{clean_heading, detect_sections, is_likely_heading, is_upper_case};
use super::tables::detect_tables;
use super::*;
use crate::model::{ContactRaw, Section};

fn section(heading: &str, content: &str) -> Section {
    Section {
        heading: heading.to_string(),
        level: 2,
        content: content.to_string(),
    }
}

#[test]
fn text_without_structure_becomes_single_content_section() {
    let text = "This sentence ends with a period.\nAnother sentence also ends here.";

    let sections = detect_sections(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "Content");
    assert_eq!(sections[0].level, 1);
    assert_eq!(
        sections[0].content,
        "This sentence ends with a period. Another sentence also ends here."
    );
}

#[test]
fn uppercase_line_before_blank_becomes_level_one_sentence_case_heading() {
    let text = "ABOUT OUR FIRM\n\nWe build bridges and tunnels for growing cities across the region.\n";

    let sections = detect_sections(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "About our firm");
    assert_eq!(sections[0].level, 1);
    assert_eq!(
        sections[0].content,
        "We build bridges and tunnels for growing cities across the region."
    );
}

#[test]
fn keyword_heading_without_blank_line_is_level_two() {
    let sections = detect_sections("Our approach\nWe listen first and then we build.");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "Our approach");
    assert_eq!(sections[0].level, 2);
    assert_eq!(sections[0].content, "We listen first and then we build.");
}

#[test]
fn paragraphs_are_separated_by_blank_lines_in_section_content() {
    let text = "HISTORY\nFounded in a garage in 1999.\n\nExpanded to three offices by 2010.";

    let sections = detect_sections(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(
        sections[0].content,
        "Founded in a garage in 1999.\n\nExpanded to three offices by 2010."
    );
}

#[test]
fn lines_before_first_heading_flow_into_that_section() {
    let text = "Intro line one without heading mark.\nMISSION\nWe exist to help.";

    let sections = detect_sections(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "Mission");
    assert_eq!(
        sections[0].content,
        "Intro line one without heading mark. We exist to help."
    );
}

#[test]
fn heading_rules_respect_length_and_punctuation() {
    assert!(!is_likely_heading("OK", true));
    assert!(!is_likely_heading("ENDS WITH A PERIOD.", true));
    assert!(!is_likely_heading("Trailing comma,", true));
    assert!(!is_likely_heading(&"A".repeat(80), true));
    assert!(is_likely_heading("3) Delivery model", false));
    assert!(is_likely_heading("Plain words", true));
    assert!(!is_likely_heading("Plain words", false));
}

#[test]
fn clean_heading_strips_numbering_and_folds_case() {
    assert_eq!(clean_heading("2. OUR SERVICES"), "Our services");
    assert_eq!(clean_heading("4) Delivery Model"), "Delivery Model");
    assert_eq!(clean_heading("ACME"), "Acme");
    assert!(is_upper_case("2. OUR SERVICES"));
    assert!(!is_upper_case("USA"));
    assert!(!is_upper_case("Mixed CASE"));
}

#[test]
fn contact_extraction_takes_first_match_per_field() {
    let text = "Call us\nPhone: (555) 123-4567\nFax: 555-987-6543\n\
                Email info@acme.com or sales@acme.com\n\
                Visit https://www.acme.com/about today\n\
                1200 Market Street, Suite 400, Springfield IL 62701\n";

    let contact = extract_contact_info(text);

    assert_eq!(contact.email.as_deref(), Some("info@acme.com"));
    assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
    assert_eq!(contact.fax.as_deref(), Some("555-987-6543"));
    assert_eq!(contact.url.as_deref(), Some("https://www.acme.com/about"));
    assert_eq!(
        contact.address_raw.as_deref(),
        Some("1200 Market Street, Suite 400, Springfield IL 62701")
    );
}

#[test]
fn contact_extraction_falls_back_to_unlabeled_phone() {
    let contact = extract_contact_info("Reach us at 555.123.4567 anytime");
    assert_eq!(contact.phone.as_deref(), Some("555.123.4567"));
    assert!(contact.email.is_none());
    assert!(contact.address_raw.is_none());
}

#[test]
fn contact_extraction_is_idempotent_and_total() {
    let text = "Email: team@example.org\nTel: +1 555 010 9999\n";
    assert_eq!(extract_contact_info(text), extract_contact_info(text));
    assert_eq!(extract_contact_info(""), ContactRaw::default());
}

#[test]
fn three_tab_separated_lines_form_one_table() {
    let text = "Name\tRole\tCity\nAda\tEngineer\tLondon\nGrace\tAdmiral\tArlington\n\nAfter table.";

    let tables = detect_tables(text);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers, vec!["Name", "Role", "City"]);
    assert_eq!(
        tables[0].rows,
        vec![
            vec!["Ada", "Engineer", "London"],
            vec!["Grace", "Admiral", "Arlington"],
        ]
    );
}

#[test]
fn trailing_table_closes_at_end_of_text_and_single_rows_are_dropped() {
    let tables = detect_tables("solo\trow\there\n\nq1   q2   q3\n10   20   30");

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers, vec!["q1", "q2", "q3"]);
    assert_eq!(tables[0].rows, vec![vec!["10", "20", "30"]]);
}

#[test]
fn identity_uses_first_heading_and_first_substantial_paragraph() {
    let sections = vec![
        section("Acme Labs", "Short."),
        section(
            "About",
            "We calibrate laboratory instruments for universities and hospitals.\n\nSecond paragraph.",
        ),
    ];

    let identity = extract_identity(&sections);

    assert_eq!(identity.name, "Acme Labs");
    assert_eq!(
        identity.description,
        "We calibrate laboratory instruments for universities and hospitals."
    );
    assert!(identity.tagline.is_empty());
}

#[test]
fn identity_ignores_fallback_heading_and_truncates_description() {
    let long = "x".repeat(400);
    let identity = extract_identity(&[section("Content", &long)]);

    assert!(identity.name.is_empty());
    assert_eq!(identity.description.chars().count(), 300);
}

#[test]
fn services_split_on_paragraphs_and_name_delimiters() {
    let sections = vec![section(
        "Our services",
        "Consulting: We advise boards on strategy.\n\nEngineering. We design and ship software.",
    )];

    let services = extract_services(&sections);

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Consulting");
    assert_eq!(services[0].description, "We advise boards on strategy.");
    assert_eq!(services[1].name, "Engineering");
    assert_eq!(services[1].description, "We design and ship software.");
}

#[test]
fn services_split_on_bullets_and_drop_short_items() {
    let sections = vec![
        section(
            "Capabilities",
            "• Cloud migration for legacy systems • Data platform engineering - Audit",
        ),
        section("History", "• Not a service section at all, ignored entirely"),
    ];

    let services = extract_services(&sections);

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Cloud migration for legacy systems");
    assert_eq!(services[0].description, "Cloud migration for legacy systems");
    assert_eq!(services[1].name, "Data platform engineering");
}

#[test]
fn service_split_keeps_inner_hyphens() {
    let items = split_service_items("State-of-the-art tooling — and support");
    assert_eq!(items, vec!["State-of-the-art tooling ", "— and support"]);
}

#[test]
fn team_members_come_from_name_title_lines() {
    let sections = vec![section(
        "Leadership",
        "Jane Smith — Chief Executive Officer\nJohn Paul Jones - CTO, Co-founder",
    )];

    let team = extract_team(&sections);

    assert_eq!(team.len(), 2);
    assert_eq!(team[0].name, "Jane Smith");
    assert_eq!(team[0].title, "Chief Executive Officer");
    assert_eq!(team[1].name, "John Paul Jones");
    assert_eq!(team[1].title, "CTO");
    assert!(team.iter().all(|member| member.bio.is_empty()));
}

#[test]
fn split_pages_drops_trailing_blank_pages() {
    let text = split_pages("first page\n\u{000C}second page\n\u{000C}\n\u{000C}");

    assert_eq!(text.pages.len(), 2);
    assert_eq!(text.joined(), "first page\n\nsecond page");
}

#[test]
fn analyze_text_runs_every_pass() {
    let text = "ACME LABS\n\n\
                Acme Labs builds measurement instruments for research laboratories worldwide.\n\n\
                OUR SERVICES\n\n\
                Calibration: On-site calibration of lab equipment.\n\n\
                Repairs: Fast turnaround repairs for all major brands.\n\n\
                LEADERSHIP\n\n\
                Jane Smith - Chief Executive Officer\n\
                Oversees all research programs.\n\n\
                CONTACT\n\n\
                Email: hello@acmelabs.com\n\
                Call 555-201-3344 during business hours.\n";

    let extraction = analyze_text(ExtractionMeta::default(), text.to_string());

    let headings: Vec<&str> = extraction
        .sections
        .iter()
        .map(|section| section.heading.as_str())
        .collect();
    assert_eq!(
        headings,
        vec!["Acme labs", "Our services", "Leadership", "Contact"]
    );
    assert_eq!(extraction.identity.name, "Acme labs");
    assert_eq!(
        extraction.identity.description,
        "Acme Labs builds measurement instruments for research laboratories worldwide."
    );
    assert_eq!(extraction.services.len(), 2);
    assert_eq!(extraction.services[1].name, "Repairs");
    assert_eq!(extraction.team.len(), 1);
    assert_eq!(extraction.team[0].name, "Jane Smith");
    assert!(extraction.team[0].title.starts_with("Chief Executive Officer"));
    assert_eq!(
        extraction.contact.email.as_deref(),
        Some("hello@acmelabs.com")
    );
    assert_eq!(extraction.contact.phone.as_deref(), Some("555-201-3344"));
    assert!(extraction.tables.is_empty());
    assert_eq!(extraction.raw_text, text);
}
