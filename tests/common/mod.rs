//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use vade::types::Chunk;

/// A small handbook page with an intro, two substantial sections, and one
/// short trailing section that merging should fold away.
pub fn sample_page_html() -> String {
    let intro = "This handbook explains how drivers keep their paperwork current. \
                 Each chapter below walks through one task from start to finish, \
                 with the documents and payments needed along the way.";
    let renewal = "A license renewal starts with the renewal notice mailed to your address. "
        .repeat(5);
    let registration =
        "Vehicle registration renewal requires current insurance and the registration fee. "
            .repeat(6);

    format!(
        r#"<html><body>
            <main>
                <h1>Driver Handbook</h1>
                <p>{intro}</p>
                <h2>Renewing Your License</h2>
                <p>{renewal}</p>
                <ul>
                    <li>Bring your license renewal fee</li>
                    <li>Schedule an appointment online</li>
                </ul>
                <h2>Vehicle Registration</h2>
                <p>{registration}</p>
                <h2>Office Hours</h2>
                <p>Offices open weekdays at eight in the morning.</p>
            </main>
        </body></html>"#
    )
}

/// Hand-built chunks for persistence tests.
pub fn sample_chunks() -> Vec<Chunk> {
    vec![
        make_chunk(1, "Renewing Your License", "license renewal fee appointment"),
        make_chunk(2, "Vehicle Registration", "vehicle registration insurance fee"),
        make_chunk(3, "Permits", "permit rules for new drivers"),
    ]
}

/// Build one chunk with derived word count.
pub fn make_chunk(id: u64, section_title: &str, content: &str) -> Chunk {
    Chunk {
        id,
        source_url: "https://example.com/handbook".to_string(),
        page_title: "Driver Handbook".to_string(),
        section_title: section_title.to_string(),
        content: content.to_string(),
        word_count: content.split_whitespace().count(),
    }
}
