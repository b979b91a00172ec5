//! HTML parsing of handbook pages into an ordered element stream.

use crate::types::{AppError, DocumentElement, ParsedDocument, Result, UNTITLED_PAGE};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

struct PageSelectors {
    main: Selector,
    article: Selector,
    content_div: Selector,
    h1: Selector,
}

impl PageSelectors {
    fn new() -> Self {
        Self {
            main: Selector::parse("main").expect("main selector"),
            article: Selector::parse("article").expect("article selector"),
            content_div: Selector::parse("div.content").expect("content selector"),
            h1: Selector::parse("h1").expect("h1 selector"),
        }
    }

    fn pick_root<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.main)
            .next()
            .or_else(|| document.select(&self.article).next())
            .or_else(|| document.select(&self.content_div).next())
    }
}

/// Parse a handbook page into its title and ordered content elements.
///
/// The content region is the first `main` element, falling back to `article`
/// and then `div.content`; pages without any of the three are rejected. The
/// page title comes from the first `h1` anywhere in the document, or
/// `"Untitled"` when there is none.
///
/// Within the content region, level-2 headings, paragraphs, and lists are
/// collected in document order with their text whitespace-collapsed. A list
/// becomes a single element (one line per top-level item); paragraphs and
/// lists nested inside another list are already covered by the outer list
/// and are skipped. Empty-text elements are dropped.
pub fn parse_document(html: &str) -> Result<ParsedDocument> {
    let selectors = PageSelectors::new();
    let document = Html::parse_document(html);

    let root = selectors
        .pick_root(&document)
        .ok_or_else(|| AppError::Parse("No main content area found".to_string()))?;

    let page_title = document
        .select(&selectors.h1)
        .next()
        .map(|h1| collapse_whitespace(&element_text(&h1)))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED_PAGE.to_string());

    let mut elements = Vec::new();
    for element in root.descendent_elements() {
        match element.value().name() {
            "h2" => {
                let text = collapse_whitespace(&element_text(&element));
                if !text.is_empty() {
                    elements.push(DocumentElement::heading(2, text));
                }
            }
            "p" => {
                if has_list_ancestor(&element) {
                    continue;
                }
                let text = collapse_whitespace(&element_text(&element));
                if !text.is_empty() {
                    elements.push(DocumentElement::paragraph(text));
                }
            }
            "ul" | "ol" => {
                if has_list_ancestor(&element) {
                    continue;
                }
                let text = list_text(&element);
                if !text.is_empty() {
                    elements.push(DocumentElement::list(text));
                }
            }
            _ => {}
        }
    }

    debug!(page_title = %page_title, elements = elements.len(), "Parsed page");
    Ok(ParsedDocument {
        page_title,
        elements,
    })
}

/// One line per top-level item; nested sublists stay inline with their item.
fn list_text(list: &ElementRef<'_>) -> String {
    let items: Vec<String> = list
        .child_elements()
        .filter(|child| child.value().name() == "li")
        .map(|li| collapse_whitespace(&element_text(&li)))
        .filter(|text| !text.is_empty())
        .collect();
    items.join("\n")
}

fn has_list_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| matches!(ancestor.value().name(), "ul" | "ol"))
}

fn element_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    for piece in element.text() {
        raw.push_str(piece);
    }
    raw
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim().to_string()
}
