//! Main-text extraction from article pages.
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

/// Elements whose whole subtree never contributes text.
const IGNORED: &[&str] = &[
    "script", "style", "noscript", "header", "footer", "svg", "form", "nav", "aside", "iframe",
];

const MIN_WORDS: usize = 5;

lazy_static! {
    static ref REGIONS: Vec<Selector> = ["article", "main", "body"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
    static ref BLOCKS: Selector = Selector::parse("p, li").unwrap();
}

/// Paragraph and list-item text of the page's main region, one block per
/// paragraph separated by a blank line. Blocks under five words are boilerplate.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let region = REGIONS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut blocks = Vec::new();
    for element in region.select(&BLOCKS) {
        if inside_ignored(element, region) {
            continue;
        }
        let text = element_text(element);
        if text.split_whitespace().count() >= MIN_WORDS {
            blocks.push(text);
        }
    }
    blocks.join("\n\n")
}

/// Plain text of an HTML fragment such as a feed summary.
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    element_text(fragment.root_element())
}

fn inside_ignored(element: ElementRef<'_>, region: ElementRef<'_>) -> bool {
    for ancestor in element.ancestors() {
        if ancestor == *region {
            return false;
        }
        if let Some(el) = ancestor.value().as_element() {
            if IGNORED.contains(&el.name()) {
                return true;
            }
        }
    }
    false
}

fn element_text(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    collect_text(element, &mut pieces);
    pieces.join(" ")
}

fn collect_text(element: ElementRef<'_>, pieces: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let words = text.split_whitespace().collect::<Vec<_>>();
            if !words.is_empty() {
                pieces.push(words.join(" "));
            }
        } else if let Some(child) = ElementRef::wrap(child) {
            if !IGNORED.contains(&child.value().name()) {
                collect_text(child, pieces);
            }
        }
    }
}
