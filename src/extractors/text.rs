// src/extractors/text.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

// --- Constants ---
/// Elements whose text is kept as one line of output.
const BLOCK_TAGS: [&str; 10] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th"];

/// Elements whose text never reaches the plain-text output.
const HIDDEN_TAGS: [&str; 3] = ["script", "style", "noscript"];

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to compile BODY_SELECTOR")
});

fn body(document: &Html) -> Result<ElementRef<'_>, ExtractError> {
    document.select(&BODY_SELECTOR).next().ok_or(ExtractError::MissingBody)
}

/// Depth-first, pre-order walk from `root`. A block element is taken whole and its
/// children are not visited, so nested blocks are only reported by the outermost one.
/// Uses an explicit stack so deeply nested markup cannot exhaust the call stack.
fn collect_blocks(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut blocks = Vec::new();
    let mut stack: Vec<_> = root.children().rev().collect();

    while let Some(node) = stack.pop() {
        let Some(element) = ElementRef::wrap(node) else {
            continue; // text, comments
        };
        if BLOCK_TAGS.contains(&element.value().name()) {
            blocks.push(element);
            continue;
        }
        stack.extend(node.children().rev());
    }

    blocks
}

/// Trimmed text of every block element in document order. Empty blocks stay as "".
pub fn extract_blocks(html: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let blocks = collect_blocks(body(&document)?)
        .into_iter()
        .map(|block| block.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>();
    tracing::debug!("Extracted {} text blocks", blocks.len());
    Ok(blocks)
}

/// Block text joined with newlines.
pub fn to_plaintext(html: &str) -> Result<String, ExtractError> {
    Ok(extract_blocks(html)?.join("\n"))
}

/// Every non-empty text node under `<body>`, trimmed and joined with newlines.
/// Script and style contents are dropped.
pub fn extract_all_text(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let lines = body(&document)?
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .parent()
                    .and_then(ElementRef::wrap)
                    .is_some_and(|parent| HIDDEN_TAGS.contains(&parent.value().name()));
                if hidden {
                    None
                } else {
                    Some(text.trim())
                }
            }
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}
