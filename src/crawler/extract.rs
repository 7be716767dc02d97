//! Main-content extraction
//!
//! Content is extracted by an ordered chain of strategies. Each strategy
//! either produces text or gives up; the first non-empty result wins:
//!
//! 1. [`ReadabilityExtractor`] scores block elements by the paragraph text
//!    they contain (penalizing link-heavy and boilerplate-looking blocks) and
//!    keeps the best one.
//! 2. [`BodyTextExtractor`] takes the whole `<body>` minus scripts, styles,
//!    navigation, headers and footers.

use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

/// A strategy for pulling readable text out of a document
pub trait ContentExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the extracted text, or None if this strategy found nothing
    fn extract(&self, document: &Html) -> Option<String>;
}

/// Ordered list of extractors; the first non-empty result wins
pub struct ExtractionChain {
    extractors: Vec<Box<dyn ContentExtractor>>,
}

impl ExtractionChain {
    pub fn new(extractors: Vec<Box<dyn ContentExtractor>>) -> Self {
        Self { extractors }
    }

    /// Runs the extractors in order; returns an empty string if all give up
    pub fn extract(&self, document: &Html) -> String {
        for extractor in &self.extractors {
            match extractor.extract(document) {
                Some(text) if !text.trim().is_empty() => {
                    tracing::trace!("content extracted by {}", extractor.name());
                    return text;
                }
                _ => tracing::trace!("{} found no content", extractor.name()),
            }
        }
        String::new()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ReadabilityExtractor::default()),
            Box::new(BodyTextExtractor),
        ])
    }
}

/// Elements never considered part of readable content
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "footer", "header", "aside", "form",
];

/// Elements stripped by the body-text fallback
const FALLBACK_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Elements after which a word boundary is forced when flattening text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "h1", "h2",
    "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section", "table", "td", "th",
    "tr", "ul",
];

const POSITIVE_HINTS: &[&str] = &[
    "article", "body", "content", "entry", "main", "page", "post", "text", "blog", "story",
];

const NEGATIVE_HINTS: &[&str] = &[
    "banner", "comment", "contact", "foot", "masthead", "menu", "meta", "nav", "promo",
    "related", "share", "sidebar", "social", "sponsor", "widget",
];

/// Readability-style scorer
///
/// Paragraphs shorter than `min_paragraph_chars` are ignored; a winning
/// block whose text is shorter than `min_content_chars` is rejected so the
/// next strategy can run.
#[derive(Debug, Clone)]
pub struct ReadabilityExtractor {
    pub min_paragraph_chars: usize,
    pub min_content_chars: usize,
}

impl Default for ReadabilityExtractor {
    fn default() -> Self {
        Self {
            min_paragraph_chars: 25,
            min_content_chars: 140,
        }
    }
}

impl ContentExtractor for ReadabilityExtractor {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("p, pre, blockquote").ok()?;
        // Candidates stay in first-seen order so ties go to the earlier block
        let mut index = HashMap::new();
        let mut candidates: Vec<(ElementRef<'_>, f64)> = Vec::new();

        for paragraph in document.select(&selector) {
            if has_ancestor_in(paragraph, BOILERPLATE_TAGS) {
                continue;
            }

            let text = collapse_whitespace(&paragraph.text().collect::<String>());
            let length = text.chars().count();
            if length < self.min_paragraph_chars {
                continue;
            }

            let commas = text.matches(',').count() as f64;
            let score = 1.0 + commas + (length as f64 / 100.0).min(3.0);

            let mut ancestor = parent_element(paragraph);
            for share in [1.0, 0.5] {
                let Some(element) = ancestor else {
                    break;
                };
                let slot = *index.entry(element.id()).or_insert_with(|| {
                    candidates.push((element, initial_score(&element)));
                    candidates.len() - 1
                });
                candidates[slot].1 += score * share;
                ancestor = parent_element(element);
            }
        }

        let mut best: Option<(ElementRef<'_>, f64)> = None;
        for (element, score) in candidates {
            let adjusted = score * (1.0 - link_density(&element));
            if best.map_or(true, |(_, top)| adjusted > top) {
                best = Some((element, adjusted));
            }
        }
        let (best, _) = best?;

        let content = element_text(best, BOILERPLATE_TAGS);
        (content.chars().count() >= self.min_content_chars).then_some(content)
    }
}

/// Fallback: body text with scripts, styles and page chrome removed
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyTextExtractor;

impl ContentExtractor for BodyTextExtractor {
    fn name(&self) -> &'static str {
        "body-text"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("body").ok()?;
        let body = document.select(&selector).next()?;
        Some(element_text(body, FALLBACK_STRIP_TAGS))
    }
}

fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

fn has_ancestor_in(element: ElementRef<'_>, tags: &[&str]) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| tags.contains(&ancestor.value().name()))
}

/// Starting score from the tag and its class/id hints
fn initial_score(element: &ElementRef) -> f64 {
    let tag_score = match element.value().name() {
        "article" | "main" => 10.0,
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };
    tag_score + class_weight(element)
}

fn class_weight(element: &ElementRef) -> f64 {
    let value = element.value();
    let hints = format!(
        "{} {}",
        value.attr("class").unwrap_or_default(),
        value.attr("id").unwrap_or_default()
    )
    .to_lowercase();

    if hints.trim().is_empty() {
        return 0.0;
    }

    let mut weight = 0.0;
    if NEGATIVE_HINTS.iter().any(|hint| hints.contains(hint)) {
        weight -= 25.0;
    }
    if POSITIVE_HINTS.iter().any(|hint| hints.contains(hint)) {
        weight += 25.0;
    }
    weight
}

/// Share of an element's text that sits inside links
fn link_density(element: &ElementRef) -> f64 {
    let total = element.text().map(str::len).sum::<usize>();
    if total == 0 {
        return 0.0;
    }

    let Ok(selector) = Selector::parse("a") else {
        return 0.0;
    };
    let linked = element
        .select(&selector)
        .flat_map(|link| link.text())
        .map(str::len)
        .sum::<usize>();

    linked as f64 / total as f64
}

/// Flattens an element to text, skipping `skip` subtrees and collapsing whitespace
fn element_text(element: ElementRef<'_>, skip: &[&str]) -> String {
    let mut raw = String::new();
    push_text(element, skip, &mut raw);
    collapse_whitespace(&raw)
}

fn push_text(element: ElementRef<'_>, skip: &[&str], out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(child_element) => {
                if skip.contains(&child_element.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    push_text(child_ref, skip, out);
                }
                if BLOCK_TAGS.contains(&child_element.name()) {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Collapses every whitespace run into one space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
