//! Sitemap XML parser
//!
//! Recognizes the two sitemap document kinds:
//! - `<urlset>` with `<url><loc/><lastmod/></url>` entries
//! - `<sitemapindex>` with `<sitemap><loc/></sitemap>` children
//!
//! Element names are matched on their local part, so namespace prefixes are
//! accepted.

use crate::manifest::ManifestEntry;
use crate::ManifestError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestDocument {
    /// A sitemap index listing child sitemap locations
    Index(Vec<String>),

    /// A plain sitemap listing page entries
    UrlSet(Vec<ManifestEntry>),
}

/// Field of the entry currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastMod,
}

/// Parses a sitemap or sitemap index document
///
/// Entries with an empty `<loc>` are dropped; an empty `<lastmod>` becomes
/// `None`. A value with an invalid entity reference is kept as written.
/// Otherwise malformed XML is an error.
///
/// # Example
///
/// ```
/// use site_harvester::manifest::{parse_manifest, ManifestDocument};
///
/// let xml = r#"<urlset><url><loc>https://example.com/a</loc></url></urlset>"#;
/// match parse_manifest(xml).unwrap() {
///     ManifestDocument::UrlSet(entries) => assert_eq!(entries[0].loc, "https://example.com/a"),
///     ManifestDocument::Index(_) => unreachable!(),
/// }
/// ```
pub fn parse_manifest(xml: &str) -> Result<ManifestDocument, ManifestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Vec<u8>> = None;
    let mut depth = 0usize;
    let mut in_item = false;
    let mut field: Option<Field> = None;

    let mut loc = String::new();
    let mut lastmod = String::new();
    let mut children = Vec::new();
    let mut entries = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                depth += 1;

                if depth == 1 {
                    root = Some(name);
                    continue;
                }

                let item_tag: &[u8] = match root.as_deref() {
                    Some(b"urlset") => b"url",
                    Some(b"sitemapindex") => b"sitemap",
                    _ => continue,
                };

                match depth {
                    2 if name == item_tag => {
                        in_item = true;
                        loc.clear();
                        lastmod.clear();
                    }
                    3 if in_item => {
                        field = match name.as_slice() {
                            b"loc" => Some(Field::Loc),
                            b"lastmod" => Some(Field::LastMod),
                            _ => None,
                        };
                    }
                    _ => {}
                }
            }
            Event::Empty(e) if depth == 0 && root.is_none() => {
                root = Some(e.local_name().as_ref().to_vec());
            }
            Event::Text(text) => {
                if let Some(field) = field {
                    // A bare `&` keeps this value literal rather than losing the document
                    let value = text
                        .unescape()
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                    push_field(field, &value, &mut loc, &mut lastmod);
                }
            }
            Event::CData(data) => {
                if let Some(field) = field {
                    let raw = data.into_inner();
                    push_field(field, &String::from_utf8_lossy(&raw), &mut loc, &mut lastmod);
                }
            }
            Event::End(_) => {
                match depth {
                    3 => field = None,
                    2 if in_item => {
                        in_item = false;
                        let location = loc.trim();
                        if !location.is_empty() {
                            match root.as_deref() {
                                Some(b"sitemapindex") => children.push(location.to_string()),
                                _ => {
                                    let lastmod = lastmod.trim();
                                    entries.push(ManifestEntry {
                                        loc: location.to_string(),
                                        lastmod: (!lastmod.is_empty()).then(|| lastmod.to_string()),
                                    });
                                }
                            }
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match root.as_deref() {
        Some(b"urlset") => Ok(ManifestDocument::UrlSet(entries)),
        Some(b"sitemapindex") => Ok(ManifestDocument::Index(children)),
        Some(other) => Err(ManifestError::UnknownRoot(
            String::from_utf8_lossy(other).into_owned(),
        )),
        None => Err(ManifestError::Empty),
    }
}

fn push_field(field: Field, value: &str, loc: &mut String, lastmod: &mut String) {
    match field {
        Field::Loc => loc.push_str(value),
        Field::LastMod => lastmod.push_str(value),
    }
}
