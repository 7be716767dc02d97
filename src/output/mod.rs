//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing sitemap entries and page records as JSON
//! - Reading stored sitemap entries back
//! - Summarizing a harvest for display

mod json;
pub mod stats;

pub use json::{
    read_manifest, write_harvest, write_manifest, write_pages, WrittenFiles, MANIFEST_FILE,
    PAGES_FILE,
};
pub use stats::{print_summary, HarvestSummary};
