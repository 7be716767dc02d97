//! URL handling module for Site-Harvester
//!
//! This module provides site-root normalization, Search Console property
//! conversion, and the hostname comparison used by the same-site filter.

mod domain;
mod normalize;

pub use domain::{extract_domain, is_same_site, root_domain};
pub use normalize::{normalize_site_root, site_url_from_property};
