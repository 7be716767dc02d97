//! Integration tests for Site-Harvester
//!
//! These tests use wiremock to stand up mock sites and run the full
//! resolve-then-crawl pipeline end-to-end.

mod harvest_tests;
mod manifest_tests;
