//! Tests for the pipeline stages
//!
//! Fixtures are small CSV exports built in memory with the legacy header
//! layout, loaded through the real loader.

pub mod cleaner_tests;
pub mod fixtures;
