//! Common utilities for the htmlfive crates.
//!
//! This crate provides shared infrastructure used by the parser, the
//! serializers and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for
//!   non-fatal problems found in documents

pub mod warning;
