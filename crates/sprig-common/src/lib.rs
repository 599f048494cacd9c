//! Common utilities for the Sprig document tree.
//!
//! This crate provides shared infrastructure used by the other Sprig crates:
//! - **Warning System** - deduplicated, colored terminal output for degraded
//!   or unsupported features

pub mod warning;
