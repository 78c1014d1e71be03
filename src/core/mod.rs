//! Core data types and structures
//!
//! This module contains the fundamental data types used throughout
//! doxdepends, separated from the logic that builds them.

pub mod types;

pub use types::*;
