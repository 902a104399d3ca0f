//! # Config Crate
//!
//! Centralized configuration constants for the instance placement tools.
//! Every tolerance and default value used by the geometry kernel and the
//! placers is defined here so the numbers stay consistent across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{Tolerances, POSITION_EPSILON, DEFAULT_GROUP_NAME};
//!
//! // Distances at or below POSITION_EPSILON are treated as coincident
//! assert!(Tolerances::default().is_negligible(POSITION_EPSILON * 0.5));
//!
//! // Empty container names fall back to the default pattern
//! let requested = "   ";
//! let name = if requested.trim().is_empty() { DEFAULT_GROUP_NAME } else { requested };
//! assert_eq!(name, "instanceGroup#");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain values only, usable from any layer
//! - **Host Compatible**: Defaults match the interactive tool's initial values

pub mod constants;
