//! Pattern library and false-positive filter for China-link detection.
//!
//! Categories group literal triggers (matched through one Aho-Corasick
//! automaton per category) and optional regex banks. The exclusion filter is
//! a flat substring list checked before any category.

pub mod category;
pub mod embedded;
pub mod exclusion;
pub mod library;

pub use category::{CategorySpec, MatchMode, PatternCategory};
pub use exclusion::FalsePositiveFilter;
pub use library::{LibraryStats, PatternLibrary};
