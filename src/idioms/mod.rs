//! Idiom selection, matching and merging
//!
//! # Components
//!
//! - `filter`: heuristics deciding which reference idioms are targets
//! - `reference`: TSV reference list loading
//! - `matcher`: lemma-sequence matcher and its on-disk artifact
//! - `merge`: pipeline stage merging matched spans into idiom tokens

pub mod filter;
pub mod matcher;
pub mod merge;
pub mod reference;

pub use filter::{
    is_above_min_len, is_above_min_wc, is_hyphenated, is_not_exception, is_target, FilterConfig,
};
pub use matcher::{IdiomMatch, IdiomMatcher};
pub use merge::{create_merge_idiom_stage, MergeIdiomStage, MERGE_IDIOM_STAGE};
pub use reference::{load_idioms, load_target_idioms};
