//! Matching of heterogeneous raw column labels onto the canonical survey schema.

#![deny(unsafe_code)]

pub mod alias;
pub mod engine;
pub mod utils;

pub use alias::{ALIAS_TABLE, aliases_for, match_priority};
pub use engine::{
    ColumnAssignment, ColumnMapping, HINT_MIN_SIMILARITY, MatchKind, map_columns, resolve_label,
};
pub use utils::normalize_label;
