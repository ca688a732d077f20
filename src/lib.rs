//! Rummage - a multi-field fuzzy search and ranking engine for catalog records.
//!
//! Rummage takes free-text queries that may contain typos, plural forms,
//! synonyms and embedded constraints ("hammers under $40", "nails in stock")
//! and ranks an in-memory collection of items against them. There is no
//! index: every call is one linear pass over the items the caller supplies.

pub mod analysis;
pub mod context;
pub mod engine;
pub mod error;
pub mod extension;
pub mod intent;
pub mod ranker;
pub mod rules;
pub mod scorer;
pub mod types;

pub use engine::search;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::analysis::SynonymTable;
  pub use crate::context::QueryContext;
  pub use crate::engine::*;
  pub use crate::error::SearchError;
  pub use crate::extension::*;
  pub use crate::intent::{IntentOperator, NumericConstraint, QueryIntent};
  pub use crate::rules::{FieldAccessor, FieldSpec};
  pub use crate::types::*;
}
