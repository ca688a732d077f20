//! Query and field text analysis.
//!
//! These are the leaves of the search pipeline. None of them know about
//! catalog items; they work on plain lowercase strings.
//!
//! - [`terms`]: strips price/stock phrases and splits the rest into terms.
//! - [`stemmer`]: crude suffix stripping for plural/gerund/past-tense forms.
//! - [`synonyms`]: static domain synonym table for short queries.
//! - [`similarity`]: blended edit-distance / Jaro-Winkler / bigram score.

pub mod similarity;
pub mod stemmer;
pub mod synonyms;
pub mod terms;

pub use similarity::similarity;
pub use stemmer::stem;
pub use synonyms::SynonymTable;
pub use terms::extract_terms;
