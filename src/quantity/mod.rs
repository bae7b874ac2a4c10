//! Quantity handling
//!
//! Parsing, formatting, duplicate merging, and scaling of the quantities
//! people type into grocery lines and ingredient lists.

pub mod merge;
pub mod parser;
pub mod scale;

pub use merge::{merge_duplicates, MergeCandidate, MergePlan, Rename};
pub use parser::{format_quantity, parse_quantity, DecimalSeparator, ParsedItem};
pub use scale::scale_ingredient;
