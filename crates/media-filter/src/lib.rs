//! Platform-aware media query filters.
//!
//! This crate builds a platform-agnostic description of a media query filter,
//! a boolean tree of column comparisons plus an ordered list of sort keys,
//! and renders it into the filter text understood by one of two query
//! dialects:
//!
//! - **Android**: a relational where clause (`width >= 200 AND datetaken > 1700000000000`)
//! - **Darwin** (iOS, macOS): a predicate expression
//!   (`pixelWidth >= 200 AND creationDate > CAST(721692800, "NSDate")`)
//!
//! Executing the query is left to the caller; the output is a where string
//! and a list of sort keys.

pub mod date;
pub mod dialect;
mod error;
pub mod filter;

pub use dialect::{CommonColumn, Dialect, Platform};
pub use error::{FilterError, FilterResult};
pub use filter::{
    Comparison, Condition, ConditionDocument, DateComparison, FilterDocument, FilterExpression,
    Group, LogicalType, Node, OrderByItem, Render, RenderedFilter,
};
