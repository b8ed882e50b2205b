//! Expression trees for media query filters.
//!
//! A filter is built bottom-up from leaves ([`Comparison`],
//! [`DateComparison`], raw text) and [`Group`]s, then collected into a
//! [`FilterExpression`] with its sort keys. Every builder call that adds a
//! leaf checks it against the active [`Dialect`](crate::Dialect) and returns
//! a [`FilterError`](crate::FilterError) instead of dropping it.
//!
//! # Example
//!
//! ```
//! use media_filter::{Dialect, FilterExpression, Group};
//!
//! let large = Group::new(Dialect::Android)
//!     .and_text("width > 1000")
//!     .and_text("height > 1000");
//! let small = Group::new(Dialect::Android)
//!     .and_text("width < 500")
//!     .and_text("height < 500");
//!
//! let mut filter = FilterExpression::new(Dialect::Android);
//! filter.add_condition(large)?.or(small)?;
//!
//! assert_eq!(
//!     filter.where_text(),
//!     "( width > 1000 AND height > 1000 ) OR ( width < 500 AND height < 500 )"
//! );
//! # Ok::<(), media_filter::FilterError>(())
//! ```

mod document;
mod expression;
mod node;
mod render;
mod validate;

pub use document::{ConditionDocument, FilterDocument, Scalar};
pub use expression::{FilterExpression, OrderByItem, RenderedFilter};
pub use node::{Comparison, Condition, DateComparison, Group, LogicalType, Node};
pub use render::Render;
pub use validate::validate;

#[cfg(test)]
mod tests;
