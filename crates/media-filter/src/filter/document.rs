//! Serializable filter documents.
//!
//! A [`FilterDocument`] describes a filter as plain data (JSON, TOML, ...).
//! Building it goes through the same validated builder calls a program
//! would make, so a document can never smuggle an invalid leaf into a tree.
//!
//! ```json
//! {
//!   "platform": "android",
//!   "where": [
//!     { "type": "comparison", "column": "width", "operator": ">=", "value": 200 },
//!     { "type": "group", "logical": "or", "children": [
//!       { "type": "date", "column": "date_added", "operator": ">", "value": "2024-01-01T00:00:00Z" }
//!     ]}
//!   ],
//!   "order_by": [{ "column": "date_added", "ascending": false }]
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::expression::{FilterExpression, OrderByItem};
use super::node::{Comparison, Condition, DateComparison, Group, LogicalType};
use crate::dialect::{Dialect, Platform};
use crate::error::{FilterError, FilterResult};

/// A filter described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDocument {
    /// Platform the document was written for, if it names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Top-level conditions.
    #[serde(default, rename = "where")]
    pub conditions: Vec<ConditionDocument>,

    /// Sort keys.
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,

    /// Verbatim where text replacing the conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_where: Option<String>,
}

/// One node of a [`FilterDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionDocument {
    Comparison {
        column: String,
        #[serde(default)]
        operator: Option<String>,
        #[serde(default)]
        value: Option<Scalar>,
        #[serde(default)]
        logical: LogicalType,
        #[serde(default)]
        skip_validation: bool,
    },
    Date {
        column: String,
        operator: String,
        value: DateTime<Utc>,
        #[serde(default)]
        logical: LogicalType,
        #[serde(default)]
        skip_validation: bool,
    },
    Text {
        text: String,
        #[serde(default)]
        logical: LogicalType,
    },
    Group {
        #[serde(default)]
        children: Vec<ConditionDocument>,
        #[serde(default)]
        logical: LogicalType,
    },
}

/// A comparison value as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, kept exact instead of widened to a float.
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl ConditionDocument {
    fn logical(&self) -> LogicalType {
        match self {
            ConditionDocument::Comparison { logical, .. }
            | ConditionDocument::Date { logical, .. }
            | ConditionDocument::Text { logical, .. }
            | ConditionDocument::Group { logical, .. } => *logical,
        }
    }

    /// Builds the condition, validating nested leaves as groups are filled.
    fn build(&self, dialect: Dialect) -> FilterResult<Condition> {
        let condition = match self {
            ConditionDocument::Comparison {
                column,
                operator,
                value,
                skip_validation,
                ..
            } => {
                let comparison = Comparison::from_parts(
                    column.as_str(),
                    operator.clone(),
                    value.as_ref().map(Scalar::to_string),
                );
                if *skip_validation {
                    comparison.skip_validation().into()
                } else {
                    comparison.into()
                }
            }
            ConditionDocument::Date {
                column,
                operator,
                value,
                skip_validation,
                ..
            } => {
                let comparison = DateComparison::new(column.as_str(), operator.as_str(), *value);
                if *skip_validation {
                    comparison.skip_validation().into()
                } else {
                    comparison.into()
                }
            }
            ConditionDocument::Text { text, .. } => Condition::text(text.as_str()),
            ConditionDocument::Group { children, .. } => {
                let mut group = Group::new(dialect);
                for child in children {
                    group.push(child.build(dialect)?, child.logical())?;
                }
                group.into()
            }
        };
        Ok(condition)
    }
}

impl FilterDocument {
    /// Parses a JSON document.
    pub fn from_json(text: &str) -> FilterResult<Self> {
        serde_json::from_str(text).map_err(|e| FilterError::invalid_document(e.to_string()))
    }

    /// Resolves the document's own platform, if it names one.
    pub fn platform(&self) -> FilterResult<Option<Platform>> {
        self.platform.as_deref().map(Platform::from_id).transpose()
    }

    /// Builds a filter for `dialect`.
    ///
    /// Fails on the first condition rejected by the dialect.
    pub fn build(&self, dialect: Dialect) -> FilterResult<FilterExpression> {
        let mut filter = FilterExpression::new(dialect);
        for condition in &self.conditions {
            filter.add_condition_with(condition.build(dialect)?, condition.logical())?;
        }
        for item in &self.order_by {
            filter.add_order_by(item.column.as_str(), item.ascending);
        }
        if let Some(raw) = &self.raw_where {
            filter.with_raw_where(raw.as_str());
        }
        Ok(filter)
    }

    /// Builds a filter for the platform named in the document.
    pub fn build_for_own_platform(&self) -> FilterResult<FilterExpression> {
        match self.platform()? {
            Some(platform) => self.build(platform.dialect()),
            None => Err(FilterError::invalid_document("document does not name a platform")),
        }
    }
}
