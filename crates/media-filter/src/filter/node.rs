//! Expression tree nodes.
//!
//! A filter is a tree of [`Condition`]s. Leaves are [`Comparison`]s,
//! [`DateComparison`]s and raw text; inner nodes are [`Group`]s. Each child
//! of a group carries a [`LogicalType`] telling how it joins the child before
//! it. The tag on the first child is kept but never rendered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::validate;
use crate::dialect::Dialect;
use crate::error::FilterResult;

/// How a node joins the node immediately preceding it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    #[default]
    And,
    Or,
}

impl LogicalType {
    /// The keyword placed between two siblings.
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalType::And => "AND",
            LogicalType::Or => "OR",
        }
    }
}

/// A column comparison such as `width >= 200`.
///
/// Operator and value are both optional so that unary forms
/// (`_data IS NULL`) and bare boolean columns (`isFavorite`) can be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    column: String,
    operator: Option<String>,
    value: Option<String>,
    skip_validation: bool,
}

impl Comparison {
    /// Creates a binary comparison.
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::from_parts(column, Some(operator.into()), Some(value.into()))
    }

    /// Creates a comparison from optional parts.
    pub fn from_parts(
        column: impl Into<String>,
        operator: Option<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
            skip_validation: false,
        }
    }

    /// Creates a comparison with an operator and no value.
    pub fn unary(column: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::from_parts(column, Some(operator.into()), None)
    }

    /// Creates a null check using the dialect's own null token.
    pub fn is_null(dialect: Dialect, column: impl Into<String>) -> Self {
        Self::unary(column, dialect.null_operator())
    }

    /// Creates a non-null check using the dialect's own token.
    pub fn is_not_null(dialect: Dialect, column: impl Into<String>) -> Self {
        Self::unary(column, dialect.not_null_operator())
    }

    /// Disables dialect checks for this leaf.
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn skips_validation(&self) -> bool {
        self.skip_validation
    }
}

/// A comparison against a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateComparison {
    column: String,
    operator: String,
    value: DateTime<Utc>,
    skip_validation: bool,
}

impl DateComparison {
    /// Creates a date comparison.
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: DateTime<Utc>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value,
            skip_validation: false,
        }
    }

    /// Disables dialect checks for this leaf.
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &DateTime<Utc> {
        &self.value
    }

    pub fn skips_validation(&self) -> bool {
        self.skip_validation
    }
}

/// Any node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Comparison(Comparison),
    Date(DateComparison),
    /// Verbatim text. Never validated.
    Text(String),
    Group(Group),
}

impl Condition {
    /// Creates a raw text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Condition::Text(text.into())
    }
}

impl From<Comparison> for Condition {
    fn from(value: Comparison) -> Self {
        Condition::Comparison(value)
    }
}

impl From<DateComparison> for Condition {
    fn from(value: DateComparison) -> Self {
        Condition::Date(value)
    }
}

impl From<Group> for Condition {
    fn from(value: Group) -> Self {
        Condition::Group(value)
    }
}

/// A condition together with the tag joining it to its previous sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) logical: LogicalType,
    pub(crate) condition: Condition,
}

impl Node {
    pub fn logical(&self) -> LogicalType {
        self.logical
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

/// A parenthesized, ordered list of conditions.
///
/// A group is bound to a dialect at creation; every leaf is checked against
/// it when inserted, and nested groups must share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    dialect: Dialect,
    children: Vec<Node>,
}

impl Group {
    /// Creates an empty group for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            children: Vec::new(),
        }
    }

    /// Validates and appends `condition`, tagging it with `logical`.
    ///
    /// On error the group is left unchanged.
    pub fn push(
        &mut self,
        condition: impl Into<Condition>,
        logical: LogicalType,
    ) -> FilterResult<()> {
        let condition = condition.into();
        validate(&condition, self.dialect)?;
        self.children.push(Node { logical, condition });
        Ok(())
    }

    /// Validates and appends `condition` joined by `logical`.
    pub fn add(mut self, condition: impl Into<Condition>, logical: LogicalType) -> FilterResult<Self> {
        self.push(condition, logical)?;
        Ok(self)
    }

    /// Validates and appends `condition` joined by AND.
    pub fn and(self, condition: impl Into<Condition>) -> FilterResult<Self> {
        self.add(condition, LogicalType::And)
    }

    /// Validates and appends `condition` joined by OR.
    pub fn or(self, condition: impl Into<Condition>) -> FilterResult<Self> {
        self.add(condition, LogicalType::Or)
    }

    /// Appends raw text joined by AND.
    pub fn and_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text, LogicalType::And);
        self
    }

    /// Appends raw text joined by OR.
    pub fn or_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text, LogicalType::Or);
        self
    }

    fn push_text(&mut self, text: impl Into<String>, logical: LogicalType) {
        self.children.push(Node {
            logical,
            condition: Condition::Text(text.into()),
        });
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
