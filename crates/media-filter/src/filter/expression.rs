//! The filter aggregate handed to a query engine.

use serde::{Deserialize, Serialize};

use super::node::{Condition, LogicalType, Node};
use super::render::{join_nodes, Render};
use super::validate::validate;
use crate::dialect::{Dialect, Platform};
use crate::error::FilterResult;

/// A sort key. Order of keys in a filter is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByItem {
    pub column: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl OrderByItem {
    pub fn new(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            column: column.into(),
            ascending,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, false)
    }

    /// `"<column> ASC"` or `"<column> DESC"`.
    pub fn to_sql(&self) -> String {
        let direction = if self.ascending { "ASC" } else { "DESC" };
        format!("{} {}", self.column, direction)
    }
}

/// A complete filter: top-level conditions plus sort keys.
///
/// Top-level conditions render as a flat AND/OR chain without surrounding
/// parentheses; only [`Group`](super::Group)s add parentheses. Conditions
/// are validated as they are added, so a rejected leaf never reaches the
/// rendered text.
///
/// # Example
///
/// ```
/// use media_filter::{Comparison, Dialect, FilterExpression};
///
/// let mut filter = FilterExpression::new(Dialect::Android);
/// filter
///     .add_condition(Comparison::new("width", ">=", "200"))?
///     .add_condition(Comparison::new("height", ">=", "200"))?
///     .add_order_by("date_added", false);
///
/// assert_eq!(filter.where_text(), "width >= 200 AND height >= 200");
/// assert_eq!(filter.sort_clause().as_deref(), Some("date_added DESC"));
/// # Ok::<(), media_filter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    dialect: Dialect,
    conditions: Vec<Node>,
    order_by: Vec<OrderByItem>,
    raw_where: Option<String>,
}

impl FilterExpression {
    /// Creates an empty filter for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            conditions: Vec::new(),
            order_by: Vec::new(),
            raw_where: None,
        }
    }

    /// Creates an empty filter for a platform identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedPlatform`](crate::FilterError::UnsupportedPlatform)
    /// for identifiers other than android, ios and macos.
    pub fn for_platform(id: &str) -> FilterResult<Self> {
        Platform::from_id(id).map(|p| Self::new(p.dialect()))
    }

    /// Creates an empty filter for the host platform.
    pub fn for_host() -> FilterResult<Self> {
        Dialect::current().map(Self::new)
    }

    /// Validates and appends a top-level condition joined by AND.
    pub fn add_condition(&mut self, condition: impl Into<Condition>) -> FilterResult<&mut Self> {
        self.add_condition_with(condition, LogicalType::And)
    }

    /// Validates and appends a top-level condition joined by `logical`.
    ///
    /// On error the filter is left unchanged.
    pub fn add_condition_with(
        &mut self,
        condition: impl Into<Condition>,
        logical: LogicalType,
    ) -> FilterResult<&mut Self> {
        let condition = condition.into();
        validate(&condition, self.dialect)?;
        self.conditions.push(Node { logical, condition });
        Ok(self)
    }

    /// Validates and appends a condition joined by OR.
    pub fn or(&mut self, condition: impl Into<Condition>) -> FilterResult<&mut Self> {
        self.add_condition_with(condition, LogicalType::Or)
    }

    /// Appends raw text joined by `logical`. Raw text is never validated.
    pub fn add_text(&mut self, text: impl Into<String>, logical: LogicalType) -> &mut Self {
        self.conditions.push(Node {
            logical,
            condition: Condition::Text(text.into()),
        });
        self
    }

    /// Appends a sort key. Duplicates are kept.
    pub fn add_order_by(&mut self, column: impl Into<String>, ascending: bool) -> &mut Self {
        self.order_by.push(OrderByItem::new(column, ascending));
        self
    }

    /// Replaces the rendered tree with `text`, passed through verbatim.
    pub fn with_raw_where(&mut self, text: impl Into<String>) -> &mut Self {
        self.raw_where = Some(text.into());
        self
    }

    /// Removes a raw override set with [`with_raw_where`](Self::with_raw_where).
    pub fn clear_raw_where(&mut self) -> &mut Self {
        self.raw_where = None;
        self
    }

    /// The rendered filter, or an empty string for "no filter".
    pub fn where_text(&self) -> String {
        if let Some(raw) = &self.raw_where {
            return raw.clone();
        }
        let text = join_nodes(&self.conditions, |c| c.render(self.dialect));
        tracing::trace!(dialect = %self.dialect, %text, "Rendered filter");
        text
    }

    /// Human-readable rendering of the tree.
    pub fn display_text(&self) -> String {
        if let Some(raw) = &self.raw_where {
            return raw.clone();
        }
        join_nodes(&self.conditions, |c| c.display(self.dialect))
    }

    /// Sort keys in insertion order.
    pub fn order_by(&self) -> &[OrderByItem] {
        &self.order_by
    }

    /// Comma-separated sort clause for the Android dialect.
    ///
    /// Darwin takes sort keys as a list of descriptors, so this returns
    /// `None` there, as it does when no keys were added.
    pub fn sort_clause(&self) -> Option<String> {
        if self.dialect != Dialect::Android || self.order_by.is_empty() {
            return None;
        }
        Some(
            self.order_by
                .iter()
                .map(OrderByItem::to_sql)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn conditions(&self) -> &[Node] {
        &self.conditions
    }

    pub fn raw_where(&self) -> Option<&str> {
        self.raw_where.as_deref()
    }

    /// Returns true if nothing would be filtered.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.raw_where.is_none()
    }

    /// Renders everything into an owned snapshot.
    ///
    /// The snapshot shares nothing with the builder, so the builder can keep
    /// being modified after the snapshot is handed to a query engine.
    pub fn snapshot(&self) -> RenderedFilter {
        RenderedFilter {
            dialect: self.dialect,
            where_text: self.where_text(),
            display_text: self.display_text(),
            order_by: self.order_by.clone(),
            sort_clause: self.sort_clause(),
        }
    }
}

/// The rendered output of a [`FilterExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFilter {
    pub dialect: Dialect,
    pub where_text: String,
    pub display_text: String,
    pub order_by: Vec<OrderByItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_clause: Option<String>,
}
