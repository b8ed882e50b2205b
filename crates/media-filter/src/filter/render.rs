//! Rendering of expression trees to machine and display text.
//!
//! Both forms walk the tree the same way but are computed independently:
//! the machine form is what a query engine receives, the display form is
//! for people and may diverge freely (dates, most notably).

use super::node::{Comparison, Condition, DateComparison, Group, Node};
use crate::date;
use crate::dialect::Dialect;

/// Something that can be written out as filter text.
pub trait Render {
    /// Machine form, handed to the query engine.
    fn render(&self, dialect: Dialect) -> String;

    /// Human-readable form. Never used for comparison.
    fn display(&self, dialect: Dialect) -> String;
}

/// Joins siblings, prefixing every node but the first with its logical tag.
pub(crate) fn join_nodes(nodes: &[Node], mut each: impl FnMut(&Condition) -> String) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(node.logical.keyword());
            out.push(' ');
        }
        out.push_str(&each(&node.condition));
    }
    out
}

fn leaf(column: &str, operator: Option<&str>, value: Option<&str>) -> String {
    let mut out = column.to_string();
    for segment in [operator, value].into_iter().flatten() {
        out.push(' ');
        out.push_str(segment);
    }
    out
}

impl Render for Comparison {
    fn render(&self, _dialect: Dialect) -> String {
        leaf(self.column(), self.operator(), self.value())
    }

    fn display(&self, _dialect: Dialect) -> String {
        leaf(self.column(), self.operator(), self.value())
    }
}

impl Render for DateComparison {
    fn render(&self, dialect: Dialect) -> String {
        let value = date::encode(dialect, self.column(), self.value());
        leaf(self.column(), Some(self.operator()), Some(value.as_str()))
    }

    fn display(&self, _dialect: Dialect) -> String {
        let value = date::display(self.value());
        leaf(self.column(), Some(self.operator()), Some(value.as_str()))
    }
}

impl Render for Group {
    fn render(&self, dialect: Dialect) -> String {
        format!("( {} )", join_nodes(self.children(), |c| c.render(dialect)))
    }

    fn display(&self, dialect: Dialect) -> String {
        format!("( {} )", join_nodes(self.children(), |c| c.display(dialect)))
    }
}

impl Render for Condition {
    fn render(&self, dialect: Dialect) -> String {
        match self {
            Condition::Comparison(c) => c.render(dialect),
            Condition::Date(d) => d.render(dialect),
            Condition::Text(text) => text.clone(),
            Condition::Group(g) => g.render(dialect),
        }
    }

    fn display(&self, dialect: Dialect) -> String {
        match self {
            Condition::Comparison(c) => c.display(dialect),
            Condition::Date(d) => d.display(dialect),
            Condition::Text(text) => text.clone(),
            Condition::Group(g) => g.display(dialect),
        }
    }
}

impl Group {
    /// Machine text for this group in its own dialect.
    pub fn text(&self) -> String {
        self.render(self.dialect())
    }

    /// Display text for this group in its own dialect.
    pub fn display_text(&self) -> String {
        self.display(self.dialect())
    }
}
