//! Columns command implementation.
//!
//! Lists the column and operator tables of the resolved dialect.

use media_filter::Dialect;

use super::{CommandContext, Result};
use crate::output::{format_names_json, format_names_table};

/// What the columns command lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsListing {
    /// Non-date columns.
    Columns,
    /// Date columns.
    Dates,
    /// Operators.
    Operators,
}

impl ColumnsListing {
    /// Picks the listing from the command flags.
    pub fn from_flags(dates: bool, operators: bool) -> Self {
        if operators {
            ColumnsListing::Operators
        } else if dates {
            ColumnsListing::Dates
        } else {
            ColumnsListing::Columns
        }
    }

    fn title(self) -> &'static str {
        match self {
            ColumnsListing::Columns => "Columns",
            ColumnsListing::Dates => "Date columns",
            ColumnsListing::Operators => "Operators",
        }
    }

    /// Names in this listing for `dialect`, in sorted order.
    pub fn names(self, dialect: Dialect) -> Vec<&'static str> {
        let set = match self {
            ColumnsListing::Columns => dialect.other_columns(),
            ColumnsListing::Dates => dialect.date_columns(),
            ColumnsListing::Operators => dialect.operators(),
        };
        set.iter().copied().collect()
    }
}

/// Executes the columns command.
pub fn execute(ctx: &CommandContext, listing: ColumnsListing) -> Result<()> {
    let dialect = ctx.resolve_dialect(None)?;
    let names = listing.names(dialect);

    if ctx.json_output {
        println!("{}", format_names_json(dialect, &names)?);
    } else if !ctx.quiet {
        let title = format!("{} ({})", listing.title(), dialect);
        print!("{}", format_names_table(&title, &names, ctx.use_colors));
    }

    Ok(())
}
