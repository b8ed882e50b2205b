//! Rendered filter output formatting.

use media_filter::{Dialect, RenderedFilter};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Formats a rendered filter as JSON.
pub fn format_rendered_json(rendered: &RenderedFilter) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rendered)
}

/// Formats a rendered filter for the terminal.
///
/// Where text is printed as-is so it can be copied; an empty filter is
/// shown as `(none)`.
pub fn format_rendered_table(rendered: &RenderedFilter, display: bool, use_colors: bool) -> String {
    let mut output = String::new();

    let label = |name: &str| {
        if use_colors {
            format!("{}", name.dimmed())
        } else {
            name.to_string()
        }
    };

    let where_text = if rendered.where_text.is_empty() {
        "(none)"
    } else {
        rendered.where_text.as_str()
    };
    output.push_str(&format!("{} {}\n", label("where:"), where_text));

    if display {
        let display_text = if rendered.display_text.is_empty() {
            "(none)"
        } else {
            rendered.display_text.as_str()
        };
        output.push_str(&format!("{} {}\n", label("display:"), display_text));
    }

    if rendered.order_by.is_empty() {
        output.push_str(&format!("{} (none)\n", label("order by:")));
    } else {
        output.push_str(&format!("{}\n", label("order by:")));
        for item in &rendered.order_by {
            let direction = if item.ascending { "asc" } else { "desc" };
            output.push_str(&format!("  {} {}\n", item.column, direction));
        }
    }

    if let Some(clause) = &rendered.sort_clause {
        output.push_str(&format!("{} {}\n", label("sort:"), clause));
    }

    output
}

/// JSON output structure for the columns command.
#[derive(Serialize)]
struct NamesOutput<'a> {
    dialect: Dialect,
    names: &'a [&'a str],
}

/// Formats a dialect table as JSON.
pub fn format_names_json(dialect: Dialect, names: &[&str]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&NamesOutput { dialect, names })
}

/// Formats a dialect table, one name per line under a title.
pub fn format_names_table(title: &str, names: &[&str], use_colors: bool) -> String {
    let mut output = String::new();
    if use_colors {
        output.push_str(&format!("{}\n", title.green().bold()));
    } else {
        output.push_str(title);
        output.push('\n');
    }
    for name in names {
        output.push_str("  ");
        output.push_str(name);
        output.push('\n');
    }
    output
}
