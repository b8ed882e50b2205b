//! Render and check command implementations.
//!
//! Both commands load a filter document, resolve the target dialect and build
//! the document through the validated builder. `render` prints the result;
//! `check` only reports whether the build succeeded.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use media_filter::{FilterDocument, FilterExpression};

use super::{CommandContext, Result};
use crate::output::{format_rendered_json, format_rendered_table};

/// Options for the render command.
pub struct RenderOptions<'a> {
    /// Document path, or `-` for stdin.
    pub file: &'a Path,
    /// Print display text as well.
    pub display: bool,
}

/// Loads a filter document from `path`.
///
/// Files ending in `.toml` are parsed as TOML; anything else, including
/// stdin (`-`), as JSON.
pub fn load_document(path: &Path) -> Result<FilterDocument> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(FilterDocument::from_json(&text)?);
    }

    let text = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        Ok(toml::from_str(&text)?)
    } else {
        Ok(FilterDocument::from_json(&text)?)
    }
}

/// Loads and builds the document at `path`.
fn build(ctx: &CommandContext, path: &Path) -> Result<FilterExpression> {
    let document = load_document(path)?;
    let dialect = ctx.resolve_dialect(document.platform.as_deref())?;
    tracing::debug!(%dialect, path = %path.display(), "Building filter document");
    Ok(document.build(dialect)?)
}

/// Executes the render command.
pub fn execute(ctx: &CommandContext, opts: &RenderOptions) -> Result<()> {
    let filter = build(ctx, opts.file)?;
    let rendered = filter.snapshot();

    if ctx.json_output {
        println!("{}", format_rendered_json(&rendered)?);
    } else if !ctx.quiet {
        let display = opts.display || ctx.display_by_default;
        print!("{}", format_rendered_table(&rendered, display, ctx.use_colors));
    }

    Ok(())
}

/// Executes the check command.
pub fn execute_check(ctx: &CommandContext, path: &Path) -> Result<()> {
    let filter = build(ctx, path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "ok",
            "dialect": filter.dialect(),
            "conditions": filter.conditions().len(),
            "order_by": filter.order_by().len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("ok");
    }

    Ok(())
}
