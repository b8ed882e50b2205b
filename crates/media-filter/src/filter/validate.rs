//! Dialect checks applied to a condition before it joins a tree.

use strsim::levenshtein;

use super::node::{Comparison, Condition, DateComparison};
use crate::dialect::{date_columns, is_date_column, Dialect};
use crate::error::{FilterError, FilterResult};

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Checks `condition` against `dialect`.
///
/// Raw text always passes. A nested group passes if it was built for the same
/// dialect; its own leaves were already checked when they were inserted.
pub fn validate(condition: &Condition, dialect: Dialect) -> FilterResult<()> {
    let result = match condition {
        Condition::Comparison(c) => validate_comparison(c, dialect),
        Condition::Date(d) => validate_date(d, dialect),
        Condition::Text(_) => Ok(()),
        Condition::Group(group) if group.dialect() != dialect => Err(FilterError::DialectMismatch {
            expected: dialect.name().to_string(),
            found: group.dialect().name().to_string(),
        }),
        Condition::Group(_) => Ok(()),
    };

    if let Err(ref err) = result {
        tracing::debug!(%dialect, error = %err, "Rejected filter condition");
    }
    result
}

fn validate_comparison(comparison: &Comparison, dialect: Dialect) -> FilterResult<()> {
    if comparison.skips_validation() {
        return Ok(());
    }

    let column = comparison.column();
    if column.trim().is_empty() {
        return Err(FilterError::EmptyColumn);
    }
    if is_date_column(column) {
        return Err(FilterError::date_column_in_comparison(column));
    }
    if !dialect.has_column(column) {
        let suggestion = find_similar(column, dialect.other_columns().iter().copied());
        return Err(FilterError::unknown_column(column, dialect.name(), suggestion));
    }

    match (comparison.operator(), comparison.value()) {
        (Some(operator), value) => {
            validate_operator(operator, dialect)?;
            match (dialect.is_unary_operator(operator), value.is_some()) {
                (true, true) => Err(FilterError::unexpected_value(column, operator)),
                (false, false) => Err(FilterError::missing_value(column, operator)),
                _ => Ok(()),
            }
        }
        (None, Some(_)) => Err(FilterError::value_without_operator(column)),
        (None, None) => Ok(()),
    }
}

fn validate_date(comparison: &DateComparison, dialect: Dialect) -> FilterResult<()> {
    if comparison.skips_validation() {
        return Ok(());
    }

    let column = comparison.column();
    if !is_date_column(column) {
        let suggestion = find_similar(column, date_columns().iter().copied());
        return Err(FilterError::unknown_date_column(column, suggestion));
    }
    let operator = comparison.operator();
    validate_operator(operator, dialect)?;
    // A date comparison always carries its timestamp.
    if dialect.is_unary_operator(operator) {
        return Err(FilterError::unexpected_value(column, operator));
    }
    Ok(())
}

fn validate_operator(operator: &str, dialect: Dialect) -> FilterResult<()> {
    if dialect.supports_operator(operator) {
        return Ok(());
    }
    let suggestion = find_similar(operator, dialect.operators().iter().copied());
    Err(FilterError::unsupported_operator(operator, dialect.name(), suggestion))
}

/// Finds the closest candidate to `query`, ignoring case.
///
/// Returns `None` when nothing is within [`MAX_SUGGESTION_DISTANCE`].
/// An exact case-insensitive match is returned as its canonical spelling.
fn find_similar<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance <= MAX_SUGGESTION_DISTANCE && best_match != query {
        Some(best_match.to_string())
    } else {
        None
    }
}
