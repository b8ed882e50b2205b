//! Error types for filter construction.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building a filter.
///
/// Everything except [`FilterError::UnsupportedPlatform`] is a recoverable
/// validation error: it is returned by the builder call that introduced the
/// offending leaf, and the tree it would have been added to is left intact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The platform identifier matches neither supported dialect.
    #[error("unsupported platform: {platform} (expected android, ios or macos)")]
    UnsupportedPlatform {
        /// The unrecognized platform identifier.
        platform: String,
    },

    /// A date column was used in a plain comparison.
    #[error("column '{column}' is a date column; use a date comparison instead")]
    DateColumnInComparison {
        /// The date column.
        column: String,
    },

    /// The column is not known to the active dialect.
    #[error("unknown column '{column}' for {dialect}{}", did_you_mean(.suggestion))]
    UnknownColumn {
        /// The rejected column name.
        column: String,
        /// Name of the active dialect.
        dialect: String,
        /// Closest known column, if any is near enough.
        suggestion: Option<String>,
    },

    /// A date comparison was built on a column that is not a date column.
    #[error("'{column}' is not a date column{}", did_you_mean(.suggestion))]
    UnknownDateColumn {
        /// The rejected column name.
        column: String,
        /// Closest known date column, if any is near enough.
        suggestion: Option<String>,
    },

    /// The operator is not accepted by the active dialect.
    #[error("operator '{operator}' is not supported by {dialect}{}", did_you_mean(.suggestion))]
    UnsupportedOperator {
        /// The rejected operator.
        operator: String,
        /// Name of the active dialect.
        dialect: String,
        /// Closest supported operator, if any is near enough.
        suggestion: Option<String>,
    },

    /// A value was supplied without an operator to compare it with.
    #[error("column '{column}' has a value but no operator")]
    ValueWithoutOperator {
        /// The column carrying the dangling value.
        column: String,
    },

    /// A binary operator was supplied without a value to compare against.
    #[error("operator '{operator}' on column '{column}' needs a value")]
    MissingValue {
        /// The column being compared.
        column: String,
        /// The operator left without an operand.
        operator: String,
    },

    /// A null check was given a value, which it cannot take.
    #[error("operator '{operator}' on column '{column}' does not take a value")]
    UnexpectedValue {
        /// The column being compared.
        column: String,
        /// The null-check operator.
        operator: String,
    },

    /// A comparison was built with an empty column name.
    #[error("column name is empty")]
    EmptyColumn,

    /// A group built for one dialect was inserted into a tree for another.
    #[error("cannot combine a {found} group with a {expected} filter")]
    DialectMismatch {
        /// Dialect of the receiving tree.
        expected: String,
        /// Dialect of the inserted group.
        found: String,
    },

    /// A filter document could not be turned into a tree.
    #[error("invalid filter document: {reason}")]
    InvalidDocument {
        /// Why the document was rejected.
        reason: String,
    },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unsupported platform error.
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        FilterError::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Creates a date-column-in-comparison error.
    pub fn date_column_in_comparison(column: impl Into<String>) -> Self {
        FilterError::DateColumnInComparison {
            column: column.into(),
        }
    }

    /// Creates an unknown column error.
    pub fn unknown_column(
        column: impl Into<String>,
        dialect: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        FilterError::UnknownColumn {
            column: column.into(),
            dialect: dialect.into(),
            suggestion,
        }
    }

    /// Creates an unknown date column error.
    pub fn unknown_date_column(column: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownDateColumn {
            column: column.into(),
            suggestion,
        }
    }

    /// Creates an unsupported operator error.
    pub fn unsupported_operator(
        operator: impl Into<String>,
        dialect: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        FilterError::UnsupportedOperator {
            operator: operator.into(),
            dialect: dialect.into(),
            suggestion,
        }
    }

    /// Creates a value-without-operator error.
    pub fn value_without_operator(column: impl Into<String>) -> Self {
        FilterError::ValueWithoutOperator {
            column: column.into(),
        }
    }

    /// Creates a missing-value error for a binary operator.
    pub fn missing_value(column: impl Into<String>, operator: impl Into<String>) -> Self {
        FilterError::MissingValue {
            column: column.into(),
            operator: operator.into(),
        }
    }

    /// Creates an unexpected-value error for a null check.
    pub fn unexpected_value(column: impl Into<String>, operator: impl Into<String>) -> Self {
        FilterError::UnexpectedValue {
            column: column.into(),
            operator: operator.into(),
        }
    }

    /// Creates an invalid document error.
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        FilterError::InvalidDocument {
            reason: reason.into(),
        }
    }

    /// Returns true for recoverable validation errors.
    ///
    /// An unsupported platform is a configuration problem, not a property
    /// of any single leaf, so it is the one variant that returns false.
    pub fn is_validation(&self) -> bool {
        !matches!(self, FilterError::UnsupportedPlatform { .. })
    }
}
