//! Dialect registry: per-platform operator and column tables.
//!
//! Two query dialects are supported:
//!
//! - [`Dialect::Android`] renders a relational "where clause" for a
//!   MediaStore-style content resolver (`width >= 200 AND _size < 1024`).
//! - [`Dialect::Darwin`] renders a predicate expression for a PhotoKit-style
//!   fetch (`pixelWidth >= 200 AND creationDate > CAST(...)`), used on both
//!   iOS and macOS.
//!
//! The tables are pure functions of the dialect; they are built on first use
//! and shared for the rest of the process.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// Date columns, independent of platform.
const DATE_COLUMNS: &[&str] = &[
    "date_added",
    "date_modified",
    "datetaken",
    "date_expires",
    "creationDate",
    "modificationDate",
];

/// The one date column stored in milliseconds rather than seconds.
pub(crate) const MILLISECOND_DATE_COLUMN: &str = "datetaken";

const ANDROID_OPERATORS: &[&str] = &[
    "=",
    "==",
    "!=",
    "<>",
    ">",
    ">=",
    "<",
    "<=",
    "LIKE",
    "NOT LIKE",
    "GLOB",
    "IN",
    "NOT IN",
    "BETWEEN",
    "NOT BETWEEN",
    "IS",
    "IS NOT",
    "IS NULL",
    "IS NOT NULL",
];

const DARWIN_OPERATORS: &[&str] = &[
    "=",
    "==",
    "!=",
    "<>",
    ">",
    ">=",
    "=>",
    "<",
    "<=",
    "=<",
    "BEGINSWITH",
    "ENDSWITH",
    "CONTAINS",
    "LIKE",
    "MATCHES",
    "IN",
    "BETWEEN",
    "== nil",
    "!= nil",
];

const ANDROID_COLUMNS: &[&str] = &[
    "_id",
    "_data",
    "_display_name",
    "_size",
    "title",
    "mime_type",
    "media_type",
    "relative_path",
    "bucket_id",
    "bucket_display_name",
    "width",
    "height",
    "duration",
    "orientation",
    "is_favorite",
    "is_pending",
    "is_trashed",
    "owner_package_name",
    "album",
    "artist",
];

const DARWIN_COLUMNS: &[&str] = &[
    "localIdentifier",
    "mediaType",
    "mediaSubtypes",
    "sourceType",
    "pixelWidth",
    "pixelHeight",
    "duration",
    "isFavorite",
    "isHidden",
    "burstIdentifier",
    "representsBurst",
    "hasAdjustments",
    "playbackStyle",
];

/// A platform the filter can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Macos,
}

impl Platform {
    /// Resolves a platform identifier such as `"android"` or `"macos"`.
    ///
    /// Matching is case-insensitive; `"darwin"` and `"macosx"` are accepted
    /// as aliases for macOS.
    pub fn from_id(id: &str) -> FilterResult<Self> {
        match id.trim().to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "macos" | "macosx" | "darwin" => Ok(Platform::Macos),
            _ => Err(FilterError::unsupported_platform(id)),
        }
    }

    /// Returns the platform this process is running on.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedPlatform`] on any host other than
    /// Android, iOS or macOS.
    pub fn host() -> FilterResult<Self> {
        Self::from_id(std::env::consts::OS)
    }

    /// Returns the dialect used on this platform.
    pub fn dialect(self) -> Dialect {
        match self {
            Platform::Android => Dialect::Android,
            Platform::Ios | Platform::Macos => Dialect::Darwin,
        }
    }

    /// Returns the lowercase identifier for this platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Macos => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

/// One of the two supported query-text grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Relational where-clause dialect.
    Android,
    /// Predicate-expression dialect shared by iOS and macOS.
    Darwin,
}

struct DialectTables {
    operators: BTreeSet<&'static str>,
    other_columns: BTreeSet<&'static str>,
}

impl DialectTables {
    fn build(operators: &[&'static str], columns: &[&'static str]) -> Self {
        Self {
            operators: operators.iter().copied().collect(),
            other_columns: columns
                .iter()
                .copied()
                .filter(|c| !DATE_COLUMNS.contains(c))
                .collect(),
        }
    }
}

static ANDROID_TABLES: OnceLock<DialectTables> = OnceLock::new();
static DARWIN_TABLES: OnceLock<DialectTables> = OnceLock::new();
static DATE_COLUMN_SET: OnceLock<BTreeSet<&'static str>> = OnceLock::new();
static HOST_DIALECT: OnceLock<FilterResult<Dialect>> = OnceLock::new();

impl Dialect {
    /// Resolves the dialect for a platform identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedPlatform`] if the identifier names
    /// neither supported platform. There is no fallback dialect.
    pub fn from_platform_id(id: &str) -> FilterResult<Self> {
        Platform::from_id(id).map(Platform::dialect)
    }

    /// Returns the dialect of the host platform.
    ///
    /// The lookup happens once per process; later calls return the cached
    /// answer, including a cached [`FilterError::UnsupportedPlatform`].
    pub fn current() -> FilterResult<Self> {
        HOST_DIALECT
            .get_or_init(|| {
                let resolved = Platform::host().map(Platform::dialect);
                tracing::debug!(os = std::env::consts::OS, ?resolved, "Resolved host dialect");
                resolved
            })
            .clone()
    }

    fn tables(self) -> &'static DialectTables {
        match self {
            Dialect::Android => ANDROID_TABLES
                .get_or_init(|| DialectTables::build(ANDROID_OPERATORS, ANDROID_COLUMNS)),
            Dialect::Darwin => {
                DARWIN_TABLES.get_or_init(|| DialectTables::build(DARWIN_OPERATORS, DARWIN_COLUMNS))
            }
        }
    }

    /// Operators accepted by this dialect.
    pub fn operators(self) -> &'static BTreeSet<&'static str> {
        &self.tables().operators
    }

    /// Non-date columns accepted by this dialect.
    pub fn other_columns(self) -> &'static BTreeSet<&'static str> {
        &self.tables().other_columns
    }

    /// Date columns. This set is the same for every dialect.
    pub fn date_columns(self) -> &'static BTreeSet<&'static str> {
        date_columns()
    }

    /// Returns true if `operator` is accepted by this dialect.
    pub fn supports_operator(self, operator: &str) -> bool {
        self.operators().contains(operator)
    }

    /// Returns true if `operator` is a null check, which takes no value.
    ///
    /// Every other operator of the dialect is binary and needs one.
    pub fn is_unary_operator(self, operator: &str) -> bool {
        operator == self.null_operator() || operator == self.not_null_operator()
    }

    /// Returns true if `column` is a non-date column of this dialect.
    pub fn has_column(self, column: &str) -> bool {
        self.other_columns().contains(column)
    }

    /// The token testing a column for null.
    pub fn null_operator(self) -> &'static str {
        match self {
            Dialect::Android => "IS NULL",
            Dialect::Darwin => "== nil",
        }
    }

    /// The token testing a column for non-null.
    pub fn not_null_operator(self) -> &'static str {
        match self {
            Dialect::Android => "IS NOT NULL",
            Dialect::Darwin => "!= nil",
        }
    }

    /// Human-readable dialect name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Android => "Android",
            Dialect::Darwin => "Darwin",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The universal date column set.
pub fn date_columns() -> &'static BTreeSet<&'static str> {
    DATE_COLUMN_SET.get_or_init(|| DATE_COLUMNS.iter().copied().collect())
}

/// Returns true if `column` is one of the universal date columns.
pub fn is_date_column(column: &str) -> bool {
    date_columns().contains(column)
}

/// Columns that exist under different names on each platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommonColumn {
    Id,
    Title,
    MediaType,
    Width,
    Height,
    Duration,
    Favorite,
    CreatedDate,
    ModifiedDate,
}

impl CommonColumn {
    /// Native column name in `dialect`.
    ///
    /// Darwin has no title column; the local identifier is the closest
    /// stable text key, and `Id` maps there too.
    pub fn name(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (CommonColumn::Id, Dialect::Android) => "_id",
            (CommonColumn::Title, Dialect::Android) => "title",
            (CommonColumn::MediaType, Dialect::Android) => "media_type",
            (CommonColumn::Width, Dialect::Android) => "width",
            (CommonColumn::Height, Dialect::Android) => "height",
            (CommonColumn::Duration, Dialect::Android) => "duration",
            (CommonColumn::Favorite, Dialect::Android) => "is_favorite",
            (CommonColumn::CreatedDate, Dialect::Android) => "date_added",
            (CommonColumn::ModifiedDate, Dialect::Android) => "date_modified",
            (CommonColumn::Id | CommonColumn::Title, Dialect::Darwin) => "localIdentifier",
            (CommonColumn::MediaType, Dialect::Darwin) => "mediaType",
            (CommonColumn::Width, Dialect::Darwin) => "pixelWidth",
            (CommonColumn::Height, Dialect::Darwin) => "pixelHeight",
            (CommonColumn::Duration, Dialect::Darwin) => "duration",
            (CommonColumn::Favorite, Dialect::Darwin) => "isFavorite",
            (CommonColumn::CreatedDate, Dialect::Darwin) => "creationDate",
            (CommonColumn::ModifiedDate, Dialect::Darwin) => "modificationDate",
        }
    }

    /// Returns true for the date-typed columns.
    pub fn is_date(self) -> bool {
        matches!(self, CommonColumn::CreatedDate | CommonColumn::ModifiedDate)
    }
}
