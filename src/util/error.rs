// LogSniff - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogSniff operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogSniffError {
    /// Classifier construction failed.
    Classifier(ClassifierError),

    /// Export of scan results failed.
    Export(ExportError),
}

impl fmt::Display for LogSniffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classifier(e) => write!(f, "Classifier error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for LogSniffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Classifier(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier errors
// ---------------------------------------------------------------------------

/// Errors raised while building a classifier from its configuration.
///
/// Classification itself never fails; only an invalid rule set does.
#[derive(Debug)]
pub enum ClassifierError {
    /// A filename pattern is not a valid regular expression.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A filename pattern exceeds the maximum allowed length.
    PatternTooLong {
        pattern: String,
        length: usize,
        max_length: usize,
    },

    /// A known-location entry is empty, which would match every path.
    EmptyLocation { index: usize },
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid filename pattern '{pattern}': {source}")
            }
            Self::PatternTooLong {
                pattern,
                length,
                max_length,
            } => {
                // Only a short prefix of an oversized pattern is echoed back.
                let preview: String = pattern.chars().take(40).collect();
                write!(
                    f,
                    "Filename pattern '{preview}...' is {length} chars, \
                     exceeds maximum of {max_length}"
                )
            }
            Self::EmptyLocation { index } => {
                write!(f, "Known location #{index} is empty")
            }
        }
    }
}

impl std::error::Error for ClassifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ClassifierError> for LogSniffError {
    fn from(e: ClassifierError) -> Self {
        Self::Classifier(e)
    }
}

// ---------------------------------------------------------------------------
// Per-path I/O errors
// ---------------------------------------------------------------------------

/// An I/O failure that prevented the content sniff from reaching a decision.
///
/// Carried inside `Verdict::Unevaluable`; never returned as `Err` from the
/// public classification API.
#[derive(Debug)]
pub struct ProbeError {
    /// Which filesystem operation failed ("stat", "open", "read").
    pub operation: &'static str,
    pub source: io::Error,
}

impl ProbeError {
    pub fn new(operation: &'static str, source: io::Error) -> Self {
        Self { operation, source }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.source)
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing scan results.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => {
                write!(f, "Export I/O error '{target}': {source}")
            }
            Self::Csv { target, source } => {
                write!(f, "CSV export error '{target}': {source}")
            }
            Self::Json { target, source } => {
                write!(f, "JSON export error '{target}': {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogSniffError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
