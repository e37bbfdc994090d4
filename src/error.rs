//! Error types
//!
//! `DomainError` covers degenerate math inside the simulation; `StartupError`
//! covers everything that can go wrong before the first frame runs.

use std::fmt;
use std::path::PathBuf;

/// A vector operation that would divide by a zero length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainError {
    ZeroLength { op: &'static str },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLength { op } => write!(f, "{op}: division by zero-length vector"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Fatal errors raised while resolving assets and configuration.
#[derive(Debug)]
pub enum StartupError {
    MissingAsset { path: PathBuf },
    Io { path: PathBuf, source: std::io::Error },
    Config { path: PathBuf, message: String },
    InvalidTuning { field: &'static str, reason: String },
}

impl StartupError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTuning {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset { path } => write!(f, "missing asset: {}", path.display()),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Config { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
