use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{headers::FormatVersion, parser::registry::FormatKind};

pub type Result<T, E = MetricsError> = std::result::Result<T, E>;

/// Every way a metrics read can fail. All of them are terminal for the read:
/// no partial collection is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed header: need {needed} bytes, file has {available}")]
    MalformedHeader { needed: usize, available: usize },

    #[error("unsupported {format} version {version}")]
    UnsupportedVersion {
        format: FormatKind,
        version: FormatVersion,
    },

    #[error("truncated metadata block: need {needed} more bytes, {available} left")]
    TruncatedMetadataBlock { needed: usize, available: usize },

    #[error(
        "{format} v{version}: header declares {declared}-byte records, layout requires {expected}"
    )]
    DeclaredRecordSizeMismatch {
        format: FormatKind,
        version: FormatVersion,
        declared: u8,
        expected: usize,
    },

    #[error(
        "{format} v{version}: {remaining} record bytes is not a multiple of record size {record_size}"
    )]
    RecordSizeMismatch {
        format: FormatKind,
        version: FormatVersion,
        record_size: usize,
        remaining: usize,
    },

    #[error("{format} v{version}: decoder needs {needed} bytes but records are {record_size}")]
    RecordLayout {
        format: FormatKind,
        version: FormatVersion,
        needed: usize,
        record_size: usize,
    },
}
