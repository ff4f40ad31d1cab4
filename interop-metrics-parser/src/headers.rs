use core::fmt;

use tracing::debug;

use crate::{
    constants::HEADER_LEN,
    error::{MetricsError, Result},
    util::ByteCursor,
};

/// Layout tag read from byte 0 of every InterOp file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormatVersion(pub u8);

impl FormatVersion {
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for FormatVersion {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FileHeader {
    pub version: FormatVersion, // 0
    /// Record size as written by the instrument. Checked against the
    /// registry once any adapter block has been read.
    pub declared_record_size: u8, // 1
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FileHeader {{")?;
        writeln!(f, "  version      : {}", self.version)?;
        writeln!(f, "  record_size  : {}", self.declared_record_size)?;
        write!(f, "}}")
    }
}

/// Consume the fixed header from a cursor positioned at offset 0.
///
/// The version is returned as-is; whether it is known is the registry's call.
pub fn parse_header(c: &mut ByteCursor<'_>) -> Result<FileHeader> {
    let malformed = |available| MetricsError::MalformedHeader {
        needed: HEADER_LEN,
        available,
    };
    let available = c.remaining();
    let raw = c.take(HEADER_LEN).ok_or_else(|| malformed(available))?;

    let header = FileHeader {
        version: FormatVersion(raw[0]),
        declared_record_size: raw[1],
    };
    debug!(
        version = %header.version,
        declared_record_size = header.declared_record_size,
        bytes = %hex::encode(raw),
        "parsed metrics header"
    );
    Ok(header)
}
