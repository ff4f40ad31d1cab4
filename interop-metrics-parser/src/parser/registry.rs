use core::fmt;
use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    constants::{ERROR_METRICS_FILE, ERROR_METRICS_NAME, TILE_METRICS_FILE, TILE_METRICS_NAME},
    error::{MetricsError, Result},
    headers::FormatVersion,
    metadata::AdapterTable,
};

/// Metric family. Each family owns its own version table, so version numbers
/// never collide across families.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FormatKind {
    ErrorMetrics,
    TileMetrics,
}

impl FormatKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ErrorMetrics => ERROR_METRICS_NAME,
            Self::TileMetrics => TILE_METRICS_NAME,
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ErrorMetrics => ERROR_METRICS_FILE,
            Self::TileMetrics => TILE_METRICS_FILE,
        }
    }

    pub fn schema(self) -> &'static FormatSchema {
        match self {
            Self::ErrorMetrics => &ERROR_METRICS,
            Self::TileMetrics => &TILE_METRICS,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record geometry of one format version.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VersionLayout {
    pub version: FormatVersion,
    pub base_record_size: usize,
    /// Bytes each adapter adds to every record.
    pub per_adapter_size: usize,
    /// An adapter block sits between the header and the records.
    pub adapter_block: bool,
}

impl VersionLayout {
    pub const fn record_size(&self, adapter_count: usize) -> usize {
        self.base_record_size + self.per_adapter_size * adapter_count
    }
}

#[derive(Debug)]
pub struct FormatSchema {
    pub kind: FormatKind,
    layouts: &'static [VersionLayout],
}

impl FormatSchema {
    pub fn known_versions(&self) -> BTreeSet<FormatVersion> {
        self.layouts.iter().map(|l| l.version).collect()
    }

    pub fn is_known(&self, version: FormatVersion) -> bool {
        self.layouts.iter().any(|l| l.version == version)
    }

    pub fn layout(&self, version: FormatVersion) -> Result<&VersionLayout> {
        self.layouts
            .iter()
            .find(|l| l.version == version)
            .ok_or_else(|| MetricsError::UnsupportedVersion {
                format: self.kind,
                version,
            })
    }

    /// Effective record size once the adapter block (empty for most
    /// versions) is known.
    pub fn expected_record_size(
        &self,
        version: FormatVersion,
        adapters: &AdapterTable,
    ) -> Result<usize> {
        let layout = self.layout(version)?;
        let size = layout.record_size(adapters.len());
        debug!(format = %self.kind, %version, adapters = adapters.len(), size, "record size");
        Ok(size)
    }
}

static ERROR_METRICS: FormatSchema = FormatSchema {
    kind: FormatKind::ErrorMetrics,
    layouts: &[
        VersionLayout {
            version: FormatVersion(3),
            base_record_size: 30,
            per_adapter_size: 0,
            adapter_block: false,
        },
        VersionLayout {
            version: FormatVersion(4),
            base_record_size: 12,
            per_adapter_size: 0,
            adapter_block: false,
        },
        VersionLayout {
            version: FormatVersion(5),
            base_record_size: 16,
            per_adapter_size: 0,
            adapter_block: false,
        },
        VersionLayout {
            version: FormatVersion(6),
            base_record_size: 12,
            per_adapter_size: 4,
            adapter_block: true,
        },
    ],
};

static TILE_METRICS: FormatSchema = FormatSchema {
    kind: FormatKind::TileMetrics,
    layouts: &[VersionLayout {
        version: FormatVersion(2),
        base_record_size: 10,
        per_adapter_size: 0,
        adapter_block: false,
    }],
};

pub fn known_versions(kind: FormatKind) -> BTreeSet<FormatVersion> {
    kind.schema().known_versions()
}

pub fn expected_record_size(
    kind: FormatKind,
    version: FormatVersion,
    adapters: &AdapterTable,
) -> Result<usize> {
    kind.schema().expected_record_size(version, adapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AdapterSequence;
    use pretty_assertions::assert_eq;

    fn adapters(n: usize) -> AdapterTable {
        AdapterTable::new(
            4,
            (0..n).map(|_| AdapterSequence::new(b"ACGT".to_vec())).collect(),
        )
    }

    #[test]
    fn error_metric_versions() {
        let v: Vec<u8> = known_versions(FormatKind::ErrorMetrics)
            .into_iter()
            .map(FormatVersion::get)
            .collect();
        assert_eq!(v, vec![3, 4, 5, 6]);
    }

    #[test]
    fn fixed_sizes_ignore_adapters() {
        let none = AdapterTable::default();
        for (v, size) in [(3, 30), (4, 12), (5, 16)] {
            assert_eq!(
                expected_record_size(FormatKind::ErrorMetrics, FormatVersion(v), &none).unwrap(),
                size
            );
        }
    }

    #[test]
    fn version_6_grows_with_adapter_count() {
        for n in [0usize, 1, 2, 5] {
            assert_eq!(
                expected_record_size(FormatKind::ErrorMetrics, FormatVersion(6), &adapters(n))
                    .unwrap(),
                12 + 4 * n
            );
        }
        assert!(
            FormatKind::ErrorMetrics
                .schema()
                .layout(FormatVersion(6))
                .unwrap()
                .adapter_block
        );
    }

    #[test]
    fn families_do_not_share_versions() {
        assert!(FormatKind::TileMetrics.schema().is_known(FormatVersion(2)));
        assert!(!FormatKind::ErrorMetrics.schema().is_known(FormatVersion(2)));
        assert!(!FormatKind::TileMetrics.schema().is_known(FormatVersion(3)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = expected_record_size(
            FormatKind::ErrorMetrics,
            FormatVersion(99),
            &AdapterTable::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MetricsError::UnsupportedVersion {
                format: FormatKind::ErrorMetrics,
                version: FormatVersion(99),
            }
        ));
    }
}
