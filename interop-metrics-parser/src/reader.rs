//! Whole-file reads: resolve the file, then header, version check, optional
//! adapter block, record size, record stream. The first failure ends the read
//! and nothing decoded so far is returned.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, debug_span};

use crate::{
    error::{MetricsError, Result},
    headers::{FileHeader, parse_header},
    metadata::{AdapterTable, parse_adapter_block},
    metrics::{error_metric::ErrorMetricDecoder, tile_metric::TileMetricDecoder},
    parser::record::RecordDecoder,
    stream::decode_records,
    util::ByteCursor,
};

/// A metrics file known to exist at construction time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MetricsFile {
    path: PathBuf,
}

impl MetricsFile {
    /// Resolve `<dir>/<file_name>`, failing now if it is not a file.
    pub fn locate(dir: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let path = dir.as_ref().join(file_name);
        if !path.is_file() {
            return Err(MetricsError::FileNotFound { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|source| MetricsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Records of one file, in file order, with the header and adapter table
/// they were decoded under.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsCollection<T> {
    header: FileHeader,
    adapters: AdapterTable,
    records: Vec<T>,
}

impl<T> MetricsCollection<T> {
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn adapters(&self) -> &AdapterTable {
        &self.adapters
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> IntoIterator for MetricsCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MetricsCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Decode a complete in-memory metrics file.
pub fn decode_metrics<D: RecordDecoder>(
    decoder: &D,
    bytes: &[u8],
) -> Result<MetricsCollection<D::Item>> {
    let mut c = ByteCursor::new(bytes);
    let header = parse_header(&mut c)?;

    // Nothing past the header is touched under an unknown layout.
    let schema = decoder.schema();
    let layout = schema.layout(header.version)?;

    let adapters = if layout.adapter_block {
        parse_adapter_block(&mut c)?
    } else {
        AdapterTable::default()
    };

    let record_size = schema.expected_record_size(header.version, &adapters)?;
    if usize::from(header.declared_record_size) != record_size {
        return Err(MetricsError::DeclaredRecordSizeMismatch {
            format: schema.kind,
            version: header.version,
            declared: header.declared_record_size,
            expected: record_size,
        });
    }

    let records = decode_records(decoder, header.version, record_size, &mut c, &adapters)?;
    debug!(
        format = %schema.kind,
        version = %header.version,
        records = records.len(),
        "decoded metrics file"
    );
    Ok(MetricsCollection {
        header,
        adapters,
        records,
    })
}

/// Reader for one metric family inside an InterOp directory.
#[derive(Debug)]
pub struct MetricsReader<D> {
    file: MetricsFile,
    decoder: D,
}

pub type ErrorMetricsReader = MetricsReader<ErrorMetricDecoder>;
pub type TileMetricsReader = MetricsReader<TileMetricDecoder>;

impl<D: RecordDecoder + Default> MetricsReader<D> {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_decoder(dir, D::default())
    }
}

impl<D: RecordDecoder> MetricsReader<D> {
    pub fn with_decoder(dir: impl AsRef<Path>, decoder: D) -> Result<Self> {
        let file = MetricsFile::locate(dir, decoder.file_name())?;
        Ok(Self { file, decoder })
    }

    pub fn name(&self) -> &'static str {
        self.decoder.name()
    }

    pub fn file(&self) -> &MetricsFile {
        &self.file
    }

    /// Read and decode the whole file. Each call re-reads from disk.
    pub fn read(&self) -> Result<MetricsCollection<D::Item>> {
        let _span = debug_span!(
            "read_metrics",
            format = self.decoder.name(),
            path = %self.file.path().display()
        )
        .entered();
        let bytes = self.file.read_bytes()?;
        decode_metrics(&self.decoder, &bytes)
    }
}
