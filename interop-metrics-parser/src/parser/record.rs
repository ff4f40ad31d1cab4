use std::fmt::Debug;

use crate::{
    error::{MetricsError, Result},
    headers::FormatVersion,
    metadata::AdapterTable,
    parser::registry::{FormatKind, FormatSchema},
    util::ByteCursor,
};

/// Converts one fixed-size record chunk into a typed metric.
pub trait RecordDecoder: Send + Sync {
    type Item: Send + Sync + Debug;

    /// Metric family this decoder understands.
    fn kind(&self) -> FormatKind;

    /// Decode one record. `chunk` is exactly the size the registry computed
    /// for `version`; `adapters` is empty unless the version carries an
    /// adapter block.
    fn decode(
        &self,
        version: FormatVersion,
        chunk: &[u8],
        adapters: &AdapterTable,
    ) -> Result<Self::Item>;

    /// Human-readable name for the decoder.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn file_name(&self) -> &'static str {
        self.kind().file_name()
    }

    fn schema(&self) -> &'static FormatSchema {
        self.kind().schema()
    }
}

/// Field reader over a single record chunk. Running past the end means the
/// decoder and the version table disagree, reported as `RecordLayout`.
pub struct RecordFields<'a> {
    cursor: ByteCursor<'a>,
    kind: FormatKind,
    version: FormatVersion,
    record_size: usize,
}

impl<'a> RecordFields<'a> {
    pub fn new(kind: FormatKind, version: FormatVersion, chunk: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(chunk),
            kind,
            version,
            record_size: chunk.len(),
        }
    }

    fn overrun(&self, n: usize) -> MetricsError {
        MetricsError::RecordLayout {
            format: self.kind,
            version: self.version,
            needed: self.cursor.position() + n,
            record_size: self.record_size,
        }
    }

    pub fn u16(&mut self) -> Result<u16> {
        self.cursor.u16().ok_or_else(|| self.overrun(2))
    }

    pub fn u32(&mut self) -> Result<u32> {
        self.cursor.u32().ok_or_else(|| self.overrun(4))
    }

    pub fn f32(&mut self) -> Result<f32> {
        self.cursor.f32().ok_or_else(|| self.overrun(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrun_reports_layout_error() {
        let chunk = [1u8, 0, 2];
        let mut f = RecordFields::new(FormatKind::TileMetrics, FormatVersion(2), &chunk);
        assert_eq!(f.u16().unwrap(), 1);
        match f.u16() {
            Err(MetricsError::RecordLayout {
                needed,
                record_size,
                ..
            }) => {
                assert_eq!(needed, 4);
                assert_eq!(record_size, 3);
            }
            other => panic!("expected RecordLayout, got {other:?}"),
        }
    }
}
