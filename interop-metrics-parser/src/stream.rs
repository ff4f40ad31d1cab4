use tracing::trace;

use crate::{
    error::{MetricsError, Result},
    headers::FormatVersion,
    metadata::AdapterTable,
    parser::record::RecordDecoder,
    util::ByteCursor,
};

/// Decode every remaining byte at the cursor as `record_size`-byte records.
///
/// The remainder is checked up front: a trailing partial record fails the
/// whole stream before any record is decoded.
pub fn decode_records<D: RecordDecoder>(
    decoder: &D,
    version: FormatVersion,
    record_size: usize,
    c: &mut ByteCursor<'_>,
    adapters: &AdapterTable,
) -> Result<Vec<D::Item>> {
    let remaining = c.remaining();
    if record_size == 0 || remaining % record_size != 0 {
        return Err(MetricsError::RecordSizeMismatch {
            format: decoder.kind(),
            version,
            record_size,
            remaining,
        });
    }

    let body = c.rest();
    let count = remaining / record_size;
    let mut out = Vec::with_capacity(count);
    for chunk in body.chunks_exact(record_size) {
        out.push(decoder.decode(version, chunk, adapters)?);
    }
    // Only consume once the whole stream decoded.
    c.skip_to_end();

    trace!(format = %decoder.kind(), %version, count, record_size, "decoded record stream");
    Ok(out)
}
