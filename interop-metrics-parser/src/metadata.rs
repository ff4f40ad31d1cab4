//! Adapter preamble carried by error metrics v6.
//!
//! Layout after the file header: adapter count (u16), adapter length (u16),
//! then `count` sequences of exactly `length` bytes each.

use core::fmt;

use tracing::{debug, warn};

use crate::{
    constants::ADAPTER_BLOCK_COUNTERS_LEN,
    error::{MetricsError, Result},
    util::ByteCursor,
};

/// One adapter sequence, kept as the raw bytes found in the file.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AdapterSequence(Vec<u8>);

impl AdapterSequence {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_ascii(&self) -> bool {
        self.0.is_ascii()
    }

    /// One character per byte, each byte taken as its own code point.
    pub fn to_text(&self) -> String {
        self.0.iter().map(|&b| char::from(b)).collect()
    }
}

impl fmt::Display for AdapterSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ascii() {
            f.write_str(&self.to_text())
        } else {
            write!(f, "0x{}", hex::encode(&self.0))
        }
    }
}

/// Adapters in file order. Built once per read and only borrowed afterwards.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AdapterTable {
    element_len: u16,
    adapters: Vec<AdapterSequence>,
}

impl AdapterTable {
    pub fn new(element_len: u16, adapters: Vec<AdapterSequence>) -> Self {
        Self {
            element_len,
            adapters,
        }
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Declared byte length of every adapter.
    pub fn element_len(&self) -> u16 {
        self.element_len
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdapterSequence> {
        self.adapters.iter()
    }

    pub fn get(&self, i: usize) -> Option<&AdapterSequence> {
        self.adapters.get(i)
    }
}

fn truncated(needed: usize, c: &ByteCursor<'_>) -> MetricsError {
    MetricsError::TruncatedMetadataBlock {
        needed,
        available: c.remaining(),
    }
}

/// Read the adapter block at the cursor, consuming exactly
/// `4 + count * length` bytes.
pub fn parse_adapter_block(c: &mut ByteCursor<'_>) -> Result<AdapterTable> {
    if c.remaining() < ADAPTER_BLOCK_COUNTERS_LEN {
        return Err(truncated(ADAPTER_BLOCK_COUNTERS_LEN, c));
    }
    let count = c.u16().ok_or_else(|| truncated(2, c))?;
    let element_len = c.u16().ok_or_else(|| truncated(2, c))?;

    let mut adapters = Vec::with_capacity(count as usize);
    for i in 0..count {
        let raw = c
            .take(element_len as usize)
            .ok_or_else(|| truncated(element_len as usize, c))?;
        let seq = AdapterSequence::new(raw.to_vec());
        if !seq.is_ascii() {
            warn!(index = i, bytes = %hex::encode(raw), "adapter sequence contains non-ASCII bytes");
        }
        adapters.push(seq);
    }

    debug!(count, element_len, "parsed adapter block");
    Ok(AdapterTable::new(element_len, adapters))
}
