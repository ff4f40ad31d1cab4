//! Per-format version tables and the decoder seam concrete metric formats implement.

pub mod record;
pub mod registry;
