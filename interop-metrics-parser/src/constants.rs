/// Every InterOp file starts with a version byte followed by a record-size byte.
pub const HEADER_LEN: usize = 2;

/// Adapter preamble counters: adapter count (u16) and adapter length (u16).
pub const ADAPTER_BLOCK_COUNTERS_LEN: usize = 4;

pub const ERROR_METRICS_NAME: &str = "ErrorMetricsOut";
pub const ERROR_METRICS_FILE: &str = "ErrorMetricsOut.bin";

pub const TILE_METRICS_NAME: &str = "TileMetricsOut";
pub const TILE_METRICS_FILE: &str = "TileMetricsOut.bin";
