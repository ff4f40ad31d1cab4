//! Concrete record decoders, one module per metric family.

pub mod error_metric;
pub mod tile_metric;
