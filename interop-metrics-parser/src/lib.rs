pub mod constants;
pub mod error;
pub mod headers;
pub mod metadata;
pub mod metrics;
pub mod parser;
pub mod reader;
pub mod stream;
pub mod util;

pub use error::{MetricsError, Result};
pub use reader::{ErrorMetricsReader, MetricsCollection, MetricsReader, TileMetricsReader};
