use core::fmt;

use crate::{
    error::{MetricsError, Result},
    headers::FormatVersion,
    metadata::AdapterTable,
    parser::{
        record::{RecordDecoder, RecordFields},
        registry::FormatKind,
    },
};

/// v3, 30 bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMetricV3 {
    pub lane: u16,
    pub tile: u16,
    pub cycle: u16,
    pub error_rate: f32,
    /// Reads with 0, 1, 2, 3 and 4 errors.
    pub reads_with_errors: [u32; 5],
}

/// v4, 12 bytes. Also the leading fields of v5 and v6.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMetricV4 {
    pub lane: u16,
    pub tile: u32,
    pub cycle: u16,
    pub error_rate: f32,
}

/// v5, 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMetricV5 {
    pub base: ErrorMetricV4,
    pub phix_adapter_rate: f32,
}

/// v6, `12 + 4 * adapters` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMetricV6 {
    pub base: ErrorMetricV4,
    /// One rate per adapter, in adapter-table order.
    pub adapter_rates: Vec<f32>,
}

/// A decoded ErrorMetricsOut record. The variant is the file's format version.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorMetric {
    V3(ErrorMetricV3),
    V4(ErrorMetricV4),
    V5(ErrorMetricV5),
    V6(ErrorMetricV6),
}

impl ErrorMetric {
    pub const fn version(&self) -> FormatVersion {
        match self {
            Self::V3(_) => FormatVersion(3),
            Self::V4(_) => FormatVersion(4),
            Self::V5(_) => FormatVersion(5),
            Self::V6(_) => FormatVersion(6),
        }
    }

    pub fn lane(&self) -> u16 {
        match self {
            Self::V3(m) => m.lane,
            Self::V4(m) => m.lane,
            Self::V5(m) => m.base.lane,
            Self::V6(m) => m.base.lane,
        }
    }

    pub fn tile(&self) -> u32 {
        match self {
            Self::V3(m) => u32::from(m.tile),
            Self::V4(m) => m.tile,
            Self::V5(m) => m.base.tile,
            Self::V6(m) => m.base.tile,
        }
    }

    pub fn cycle(&self) -> u16 {
        match self {
            Self::V3(m) => m.cycle,
            Self::V4(m) => m.cycle,
            Self::V5(m) => m.base.cycle,
            Self::V6(m) => m.base.cycle,
        }
    }

    pub fn error_rate(&self) -> f32 {
        match self {
            Self::V3(m) => m.error_rate,
            Self::V4(m) => m.error_rate,
            Self::V5(m) => m.base.error_rate,
            Self::V6(m) => m.base.error_rate,
        }
    }

    /// Per-adapter rates; empty for every version but 6.
    pub fn adapter_rates(&self) -> &[f32] {
        match self {
            Self::V6(m) => &m.adapter_rates,
            _ => &[],
        }
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} lane={} tile={} cycle={} error_rate={}",
            self.version(),
            self.lane(),
            self.tile(),
            self.cycle(),
            self.error_rate()
        )?;
        match self {
            Self::V3(m) => write!(f, " reads_with_errors={:?}", m.reads_with_errors),
            Self::V4(_) => Ok(()),
            Self::V5(m) => write!(f, " phix_adapter_rate={}", m.phix_adapter_rate),
            Self::V6(m) => write!(f, " adapter_rates={:?}", m.adapter_rates),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorMetricDecoder;

fn read_v4(f: &mut RecordFields<'_>) -> Result<ErrorMetricV4> {
    Ok(ErrorMetricV4 {
        lane: f.u16()?,
        tile: f.u32()?,
        cycle: f.u16()?,
        error_rate: f.f32()?,
    })
}

impl RecordDecoder for ErrorMetricDecoder {
    type Item = ErrorMetric;

    fn kind(&self) -> FormatKind {
        FormatKind::ErrorMetrics
    }

    fn decode(
        &self,
        version: FormatVersion,
        chunk: &[u8],
        adapters: &AdapterTable,
    ) -> Result<ErrorMetric> {
        let mut f = RecordFields::new(self.kind(), version, chunk);
        let metric = match version.get() {
            3 => {
                let lane = f.u16()?;
                let tile = f.u16()?;
                let cycle = f.u16()?;
                let error_rate = f.f32()?;
                let mut reads_with_errors = [0u32; 5];
                for n in &mut reads_with_errors {
                    *n = f.u32()?;
                }
                ErrorMetric::V3(ErrorMetricV3 {
                    lane,
                    tile,
                    cycle,
                    error_rate,
                    reads_with_errors,
                })
            }
            4 => ErrorMetric::V4(read_v4(&mut f)?),
            5 => {
                let base = read_v4(&mut f)?;
                ErrorMetric::V5(ErrorMetricV5 {
                    base,
                    phix_adapter_rate: f.f32()?,
                })
            }
            6 => {
                let base = read_v4(&mut f)?;
                let adapter_rates = (0..adapters.len())
                    .map(|_| f.f32())
                    .collect::<Result<Vec<_>>>()?;
                ErrorMetric::V6(ErrorMetricV6 {
                    base,
                    adapter_rates,
                })
            }
            _ => {
                return Err(MetricsError::UnsupportedVersion {
                    format: self.kind(),
                    version,
                });
            }
        };
        Ok(metric)
    }
}
