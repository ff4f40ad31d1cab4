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

/// What a TileMetricsOut record measures. Reads are 1-based.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TileMetricCode {
    ClusterDensity,
    ClusterDensityPf,
    ClusterCount,
    ClusterCountPf,
    Phasing { read: u16 },
    Prephasing { read: u16 },
    PercentAligned { read: u16 },
    ControlLane,
    Other(u16),
}

impl From<u16> for TileMetricCode {
    fn from(code: u16) -> Self {
        match code {
            100 => Self::ClusterDensity,
            101 => Self::ClusterDensityPf,
            102 => Self::ClusterCount,
            103 => Self::ClusterCountPf,
            200..=299 if code % 2 == 0 => Self::Phasing {
                read: (code - 200) / 2 + 1,
            },
            200..=299 => Self::Prephasing {
                read: (code - 201) / 2 + 1,
            },
            300..=399 => Self::PercentAligned {
                read: code - 300 + 1,
            },
            400 => Self::ControlLane,
            x => Self::Other(x),
        }
    }
}

impl TileMetricCode {
    /// Return the on-disk metric code. A hand-built read 0 encodes as read 1.
    pub const fn code(self) -> u16 {
        match self {
            Self::ClusterDensity => 100,
            Self::ClusterDensityPf => 101,
            Self::ClusterCount => 102,
            Self::ClusterCountPf => 103,
            Self::Phasing { read } => 200 + read.saturating_sub(1) * 2,
            Self::Prephasing { read } => 201 + read.saturating_sub(1) * 2,
            Self::PercentAligned { read } => 300 + read.saturating_sub(1),
            Self::ControlLane => 400,
            Self::Other(x) => x,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClusterDensity => "cluster density",
            Self::ClusterDensityPf => "cluster density pf",
            Self::ClusterCount => "cluster count",
            Self::ClusterCountPf => "cluster count pf",
            Self::Phasing { .. } => "phasing",
            Self::Prephasing { .. } => "prephasing",
            Self::PercentAligned { .. } => "percent aligned",
            Self::ControlLane => "control lane",
            Self::Other(_) => "other",
        }
    }
}

impl fmt::Display for TileMetricCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phasing { read } | Self::Prephasing { read } | Self::PercentAligned { read } => {
                write!(f, "{} (read {read})", self.as_str())
            }
            Self::Other(x) => write!(f, "other ({x})"),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// TileMetricsOut v2 record, 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMetric {
    pub lane: u16,
    pub tile: u16,
    pub code: TileMetricCode,
    pub value: f32,
}

impl fmt::Display for TileMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lane={} tile={} {}={}",
            self.lane, self.tile, self.code, self.value
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TileMetricDecoder;

impl RecordDecoder for TileMetricDecoder {
    type Item = TileMetric;

    fn kind(&self) -> FormatKind {
        FormatKind::TileMetrics
    }

    fn decode(
        &self,
        version: FormatVersion,
        chunk: &[u8],
        _adapters: &AdapterTable,
    ) -> Result<TileMetric> {
        if version != FormatVersion(2) {
            return Err(MetricsError::UnsupportedVersion {
                format: self.kind(),
                version,
            });
        }
        let mut f = RecordFields::new(self.kind(), version, chunk);
        Ok(TileMetric {
            lane: f.u16()?,
            tile: f.u16()?,
            code: TileMetricCode::from(f.u16()?),
            value: f.f32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_codes() {
        assert_eq!(TileMetricCode::from(100), TileMetricCode::ClusterDensity);
        assert_eq!(TileMetricCode::from(103), TileMetricCode::ClusterCountPf);
        assert_eq!(TileMetricCode::from(200), TileMetricCode::Phasing { read: 1 });
        assert_eq!(TileMetricCode::from(203), TileMetricCode::Prephasing { read: 2 });
        assert_eq!(
            TileMetricCode::from(301),
            TileMetricCode::PercentAligned { read: 2 }
        );
        assert_eq!(TileMetricCode::from(400), TileMetricCode::ControlLane);
        assert_eq!(TileMetricCode::from(7), TileMetricCode::Other(7));
    }

    #[test]
    fn code_is_inverse_of_from() {
        for code in [100u16, 101, 102, 103, 200, 201, 214, 215, 300, 303, 400, 999] {
            assert_eq!(TileMetricCode::from(code).code(), code);
        }
    }

    #[test]
    fn read_zero_does_not_underflow() {
        assert_eq!(TileMetricCode::Phasing { read: 0 }.code(), 200);
        assert_eq!(TileMetricCode::Prephasing { read: 0 }.code(), 201);
        assert_eq!(TileMetricCode::PercentAligned { read: 0 }.code(), 300);
    }

    #[test]
    fn decodes_v2_record() {
        let mut b = Vec::new();
        b.extend_from_slice(&4u16.to_le_bytes());
        b.extend_from_slice(&2214u16.to_le_bytes());
        b.extend_from_slice(&102u16.to_le_bytes());
        b.extend_from_slice(&123456.0f32.to_le_bytes());

        let m = TileMetricDecoder
            .decode(FormatVersion(2), &b, &AdapterTable::default())
            .unwrap();
        assert_eq!(
            m,
            TileMetric {
                lane: 4,
                tile: 2214,
                code: TileMetricCode::ClusterCount,
                value: 123456.0,
            }
        );
        assert_eq!(m.to_string(), "lane=4 tile=2214 cluster count=123456");
    }

    #[test]
    fn display_includes_read() {
        assert_eq!(
            TileMetricCode::Prephasing { read: 3 }.to_string(),
            "prephasing (read 3)"
        );
    }
}
