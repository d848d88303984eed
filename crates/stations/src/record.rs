use foundation::LonLat;
use serde::{Deserialize, Serialize};

use crate::error::StationError;

/// Category of monitoring point.
///
/// `Unknown` is what ingestion falls back to for an unrecognised `type`; it
/// renders with the fallback icon and a name-only detail panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StationKind {
    Reservoir,
    HydrologicalStation,
    RainGauge,
    Unknown,
}

impl StationKind {
    pub const ALL: [StationKind; 3] = [
        StationKind::Reservoir,
        StationKind::HydrologicalStation,
        StationKind::RainGauge,
    ];

    /// Parses the feed spelling, including the short aliases the dashboard
    /// feed uses (`hydrological`, `rain`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reservoir" => Some(StationKind::Reservoir),
            "hydrological-station" | "hydrological" | "hydro" => {
                Some(StationKind::HydrologicalStation)
            }
            "rain-gauge" | "rain_gauge" | "rain" => Some(StationKind::RainGauge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationKind::Reservoir => "reservoir",
            StationKind::HydrologicalStation => "hydrological-station",
            StationKind::RainGauge => "rain-gauge",
            StationKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StationStatus {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl StationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(StationStatus::Normal),
            "warning" => Some(StationStatus::Warning),
            "danger" => Some(StationStatus::Danger),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Normal => "normal",
            StationStatus::Warning => "warning",
            StationStatus::Danger => "danger",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-dependent readings. Every field is optional; which ones a station
/// carries depends on its kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationMetrics {
    /// Current water level (m).
    pub water_level: Option<f64>,
    /// Warning water level (m).
    pub warning_level: Option<f64>,
    /// Guarantee water level (m).
    pub guarantee_level: Option<f64>,
    /// Storage capacity, free text as published (e.g. "3.47e8 m3").
    pub capacity: Option<String>,
    /// Inflow (m³/s).
    pub inflow: Option<f64>,
    /// Outflow (m³/s).
    pub outflow: Option<f64>,
    /// Rainfall today (mm).
    pub rainfall: Option<f64>,
    /// Cumulative rainfall (mm).
    pub rainfall_total: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub kind: StationKind,
    pub position: LonLat,
    pub status: StationStatus,
    pub metrics: StationMetrics,
}

impl StationRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: StationKind,
        position: LonLat,
        status: StationStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            position,
            status,
            metrics: StationMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: StationMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// One station as it appears on the wire.
///
/// Field names follow the dashboard feed (`lng`/`lat`, `type`, camelCase
/// metrics). Conversion into `StationRecord` applies the ingestion rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStation {
    pub id: String,
    pub name: String,
    #[serde(alias = "kind")]
    pub r#type: String,
    #[serde(alias = "lon", alias = "longitude")]
    pub lng: Option<f64>,
    #[serde(alias = "latitude")]
    pub lat: Option<f64>,
    pub status: String,
    pub water_level: Option<f64>,
    pub warning_level: Option<f64>,
    pub guarantee_level: Option<f64>,
    pub capacity: Option<String>,
    pub inflow: Option<f64>,
    pub outflow: Option<f64>,
    pub rainfall: Option<f64>,
    pub rainfall_total: Option<f64>,
    pub description: Option<String>,
}

impl RawStation {
    /// Applies kind/status defaulting. A record without both coordinates is
    /// rejected; range and id checks happen in the directory.
    pub fn into_record(self) -> Result<StationRecord, StationError> {
        let (Some(lng), Some(lat)) = (self.lng, self.lat) else {
            return Err(StationError::MissingPosition { id: self.id });
        };
        let kind = StationKind::parse(&self.r#type).unwrap_or_else(|| {
            tracing::warn!(
                id = %self.id,
                kind = %self.r#type,
                "unrecognised station kind, using unknown"
            );
            StationKind::Unknown
        });
        let status = StationStatus::parse(&self.status).unwrap_or_else(|| {
            tracing::warn!(
                id = %self.id,
                status = %self.status,
                "unrecognised station status, using normal"
            );
            StationStatus::Normal
        });

        let name = if self.name.trim().is_empty() {
            self.id.clone()
        } else {
            self.name
        };

        Ok(StationRecord {
            id: self.id,
            name,
            kind,
            position: LonLat::new(lng, lat),
            status,
            metrics: StationMetrics {
                water_level: self.water_level,
                warning_level: self.warning_level,
                guarantee_level: self.guarantee_level,
                capacity: self.capacity,
                inflow: self.inflow,
                outflow: self.outflow,
                rainfall: self.rainfall,
                rainfall_total: self.rainfall_total,
                description: self.description,
            },
        })
    }
}
