use foundation::Rgba;
use layers::symbology::status_hex;
use serde::Serialize;
use stations::{StationKind, StationRecord, StationStatus};

/// Rainfall above this many millimetres is flagged on rain-gauge panels.
pub const RAINFALL_FLAG_MM: f64 = 20.0;

const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DetailRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: None,
        }
    }

    fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLabel {
    pub text: String,
    pub color: String,
}

/// Structured content for the host's detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub station_id: String,
    pub title: String,
    pub description: String,
    pub rows: Vec<DetailRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusLabel>,
}

impl DetailPanel {
    pub fn row(&self, label: &str) -> Option<&DetailRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

fn with_unit(v: Option<f64>, unit: &str) -> String {
    match v {
        Some(v) => format!("{v} {unit}"),
        None => MISSING.to_string(),
    }
}

fn status_label(text: &str, status: StationStatus) -> Option<StatusLabel> {
    Some(StatusLabel {
        text: text.to_string(),
        color: status_hex(status),
    })
}

/// Composes the detail panel for `station`, branching on its kind.
///
/// Unknown kinds get title and description only.
pub fn describe(station: &StationRecord) -> DetailPanel {
    let m = &station.metrics;
    let level_color = status_hex(station.status);

    let (rows, status) = match station.kind {
        StationKind::Reservoir => {
            let text = match station.status {
                StationStatus::Danger => "over guarantee",
                StationStatus::Warning => "over warning",
                StationStatus::Normal => "normal",
            };
            let rows = vec![
                DetailRow::new("current level", with_unit(m.water_level, "m"))
                    .colored(&level_color),
                DetailRow::new("warning level", with_unit(m.warning_level, "m")),
                DetailRow::new("guarantee level", with_unit(m.guarantee_level, "m")),
                DetailRow::new(
                    "capacity",
                    m.capacity.clone().unwrap_or_else(|| MISSING.to_string()),
                ),
                DetailRow::new("inflow", with_unit(m.inflow, "m³/s")),
                DetailRow::new("outflow", with_unit(m.outflow, "m³/s")),
            ];
            (rows, status_label(text, station.status))
        }
        StationKind::HydrologicalStation => {
            let text = match station.status {
                StationStatus::Normal => "normal",
                StationStatus::Warning | StationStatus::Danger => "elevated",
            };
            let rows = vec![
                DetailRow::new("current level", with_unit(m.water_level, "m"))
                    .colored(&level_color),
                DetailRow::new("warning level", with_unit(m.warning_level, "m")),
            ];
            (rows, status_label(text, station.status))
        }
        StationKind::RainGauge => {
            let text = match station.status {
                StationStatus::Normal => "normal",
                StationStatus::Warning | StationStatus::Danger => "excess rainfall",
            };
            let flagged = m.rainfall.is_some_and(|r| r > RAINFALL_FLAG_MM);
            let rainfall_color = if flagged { Rgba::YELLOW } else { Rgba::GREEN };
            let rows = vec![
                DetailRow::new("rainfall today", with_unit(m.rainfall, "mm"))
                    .colored(&rainfall_color.to_hex()),
                DetailRow::new("cumulative rainfall", with_unit(m.rainfall_total, "mm")),
            ];
            (rows, status_label(text, station.status))
        }
        StationKind::Unknown => (Vec::new(), None),
    };

    DetailPanel {
        station_id: station.id.clone(),
        title: station.name.clone(),
        description: m.description.clone().unwrap_or_default(),
        rows,
        status,
    }
}
