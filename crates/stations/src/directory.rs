use std::collections::HashMap;

use serde::Deserialize;

use crate::error::StationError;
use crate::record::{RawStation, StationKind, StationRecord};

/// Validated, read-only list of stations.
///
/// Ordering contract:
/// - Iteration yields records in feed order.
/// - Ids are unique; construction fails on the first duplicate.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<StationRecord>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    List(Vec<RawStation>),
    Wrapped { stations: Vec<RawStation> },
}

impl StationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StationRecord>) -> Result<Self, StationError> {
        let mut dir = Self::new();
        for (i, rec) in records.into_iter().enumerate() {
            dir.push(i, rec)?;
        }
        Ok(dir)
    }

    /// Parses a feed document: either a bare array of stations or an object
    /// with a `stations` array.
    pub fn from_json_str(json: &str) -> Result<Self, StationError> {
        let raw = match serde_json::from_str::<FeedDocument>(json)? {
            FeedDocument::List(list) => list,
            FeedDocument::Wrapped { stations } => stations,
        };
        let mut dir = Self::new();
        for (i, station) in raw.into_iter().enumerate() {
            if station.id.trim().is_empty() {
                return Err(StationError::MissingId { index: i });
            }
            dir.push(i, station.into_record()?)?;
        }
        tracing::info!(count = dir.len(), "station directory loaded");
        Ok(dir)
    }

    fn push(&mut self, index: usize, rec: StationRecord) -> Result<(), StationError> {
        if rec.id.trim().is_empty() {
            return Err(StationError::MissingId { index });
        }
        if !rec.position.is_valid() {
            return Err(StationError::InvalidPosition {
                id: rec.id,
                lon: rec.position.lon_deg,
                lat: rec.position.lat_deg,
            });
        }
        if self.index.contains_key(&rec.id) {
            return Err(StationError::DuplicateId(rec.id));
        }
        self.index.insert(rec.id.clone(), self.stations.len());
        self.stations.push(rec);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&StationRecord> {
        self.index.get(id).and_then(|&i| self.stations.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> + '_ {
        self.stations.iter()
    }

    pub fn of_kind(&self, kind: StationKind) -> impl Iterator<Item = &StationRecord> + '_ {
        self.stations.iter().filter(move |s| s.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::StationDirectory;
    use crate::error::StationError;
    use crate::record::{StationKind, StationRecord, StationStatus};
    use foundation::LonLat;
    use pretty_assertions::assert_eq;

    const FEED: &str = r#"[
        {"id":"res_001","name":"Ulugqat Reservoir","type":"reservoir","lng":79.35,"lat":37.25,"status":"normal"},
        {"id":"hydro_002","name":"Yingbazar","type":"hydrological","lng":84.25,"lat":41.35,"status":"warning"},
        {"id":"rain_002","name":"Ili Valley","type":"rain","lng":81.85,"lat":43.45,"status":"warning","rainfall":25.0}
    ]"#;

    #[test]
    fn parses_bare_array_in_feed_order() {
        let dir = StationDirectory::from_json_str(FEED).expect("feed");
        let ids: Vec<&str> = dir.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["res_001", "hydro_002", "rain_002"]);
        assert_eq!(
            dir.get("hydro_002").map(|s| s.kind),
            Some(StationKind::HydrologicalStation)
        );
        assert_eq!(dir.of_kind(StationKind::RainGauge).count(), 1);
    }

    #[test]
    fn parses_wrapped_document() {
        let json = format!(r#"{{"stations": {FEED}}}"#);
        let dir = StationDirectory::from_json_str(&json).expect("feed");
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = StationRecord::new(
            "res_001",
            "A",
            StationKind::Reservoir,
            LonLat::new(80.0, 40.0),
            StationStatus::Normal,
        );
        let b = StationRecord {
            name: "B".into(),
            ..a.clone()
        };
        let err = StationDirectory::from_records(vec![a, b]).unwrap_err();
        assert_eq!(err, StationError::DuplicateId("res_001".into()));
    }

    #[test]
    fn missing_id_and_missing_or_bad_position_are_rejected() {
        let err =
            StationDirectory::from_json_str(r#"[{"name":"nameless","type":"rain"}]"#).unwrap_err();
        assert_eq!(err, StationError::MissingId { index: 0 });

        let err = StationDirectory::from_json_str(
            r#"[{"id":"res_x","name":"No coords","type":"reservoir","status":"normal"}]"#,
        )
        .unwrap_err();
        assert_eq!(err, StationError::MissingPosition { id: "res_x".into() });

        let err = StationDirectory::from_json_str(
            r#"[{"id":"r","type":"rain","lng":200.0,"lat":10.0}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, StationError::InvalidPosition { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = StationDirectory::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, StationError::Json(_)));
    }

    #[test]
    fn empty_feed_is_an_empty_directory() {
        let dir = StationDirectory::from_json_str("[]").expect("feed");
        assert!(dir.is_empty());
        assert!(dir.get("res_001").is_none());
    }
}
