/// Errors raised while ingesting a station feed.
///
/// Interaction code never sees these: by the time a directory exists every
/// record in it is valid.
#[derive(Debug, Clone, PartialEq)]
pub enum StationError {
    Json(String),
    MissingId { index: usize },
    DuplicateId(String),
    MissingPosition { id: String },
    InvalidPosition { id: String, lon: f64, lat: f64 },
}

impl std::fmt::Display for StationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationError::Json(msg) => write!(f, "station feed is not valid json: {msg}"),
            StationError::MissingId { index } => {
                write!(f, "station at index {index} has no id")
            }
            StationError::DuplicateId(id) => write!(f, "duplicate station id: {id}"),
            StationError::MissingPosition { id } => {
                write!(f, "station {id} has no lng/lat")
            }
            StationError::InvalidPosition { id, lon, lat } => {
                write!(f, "station {id} has invalid position ({lon}, {lat})")
            }
        }
    }
}

impl std::error::Error for StationError {}

impl From<serde_json::Error> for StationError {
    fn from(e: serde_json::Error) -> Self {
        StationError::Json(e.to_string())
    }
}
