use serde::{Deserialize, Serialize};

/// Latest instantaneous grid demand, in megawatts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridReadingDto {
    pub value: f64,
}

/// One hourly point of the demand history. `period` is an ISO-ish
/// timestamp as delivered upstream, sometimes truncated to hour
/// precision (see `shared::status::normalize_period`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridHistoryPointDto {
    pub period: String,
    pub value: f64,
}
