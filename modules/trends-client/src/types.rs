use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};

/// `req` payload of the explore endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreRequest {
    #[serde(rename = "comparisonItem")]
    pub comparison_item: Vec<ComparisonItem>,
    pub category: u32,
    pub property: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonItem {
    pub keyword: String,
    pub time: String,
    pub geo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// A widget descriptor. `request` is echoed back verbatim to the widgetdata
/// endpoint together with `token`.
#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,
    pub token: Option<String>,
    #[serde(default)]
    pub request: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultilineResponse {
    pub default: MultilineData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultilineData {
    #[serde(rename = "timelineData", default)]
    pub timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelinePoint {
    /// Bucket start, seconds since the epoch, as a string.
    pub time: String,
    /// One value per keyword in the comparison.
    #[serde(default)]
    pub value: Vec<i64>,
    /// Only present (and `true`) on the trailing, still-filling bucket.
    #[serde(rename = "isPartial", default)]
    pub is_partial: bool,
}

/// One bucket of the interest-over-time series.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestPoint {
    pub time: DateTime<Utc>,
    pub value: i64,
    pub is_partial: bool,
}

impl TimelinePoint {
    pub fn into_interest(self) -> Result<InterestPoint> {
        let secs: i64 = self
            .time
            .parse()
            .map_err(|_| TrendsError::Parse(format!("bad bucket time: {}", self.time)))?;
        let time = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| TrendsError::Parse(format!("bucket time out of range: {secs}")))?;
        Ok(InterestPoint {
            time,
            value: self.value.first().copied().unwrap_or(0),
            is_partial: self.is_partial,
        })
    }
}

/// Google prefixes JSON bodies with an anti-XSSI guard such as `)]}'` or
/// `)]}',`. Drop everything before the first object brace.
pub fn strip_xssi(body: &str) -> &str {
    match body.find('{') {
        Some(idx) => &body[idx..],
        None => body,
    }
}
