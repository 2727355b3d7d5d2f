//! Refresh trigger response
//!
//! The JSON body returned when a refresh is requested on demand.

use crate::output::stats::CycleSummary;
use crate::sync::CycleReport;
use crate::SyncError;
use serde::Serialize;

/// Status reported when the cycle completed, even with failed documents
pub const STATUS_OK: u16 = 200;

/// Status reported when discovery failed and nothing was refreshed
pub const STATUS_UNAVAILABLE: u16 = 503;

/// Outcome of one on-demand refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponse {
    pub status: u16,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CycleSummary>,
}

impl RefreshResponse {
    /// Builds the response for a finished cycle attempt
    pub fn from_cycle(result: &Result<CycleReport, SyncError>) -> Self {
        match result {
            Ok(report) => Self {
                status: STATUS_OK,
                msg: "ok".to_string(),
                summary: Some(CycleSummary::from_report(report)),
            },
            Err(e) => Self {
                status: STATUS_UNAVAILABLE,
                msg: e.to_string(),
                summary: None,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Serializes the response as a JSON body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
