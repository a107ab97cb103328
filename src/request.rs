//! Request layer.
//!
//! Maps a transport-level schedule request (algorithm selector plus an
//! optional raw `quantum` parameter) onto an engine call over the store's
//! pending tasks, and shapes the answer for the presentation layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::gantt::GanttChart;
use crate::scheduler::{schedule_by_key, SchedulerParams};
use crate::store::TaskStore;

/// Message attached to responses for an empty pending set.
pub const NO_PENDING_MESSAGE: &str = "No pending tasks to schedule";

/// A parsed schedule request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    /// Algorithm selector as received. Unknown keys schedule as priority.
    pub algorithm: String,
    /// Engine parameters.
    pub params: SchedulerParams,
}

impl ScheduleQuery {
    /// Creates a query with default parameters.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            params: SchedulerParams::default(),
        }
    }

    /// Parses a request.
    ///
    /// `quantum` defaults to 2, must be an integer and must be at least 1.
    pub fn parse(algorithm: &str, quantum: Option<&str>) -> Result<Self> {
        Ok(Self {
            algorithm: algorithm.to_string(),
            params: SchedulerParams::parse_quantum(quantum)?,
        })
    }
}

/// Response body for a schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Always `true`; failures surface as [`crate::Error`] instead.
    pub success: bool,
    /// Chart payload.
    pub gantt_data: GanttChart,
    /// Informational note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Schedules the store's pending tasks and builds the response.
///
/// With nothing pending, the chart is empty and its `algorithm` echoes the
/// requested key rather than a scheduler label.
pub fn schedule_response(store: &TaskStore, query: &ScheduleQuery) -> ScheduleResponse {
    let pending = store.pending();

    if pending.is_empty() {
        debug!(algorithm = %query.algorithm, "no pending tasks");
        return ScheduleResponse {
            success: true,
            gantt_data: GanttChart::empty(query.algorithm.clone()),
            message: Some(NO_PENDING_MESSAGE.to_string()),
        };
    }

    let plan = schedule_by_key(&pending, &query.algorithm, &query.params);
    ScheduleResponse {
        success: true,
        gantt_data: GanttChart::from_plan(&plan),
        message: None,
    }
}
