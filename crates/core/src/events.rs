//! Progress events streamed by the service while a job runs.
//!
//! The status endpoint emits SSE `data:` lines, each carrying one JSON
//! [`ProgressEvent`]. Events arrive in order; exactly one terminal
//! event (SUCCESS or FAILURE) ends the sequence, and only that event
//! carries the `result` / `error_code` fields.

use serde::Deserialize;

/// Lifecycle state reported by a progress event.
///
/// The server's state set is open-ended; states this SDK does not know
/// deserialize as [`TaskState::Unknown`] and are treated as
/// non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Job accepted, waiting for a worker.
    Pending,
    /// Analysis in progress.
    Processing,
    /// A worker failed and the job was requeued.
    Retry,
    /// Terminal: analysis finished, `result` is populated.
    Success,
    /// Terminal: analysis failed, `error_code` / `message` describe why.
    Failure,
    /// Any state this SDK version does not recognize.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Whether this state ends the watch.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

/// One decoded frame from the job status stream.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEvent {
    /// Job lifecycle state at the time of the event.
    pub state: TaskState,
    /// Completion percentage (0-100), when the server reports one.
    pub progress: Option<f64>,
    /// Analysis result payload. Present only on SUCCESS.
    pub result: Option<serde_json::Value>,
    /// Machine-readable failure code. Present only on FAILURE.
    pub error_code: Option<i64>,
    /// Human-readable status or failure description.
    pub message: Option<String>,
}

impl ProgressEvent {
    /// Parse the JSON payload of a single SSE `data:` line.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
