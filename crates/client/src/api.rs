//! REST layer for the Unihra HTTP endpoints.
//!
//! Wraps the raw calls (job submission, status stream open, health
//! probe) using [`reqwest`]. Error mapping and stream decoding live in
//! [`crate::stream`]; orchestration lives in [`crate::client`].

use serde::Deserialize;
use unihra_core::{AnalysisRequest, JobId, UnihraError};

use crate::config::ClientConfig;

/// Path the analysis job is POSTed to.
pub const ANALYZE_PATH: &str = "/process";

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Response returned by the submission endpoint after queuing a job.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: String,
}

/// Response of the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Reported service status, e.g. `"healthy"`.
    pub status: String,
}

/// Submit an analysis job.
///
/// Sends `POST {base}/process` with the request as JSON and returns the
/// server-assigned job identifier. The caller validates the request
/// before this is reached.
pub async fn submit_analysis(
    http: &reqwest::Client,
    config: &ClientConfig,
    request: &AnalysisRequest,
) -> Result<JobId, UnihraError> {
    let response = http
        .post(format!("{}{}", config.base_url, ANALYZE_PATH))
        .bearer_auth(&config.api_key)
        .timeout(config.timeout)
        .json(request)
        .send()
        .await
        .map_err(connection_error)?;

    let body = read_success_body(response).await?;
    let parsed: SubmitResponse = serde_json::from_str(&body).map_err(|e| {
        UnihraError::Parsing(format!("Invalid job creation response: {e}"))
    })?;

    Ok(JobId(parsed.task_id))
}

/// Open the SSE status stream for a job.
///
/// Sends `GET {base}/process/status/{job_id}` and returns the raw
/// streaming response after checking the status code. The body is
/// consumed line-by-line by [`crate::stream::EventStream`].
pub async fn open_status_stream(
    http: &reqwest::Client,
    config: &ClientConfig,
    job_id: &JobId,
) -> Result<reqwest::Response, UnihraError> {
    let response = http
        .get(format!("{}/process/status/{}", config.base_url, job_id))
        .bearer_auth(&config.api_key)
        .send()
        .await
        .map_err(connection_error)?;

    ensure_success(response).await
}

/// Probe service liveness via `GET {base}/health`.
pub async fn health(
    http: &reqwest::Client,
    config: &ClientConfig,
) -> Result<HealthStatus, UnihraError> {
    let response = http
        .get(format!("{}{}", config.base_url, HEALTH_PATH))
        .bearer_auth(&config.api_key)
        .timeout(config.timeout)
        .send()
        .await
        .map_err(connection_error)?;

    let body = read_success_body(response).await?;
    serde_json::from_str(&body)
        .map_err(|e| UnihraError::Parsing(format!("Invalid health response: {e}")))
}

// ---- private helpers ----

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or [`UnihraError::Api`] carrying the status
/// and body text on failure.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UnihraError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(UnihraError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Check the status code and read the full body text.
async fn read_success_body(response: reqwest::Response) -> Result<String, UnihraError> {
    let response = ensure_success(response).await?;
    response.text().await.map_err(connection_error)
}

/// Classify a transport-level reqwest failure.
fn connection_error(err: reqwest::Error) -> UnihraError {
    UnihraError::Connection(err.to_string())
}
