//! High-level client facade.
//!
//! Ties the protocol together: validate locally, submit the job, then
//! watch its status stream to a terminal state. Submission and
//! watching are sequential; each watch opens its own connection.

use serde_json::Value;
use unihra_core::{AnalysisRequest, JobId, TaskState, UnihraError};

use crate::api::{self, HealthStatus};
use crate::config::{ClientConfig, UnihraClientBuilder};
use crate::stream::EventStream;

/// Client for the Unihra web-analysis service.
///
/// Cheap to clone is not a goal; create one per API key and share it by
/// reference. All methods take `&self` and may run concurrently.
pub struct UnihraClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl UnihraClient {
    /// Create a client with production defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    /// Start a builder for non-default settings (base URL, timeout,
    /// language set, error-code table).
    pub fn builder(api_key: impl Into<String>) -> UnihraClientBuilder {
        UnihraClientBuilder::new(api_key)
    }

    pub(crate) fn from_parts(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and submit an analysis job, returning its [`JobId`].
    ///
    /// Validation failures are reported before any network I/O. A
    /// failed submission is not retried.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<JobId, UnihraError> {
        request.validate(&self.config.allowed_langs)?;

        let job_id = api::submit_analysis(&self.http, &self.config, request).await?;
        tracing::info!(job_id = %job_id, own_page = %request.own_page, "Analysis job submitted");
        Ok(job_id)
    }

    /// Open the status stream for a previously submitted job.
    ///
    /// The returned [`EventStream`] yields events in transport order
    /// and ends at the first terminal state. Dropping it cancels the
    /// watch and releases the connection.
    pub async fn watch(&self, job_id: &JobId) -> Result<EventStream, UnihraError> {
        let response = api::open_status_stream(&self.http, &self.config, job_id).await?;
        tracing::debug!(job_id = %job_id, "Watching job status stream");
        Ok(EventStream::new(
            job_id.clone(),
            response,
            self.config.error_overrides.clone(),
        ))
    }

    /// Block until the job reaches a terminal state and return the
    /// SUCCESS result payload.
    ///
    /// FAILURE events surface as the mapped error; the stream closing
    /// early surfaces as [`UnihraError::Connection`].
    pub async fn wait(&self, job_id: &JobId) -> Result<Value, UnihraError> {
        let mut stream = self.watch(job_id).await?;
        while let Some(mut event) = stream.next_event().await? {
            if event.state == TaskState::Success {
                return Ok(event.result.take().unwrap_or(Value::Null));
            }
        }
        // next_event reports a closed stream as an error, so this is
        // only reachable if SUCCESS was delivered without us seeing it.
        Err(UnihraError::Connection(
            "Status stream ended without a terminal event".to_string(),
        ))
    }

    /// Submit a job and block until its result is available.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, UnihraError> {
        let job_id = self.submit(request).await?;
        self.wait(&job_id).await
    }

    /// Submit a job and return its progress stream.
    pub async fn analyze_stream(&self, request: &AnalysisRequest) -> Result<EventStream, UnihraError> {
        let job_id = self.submit(request).await?;
        self.watch(&job_id).await
    }

    /// Liveness probe against the health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, UnihraError> {
        api::health(&self.http, &self.config).await
    }
}
