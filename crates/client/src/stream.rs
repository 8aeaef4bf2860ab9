//! SSE decoding of the job status stream.
//!
//! [`EventStream`] pulls the streaming response body line-by-line and
//! decodes each `data:` line into a [`ProgressEvent`]. The sequence is
//! finite: it ends at the first terminal state. Dropping the stream at
//! any point releases the underlying connection, which is the
//! cancellation mechanism.

use std::collections::HashMap;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use unihra_core::{map_failure, FailureKind, JobId, ProgressEvent, TaskState, UnihraError};

/// SSE prefix marking a line that carries a JSON payload.
pub const DATA_PREFIX: &str = "data:";

/// Extract the JSON payload from one SSE line.
///
/// Returns `None` for lines that carry no event: keep-alive blanks,
/// `:` comments, and non-`data` fields.
pub fn decode_data_line(line: &str) -> Option<&str> {
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    line.strip_prefix(DATA_PREFIX).map(str::trim_start)
}

/// Pull-based sequence of [`ProgressEvent`]s for one job.
///
/// Obtained from [`UnihraClient::watch`](crate::UnihraClient::watch) or
/// [`UnihraClient::analyze_stream`](crate::UnihraClient::analyze_stream).
/// Iterate with [`next_event`](Self::next_event):
///
/// ```no_run
/// # async fn example(mut stream: unihra_client::EventStream)
/// #     -> Result<(), unihra_core::UnihraError> {
/// while let Some(event) = stream.next_event().await? {
///     println!("state: {:?}", event.state);
/// }
/// # Ok(())
/// # }
/// ```
///
/// The underlying connection is single-use; the stream is not
/// restartable after a terminal event or an error.
pub struct EventStream {
    job_id: JobId,
    /// `None` once the watch is over and the connection is released.
    inner: Option<BoxStream<'static, reqwest::Result<Bytes>>>,
    buf: Vec<u8>,
    /// Set once a terminal SUCCESS/FAILURE (or a decode error) has been
    /// delivered; further polls yield `Ok(None)`.
    finished: bool,
    error_overrides: HashMap<i64, FailureKind>,
}

impl EventStream {
    pub(crate) fn new(
        job_id: JobId,
        response: reqwest::Response,
        error_overrides: HashMap<i64, FailureKind>,
    ) -> Self {
        Self {
            job_id,
            inner: Some(response.bytes_stream().boxed()),
            buf: Vec::new(),
            finished: false,
            error_overrides,
        }
    }

    /// Job this stream is watching.
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Await the next progress event.
    ///
    /// Returns `Ok(Some(event))` for each event in transport order,
    /// `Ok(None)` after the terminal SUCCESS event has been delivered,
    /// and an error for a FAILURE event (mapped through the error-code
    /// table), a malformed payload, or a transport failure. The stream
    /// closing before any terminal event is reported as
    /// [`UnihraError::Connection`], never as a silent success.
    pub async fn next_event(&mut self) -> Result<Option<ProgressEvent>, UnihraError> {
        loop {
            if let Some(line) = self.take_line() {
                if let Some(event) = self.handle_line(&line)? {
                    return Ok(Some(event));
                }
                continue;
            }

            let Some(stream) = self.inner.as_mut() else {
                return if self.finished {
                    Ok(None)
                } else {
                    Err(UnihraError::Connection(
                        "Status stream closed before a terminal event".to_string(),
                    ))
                };
            };

            match stream.next().await {
                Some(Ok(chunk)) => self.buf.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.close();
                    return Err(UnihraError::Connection(format!(
                        "Status stream failed: {e}"
                    )));
                }
                None => {
                    // Transport closed; a final unterminated line may
                    // still be buffered.
                    self.inner = None;
                    if !self.buf.is_empty() {
                        let line = String::from_utf8_lossy(&self.buf).into_owned();
                        self.buf.clear();
                        let line = line.trim_end_matches('\r').to_string();
                        if let Some(event) = self.handle_line(&line)? {
                            return Ok(Some(event));
                        }
                    }
                    if !self.finished {
                        tracing::warn!(
                            job_id = %self.job_id,
                            "Status stream ended without a terminal event",
                        );
                        return Err(UnihraError::Connection(
                            "Status stream closed before a terminal event".to_string(),
                        ));
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Decode one line; `Ok(None)` means the line carried no event.
    fn handle_line(&mut self, line: &str) -> Result<Option<ProgressEvent>, UnihraError> {
        let Some(payload) = decode_data_line(line) else {
            return Ok(None);
        };

        let event = match ProgressEvent::from_json(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(job_id = %self.job_id, error = %e, "Malformed progress event");
                self.close();
                return Err(UnihraError::Parsing(format!(
                    "Malformed progress event: {e}"
                )));
            }
        };

        match event.state {
            TaskState::Success => {
                tracing::info!(job_id = %self.job_id, "Analysis completed");
                self.close();
                Ok(Some(event))
            }
            TaskState::Failure => {
                let err = map_failure(
                    event.error_code,
                    event.message.as_deref(),
                    &self.error_overrides,
                );
                tracing::error!(
                    job_id = %self.job_id,
                    error_code = event.error_code,
                    error = %err,
                    "Analysis failed",
                );
                self.close();
                Err(err)
            }
            state => {
                tracing::debug!(
                    job_id = %self.job_id,
                    state = ?state,
                    progress = event.progress,
                    "Progress event",
                );
                Ok(Some(event))
            }
        }
    }

    /// Take the next complete line out of the buffer, stripping the
    /// newline and an optional `\r`.
    fn take_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// End the watch and release the connection.
    fn close(&mut self) {
        self.inner = None;
        self.buf.clear();
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_line_yields_payload() {
        assert_eq!(
            decode_data_line(r#"data: {"state": "PENDING"}"#),
            Some(r#"{"state": "PENDING"}"#)
        );
    }

    #[test]
    fn data_line_without_space_yields_payload() {
        assert_eq!(decode_data_line(r#"data:{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn keep_alive_blank_line_is_skipped() {
        assert_eq!(decode_data_line(""), None);
    }

    #[test]
    fn comment_line_is_skipped() {
        assert_eq!(decode_data_line(": ping"), None);
    }

    #[test]
    fn other_sse_fields_are_skipped() {
        assert_eq!(decode_data_line("event: progress"), None);
        assert_eq!(decode_data_line("id: 7"), None);
        assert_eq!(decode_data_line("retry: 3000"), None);
    }
}
