//! Domain types for the Unihra web-analysis service.
//!
//! Defines the analysis request shape and its validation rules, the
//! progress events streamed by the service while a job runs, and the
//! error taxonomy shared with the HTTP client crate. This crate does
//! no I/O.

pub mod error;
pub mod events;
pub mod request;

pub use error::{
    map_failure, FailureKind, UnihraError, CODE_FETCH_FAILED, CODE_PARSE_FAILED,
    CODE_QUOTA_EXCEEDED,
};
pub use events::{ProgressEvent, TaskState};
pub use request::{AnalysisRequest, JobId, DEFAULT_ALLOWED_LANGS, DEFAULT_LANG};
