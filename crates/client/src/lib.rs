//! HTTP/SSE client for the Unihra web-analysis service.
//!
//! [`UnihraClient`] submits an analysis job over REST, then watches the
//! job's SSE status stream until a terminal state. Use
//! [`UnihraClient::analyze`] for the blocking flow or
//! [`UnihraClient::analyze_stream`] to observe progress events as they
//! arrive.
//!
//! ```no_run
//! use unihra_client::UnihraClient;
//! use unihra_core::AnalysisRequest;
//!
//! # async fn example() -> Result<(), unihra_core::UnihraError> {
//! let client = UnihraClient::new("YOUR_API_KEY");
//! let request = AnalysisRequest::new(
//!     "https://example.com/product",
//!     vec!["https://competitor.com/p1".to_string()],
//! );
//! let result = client.analyze(&request).await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod stream;

pub use api::HealthStatus;
pub use client::UnihraClient;
pub use config::{ClientConfig, UnihraClientBuilder};
pub use stream::EventStream;
