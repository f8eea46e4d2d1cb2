//! Metronome REST client.
//!
//! Sends the [`model`] entities to a Metronome service over HTTP and decodes the
//! responses back into them.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, authentication headers, timeouts,
//! response classification, and the endpoint table all live here. Callers see
//! the [`Metronome`] trait and [`ClientError`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `ClientConfig` and its defaults |
//! | [`transport`] | Generic request dispatcher and response decoding |
//! | [`facade`] | `Metronome` trait and its HTTP implementation |
//! | [`errors`] | `ClientError` |
//!
//! ## Usage
//!
//! ```no_run
//! use client::{ClientConfig, Metronome, MetronomeClient};
//!
//! # async fn demo() -> Result<(), client::ClientError> {
//! let client = MetronomeClient::connect(ClientConfig::new("http://localhost:9000")).await?;
//! for job in client.jobs(&[]).await? {
//!     println!("{}", job.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod facade;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_URL};
pub use errors::ClientError;
pub use facade::{twenty_four_hours_ago, Metronome, MetronomeClient};
pub use transport::{ApiResponse, Json, QueryParams, ResponseTarget, Transport, NO_BODY};
