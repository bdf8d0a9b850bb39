//! Data-access layer for the book catalog.
//!
//! # Overview
//! [`CatalogAccess`] answers reader lookups from a preloaded roster and
//! forwards book CRUD to a REST backend at `/api/books`.
//!
//! # Design
//! - `CatalogClient` is stateless: `build_*` produces an [`HttpRequest`],
//!   `parse_*` consumes an [`HttpResponse`], so the I/O boundary is explicit.
//! - A [`Transport`] executes the exchange; [`UreqTransport`] is the bundled
//!   backend.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod access;
pub mod client;
pub mod config;
pub mod dataset;
pub mod error;
pub mod http;
pub mod observer;
pub mod transport;
pub mod types;

pub use access::CatalogAccess;
pub use client::CatalogClient;
pub use config::{CatalogConfig, ConfigError, ConfigOverrides};
pub use dataset::{Dataset, DatasetError};
pub use error::{ApiError, OperationalError};
pub use self::http::{HttpMethod, HttpRequest, HttpResponse};
pub use observer::{BookObserver, NoopObserver, TracingObserver};
pub use transport::{Transport, UreqTransport};
pub use types::{Book, BookId, LegacyBookView, Reader, ReaderId};
