//! # clc-core
//!
//! Core types and utilities for working with the CLC cloud API.
//!
//! This crate provides configuration, error handling, the HTTP transport seam and
//! the shared wire types used by the per-resource service crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type; API failures keep their status and body
//! - [`config`] - Account and endpoint configuration
//! - [`client`] - HTTP client settings and the [`ApiClient`] used by services
//! - [`transport`] - Pluggable HTTP transport
//! - [`types`] - Links, queued-operation envelopes and login payloads
//! - [`query`] - Query string builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use types::{Link, Links, QueuedOperation};

/// HTTP status carried by [`Error::Api`].
pub use reqwest::StatusCode;
