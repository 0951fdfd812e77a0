//! Status lookups for operations queued by the CLC cloud API.
//!
//! Mutating server calls answer with a [`clc_core::QueuedOperation`]; this
//! crate resolves the operation's `status` link into an [`OperationStatus`].

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::StatusService;
pub use models::{OperationStatus, StatusResponse};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = clc_core::Result<T>;
