//! Server service for the CLC cloud API.
//!
//! Creates, inspects, modifies and deletes servers, manages their public IP
//! addresses, and issues power operations. Mutating calls are queued by the
//! API and return a [`QueuedOperation`](clc_core::QueuedOperation).

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ServerService;
pub use models::{
    AdditionalDisk, ChangeInfo, CreateServer, CustomFieldValue, IpAddress, PatchOperation, Port,
    PowerOperation, Protocol, PublicIp, Server, ServerChange, ServerDetails, SourceRestriction,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = clc_core::Result<T>;
