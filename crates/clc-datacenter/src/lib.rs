//! Data center service for the CLC cloud API.
//!
//! Looks up data centers visible to an account along with the server templates,
//! networks and bare-metal configurations each one can deploy.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::DataCenterService;
pub use models::{
    BareMetalCapabilities, BareMetalSku, DataCenter, DeployableNetwork, DeploymentCapabilities,
    OperatingSystem, SkuMemory, SkuProcessor, SkuStorage, Template,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = clc_core::Result<T>;
