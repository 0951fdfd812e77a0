//! Data center models as returned by the API.

use clc_core::types::{find_link, Link, Links};
use serde::{Deserialize, Serialize};

/// Representation of a data center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataCenter {
    /// Short data center code (for example `VA1`).
    pub id: String,
    /// Descriptive name.
    pub name: String,
    /// Links to related resources (root group, capabilities, ...).
    #[serde(default)]
    pub links: Links,
}

impl DataCenter {
    /// Link to the data center's root hardware group, present when requested with `groupLinks`.
    #[must_use]
    pub fn group_link(&self) -> Option<&Link> {
        find_link(&self.links, "group")
    }
}

/// What can be deployed into a data center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentCapabilities {
    /// Premium storage is offered.
    #[serde(default)]
    pub supports_premium_storage: bool,
    /// Bare-metal servers can be provisioned.
    #[serde(default)]
    pub supports_bare_metal_servers: bool,
    /// A shared load balancer is offered.
    #[serde(default)]
    pub supports_shared_load_balancer: bool,
    /// Operating system templates available for new servers.
    #[serde(default)]
    pub templates: Vec<Template>,
    /// Networks new servers can be attached to.
    #[serde(default)]
    pub deployable_networks: Vec<DeployableNetwork>,
}

impl DeploymentCapabilities {
    /// Finds a template by name.
    #[must_use]
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.name == name)
    }
}

/// Operating system template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Template name, usable as a server's source id.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Size of the template's system disk in GB.
    #[serde(rename = "storageSizeGB", default)]
    pub storage_size_gb: u32,
    /// Capability tags such as `cpuAutoscale`.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Drive paths that additional disks may not use.
    #[serde(default)]
    pub reserved_drive_paths: Vec<String>,
}

/// Network available for deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployableNetwork {
    /// Network name.
    pub name: String,
    /// Network identifier.
    pub network_id: String,
    /// Network type (`private`, `publicIp`, ...).
    #[serde(rename = "type", default)]
    pub network_type: String,
    /// Owning account.
    #[serde(rename = "accountID", default)]
    pub account_id: String,
}

/// Bare-metal offering of a data center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalCapabilities {
    /// Purchasable hardware configurations.
    #[serde(default)]
    pub skus: Vec<BareMetalSku>,
    /// Installable operating systems.
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystem>,
}

/// A bare-metal hardware configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalSku {
    /// SKU identifier.
    pub id: String,
    /// Price per hour.
    #[serde(default)]
    pub hourly_rate: f32,
    /// Availability indicator (`high`, `low`, `none`).
    #[serde(default)]
    pub availability: String,
    /// Memory tiers.
    #[serde(default)]
    pub memory: Vec<SkuMemory>,
    /// Processor description.
    #[serde(default)]
    pub processor: SkuProcessor,
    /// Storage tiers.
    #[serde(default)]
    pub storage: Vec<SkuStorage>,
}

/// Memory tier of a SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkuMemory {
    /// Capacity in GB.
    #[serde(rename = "capacityGB")]
    pub capacity_gb: u32,
}

/// Processor of a SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkuProcessor {
    /// Socket count.
    #[serde(default)]
    pub sockets: u32,
    /// Cores per socket.
    #[serde(default)]
    pub cores_per_socket: u32,
    /// Model description.
    #[serde(default)]
    pub description: String,
}

/// Storage tier of a SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkuStorage {
    /// Drive type (`SSD`, `Hdd`).
    #[serde(rename = "type")]
    pub storage_type: String,
    /// Capacity in GB.
    #[serde(rename = "capacityGB")]
    pub capacity_gb: u32,
    /// Spindle speed; zero for solid state drives.
    #[serde(rename = "speedRpm", default)]
    pub speed_rpm: u32,
}

/// Operating system installable on bare metal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystem {
    /// Operating system type identifier.
    #[serde(rename = "type")]
    pub os_type: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// License price per socket per hour.
    #[serde(default)]
    pub hourly_rate_per_socket: f32,
}
