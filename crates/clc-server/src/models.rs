//! Server and public IP models.

use chrono::{DateTime, Utc};
use clc_core::types::Links;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

/// Server as returned by `GET servers/{alias}/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Server identifier.
    #[serde(default)]
    pub id: String,
    /// Server name.
    pub name: String,
    /// User-provided description.
    #[serde(default)]
    pub description: String,
    /// Group the server belongs to.
    #[serde(default)]
    pub group_id: String,
    /// Whether the server has been converted into a template.
    #[serde(default)]
    pub is_template: bool,
    /// Data center the server runs in.
    #[serde(default)]
    pub location_id: String,
    /// Operating system identifier.
    #[serde(default)]
    pub os_type: String,
    /// Lifecycle status (`active`, `underConstruction`, ...).
    #[serde(default)]
    pub status: String,
    /// Resource allocation and runtime details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ServerDetails>,
    /// Server type (`standard`, `hyperscale`, `bareMetal`).
    #[serde(rename = "type", default)]
    pub server_type: String,
    /// Storage type (`standard`, `premium`, `hyperscale`).
    #[serde(default)]
    pub storage_type: String,
    /// Audit information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_info: Option<ChangeInfo>,
    /// Links to related resources.
    #[serde(default)]
    pub links: Links,
}

/// Runtime details of a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetails {
    /// Addresses assigned to the server.
    #[serde(default)]
    pub ip_addresses: Vec<IpAddress>,
    /// Number of virtual CPUs.
    #[serde(default)]
    pub cpu: u32,
    /// Memory in MB.
    #[serde(rename = "memoryMB", default)]
    pub memory_mb: u64,
    /// Total storage in GB.
    #[serde(rename = "storageGB", default)]
    pub storage_gb: u64,
    /// Number of attached disks.
    #[serde(default)]
    pub disk_count: u32,
    /// Fully qualified host name.
    #[serde(default)]
    pub host_name: String,
    /// Power state (`started`, `stopped`, `paused`).
    #[serde(default)]
    pub power_state: String,
    /// Whether the server is in maintenance mode.
    #[serde(default)]
    pub in_maintenance_mode: bool,
    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,
}

impl ServerDetails {
    /// Public addresses mapped to this server.
    pub fn public_ips(&self) -> impl Iterator<Item = &str> {
        self.ip_addresses
            .iter()
            .filter_map(|address| address.public.as_deref())
    }
}

/// Internal address, optionally mapped to a public one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IpAddress {
    /// Internal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
    /// Public address mapped to `internal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
}

/// Audit information for a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// User that created the server.
    pub created_by: String,
    /// Creation time.
    pub created_date: DateTime<Utc>,
    /// User that last modified the server.
    pub modified_by: String,
    /// Last modification time.
    pub modified_date: DateTime<Utc>,
}

/// Value for an account-defined custom field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    /// Custom field identifier.
    pub id: String,
    /// Value to store.
    pub value: String,
    /// Field name, populated in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display value, populated in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

/// Disk to attach at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalDisk {
    /// Mount path for partitioned disks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Size in GB.
    #[serde(rename = "sizeGB")]
    pub size_gb: u32,
    /// `partitioned` or `raw`.
    #[serde(rename = "type")]
    pub disk_type: String,
}

/// Request body for creating a server.
///
/// Required fields are checked locally before anything is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateServer {
    /// Server name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Number of virtual CPUs.
    #[validate(range(min = 1, message = "cpu must be at least 1"))]
    pub cpu: u32,
    /// Memory in GB.
    #[serde(rename = "memoryGB")]
    #[validate(range(min = 1, message = "memory must be at least 1 GB"))]
    pub memory_gb: u32,
    /// Group to place the server in.
    #[validate(length(min = 1, message = "groupId is required"))]
    pub group_id: String,
    /// Template or server to clone from.
    #[validate(length(min = 1, message = "sourceServerId is required"))]
    pub source_server_id: String,
    /// Server type (`standard`, `hyperscale`, `bareMetal`).
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub server_type: String,
    /// User-provided description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the operating system is managed by the provider.
    #[serde(
        rename = "isManagedOS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_managed_os: Option<bool>,
    /// Primary DNS server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dns: Option<String>,
    /// Secondary DNS server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_dns: Option<String>,
    /// Network to attach the server to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    /// Fixed internal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Administrator password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Storage type (`standard`, `premium`, `hyperscale`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    /// Anti-affinity policy for hyperscale servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_affinity_policy_id: Option<String>,
    /// Custom field values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    /// Disks beyond the template's system disk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_disks: Vec<AdditionalDisk>,
    /// Time at which the server is deleted automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<DateTime<Utc>>,
}

/// One entry of a server `PATCH` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatchOperation {
    /// Always `set` for server updates.
    pub op: String,
    /// Name of the field being changed.
    pub field: String,
    /// New value.
    pub value: Value,
}

/// A single change applied by [`ServerService::update`](crate::ServerService::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerChange {
    /// Set the number of virtual CPUs.
    Cpu(u32),
    /// Set memory in GB.
    Memory(u32),
    /// Set the description.
    Description(String),
    /// Move the server to another group.
    GroupId(String),
    /// Change the administrator password.
    Password {
        /// Password currently in effect.
        current: String,
        /// Replacement password.
        new: String,
    },
    /// Replace custom field values.
    CustomFields(Vec<CustomFieldValue>),
}

impl ServerChange {
    /// Wire name of the field this change sets.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Cpu(_) => "cpu",
            Self::Memory(_) => "memory",
            Self::Description(_) => "description",
            Self::GroupId(_) => "groupId",
            Self::Password { .. } => "password",
            Self::CustomFields(_) => "customFields",
        }
    }

    /// Encode as a `set` patch operation.
    #[must_use]
    pub fn to_operation(&self) -> PatchOperation {
        let value = match self {
            Self::Cpu(cpu) => json!(cpu),
            Self::Memory(memory) => json!(memory),
            Self::Description(text) | Self::GroupId(text) => json!(text),
            Self::Password { current, new } => json!({ "current": current, "password": new }),
            Self::CustomFields(fields) => json!(fields),
        };

        PatchOperation {
            op: "set".to_string(),
            field: self.field().to_string(),
            value,
        }
    }
}

/// Transport protocol of a public IP port rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// TCP
    Tcp,
    /// UDP
    Udp,
    /// ICMP
    Icmp,
    /// A protocol this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Port, or port range, opened on a public IP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Protocol.
    pub protocol: Protocol,
    /// Port, or first port of the range.
    pub port: u16,
    /// Last port of the range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_to: Option<u16>,
}

impl Port {
    /// Single TCP port.
    #[must_use]
    pub const fn tcp(port: u16) -> Self {
        Self {
            protocol: Protocol::Tcp,
            port,
            port_to: None,
        }
    }

    /// Single UDP port.
    #[must_use]
    pub const fn udp(port: u16) -> Self {
        Self {
            protocol: Protocol::Udp,
            port,
            port_to: None,
        }
    }
}

/// Source address range allowed to reach a public IP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRestriction {
    /// CIDR block.
    pub cidr: String,
}

/// Public IP mapping of a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicIp {
    /// Internal address the public IP maps to.
    #[serde(
        rename = "internalIPAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_ip_address: Option<String>,
    /// Open ports.
    #[validate(length(min = 1, message = "at least one port is required"))]
    #[serde(default)]
    pub ports: Vec<Port>,
    /// Allowed source ranges; empty allows any source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_restrictions: Vec<SourceRestriction>,
}

impl PublicIp {
    /// Public IP opening the given ports.
    #[must_use]
    pub fn with_ports(ports: Vec<Port>) -> Self {
        Self {
            ports,
            ..Self::default()
        }
    }
}

/// Power and maintenance operations applied to servers in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOperation {
    /// Power on.
    PowerOn,
    /// Power off without a guest shutdown.
    PowerOff,
    /// Pause.
    Pause,
    /// Graceful guest shutdown.
    ShutDown,
    /// Graceful reboot.
    Reboot,
    /// Hard reset.
    Reset,
    /// Enter maintenance mode.
    StartMaintenance,
    /// Leave maintenance mode.
    StopMaintenance,
    /// Archive.
    Archive,
}

impl PowerOperation {
    /// Path segment naming the operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "powerOn",
            Self::PowerOff => "powerOff",
            Self::Pause => "pause",
            Self::ShutDown => "shutDown",
            Self::Reboot => "reboot",
            Self::Reset => "reset",
            Self::StartMaintenance => "startMaintenance",
            Self::StopMaintenance => "stopMaintenance",
            Self::Archive => "archive",
        }
    }
}
