//! Wire types shared across CLC services.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Link relation naming an operation status resource.
pub const REL_STATUS: &str = "status";
/// Link relation naming the resource itself.
pub const REL_SELF: &str = "self";

/// Hyperlink to a related resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Relation name (`self`, `status`, `group`, ...)
    pub rel: String,
    /// Path of the related resource
    pub href: String,
    /// Identifier of the related resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the related resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP verbs supported on `href`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbs: Option<Vec<String>>,
}

/// Collection of hyperlinks.
pub type Links = Vec<Link>;

/// Returns the first link with the given relation.
#[must_use]
pub fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.rel == rel)
}

/// Acknowledgement returned by mutating calls that the API queues for later execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOperation {
    /// Name of the resource the operation targets
    #[serde(alias = "resource")]
    pub server: String,
    /// Whether the operation was accepted into the queue
    pub is_queued: bool,
    /// Follow-up links, typically `status` and `self`
    #[serde(default)]
    pub links: Links,
    /// Reason the operation was not queued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl QueuedOperation {
    /// The link to poll for operation status.
    #[must_use]
    pub fn status_link(&self) -> Option<&Link> {
        find_link(&self.links, REL_STATUS)
    }

    /// Identifier of the queued operation, taken from the `status` link.
    #[must_use]
    pub fn operation_id(&self) -> Option<&str> {
        self.status_link().and_then(|link| link.id.as_deref())
    }
}

/// Body of `POST authentication/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Account username
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Response of `POST authentication/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Username the token was issued to
    pub user_name: String,
    /// Account alias of the user
    pub account_alias: String,
    /// Default data center of the user
    #[serde(default)]
    pub location_alias: Option<String>,
    /// Roles granted to the user
    #[serde(default)]
    pub roles: Vec<String>,
    /// Token for the `Authorization` header
    pub bearer_token: SecretString,
}
