//! Server service implementation.

use crate::models::{CreateServer, PatchOperation, PowerOperation, PublicIp, Server, ServerChange};
use crate::Result;
use clc_core::query::QueryParams;
use clc_core::types::Link;
use clc_core::{ApiClient, Error, QueuedOperation};
use tracing::debug;
use url::Url;
use uuid::Uuid;
use validator::Validate;

const RESOURCE: &str = "servers";
const PUBLIC_IPS: &str = "publicIPAddresses";

/// Server lifecycle and public IP management.
#[derive(Debug, Clone)]
pub struct ServerService {
    client: ApiClient,
}

impl ServerService {
    /// Create the service on top of a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a server by name or by UUID.
    ///
    /// Identifiers that parse as a UUID are looked up with `uuid=true`.
    pub async fn get(&self, id: &str) -> Result<Server> {
        require_id(id)?;
        let query = QueryParams::new().with_flag_if(is_uuid(id), "uuid");
        let url = self.server_url(&[id], &query)?;
        self.client.get(url).await
    }

    /// Queue creation of a server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] without contacting the API when a
    /// required field is missing.
    pub async fn create(&self, server: &CreateServer) -> Result<QueuedOperation> {
        server.validate()?;
        debug!(name = %server.name, group = %server.group_id, "queueing server creation");
        let url = self.server_url(&[], &QueryParams::new())?;
        self.client.post(url, server).await
    }

    /// Queue a set of changes to a server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when `changes` is empty.
    pub async fn update(&self, id: &str, changes: &[ServerChange]) -> Result<QueuedOperation> {
        require_id(id)?;
        if changes.is_empty() {
            return Err(Error::ValidationError(
                "at least one server change is required".to_string(),
            ));
        }

        let operations: Vec<PatchOperation> =
            changes.iter().map(ServerChange::to_operation).collect();
        let fields: Vec<_> = changes.iter().map(ServerChange::field).collect();
        debug!(id, ?fields, "queueing server update");
        let url = self.server_url(&[id], &QueryParams::new())?;
        self.client.patch(url, &operations).await
    }

    /// Queue deletion of a server.
    pub async fn delete(&self, id: &str) -> Result<QueuedOperation> {
        require_id(id)?;
        let url = self.server_url(&[id], &QueryParams::new())?;
        self.client.delete(url).await
    }

    /// Add a public IP to a server; returns the status link of the queued operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] without contacting the API when no port is given.
    pub async fn add_public_ip(&self, id: &str, ip: &PublicIp) -> Result<Link> {
        require_id(id)?;
        ip.validate()?;
        let url = self.server_url(&[id, PUBLIC_IPS], &QueryParams::new())?;
        self.client.post(url, ip).await
    }

    /// Fetch the public IP mapping for `address`.
    pub async fn get_public_ip(&self, id: &str, address: &str) -> Result<PublicIp> {
        require_id(id)?;
        require_address(address)?;
        let url = self.server_url(&[id, PUBLIC_IPS, address], &QueryParams::new())?;
        self.client.get(url).await
    }

    /// Replace the ports and source restrictions of a public IP.
    pub async fn update_public_ip(&self, id: &str, address: &str, ip: &PublicIp) -> Result<Link> {
        require_id(id)?;
        require_address(address)?;
        ip.validate()?;
        let url = self.server_url(&[id, PUBLIC_IPS, address], &QueryParams::new())?;
        self.client.put(url, ip).await
    }

    /// Release a public IP from a server.
    pub async fn delete_public_ip(&self, id: &str, address: &str) -> Result<Link> {
        require_id(id)?;
        require_address(address)?;
        let url = self.server_url(&[id, PUBLIC_IPS, address], &QueryParams::new())?;
        self.client.delete(url).await
    }

    /// Apply a power or maintenance operation to several servers.
    ///
    /// The API answers with one acknowledgement per server, in request order.
    pub async fn set_power_state(
        &self,
        operation: PowerOperation,
        ids: &[&str],
    ) -> Result<Vec<QueuedOperation>> {
        if ids.is_empty() {
            return Err(Error::ValidationError(
                "at least one server id is required".to_string(),
            ));
        }
        for id in ids {
            require_id(id)?;
        }

        debug!(
            operation = operation.name(),
            count = ids.len(),
            "queueing power operation"
        );
        let url = self.client.endpoint(
            &["operations", self.client.alias(), RESOURCE, operation.name()],
            &QueryParams::new(),
        )?;
        self.client.post(url, ids).await
    }

    fn server_url(&self, segments: &[&str], query: &QueryParams) -> Result<Url> {
        let mut path = vec![RESOURCE, self.client.alias()];
        path.extend_from_slice(segments);
        self.client.endpoint(&path, query)
    }
}

fn is_uuid(id: &str) -> bool {
    Uuid::try_parse(id).is_ok()
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::ValidationError("server id is required".to_string()));
    }
    Ok(())
}

fn require_address(address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(Error::ValidationError(
            "public IP address is required".to_string(),
        ));
    }
    Ok(())
}
