//! Operation status service.

use crate::models::{OperationStatus, StatusResponse};
use crate::Result;
use clc_core::query::QueryParams;
use clc_core::{ApiClient, Error, QueuedOperation};
use tracing::debug;

/// Looks up the state of queued operations.
#[derive(Debug, Clone)]
pub struct StatusService {
    client: ApiClient,
}

impl StatusService {
    /// Create the service on top of a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Current state of the operation with the given id.
    pub async fn get(&self, operation_id: &str) -> Result<OperationStatus> {
        if operation_id.trim().is_empty() {
            return Err(Error::ValidationError(
                "operation id is required".to_string(),
            ));
        }

        let url = self.client.endpoint(
            &["operations", self.client.alias(), "status", operation_id],
            &QueryParams::new(),
        )?;
        let resp: StatusResponse = self.client.get(url).await?;
        debug!(operation_id, status = %resp.status, "fetched operation status");
        Ok(resp.status)
    }

    /// Current state of an operation from its queued acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the acknowledgement carries no status link,
    /// as happens when the operation was never queued.
    pub async fn for_operation(&self, operation: &QueuedOperation) -> Result<OperationStatus> {
        let id = operation.operation_id().ok_or_else(|| {
            Error::NotFound(format!(
                "no status link for operation on `{}`",
                operation.server
            ))
        })?;
        self.get(id).await
    }
}
