//! Data center service.

use crate::models::{BareMetalCapabilities, DataCenter, DeploymentCapabilities};
use crate::Result;
use clc_core::query::QueryParams;
use clc_core::{ApiClient, Error};
use tracing::debug;

const RESOURCE: &str = "datacenters";

/// Read-only access to the data centers of an account.
#[derive(Debug, Clone)]
pub struct DataCenterService {
    client: ApiClient,
}

impl DataCenterService {
    /// Create the service on top of a shared client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a data center by id, including the link to its root group.
    pub async fn get(&self, id: &str) -> Result<DataCenter> {
        require_id(id)?;
        debug!(id, "fetching data center");
        let url = self.client.endpoint(
            &[RESOURCE, self.client.alias(), id],
            &QueryParams::new().with_flag("groupLinks"),
        )?;
        self.client.get(url).await
    }

    /// List every data center visible to the account.
    pub async fn get_all(&self) -> Result<Vec<DataCenter>> {
        let url = self
            .client
            .endpoint(&[RESOURCE, self.client.alias()], &QueryParams::new())?;
        self.client.get(url).await
    }

    /// Templates and networks available for deployment in a data center.
    pub async fn get_capabilities(&self, id: &str) -> Result<DeploymentCapabilities> {
        require_id(id)?;
        let url = self.client.endpoint(
            &[RESOURCE, self.client.alias(), id, "deploymentCapabilities"],
            &QueryParams::new(),
        )?;
        self.client.get(url).await
    }

    /// Bare-metal SKUs and operating systems available in a data center.
    pub async fn get_bare_metal_capabilities(&self, id: &str) -> Result<BareMetalCapabilities> {
        require_id(id)?;
        let url = self.client.endpoint(
            &[RESOURCE, self.client.alias(), id, "bareMetalCapabilities"],
            &QueryParams::new(),
        )?;
        self.client.get(url).await
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::ValidationError(
            "data center id is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clc_core::{ApiConfig, StatusCode};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_service(server: &MockServer) -> DataCenterService {
        let config = ApiConfig::new(server.uri(), "test")
            .unwrap()
            .with_token("validtoken");
        DataCenterService::new(ApiClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn get_requests_group_links() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test/va1"))
            .and(query_param("groupLinks", "true"))
            .and(header("Authorization", "Bearer validtoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "va1",
                "name": "US East (Sterling, VA)",
                "links": [
                    {"rel": "self", "href": "/v2/datacenters/test/va1"},
                    {"rel": "group", "href": "/v2/groups/test/abc123", "id": "abc123", "name": "VA1 Hardware"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dc = test_service(&server).get("va1").await.unwrap();
        assert_eq!(dc.id, "va1");
        assert_eq!(dc.name, "US East (Sterling, VA)");
        assert_eq!(
            dc.group_link().and_then(|l| l.id.as_deref()),
            Some("abc123")
        );
    }

    #[tokio::test]
    async fn get_all_returns_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let dcs = test_service(&server).get_all().await.unwrap();
        assert!(dcs.is_empty());
    }

    #[tokio::test]
    async fn get_all_lists_data_centers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "va1", "name": "US East (Sterling, VA)", "links": []},
                {"id": "uc1", "name": "US West (Santa Clara, CA)", "links": []}
            ])))
            .mount(&server)
            .await;

        let dcs = test_service(&server).get_all().await.unwrap();
        let ids: Vec<_> = dcs.iter().map(|dc| dc.id.as_str()).collect();
        assert_eq!(ids, ["va1", "uc1"]);
    }

    #[tokio::test]
    async fn get_capabilities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test/va1/deploymentCapabilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "supportsPremiumStorage": true,
                "supportsBareMetalServers": false,
                "supportsSharedLoadBalancer": true,
                "templates": [{
                    "name": "UBUNTU-14-64-TEMPLATE",
                    "description": "Ubuntu 14 | 64-bit",
                    "storageSizeGB": 17,
                    "capabilities": ["cpuAutoscale"],
                    "reservedDrivePaths": ["bin", "boot"]
                }],
                "deployableNetworks": [{
                    "name": "vlan_1234_10.0.0",
                    "networkId": "a1b2c3",
                    "type": "private",
                    "accountID": "TEST"
                }]
            })))
            .mount(&server)
            .await;

        let caps = test_service(&server).get_capabilities("va1").await.unwrap();
        assert!(caps.supports_premium_storage);
        assert!(!caps.supports_bare_metal_servers);
        let template = caps.template("UBUNTU-14-64-TEMPLATE").unwrap();
        assert_eq!(template.storage_size_gb, 17);
        assert_eq!(caps.deployable_networks[0].account_id, "TEST");
        assert_eq!(caps.deployable_networks[0].network_type, "private");
    }

    #[tokio::test]
    async fn get_bare_metal_capabilities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test/va1/bareMetalCapabilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "skus": [{
                    "id": "529e2592a3e640a7c2617b5e8bc8feaf",
                    "hourlyRate": 0.56,
                    "availability": "high",
                    "memory": [{"capacityGB": 16}],
                    "processor": {"sockets": 1, "coresPerSocket": 4, "description": "Intel(R) Xeon(R) CPU E3-1271 v3 @ 3.60GHz"},
                    "storage": [{"type": "Hdd", "capacityGB": 1000, "speedRpm": 7200}]
                }],
                "operatingSystems": [
                    {"type": "redHat6_64Bit", "description": "RedHat Enterprise Linux 6 64-bit", "hourlyRatePerSocket": 0.075}
                ]
            })))
            .mount(&server)
            .await;

        let bm = test_service(&server)
            .get_bare_metal_capabilities("va1")
            .await
            .unwrap();
        assert_eq!(bm.skus.len(), 1);
        assert_eq!(bm.skus[0].processor.cores_per_socket, 4);
        assert_eq!(bm.skus[0].memory[0].capacity_gb, 16);
        assert_eq!(bm.skus[0].storage[0].speed_rpm, 7200);
        assert_eq!(bm.operating_systems[0].os_type, "redHat6_64Bit");
    }

    #[tokio::test]
    async fn get_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datacenters/test/zz9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("unknown data center"))
            .mount(&server)
            .await;

        let err = test_service(&server).get("zz9").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err,
            Error::Api {
                status: StatusCode::NOT_FOUND,
                body: "unknown data center".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn blank_id_is_rejected_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let err = service.get("").await.unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        let err = service.get_capabilities(" ").await.unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        let err = service.get_bare_metal_capabilities("").await.unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
