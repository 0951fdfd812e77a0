//! Parsing tests for captured data center capability responses.

use clc_datacenter::models::{BareMetalCapabilities, DeploymentCapabilities};
use std::fs;
use std::path::PathBuf;

fn load_fixture(name: &str) -> String {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deployment_capabilities() {
    let caps: DeploymentCapabilities =
        serde_json::from_str(&load_fixture("deployment_capabilities.json")).unwrap();

    assert!(caps.supports_premium_storage);
    assert!(caps.supports_bare_metal_servers);
    assert!(caps.supports_shared_load_balancer);
    assert_eq!(caps.templates.len(), 3);
    assert_eq!(caps.deployable_networks.len(), 2);

    let windows = caps.template("WIN2012R2DTC-64").expect("windows template");
    assert_eq!(windows.storage_size_gb, 60);
    assert_eq!(windows.reserved_drive_paths, ["a", "b", "c", "d"]);

    let rhel = caps.template("RHEL-7-64-TEMPLATE").expect("rhel template");
    assert!(rhel.capabilities.is_empty());

    assert!(caps
        .deployable_networks
        .iter()
        .all(|network| network.account_id == "TEST" && network.network_type == "private"));
}

#[test]
fn test_bare_metal_capabilities() {
    let bm: BareMetalCapabilities =
        serde_json::from_str(&load_fixture("bare_metal_capabilities.json")).unwrap();

    assert_eq!(bm.skus.len(), 2);

    let small = &bm.skus[0];
    assert_eq!(small.availability, "high");
    assert_eq!(small.storage.len(), 2);
    assert!((small.hourly_rate - 0.56).abs() < f32::EPSILON);

    let large = &bm.skus[1];
    assert_eq!(large.processor.sockets, 2);
    assert_eq!(large.memory[0].capacity_gb, 64);
    assert_eq!(large.storage[0].storage_type, "SSD");
    assert_eq!(large.storage[0].speed_rpm, 0);

    let ubuntu = bm
        .operating_systems
        .iter()
        .find(|os| os.os_type == "ubuntu14_64Bit")
        .expect("ubuntu entry");
    assert!(ubuntu.hourly_rate_per_socket.abs() < f32::EPSILON);
}

#[test]
fn test_missing_lists_default_to_empty() {
    let caps: DeploymentCapabilities =
        serde_json::from_str(r#"{"supportsPremiumStorage": false}"#).unwrap();
    assert!(caps.templates.is_empty());
    assert!(caps.deployable_networks.is_empty());
}
