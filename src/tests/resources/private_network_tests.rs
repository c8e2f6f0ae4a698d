use super::{create_test_client, request_log};
use crate::{IdcloudhostError, PrivateNetworkRecord, PrivateNetworkService, ResourceAdapter};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

async fn mount_get(server: &MockServer, prefix: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{}/network/network/net-1", prefix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "net-1",
            "name": name,
            "vm_uuids": ["vm-1", "vm-2"]
        })))
        .mount(server)
        .await;
}

fn created_network() -> PrivateNetworkRecord {
    let mut network = PrivateNetworkRecord::new("backend");
    network.uuid = Some("net-1".to_string());
    network
}

#[tokio::test]
async fn test_create_private_network() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, Some("jkt01")));

    Mock::given(method("POST"))
        .and(path("/v1/jkt01/network/network"))
        .and(query_param("name", "backend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uuid": "net-1" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(&mock_server, "/v1/jkt01", "backend").await;

    let network = service
        .create(PrivateNetworkRecord::new("backend"))
        .await
        .unwrap();

    assert_eq!(network.uuid.as_deref(), Some("net-1"));
    assert_eq!(network.vm_uuids, vec!["vm-1", "vm-2"]);
}

#[tokio::test]
async fn test_create_private_network_missing_uuid() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, None));

    Mock::given(method("POST"))
        .and(path("/v1/network/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "backend" })))
        .mount(&mock_server)
        .await;

    let result = service.create(PrivateNetworkRecord::new("backend")).await;
    assert!(matches!(result, Err(IdcloudhostError::MissingField { .. })));
    assert_eq!(request_log(&mock_server).await.len(), 1);
}

#[tokio::test]
async fn test_rename_private_network() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, None));

    Mock::given(method("PATCH"))
        .and(path("/v1/network/network/net-1"))
        .and(body_json(json!({ "name": "backend-v2" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(&mock_server, "/v1", "backend-v2").await;

    let prior = created_network();
    let mut desired = prior.clone();
    desired.name = "backend-v2".to_string();
    let network = service.update(&prior, desired).await.unwrap();

    assert_eq!(network.name, "backend-v2");
    assert_eq!(
        request_log(&mock_server).await,
        vec!["PATCH /v1/network/network/net-1", "GET /v1/network/network/net-1"]
    );
}

#[tokio::test]
async fn test_update_private_network_without_changes() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, None));

    let prior = created_network();
    let network = service.update(&prior, prior.clone()).await.unwrap();

    assert_eq!(network, prior);
    assert!(request_log(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_delete_private_network_in_use() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, None));

    Mock::given(method("DELETE"))
        .and(path("/v1/network/network/net-1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("network has attached VMs"))
        .mount(&mock_server)
        .await;

    match service.delete(&created_network()).await {
        Err(IdcloudhostError::RemoteApi { status, body }) => {
            assert_eq!(status, 409);
            assert_eq!(body, "network has attached VMs");
        }
        other => panic!("expected RemoteApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_import_private_network() {
    let mock_server = MockServer::start().await;
    let service = PrivateNetworkService::new(create_test_client(&mock_server, Some("sgp01")));
    mount_get(&mock_server, "/v1/sgp01", "backend").await;

    let network = service.import("net-1").await.unwrap();

    assert_eq!(network.uuid.as_deref(), Some("net-1"));
    assert_eq!(network.location.as_deref(), Some("sgp01"));
    assert_eq!(network.name, "backend");
    assert_eq!(network.vm_uuids.len(), 2);
}
