use super::{create_test_client, request_log};
use crate::{FloatingIpRecord, FloatingIpService, IdcloudhostError, ResourceAdapter};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

async fn mount_get(server: &MockServer, name: &str, billing_account_id: i64) {
    Mock::given(method("GET"))
        .and(path("/v1/jkt01/network/ip_addresses/103.0.0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": "103.0.0.5",
            "name": name,
            "billing_account_id": billing_account_id,
            "assigned_to": "vm-1"
        })))
        .mount(server)
        .await;
}

fn allocated_ip() -> FloatingIpRecord {
    let mut ip = FloatingIpRecord::new("public-web", 1200);
    ip.address = Some("103.0.0.5".to_string());
    ip
}

#[tokio::test]
async fn test_create_floating_ip() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, Some("jkt01")));

    Mock::given(method("POST"))
        .and(path("/v1/jkt01/network/ip_addresses"))
        .and(body_json(json!({ "name": "public-web", "billing_account_id": 1200 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": "103.0.0.5" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(&mock_server, "public-web", 1200).await;

    let ip = service
        .create(FloatingIpRecord::new("public-web", 1200))
        .await
        .unwrap();

    assert_eq!(ip.address.as_deref(), Some("103.0.0.5"));
    assert_eq!(ip.assigned_to.as_deref(), Some("vm-1"));
}

#[tokio::test]
async fn test_create_floating_ip_missing_address() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, None));

    Mock::given(method("POST"))
        .and(path("/v1/network/ip_addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let result = service.create(FloatingIpRecord::new("public-web", 1200)).await;
    assert!(matches!(result, Err(IdcloudhostError::MissingField { .. })));
}

#[tokio::test]
async fn test_update_floating_ip_billing() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, Some("jkt01")));

    Mock::given(method("PATCH"))
        .and(path("/v1/jkt01/network/ip_addresses/103.0.0.5"))
        .and(body_json(json!({ "name": "public-web", "billing_account_id": 1300 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(&mock_server, "public-web", 1300).await;

    let prior = allocated_ip();
    let mut desired = prior.clone();
    desired.billing_account_id = 1300;
    let ip = service.update(&prior, desired).await.unwrap();

    assert_eq!(ip.billing_account_id, 1300);
    assert_eq!(request_log(&mock_server).await.len(), 2);
}

#[tokio::test]
async fn test_update_floating_ip_without_changes() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, None));

    let prior = allocated_ip();
    service.update(&prior, prior.clone()).await.unwrap();
    assert!(request_log(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_delete_floating_ip() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, None));

    Mock::given(method("DELETE"))
        .and(path("/v1/network/ip_addresses/103.0.0.5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    service.delete(&allocated_ip()).await.unwrap();
}

#[tokio::test]
async fn test_delete_unallocated_floating_ip_fails_locally() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, None));

    let result = service
        .delete(&FloatingIpRecord::new("public-web", 1200))
        .await;
    assert!(matches!(result, Err(IdcloudhostError::Validation { .. })));
    assert!(request_log(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_import_floating_ip() {
    let mock_server = MockServer::start().await;
    let service = FloatingIpService::new(create_test_client(&mock_server, Some("jkt01")));
    mount_get(&mock_server, "public-web", 1200).await;

    let ip = service.import("103.0.0.5").await.unwrap();

    assert_eq!(ip.location.as_deref(), Some("jkt01"));
    assert_eq!(ip.name, "public-web");
    assert_eq!(ip.billing_account_id, 1200);
    assert_eq!(ip.assigned_to.as_deref(), Some("vm-1"));
}
