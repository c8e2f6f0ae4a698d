use super::{create_test_client, request_log};
use crate::{
    IdcloudhostError, ListingResolver, ProviderConfig, ReferenceResolver, ValidationConfig,
    core::infrastructure::api_client::ApiClient,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_private_network_of_scans_listing() {
    let mock_server = MockServer::start().await;
    let resolver = ListingResolver::new(create_test_client(&mock_server, None));

    Mock::given(method("GET"))
        .and(path("/v1/jkt01/network/networks"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "uuid": "net-a", "name": "default", "vm_uuids": [] },
            { "uuid": "net-b", "name": "backend", "vm_uuids": ["vm-2", "vm-1"] }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let found = resolver
        .private_network_of(Some("jkt01".to_string()), "vm-1")
        .await
        .unwrap();
    assert_eq!(found.as_deref(), Some("net-b"));
}

#[tokio::test]
async fn test_floating_ip_of_no_match() {
    let mock_server = MockServer::start().await;
    let resolver = ListingResolver::new(create_test_client(&mock_server, None));

    Mock::given(method("GET"))
        .and(path("/v1/network/ip_addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "address": "103.0.0.1", "assigned_to": "vm-9" },
            { "address": "103.0.0.2", "assigned_to": null }
        ])))
        .mount(&mock_server)
        .await;

    let found = resolver.floating_ip_of(None, "vm-1").await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_empty_vm_id_matches_nothing() {
    let mock_server = MockServer::start().await;
    let resolver = ListingResolver::new(create_test_client(&mock_server, None));

    Mock::given(method("GET"))
        .and(path("/v1/network/ip_addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "address": "103.0.0.2", "assigned_to": "" }
        ])))
        .mount(&mock_server)
        .await;

    assert_eq!(resolver.floating_ip_of(None, "").await.unwrap(), None);
}

#[tokio::test]
async fn test_listing_rejection_is_resolution_error() {
    let mock_server = MockServer::start().await;
    let resolver = ListingResolver::new(create_test_client(&mock_server, None));

    Mock::given(method("GET"))
        .and(path("/v1/network/networks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    match resolver.private_network_of(None, "vm-1").await {
        Err(IdcloudhostError::Resolution(message)) => assert!(message.contains("internal error")),
        other => panic!("expected Resolution error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_listing_not_an_array_is_resolution_error() {
    let mock_server = MockServer::start().await;
    let resolver = ListingResolver::new(create_test_client(&mock_server, None));

    Mock::given(method("GET"))
        .and(path("/v1/network/ip_addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "paged" })))
        .mount(&mock_server)
        .await;

    let result = resolver.floating_ip_of(None, "vm-1").await;
    assert!(matches!(result, Err(IdcloudhostError::Resolution(_))));
    assert_eq!(request_log(&mock_server).await, vec!["GET /v1/network/ip_addresses"]);
}

#[tokio::test]
async fn test_unreachable_listing_is_transport_error() {
    let config = ProviderConfig::parse("test-key", "http://127.0.0.1:1", None).unwrap();
    let client = ApiClient::new(config, ValidationConfig::default()).unwrap();
    let resolver = ListingResolver::new(Arc::new(client));

    let result = resolver.private_network_of(None, "vm-1").await;
    assert!(matches!(result, Err(IdcloudhostError::Transport(_))));
}
