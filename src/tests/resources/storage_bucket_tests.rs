use super::{create_test_client, request_log};
use crate::{IdcloudhostError, ResourceAdapter, StorageBucketRecord, StorageBucketService};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, method, path, query_param},
};

fn bucket() -> StorageBucketRecord {
    StorageBucketRecord {
        name: "backups".to_string(),
        billing_account_id: 1200,
    }
}

async fn mount_get(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/storage/bucket"))
        .and(query_param("name", "backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_bucket_ignores_default_location() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, Some("jkt01")));

    Mock::given(method("PUT"))
        .and(path("/v1/storage/bucket"))
        .and(body_string("name=backups&billing_account_id=1200"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(
        &mock_server,
        json!({ "name": "backups", "billing_account_id": 1200, "size_bytes": 0 }),
    )
    .await;

    let created = service.create(bucket()).await.unwrap();

    assert_eq!(created, bucket());
    assert_eq!(
        request_log(&mock_server).await,
        vec!["PUT /v1/storage/bucket", "GET /v1/storage/bucket"]
    );
}

#[tokio::test]
async fn test_update_bucket_billing_account() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));

    Mock::given(method("PATCH"))
        .and(path("/v1/storage/bucket"))
        .and(body_string("name=backups&billing_account_id=1300"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_get(&mock_server, json!({ "name": "backups", "billing_account_id": 1300 })).await;

    let desired = StorageBucketRecord {
        billing_account_id: 1300,
        ..bucket()
    };
    let updated = service.update(&bucket(), desired).await.unwrap();
    assert_eq!(updated.billing_account_id, 1300);
}

#[tokio::test]
async fn test_update_bucket_rename_rejected() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));

    let desired = StorageBucketRecord {
        name: "archives".to_string(),
        ..bucket()
    };
    let result = service.update(&bucket(), desired).await;

    assert!(matches!(result, Err(IdcloudhostError::Validation { .. })));
    assert!(request_log(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_update_bucket_without_changes() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));

    let updated = service.update(&bucket(), bucket()).await.unwrap();
    assert_eq!(updated, bucket());
    assert!(request_log(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_delete_bucket() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));

    Mock::given(method("DELETE"))
        .and(path("/v1/storage/bucket"))
        .and(body_string("name=backups"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    service.delete(&bucket()).await.unwrap();
}

#[tokio::test]
async fn test_import_bucket() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));
    mount_get(&mock_server, json!({ "name": "backups", "billing_account_id": 1200 })).await;

    assert_eq!(service.import("backups").await.unwrap(), bucket());
}

#[tokio::test]
async fn test_import_bucket_without_billing_account() {
    let mock_server = MockServer::start().await;
    let service = StorageBucketService::new(create_test_client(&mock_server, None));
    mount_get(&mock_server, json!({ "name": "backups" })).await;

    let result = service.import("backups").await;
    assert!(matches!(result, Err(IdcloudhostError::MissingField { .. })));
}
