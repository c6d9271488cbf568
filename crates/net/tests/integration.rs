//! Integration tests for net crate

use dwiz_config::NetworkConfig;
use dwiz_errors::{Error, NetworkError};
use dwiz_net::*;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn client_for(server: &MockServer) -> ApiClient {
    let config = NetworkConfig {
        api_url: server.base_url(),
        retries: 0,
        ..NetworkConfig::default()
    };
    api_client(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_component_catalog() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/components");
        then.status(200).json_body(json!({
            "success": true,
            "code": 200,
            "msg": "",
            "data": {
                "total": 2,
                "items": [
                    {"name": "core", "info": [
                        {"version": "4.2.1.0", "release": "1.el7", "md5": "abc",
                         "version_type": "ce", "type": "remote", "estimated_size": 100}
                    ]},
                    {"name": "proxy", "info": []}
                ]
            }
        }));
    });

    let components = client_for(&server).fetch_component_catalog().await.unwrap();

    mock.assert();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].info[0].md5, "abc");
    assert!(components[1].info.is_empty());
}

#[tokio::test]
async fn test_busy_maps_to_service_busy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/mirrors");
        then.status(503).body("syncing");
    });

    let err = client_for(&server).fetch_mirror_status().await.unwrap_err();
    assert!(err.is_service_busy());
}

#[tokio::test]
async fn test_http_error_uses_envelope_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/mirrors");
        then.status(500)
            .json_body(json!({"success": false, "code": 500, "msg": "mirror list failed"}));
    });

    let err = client_for(&server).fetch_mirror_status().await.unwrap_err();
    match err {
        Error::Network(NetworkError::HttpError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "mirror list failed");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/connections/prod");
        then.status(200)
            .json_body(json!({"success": false, "code": 404, "msg": "cluster not found"}));
    });

    let err = client_for(&server).fetch_connection_info("prod").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Network(NetworkError::ApiError { code: 404, .. })
    ));
}

#[tokio::test]
async fn test_drafts_query_and_delete() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/deployments")
            .query_param("task_status", "DRAFT");
        then.status(200).json_body(json!({
            "success": true, "code": 200, "msg": "",
            "data": {"total": 1, "items": [{"name": "demo", "status": "DRAFT"}]}
        }));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/deployments/demo");
        then.status(200)
            .json_body(json!({"success": true, "code": 200, "msg": "", "data": null}));
    });

    let api = client_for(&server);
    let drafts = api.fetch_deployments_by_status("DRAFT").await.unwrap();
    assert_eq!(drafts.len(), 1);
    api.delete_deployment(&drafts[0].name).await.unwrap();

    list.assert();
    delete.assert();
}

#[tokio::test]
async fn test_connection_info() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/connections/prod");
        then.status(200).json_body(json!({
            "success": true, "code": 200, "msg": "",
            "data": {
                "cluster_name": "prod", "host": "10.0.0.8", "port": 2881,
                "user": "root@sys", "password": "", "database": "sys"
            }
        }));
    });

    let info = client_for(&server).fetch_connection_info("prod").await.unwrap();
    assert_eq!(info.host, "10.0.0.8");
    assert_eq!(info.port, 2881);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_busy_retry_against_server() {
    let server = MockServer::start();
    let mut busy = server.mock(|when, then| {
        when.method(GET).path("/api/v1/mirrors");
        then.status(503);
    });

    let api = client_for(&server);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(async move {
        retry_while_busy(Duration::from_millis(20), &cancel, || api.fetch_mirror_status()).await
    });

    // Let a few busy answers through, then bring the mirror list up
    tokio::time::sleep(Duration::from_millis(100)).await;
    busy.delete();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/mirrors");
        then.status(200).json_body(json!({
            "success": true, "code": 200, "msg": "",
            "data": {"total": 2, "items": [
                {"section_name": "community.stable", "available": true},
                {"section_name": "development-kit", "available": false}
            ]}
        }));
    });

    let report = handle.await.unwrap().unwrap();
    assert_eq!(report.total, 2);
    assert!(!report.items[1].available);
}
