//! Integration tests for events

use dwiz_errors::NetworkError;
use dwiz_events::*;
use dwiz_types::Component;

#[tokio::test]
async fn test_emitter_helpers() {
    let (tx, mut rx) = channel();

    tx.emit_warning_with_context("ignoring unknown components", "grafana");
    tx.emit_debug("test debug");

    let first = rx.recv().await.unwrap();
    match &first {
        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            assert_eq!(message, "ignoring unknown components");
            assert_eq!(context.as_deref(), Some("grafana"));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(first.log_level(), tracing::Level::WARN);

    let second = rx.recv().await.unwrap();
    assert!(matches!(second, AppEvent::General(GeneralEvent::DebugLog { .. })));
    assert_eq!(second.log_level(), tracing::Level::DEBUG);
}

#[tokio::test]
async fn test_dropped_receiver() {
    let (tx, rx) = channel();
    drop(rx);

    // Sending into a closed channel is silently ignored
    tx.emit_debug("ignored");
}

#[tokio::test]
async fn test_operation_failed_carries_error_code() {
    let (tx, mut rx) = channel();
    let err = NetworkError::ServiceBusy {
        url: "http://127.0.0.1:8680/api/v1/mirrors".to_string(),
    };
    tx.emit_operation_failed("diagnose", &err);

    match rx.recv().await.unwrap() {
        AppEvent::General(GeneralEvent::OperationFailed { operation, failure }) => {
            assert_eq!(operation, "diagnose");
            assert_eq!(failure.code.as_deref(), Some("network.service_busy"));
            assert!(failure.retryable);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_busy_retry_routes_by_source() {
    let (tx, mut rx) = channel();
    tx.emit_busy_retry(&EventSource::MIRROR, 2, 1000);
    tx.emit_busy_retry(&EventSource::CATALOG, 1, 1000);

    let mirror = rx.recv().await.unwrap();
    assert_eq!(mirror.event_source(), EventSource::MIRROR);

    let catalog = rx.recv().await.unwrap();
    assert!(matches!(
        catalog,
        AppEvent::Catalog(CatalogEvent::FetchRetrying { attempt: 1, .. })
    ));
}

#[test]
fn test_event_serialization_shape() {
    let event = AppEvent::Resolver(ResolverEvent::Recommended {
        component: Component::Core,
        version: "4.2.1.0".to_string(),
        release: None,
    });
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["domain"], "resolver");
    assert_eq!(json["event"]["type"], "Recommended");
    assert_eq!(json["event"]["component"], "core");
}

#[test]
fn test_stale_proxy_is_a_warning() {
    let event = AppEvent::Resolver(ResolverEvent::NoCompatibleProxy {
        core_version: "4.3.0.0".to_string(),
        edition: dwiz_types::Edition::Community,
        kept: Some("4.2.1.0".to_string()),
    });
    assert_eq!(event.log_level(), tracing::Level::WARN);
}
