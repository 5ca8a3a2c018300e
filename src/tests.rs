use crate::protocol::constants::headers;
use crate::*;
use tokio_test::{assert_err, assert_ok};

fn config() -> EndpointConfig {
    EndpointConfig::new("localhost:8080/rest")
}

#[test]
fn test_scheme_inference_end_to_end() {
    let secure = assert_ok!(FcrepoProducer::new(EndpointConfig::new("localhost:443/rest")));
    let plain = assert_ok!(FcrepoProducer::new(config()));
    let message = Message::new().with_header(headers::IDENTIFIER, "/foo");

    assert_eq!(
        assert_ok!(secure.resolve(&message)).url,
        "https://localhost:443/rest/foo"
    );
    assert_eq!(
        assert_ok!(plain.resolve(&message)).url,
        "http://localhost:8080/rest/foo"
    );
}

#[test]
fn test_transform_accept_example() {
    let producer = assert_ok!(FcrepoProducer::new(EndpointConfig {
        transform: Some("default".into()),
        ..config()
    }));
    let message = Message::new().with_header("Accept", "text/turtle");
    assert_eq!(assert_ok!(producer.resolve(&message)).accept, "application/json");
}

#[test]
fn test_tombstone_example() {
    let delete = Message::new()
        .with_header(headers::HTTP_METHOD, "DELETE")
        .with_header(headers::IDENTIFIER, "/foo");

    let enabled = assert_ok!(FcrepoProducer::new(EndpointConfig {
        tombstone: true,
        ..config()
    }));
    let disabled = assert_ok!(FcrepoProducer::new(config()));

    assert_eq!(
        assert_ok!(enabled.resolve(&delete)).url,
        "http://localhost:8080/rest/foo/fcr:tombstone"
    );
    assert_eq!(
        assert_ok!(disabled.resolve(&delete)).url,
        "http://localhost:8080/rest/foo"
    );
}

#[test]
fn test_content_type_passthrough_for_all_body_verbs() {
    let producer = assert_ok!(FcrepoProducer::new(config()));
    for verb in [Verb::Get, Verb::Put, Verb::Post] {
        let with = Message::new()
            .with_header(headers::HTTP_METHOD, verb.as_str())
            .with_header(headers::CONTENT_TYPE, "application/ld+json");
        let without = Message::new().with_header(headers::HTTP_METHOD, verb.as_str());

        assert_eq!(
            assert_ok!(producer.resolve(&with)).content_type.as_deref(),
            Some("application/ld+json")
        );
        assert_eq!(assert_ok!(producer.resolve(&without)).content_type, None);
    }
}

#[test]
fn test_prefer_round_trip_through_resolution() {
    let producer = assert_ok!(FcrepoProducer::new(EndpointConfig {
        prefer_include: vec!["PreferContainment".into(), "PreferMembership".into()],
        ..config()
    }));
    let prefer = assert_ok!(producer.resolve(&Message::new())).prefer;
    let parsed: Prefer = assert_ok!(prefer.unwrap_or_default().parse());

    assert_eq!(parsed.return_mode, ReturnMode::Representation);
    assert!(parsed.includes().contains(PreferToken::PreferContainment.uri()));
    assert!(parsed.includes().contains(PreferToken::PreferMembership.uri()));
    assert_eq!(parsed.includes().len(), 2);
    assert!(parsed.omits().is_empty());
}

#[test]
fn test_shared_handle_reaches_every_producer() {
    let manager = assert_ok!(TransactionManager::new(&config()));
    let first = assert_ok!(FcrepoProducer::new(config())).with_transaction_manager(&manager);
    let second = first.clone();

    manager.handle().set("tx:shared".into());
    let message = Message::new().with_header(headers::IDENTIFIER, "/a");

    assert_eq!(
        assert_ok!(first.resolve(&message)).url,
        "http://localhost:8080/rest/tx:shared/a"
    );
    assert_eq!(
        assert_ok!(second.resolve(&message)).url,
        "http://localhost:8080/rest/tx:shared/a"
    );
}

#[test]
fn test_transaction_info_written_to_message() {
    let info = TransactionInfo {
        id: "tx:1".into(),
        location: "http://localhost:8080/rest/tx:1".into(),
    };
    let mut message = Message::new();
    info.apply_to(&mut message);

    let producer = assert_ok!(FcrepoProducer::new(config()));
    let resolved = assert_ok!(producer.resolve(&message.with_header(headers::IDENTIFIER, "/b")));
    assert_eq!(resolved.url, "http://localhost:8080/rest/tx:1/b");
}

#[test]
fn test_network_failure_from_process() {
    // Port 1 is reserved and refuses connections.
    let producer = assert_ok!(FcrepoProducer::new(EndpointConfig {
        metadata: false,
        ..EndpointConfig::new("127.0.0.1:1/rest")
    }));
    let result = tokio_test::block_on(producer.process(Message::new()));
    let err = assert_err!(result);
    assert!(err.is_network_failure());
    assert_eq!(err.status_code(), Some(-1));
}

#[test]
fn test_sync_processor_reports_missing_base_before_io() {
    use crate::processor::{Processor, SparqlDescribeProcessor};

    let mut message = Message::new().with_header(headers::IDENTIFIER, "/foo");
    let err = assert_err!(tokio_test::block_on(
        SparqlDescribeProcessor.process(&mut message)
    ));
    assert!(matches!(err, FcrepoError::Config(_)));
}
