use fcrepo_http::protocol::constants::headers;
use fcrepo_http::{EndpointConfig, FcrepoProducer, Message, MessageBody, TransactionManager};
use mockito::{Matcher, Server};

fn producer(config: EndpointConfig) -> FcrepoProducer {
    FcrepoProducer::new(config).unwrap()
}

#[tokio::test]
async fn test_get_follows_described_by() {
    let mut server = Server::new_async().await;
    let head = server
        .mock("HEAD", "/foo")
        .with_status(200)
        .with_header("link", "</foo/fcr:metadata>; rel=\"describedby\"")
        .create_async()
        .await;
    let get = server
        .mock("GET", "/foo/fcr:metadata")
        .match_header("accept", "application/rdf+xml")
        .with_status(200)
        .with_header("content-type", "application/rdf+xml")
        .with_body("<rdf:RDF/>")
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(server.url()));
    let message = Message::new()
        .with_header(headers::HTTP_METHOD, "GET")
        .with_header(headers::IDENTIFIER, "/foo");
    let mut reply = producer.process(message).await.unwrap();

    head.assert_async().await;
    get.assert_async().await;
    assert_eq!(reply.status_code(), Some(200));
    assert_eq!(reply.header(headers::CONTENT_TYPE), Some("application/rdf+xml"));
    assert_eq!(reply.header(headers::IDENTIFIER), Some("/foo"));
    let body = reply.body_bytes().await.unwrap().unwrap();
    assert_eq!(&body[..], b"<rdf:RDF/>");
}

#[tokio::test]
async fn test_get_without_link_uses_literal_url() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/rest/foo")
        .with_status(200)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/rest/foo")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(format!("{}/rest", server.url())));
    let reply = producer
        .process(Message::new().with_header(headers::IDENTIFIER, "/foo"))
        .await
        .unwrap();

    get.assert_async().await;
    assert_eq!(reply.status_code(), Some(200));
}

#[tokio::test]
async fn test_metadata_disabled_skips_head() {
    let mut server = Server::new_async().await;
    let head = server
        .mock("HEAD", "/rest/foo")
        .expect(0)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/rest/foo")
        .with_status(200)
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        metadata: false,
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    producer
        .process(Message::new().with_header(headers::IDENTIFIER, "/foo"))
        .await
        .unwrap();

    head.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn test_failed_head_propagates() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/rest/missing")
        .with_status(404)
        .create_async()
        .await;
    let get = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(format!("{}/rest", server.url())));
    let err = producer
        .process(Message::new().with_header(headers::IDENTIFIER, "/missing"))
        .await
        .unwrap_err();

    get.assert_async().await;
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_transform_get() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/rest/foo/fcr:transform/default")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":["http://localhost/rest/foo"]}]"#)
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        transform: Some("default".into()),
        metadata: false,
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    let mut reply = producer
        .process(
            Message::new()
                .with_header(headers::IDENTIFIER, "/foo")
                .with_header(headers::ACCEPT, "text/turtle"),
        )
        .await
        .unwrap();

    get.assert_async().await;
    assert_eq!(reply.header(headers::CONTENT_TYPE), Some("application/json"));
    let body = reply.body_bytes().await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["id"][0], "http://localhost/rest/foo");
}

#[tokio::test]
async fn test_transform_post_carries_program() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/rest/foo/fcr:transform")
        .match_header("content-type", "application/ldpath")
        .match_body("title = dc:title :: xsd:string ;")
        .with_status(200)
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        transform: Some("default".into()),
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "POST")
                .with_header(headers::IDENTIFIER, "/foo")
                .with_header(headers::CONTENT_TYPE, "application/ldpath")
                .with_body("title = dc:title :: xsd:string ;"),
        )
        .await
        .unwrap();

    post.assert_async().await;
}

#[tokio::test]
async fn test_delete_with_tombstone() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/rest/foo/fcr:tombstone")
        .with_status(204)
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        tombstone: true,
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    let reply = producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "DELETE")
                .with_header(headers::IDENTIFIER, "/foo"),
        )
        .await
        .unwrap();

    delete.assert_async().await;
    assert_eq!(reply.status_code(), Some(204));
}

#[tokio::test]
async fn test_put_sends_inbound_content_type() {
    let mut server = Server::new_async().await;
    let put = server
        .mock("PUT", "/rest/foo")
        .match_header("content-type", "text/turtle")
        .match_body("<> <http://purl.org/dc/elements/1.1/title> \"foo\" .")
        .with_status(201)
        .with_header("content-type", "text/plain")
        .with_body("http://localhost:8080/rest/foo")
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(format!("{}/rest", server.url())));
    let mut reply = producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "PUT")
                .with_header(headers::IDENTIFIER, "/foo")
                .with_header(headers::CONTENT_TYPE, "text/turtle")
                .with_body("<> <http://purl.org/dc/elements/1.1/title> \"foo\" ."),
        )
        .await
        .unwrap();

    put.assert_async().await;
    assert_eq!(reply.status_code(), Some(201));
    assert_eq!(reply.header(headers::CONTENT_TYPE), Some("text/plain"));
    let body = reply.body_bytes().await.unwrap().unwrap();
    assert_eq!(&body[..], b"http://localhost:8080/rest/foo");
}

#[tokio::test]
async fn test_patch_resolves_described_by() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/rest/image")
        .with_status(200)
        .with_header("link", "</rest/image/fcr:metadata>; rel=\"describedby\"")
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/rest/image/fcr:metadata")
        .match_header("content-type", "application/sparql-update")
        .match_body("INSERT DATA { <> <http://purl.org/dc/elements/1.1/title> \"img\" }")
        .with_status(204)
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(format!("{}/rest", server.url())));
    producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "PATCH")
                .with_header(headers::IDENTIFIER, "/image")
                .with_body("INSERT DATA { <> <http://purl.org/dc/elements/1.1/title> \"img\" }"),
        )
        .await
        .unwrap();

    patch.assert_async().await;
}

#[tokio::test]
async fn test_head_clears_body() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", "/rest/foo")
        .with_status(200)
        .with_header("content-type", "text/turtle")
        .create_async()
        .await;

    let producer = producer(EndpointConfig::new(format!("{}/rest", server.url())));
    let reply = producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "HEAD")
                .with_header(headers::IDENTIFIER, "/foo")
                .with_body("ignored"),
        )
        .await
        .unwrap();

    assert_eq!(reply.status_code(), Some(200));
    assert_eq!(reply.header(headers::CONTENT_TYPE), Some("text/turtle"));
    assert!(reply.body().is_none());
}

#[tokio::test]
async fn test_get_sends_synthesized_prefer() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/rest/container")
        .match_header(
            "prefer",
            "return=representation; omit=\"http://fedora.info/definitions/v4/repository#ServerManaged\"",
        )
        .with_status(200)
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        metadata: false,
        prefer_omit: vec!["ServerManaged".into()],
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    producer
        .process(Message::new().with_header(headers::IDENTIFIER, "/container"))
        .await
        .unwrap();

    get.assert_async().await;
}

#[tokio::test]
async fn test_requests_use_transaction_prefix() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/rest/fcr:tx")
        .with_status(201)
        .with_header("location", &format!("{}/rest/tx:abc", server.url()))
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/rest/tx:abc/foo")
        .with_status(201)
        .create_async()
        .await;
    let commit = server
        .mock("POST", "/rest/tx:abc/fcr:tx/fcr:commit")
        .with_status(204)
        .create_async()
        .await;
    let after = server
        .mock("PUT", "/rest/bar")
        .with_status(201)
        .create_async()
        .await;

    let config = EndpointConfig::new(format!("{}/rest", server.url()));
    let manager = TransactionManager::new(&config).unwrap();
    let producer = producer(config).with_transaction_manager(&manager);

    manager.begin().await.unwrap();
    producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "PUT")
                .with_header(headers::IDENTIFIER, "/foo"),
        )
        .await
        .unwrap();
    manager.commit().await.unwrap();

    producer
        .process(
            Message::new()
                .with_header(headers::HTTP_METHOD, "PUT")
                .with_header(headers::IDENTIFIER, "/bar"),
        )
        .await
        .unwrap();

    put.assert_async().await;
    commit.assert_async().await;
    after.assert_async().await;
}

#[tokio::test]
async fn test_fail_on_error_disabled_returns_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/missing")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let producer = producer(EndpointConfig {
        metadata: false,
        fail_on_error: false,
        ..EndpointConfig::new(format!("{}/rest", server.url()))
    });
    let reply = producer
        .process(Message::new().with_header(headers::IDENTIFIER, "/missing"))
        .await
        .unwrap();

    assert_eq!(reply.status_code(), Some(404));
    assert!(matches!(reply.body(), Some(MessageBody::Response(_))));
}
