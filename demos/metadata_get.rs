//! Fetch the RDF description of a repository resource
//!
//! Issues a HEAD to discover a `describedby` link, then GETs the description
//! as Turtle.
//!
//! Run with: cargo run --example metadata_get -- http://localhost:8080/rest /some/binary

use anyhow::Context;
use fcrepo_http::protocol::constants::headers;
use fcrepo_http::{EndpointConfig, FcrepoProducer, Message};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcrepo_http=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8080/rest".to_string());
    let identifier = args.next().unwrap_or_default();

    println!("Metadata GET Example");
    println!("====================\n");
    println!("Base URL:   {}", base_url);
    println!("Identifier: {}\n", identifier);

    let producer = FcrepoProducer::new(EndpointConfig {
        prefer_omit: vec!["ServerManaged".to_string()],
        ..EndpointConfig::new(base_url)
    })?;

    let message = Message::new()
        .with_header(headers::IDENTIFIER, identifier)
        .with_header(headers::ACCEPT, "text/turtle");

    let request = producer.resolve(&message)?;
    println!("Resource:   {}", request.resource_url);
    println!("Prefer:     {:?}\n", request.prefer);

    let mut reply = producer
        .process(message)
        .await
        .context("repository request failed")?;

    println!("Status:       {:?}", reply.status_code());
    println!("Content-Type: {:?}\n", reply.header(headers::CONTENT_TYPE));

    if let Some(body) = reply.body_bytes().await? {
        println!("{}", String::from_utf8_lossy(&body));
    }

    Ok(())
}
