//! Create two resources atomically
//!
//! Opens a transaction, creates a container and a child inside it, and
//! commits. Any failure rolls the transaction back.
//!
//! Run with: cargo run --example transaction_demo -- http://localhost:8080/rest

use fcrepo_http::protocol::constants::headers;
use fcrepo_http::{EndpointConfig, FcrepoProducer, Message, TransactionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcrepo_http=info".into()),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/rest".to_string());

    println!("Transaction Example");
    println!("===================\n");

    let config = EndpointConfig::new(base_url);
    let manager = TransactionManager::new(&config)?;
    let producer = FcrepoProducer::new(config)?.with_transaction_manager(&manager);

    let info = manager.begin().await?;
    println!("Opened {} at {}", info.id, info.location);

    match create_resources(&producer).await {
        Ok(()) => {
            manager.commit().await?;
            println!("Committed");
        }
        Err(e) => {
            eprintln!("Rolling back: {}", e);
            manager.rollback().await?;
            return Err(e);
        }
    }

    Ok(())
}

async fn create_resources(producer: &FcrepoProducer) -> anyhow::Result<()> {
    let container = Message::new()
        .with_header(headers::HTTP_METHOD, "PUT")
        .with_header(headers::IDENTIFIER, "/books")
        .with_header(headers::CONTENT_TYPE, "text/turtle")
        .with_body("<> <http://purl.org/dc/elements/1.1/title> \"Books\" .");
    let reply = producer.process(container).await?;
    println!("  /books        -> {:?}", reply.status_code());

    let child = Message::new()
        .with_header(headers::HTTP_METHOD, "PUT")
        .with_header(headers::IDENTIFIER, "/books/dune")
        .with_header(headers::CONTENT_TYPE, "text/turtle")
        .with_body("<> <http://purl.org/dc/elements/1.1/title> \"Dune\" .");
    let reply = producer.process(child).await?;
    println!("  /books/dune   -> {:?}", reply.status_code());

    Ok(())
}
