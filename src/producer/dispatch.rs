//! The producer: one inbound message in, one outbound message out.

use super::{EndpointConfig, OperationRequest, ResolvedRequest};
use crate::client::FcrepoClient;
use crate::error::{FcrepoError, Result};
use crate::protocol::constants::headers;
use crate::transaction::{TransactionHandle, TransactionManager};
use crate::types::{FcrepoResponse, Message, MessageBody, Verb};
use bytes::Bytes;
use std::sync::Arc;

/// Executes operation messages against one repository endpoint.
///
/// Holds no per-call state besides the optional transaction handle, so two
/// messages processed back to back are independent requests that at most
/// share a transaction prefix.
#[derive(Clone)]
pub struct FcrepoProducer {
    config: Arc<EndpointConfig>,
    client: FcrepoClient,
    transaction: Option<TransactionHandle>,
}

impl FcrepoProducer {
    /// Create a producer whose client is derived from the endpoint.
    ///
    /// Fails with [`FcrepoError::Config`] when the base URL is unusable.
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = FcrepoClient::with_config(config.client_config());
        Self::with_client(config, client)
    }

    /// Create a producer with an existing client.
    pub fn with_client(config: EndpointConfig, client: FcrepoClient) -> Result<Self> {
        config.normalized_base_url()?;
        Ok(FcrepoProducer {
            config: Arc::new(config),
            client,
            transaction: None,
        })
    }

    /// Route requests through the transactions a manager opens.
    pub fn with_transaction_manager(self, manager: &TransactionManager) -> Self {
        self.with_transaction_handle(manager.handle())
    }

    /// Route requests through the transaction held by a handle.
    pub fn with_transaction_handle(mut self, handle: TransactionHandle) -> Self {
        self.transaction = Some(handle);
        self
    }

    /// The endpoint configuration.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Gather the inputs for a message.
    pub fn operation(&self, message: &Message) -> Result<OperationRequest> {
        let active = self.transaction.as_ref().and_then(TransactionHandle::id);
        OperationRequest::from_message(&self.config, message, active)
    }

    /// Resolve a message into a request without sending anything.
    pub fn resolve(&self, message: &Message) -> Result<ResolvedRequest> {
        Ok(self.operation(message)?.resolve())
    }

    /// Execute the operation a message describes.
    ///
    /// The returned message keeps the inbound headers, gains `http-status-code`
    /// and the response `content-type`, and carries the response entity as its
    /// body (none for HEAD). Failures from any request, including the
    /// `describedby` lookup, propagate unchanged.
    pub async fn process(&self, mut message: Message) -> Result<Message> {
        let request = self.resolve(&message)?;
        let body = if request.verb.has_body() {
            message.body_bytes().await?
        } else {
            message.take_body();
            None
        };

        if request.verb == Verb::Patch && body.as_ref().map_or(true, Bytes::is_empty) {
            return Err(FcrepoError::InvalidRequest(format!(
                "PATCH to {} requires a SPARQL update body",
                request.url
            )));
        }

        let target = self.target(&request).await?;
        let response = self.dispatch(&request, &target, body).await?;

        Ok(outbound(message, response))
    }

    /// The URL the request is sent to, after the optional `describedby` lookup.
    async fn target(&self, request: &ResolvedRequest) -> Result<String> {
        if !request.metadata_lookup {
            return Ok(request.url.clone());
        }

        let head = self.client.head(&request.resource_url).await?;
        match head.described_by {
            Some(described_by) => {
                tracing::debug!(
                    resource = %request.resource_url,
                    described_by = %described_by,
                    "Following describedby link"
                );
                Ok(request.target_for(&described_by))
            }
            None => Ok(request.url.clone()),
        }
    }

    async fn dispatch(
        &self,
        request: &ResolvedRequest,
        target: &str,
        body: Option<Bytes>,
    ) -> Result<FcrepoResponse> {
        let content_type = request.content_type.as_deref();
        match request.verb {
            Verb::Head => self.client.head(target).await,
            Verb::Get => {
                self.client
                    .get(target, Some(&request.accept), request.prefer.as_deref())
                    .await
            }
            Verb::Put => self.client.put(target, body, content_type).await,
            Verb::Post => self.client.post(target, body, content_type).await,
            Verb::Patch => self.client.patch(target, body.unwrap_or_default()).await,
            Verb::Delete => self.client.delete(target).await,
        }
    }
}

/// Fold a response back into the message it answers.
fn outbound(mut message: Message, mut response: FcrepoResponse) -> Message {
    message.set_header(headers::HTTP_STATUS_CODE, response.status.to_string());
    match response.content_type.take() {
        Some(content_type) => message.set_header(headers::CONTENT_TYPE, content_type),
        None => {
            message.remove_header(headers::CONTENT_TYPE);
        }
    }
    message.set_body(response.take_body().map(MessageBody::from));
    message
}
