//! Webhook delivery: resolve the endpoint, then post with retry.

use std::sync::Arc;

use tracing::{error, info};

use crate::client::{DeliveryClient, DeliveryResult};
use crate::error::Result;
use crate::retry::{retry, AttemptOutcome, RetryPolicy};
use crate::secret::{Decryptor, SecretResolver};
use crate::types::Message;

pub struct NotificationService<D> {
    endpoint: Arc<SecretResolver<D>>,
    client: DeliveryClient,
    policy: RetryPolicy,
}

impl<D: Decryptor> NotificationService<D> {
    pub fn new(endpoint: Arc<SecretResolver<D>>, client: DeliveryClient, policy: RetryPolicy) -> Self {
        Self {
            endpoint,
            client,
            policy,
        }
    }

    /// Post `message`, retrying transient failures. Fails with the 4xx
    /// rejection or the last transient error.
    pub async fn post_message(&self, message: &Message) -> Result<DeliveryResult> {
        let result = retry(&self.policy, |_| self.attempt(message)).await;

        match &result {
            Ok(response) => info!(
                status = response.status_code,
                body = %response.body,
                "Message posted successfully"
            ),
            Err(e) => error!(error = %e, "Message delivery failed"),
        }
        result
    }

    async fn attempt(&self, message: &Message) -> AttemptOutcome<DeliveryResult> {
        let endpoint = self.endpoint.resolve().await;
        match self.client.post_json(message, endpoint).await {
            Ok(response) => response.classify(),
            Err(e) => AttemptOutcome::Transient(e),
        }
    }
}
