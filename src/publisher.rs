use anyhow::Context;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Destination for upload notifications.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Publish: Send + Sync {
    /// Publishes `message` to `topic_arn` and returns the message id assigned by the provider.
    async fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> anyhow::Result<String>;
}

#[derive(Clone, Debug)]
pub struct SnsPublisher {
    inner: aws_sdk_sns::Client,
}

impl SnsPublisher {
    pub fn new(inner: aws_sdk_sns::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Publish for SnsPublisher {
    async fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> anyhow::Result<String> {
        let output = self
            .inner
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .with_context(|| format!("failed to publish to {topic_arn}"))?;

        output
            .message_id()
            .map(str::to_string)
            .context("publish response did not contain a message id")
    }
}
