use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::models::{AuditLog, FileEvent, FileSize, S3EventRecord};
use crate::publisher::Publish;
use crate::response::Response;

pub const NOTIFICATION_SUBJECT: &str = "S3 Upload Notification";

/// Relays S3 upload records to the configured topic and answers with an audit
/// of every file it handled.
pub struct Notifier<P> {
    publisher: P,
    config: Config,
}

impl<P: Publish> Notifier<P> {
    pub fn new(publisher: P, config: Config) -> Self {
        Self { publisher, config }
    }

    /// Handles one invocation. Any fault aborts the rest of the batch and is
    /// reported as a single generic 500, so this never returns an error to the runtime.
    #[tracing::instrument(skip_all, fields(request_id = %request_id))]
    pub async fn handle(&self, event: &Value, request_id: &str) -> Response {
        match self.process_records(event, request_id).await {
            Ok(body) => Response::ok(body, &self.config.allowed_origin),
            Err(err) => {
                tracing::error!(
                    action = "file_processing_failed",
                    error = %err,
                    stack_trace = ?err,
                    event = %event,
                    "file processing failed"
                );
                Response::processing_failed(&self.config.allowed_origin)
            }
        }
    }

    async fn process_records(&self, event: &Value, request_id: &str) -> anyhow::Result<String> {
        let mut audit_log = AuditLog::new(request_id, Utc::now());

        for (index, raw_record) in records(event)?.iter().enumerate() {
            let record = S3EventRecord::deserialize(raw_record)
                .with_context(|| format!("record {index} is malformed"))?;
            let file = FileEvent::from(record);
            let file_json = serde_json::to_string(&file).context("failed to serialize file event")?;

            log_file_received(&file, &file_json);

            match self.config.sns_topic_arn.as_deref() {
                Some(topic_arn) => {
                    let message_id = self
                        .publisher
                        .publish(topic_arn, NOTIFICATION_SUBJECT, &file_json)
                        .await
                        .with_context(|| format!("failed to send notification for record {index}"))?;

                    tracing::info!(action = "notification_sent", sns_message_id = %message_id);
                }
                None => tracing::debug!("no topic configured, skipping notification"),
            }

            audit_log.record(file);
        }

        serde_json::to_string(&audit_log).context("failed to serialize audit log")
    }
}

// Fields carry the same JSON types as the serialized FileEvent, so `size` is a
// number unless it is unknown.
fn log_file_received(file: &FileEvent, file_json: &str) {
    match file.size {
        FileSize::Bytes(bytes) => tracing::info!(
            action = "file_received",
            bucket = %file.bucket,
            key = %file.key,
            size = bytes,
            event_time = %file.event_time,
            file = %file_json,
        ),
        FileSize::Unknown => tracing::info!(
            action = "file_received",
            bucket = %file.bucket,
            key = %file.key,
            size = "unknown",
            event_time = %file.event_time,
            file = %file_json,
        ),
    }
}

// A missing or null `Records` is an empty batch, anything else that is not an array is a fault.
fn records(event: &Value) -> anyhow::Result<&[Value]> {
    let event = event.as_object().context("event is not a JSON object")?;

    match event.get("Records") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(records)) => Ok(records),
        Some(other) => anyhow::bail!("Records is not an array: {other}"),
    }
}
