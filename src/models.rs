use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Only the parts of an S3 notification record we forward. Everything else
// (eventName, awsRegion, userIdentity, ...) is ignored.
#[derive(Debug, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventTime")]
    pub event_time: String,
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct S3Object {
    // Keys stay URL-encoded, exactly as S3 delivers them.
    pub key: String,
    pub size: Option<FileSize>,
}

/// Object size as reported by S3. Records without a size (removal events,
/// for one) are reported as `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSize {
    Bytes(u64),
    Unknown,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFileSize {
    Bytes(u64),
    Label(String),
}

// Accepts what `Serialize` produces: a byte count or the literal "unknown".
impl<'de> Deserialize<'de> for FileSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawFileSize::deserialize(deserializer)? {
            RawFileSize::Bytes(bytes) => Ok(FileSize::Bytes(bytes)),
            RawFileSize::Label(label) if label == "unknown" => Ok(FileSize::Unknown),
            RawFileSize::Label(label) => Err(serde::de::Error::custom(format!(
                "invalid object size {label:?}, expected a byte count or \"unknown\""
            ))),
        }
    }
}

impl Serialize for FileSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FileSize::Bytes(bytes) => serializer.serialize_u64(*bytes),
            FileSize::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Metadata of one uploaded object. This is both the notification payload and
/// an entry of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEvent {
    pub bucket: String,
    pub key: String,
    pub size: FileSize,
    pub event_time: String,
}

impl From<S3EventRecord> for FileEvent {
    fn from(record: S3EventRecord) -> Self {
        Self {
            bucket: record.s3.bucket.name,
            key: record.s3.object.key,
            size: record.s3.object.size.unwrap_or(FileSize::Unknown),
            event_time: record.event_time,
        }
    }
}

/// Response body of a successful invocation.
#[derive(Debug, Serialize)]
pub struct AuditLog {
    pub event_time: String,
    #[serde(rename = "aws_request_id")]
    pub request_id: String,
    pub processed_files: Vec<FileEvent>,
}

impl AuditLog {
    pub fn new(request_id: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            event_time: started_at
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            request_id: request_id.to_string(),
            processed_files: Vec::new(),
        }
    }

    pub fn record(&mut self, file: FileEvent) {
        self.processed_files.push(file);
    }
}
