//! Local upload store
//!
//! Admin-submitted reference snippets, persisted as one JSON array under a
//! single storage key. Every save rewrites the whole array.
//!
//! Storage failures never reach the caller: reads degrade to "no uploads"
//! and writes are best effort. A collection that exists but cannot be read
//! is never overwritten by `save`.

use crate::admin::AdminToken;
use crate::storage::{Storage, StoragePort};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Storage key holding the serialized upload array
pub const STORAGE_KEY: &str = "cbse_copilot_admin_uploads";

/// One stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: String,
    pub file_name: String,
    #[serde(rename = "class")]
    pub grade_level: String,
    pub subject: String,
    /// Free-text chapter label, matched loosely against chapter names
    #[serde(rename = "chapter")]
    pub chapter_label: String,
    pub content_type: String,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at_millis: i64,
}

impl UploadRecord {
    /// Bidirectional, case-sensitive substring match on the chapter label
    pub fn matches_chapter(&self, chapter_label: &str) -> bool {
        self.chapter_label.contains(chapter_label) || chapter_label.contains(&self.chapter_label)
    }
}

/// Upload as submitted, before id and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
    pub file_name: String,
    pub grade_level: String,
    pub subject: String,
    pub chapter_label: String,
    pub content_type: String,
    pub content: String,
}

impl NewUpload {
    /// Manual entry, named the way the admin form names pasted text
    pub fn manual(
        grade_level: impl Into<String>,
        subject: impl Into<String>,
        chapter_label: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_name: format!("ManualEntry_{}.txt", chrono::Utc::now().timestamp_millis()),
            grade_level: grade_level.into(),
            subject: subject.into(),
            chapter_label: chapter_label.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// Serialize an upload collection
pub fn encode(records: &[UploadRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Parse an upload collection
pub fn decode(raw: &str) -> serde_json::Result<Vec<UploadRecord>> {
    serde_json::from_str(raw)
}

/// Upload store over a storage port
#[derive(Debug)]
pub struct UploadStore {
    storage: Storage,
}

impl UploadStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Storage::default())
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Assign id and timestamp, append, and persist (best effort)
    pub fn save(&self, _token: &AdminToken, upload: NewUpload) -> UploadRecord {
        let record = UploadRecord {
            id: uuid::Uuid::new_v4().simple().to_string(),
            file_name: upload.file_name,
            grade_level: upload.grade_level,
            subject: upload.subject,
            chapter_label: upload.chapter_label,
            content_type: upload.content_type,
            content: upload.content,
            created_at_millis: chrono::Utc::now().timestamp_millis(),
        };

        match self.load() {
            Some(mut all) => {
                all.push(record.clone());
                self.write_all(&all);
            }
            None => {
                warn!(id = %record.id, "existing uploads unreadable, save dropped");
                return record;
            }
        }

        info!(
            id = %record.id,
            class = %record.grade_level,
            subject = %record.subject,
            chapter = %record.chapter_label,
            "upload saved"
        );
        record
    }

    /// All uploads in insertion order
    pub fn list(&self) -> Vec<UploadRecord> {
        self.load().unwrap_or_default()
    }

    /// `None` when a stored collection exists but cannot be read or parsed
    fn load(&self) -> Option<Vec<UploadRecord>> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Some(Vec::new()),
            Err(e) => {
                warn!(error = %e, "upload storage unreadable");
                return None;
            }
        };

        match decode(&raw) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(error = %e, "upload collection malformed");
                None
            }
        }
    }

    /// Uploads for a class/subject whose chapter label overlaps `chapter_label`
    pub fn find_relevant(
        &self,
        grade_level: &str,
        subject: &str,
        chapter_label: &str,
    ) -> Vec<UploadRecord> {
        let found: Vec<UploadRecord> = self
            .list()
            .into_iter()
            .filter(|u| {
                u.grade_level == grade_level
                    && u.subject == subject
                    && u.matches_chapter(chapter_label)
            })
            .collect();
        debug!(count = found.len(), chapter = chapter_label, "relevant uploads");
        found
    }

    /// Drop every upload
    pub fn clear(&self, _token: &AdminToken) {
        self.write_all(&[]);
        info!("upload store cleared");
    }

    fn write_all(&self, records: &[UploadRecord]) {
        let encoded = match encode(records) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to encode uploads, save dropped");
                return;
            }
        };
        if let Err(e) = self.storage.put(STORAGE_KEY, &encoded) {
            warn!(error = %e, "upload storage unavailable, save dropped");
        }
    }
}
