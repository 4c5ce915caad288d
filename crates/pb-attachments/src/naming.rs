//! Stored file names

use chrono::{DateTime, Utc};
use pb_core::config::FileNaming;
use uuid::Uuid;

/// Generate the stored name for an upload
///
/// The name keeps the client's (lowercased) extension and never any other
/// part of the client file name.
pub fn generate_filename(extension: Option<&str>, naming: FileNaming, now: DateTime<Utc>) -> String {
    let stem = match naming {
        FileNaming::Timestamp => now.timestamp().to_string(),
        FileNaming::Unique => format!("{}_{}", now.timestamp(), Uuid::new_v4().simple()),
    };

    match extension.filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("{}.{}", stem, ext.to_ascii_lowercase()),
        None => stem,
    }
}
