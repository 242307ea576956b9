//! Object storage for uploaded photos
//!
//! The app never serves photo bytes itself: uploads go out to an
//! S3-like bucket over HTTP and the database keeps only the public URL.

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3LikeStore;

use async_trait::async_trait;
use uuid::Uuid;

/// Object storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage request failed: {0}")]
    Network(String),

    #[error("storage rejected the upload: {0}")]
    Rejected(String),
}

/// Where photo bytes go.
///
/// Production talks to an S3-compatible endpoint; tests swap in the
/// in-memory store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Public URL where the object can be fetched afterwards.
    fn object_url(&self, key: &str) -> String;
}

/// Build the storage key for an uploaded photo.
///
/// Six hex characters from a fresh UUID plus the original file
/// extension. Filenames without an extension get the bare stem.
pub fn photo_key(original_filename: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let stem = &hex[..6];

    match original_filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn photo_key_is_six_hex_chars_plus_extension() {
        let re = Regex::new(r"^[0-9a-f]{6}\.png$").expect("valid regex");
        assert!(re.is_match(&photo_key("whiskers.png")));
    }

    #[test]
    fn photo_key_keeps_only_the_last_extension() {
        let key = photo_key("cat.final.jpeg");
        assert!(key.ends_with(".jpeg"));
        assert_eq!(key.len(), "abcdef.jpeg".len());
    }

    #[test]
    fn photo_key_without_extension_is_bare_stem() {
        let key = photo_key("rawupload");
        assert_eq!(key.len(), 6);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn photo_keys_do_not_collide_back_to_back() {
        assert_ne!(photo_key("a.png"), photo_key("a.png"));
    }
}
