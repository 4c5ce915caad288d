//! Picture references
//!
//! A stored picture is known to clients by its public path and to the
//! attachment storage by its storage key. `PicturePath` carries both so the
//! two forms never have to be re-derived from each other by callers.

use serde::{Deserialize, Serialize};

/// URL segment under which the public storage disk is mounted
pub const PUBLIC_MOUNT: &str = "/storage/";

/// Public path plus storage key of a stored picture
///
/// Serializes as the public path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PicturePath {
    public_path: String,
    storage_key: Option<String>,
}

impl PicturePath {
    /// Build the reference for a file stored under `storage_key`
    pub fn stored(storage_key: impl Into<String>) -> Self {
        let key = storage_key.into().trim_start_matches('/').to_string();
        Self {
            public_path: format!("{}{}", PUBLIC_MOUNT, key),
            storage_key: Some(key),
        }
    }

    /// Recover the reference from a persisted public path
    ///
    /// Paths outside the public mount keep no storage key and are never
    /// treated as files owned by the attachment storage.
    pub fn from_public(public_path: impl Into<String>) -> Self {
        let public_path = public_path.into();
        let storage_key = public_path
            .strip_prefix(PUBLIC_MOUNT)
            .filter(|key| !key.is_empty() && !key.split('/').any(|part| part == ".."))
            .map(str::to_string);

        Self {
            public_path,
            storage_key,
        }
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    /// File extension of the stored file, without the dot
    pub fn extension(&self) -> Option<&str> {
        let name = self.public_path.rsplit('/').next()?;
        name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
    }
}

impl From<String> for PicturePath {
    fn from(public_path: String) -> Self {
        Self::from_public(public_path)
    }
}

impl From<PicturePath> for String {
    fn from(path: PicturePath) -> Self {
        path.public_path
    }
}

impl std::fmt::Display for PicturePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.public_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_builds_public_path() {
        let path = PicturePath::stored("uploads/1700000000.png");
        assert_eq!(path.public_path(), "/storage/uploads/1700000000.png");
        assert_eq!(path.storage_key(), Some("uploads/1700000000.png"));
        assert_eq!(path.extension(), Some("png"));
    }

    #[test]
    fn test_from_public_recovers_key() {
        let path = PicturePath::from_public("/storage/uploads/cat.gif");
        assert_eq!(path.storage_key(), Some("uploads/cat.gif"));
        assert_eq!(path, PicturePath::stored("uploads/cat.gif"));
    }

    #[test]
    fn test_foreign_paths_have_no_key() {
        assert_eq!(PicturePath::from_public("https://cdn.example.com/a.png").storage_key(), None);
        assert_eq!(PicturePath::from_public("/storage/").storage_key(), None);
        assert_eq!(PicturePath::from_public("/storage/../secret.png").storage_key(), None);
        // only the leading mount is stripped
        assert_eq!(
            PicturePath::from_public("/storage/uploads/storage/x.png").storage_key(),
            Some("uploads/storage/x.png")
        );
    }

    #[test]
    fn test_serializes_as_public_path() {
        let path = PicturePath::stored("uploads/a.jpg");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/storage/uploads/a.jpg\"");

        let back: PicturePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back.storage_key(), Some("uploads/a.jpg"));
    }
}
