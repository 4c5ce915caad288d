//! Post model
//!
//! Table: posts

use chrono::{DateTime, Utc};
use pb_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

use crate::picture::PicturePath;

/// A managed content record
///
/// `picture`, when present, references a file in the public attachment
/// storage and serializes as its public path (`null` when absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub picture: Option<PicturePath>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn picture_path(&self) -> Option<&str> {
        self.picture.as_ref().map(PicturePath::public_path)
    }

    pub fn has_picture(&self) -> bool {
        self.picture.is_some()
    }
}

impl Identifiable for Post {
    fn id(&self) -> Option<Id> {
        Some(self.id)
    }
}

impl Timestamped for Post {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl Entity for Post {
    const TABLE_NAME: &'static str = "posts";
    const TYPE_NAME: &'static str = "Post";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(picture: Option<PicturePath>) -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            title: "Hello".into(),
            content: "World".into(),
            picture,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_picture_serializes_as_null() {
        let json = serde_json::to_value(post(None)).unwrap();
        assert_eq!(json["title"], "Hello");
        assert!(json["picture"].is_null());
    }

    #[test]
    fn test_picture_serializes_as_public_path() {
        let json = serde_json::to_value(post(Some(PicturePath::stored("uploads/1.png")))).unwrap();
        assert_eq!(json["picture"], "/storage/uploads/1.png");
    }

    #[test]
    fn test_deserialize_recovers_picture_key() {
        let json = serde_json::to_string(&post(Some(PicturePath::stored("uploads/2.svg")))).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back.picture_path(), Some("/storage/uploads/2.svg"));
        assert_eq!(
            back.picture.as_ref().and_then(|p| p.storage_key()),
            Some("uploads/2.svg")
        );
        assert!(back.is_persisted());
    }
}
