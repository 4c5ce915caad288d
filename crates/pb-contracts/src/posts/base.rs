//! Base contract for posts

use pb_core::config::StorageConfig;
use pb_core::error::ValidationErrors;
use pb_core::traits::Id;

use super::{messages, TITLE_MAX_LENGTH};
use crate::base::{Contract, ValidationResult};

/// Post data for validation
pub trait PostData: Send + Sync {
    fn id(&self) -> Option<Id>;
    /// Submitted title; empty when the field was missing
    fn title(&self) -> &str;
    /// Submitted content; empty when the field was missing
    fn content(&self) -> &str;
    /// Picture accompanying the submission, if any
    fn picture(&self) -> Option<PictureUpload<'_>>;
}

/// What the contract needs to know about an uploaded picture
#[derive(Debug, Clone, Copy)]
pub struct PictureUpload<'a> {
    pub file_name: &'a str,
    pub content_type: Option<&'a str>,
    pub size: u64,
}

impl<'a> PictureUpload<'a> {
    /// Lowercase extension of the client file name
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Whether the declared (or, failing that, guessed) type is an image
    pub fn is_image(&self) -> bool {
        let declared = self
            .content_type
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .filter(|m| *m != mime::APPLICATION_OCTET_STREAM);

        match declared {
            Some(m) => m.type_() == mime::IMAGE,
            None => mime_guess::from_path(self.file_name)
                .first()
                .map(|m| m.type_() == mime::IMAGE)
                .unwrap_or(false),
        }
    }
}

/// Allowed picture types and size cap
#[derive(Debug, Clone)]
pub struct PictureRules {
    /// Allowed extensions, lowercase without dot
    pub allowed_extensions: Vec<String>,
    /// Maximum size in kilobytes
    pub max_kilobytes: u64,
}

impl PictureRules {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            max_kilobytes: config.max_picture_kb,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_kilobytes * 1024
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|allowed| allowed == ext)
    }

    fn type_message(&self) -> String {
        format!("must be a file of type: {}", self.allowed_extensions.join(", "))
    }

    fn size_message(&self) -> String {
        format!("may not be greater than {} kilobytes", self.max_kilobytes)
    }
}

impl Default for PictureRules {
    fn default() -> Self {
        Self::from_config(&pb_core::config::AppConfig::default().storage)
    }
}

/// Base contract for posts with the rules shared by create and update
pub struct PostBaseContract<'a> {
    rules: &'a PictureRules,
}

impl<'a> PostBaseContract<'a> {
    pub fn new(rules: &'a PictureRules) -> Self {
        Self { rules }
    }

    /// Validate title is present and within length
    pub fn validate_title(&self, title: &str, errors: &mut ValidationErrors) {
        if title.trim().is_empty() {
            errors.add("title", messages::BLANK);
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            errors.add("title", messages::TITLE_TOO_LONG);
        }
    }

    /// Validate content is present
    pub fn validate_content(&self, content: &str, errors: &mut ValidationErrors) {
        if content.trim().is_empty() {
            errors.add("content", messages::BLANK);
        }
    }

    /// Validate the picture type and size, if one was uploaded
    pub fn validate_picture(&self, picture: Option<PictureUpload<'_>>, errors: &mut ValidationErrors) {
        let Some(picture) = picture else {
            return;
        };

        if picture.size == 0 || !picture.is_image() {
            errors.add("picture", messages::NOT_AN_IMAGE);
        }

        let allowed = picture
            .extension()
            .map(|ext| self.rules.allows_extension(&ext))
            .unwrap_or(false);
        if !allowed {
            errors.add("picture", self.rules.type_message());
        }

        if picture.size > self.rules.max_bytes() {
            errors.add("picture", self.rules.size_message());
        }
    }}

impl<'a, T: PostData + ?Sized> Contract<T> for PostBaseContract<'a> {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_title(entity.title(), &mut errors);
        self.validate_content(entity.content(), &mut errors);
        self.validate_picture(entity.picture(), &mut errors);

        errors.into_result()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct MockPost {
        pub id: Option<Id>,
        pub title: String,
        pub content: String,
        pub picture: Option<(String, Option<String>, u64)>,
    }

    impl MockPost {
        pub fn new(title: &str, content: &str) -> Self {
            Self {
                id: None,
                title: title.to_string(),
                content: content.to_string(),
                picture: None,
            }
        }

        pub fn with_picture(mut self, name: &str, content_type: Option<&str>, size: u64) -> Self {
            self.picture = Some((name.to_string(), content_type.map(str::to_string), size));
            self
        }
    }

    impl PostData for MockPost {
        fn id(&self) -> Option<Id> { self.id }
        fn title(&self) -> &str { &self.title }
        fn content(&self) -> &str { &self.content }
        fn picture(&self) -> Option<PictureUpload<'_>> {
            self.picture.as_ref().map(|(name, ct, size)| PictureUpload {
                file_name: name,
                content_type: ct.as_deref(),
                size: *size,
            })
        }
    }

    fn validate(post: &MockPost) -> ValidationResult {
        let rules = PictureRules::default();
        PostBaseContract::new(&rules).validate(post)
    }

    #[test]
    fn test_valid_post() {
        assert!(validate(&MockPost::new("Hello", "World")).is_ok());
        assert!(validate(&MockPost::new("Cat", "Meow").with_picture("cat.png", Some("image/png"), 10 * 1024)).is_ok());
    }

    #[test]
    fn test_blank_title_and_content() {
        let errors = validate(&MockPost::new("   ", "")).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), &vec![messages::BLANK.to_string()]);
        assert_eq!(errors.get("content").unwrap(), &vec![messages::BLANK.to_string()]);
    }

    #[test]
    fn test_title_length_counts_characters() {
        assert!(validate(&MockPost::new(&"a".repeat(255), "x")).is_ok());
        // 255 multi-byte characters are still within the limit
        assert!(validate(&MockPost::new(&"é".repeat(255), "x")).is_ok());

        let errors = validate(&MockPost::new(&"a".repeat(256), "x")).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), &vec![messages::TITLE_TOO_LONG.to_string()]);
    }

    #[test]
    fn test_text_file_is_rejected() {
        let errors = validate(&MockPost::new("a", "b").with_picture("notes.txt", Some("text/plain"), 12))
            .unwrap_err();
        let picture = errors.get("picture").unwrap();
        assert!(picture.contains(&messages::NOT_AN_IMAGE.to_string()));
        assert!(picture.contains(&"must be a file of type: jpeg, png, jpg, gif, svg".to_string()));
    }

    #[test]
    fn test_disallowed_image_type_is_rejected() {
        let errors = validate(&MockPost::new("a", "b").with_picture("photo.webp", Some("image/webp"), 12))
            .unwrap_err();
        assert_eq!(
            errors.get("picture").unwrap(),
            &vec!["must be a file of type: jpeg, png, jpg, gif, svg".to_string()]
        );
    }

    #[test]
    fn test_oversized_picture_is_rejected() {
        let ok = MockPost::new("a", "b").with_picture("big.jpg", Some("image/jpeg"), 2048 * 1024);
        assert!(validate(&ok).is_ok());

        let too_big = MockPost::new("a", "b").with_picture("big.jpg", Some("image/jpeg"), 2048 * 1024 + 1);
        let errors = validate(&too_big).unwrap_err();
        assert_eq!(
            errors.get("picture").unwrap(),
            &vec!["may not be greater than 2048 kilobytes".to_string()]
        );
    }

    #[test]
    fn test_empty_picture_is_not_an_image() {
        let errors = validate(&MockPost::new("a", "b").with_picture("empty.png", Some("image/png"), 0))
            .unwrap_err();
        assert_eq!(errors.get("picture").unwrap(), &vec![messages::NOT_AN_IMAGE.to_string()]);
    }

    #[test]
    fn test_missing_content_type_falls_back_to_extension() {
        assert!(validate(&MockPost::new("a", "b").with_picture("logo.SVG", None, 100)).is_ok());
        assert!(validate(&MockPost::new("a", "b").with_picture("logo.gif", Some("application/octet-stream"), 100)).is_ok());
    }
}
