//! Create contract for posts

use pb_core::error::ValidationErrors;

use super::base::{PictureRules, PostBaseContract, PostData};
use crate::base::{Contract, ValidationResult};

/// Contract for creating a new post
pub struct CreatePostContract<'a> {
    base: PostBaseContract<'a>,
}

impl<'a> CreatePostContract<'a> {
    pub fn new(rules: &'a PictureRules) -> Self {
        Self {
            base: PostBaseContract::new(rules),
        }
    }

    /// A new post has no id yet
    fn validate_new_record<T: PostData + ?Sized>(&self, entity: &T, errors: &mut ValidationErrors) {
        if entity.id().is_some() {
            errors.add_base("Cannot create a post that already exists");
        }
    }}

impl<'a, T: PostData + ?Sized> Contract<T> for CreatePostContract<'a> {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_new_record(entity, &mut errors);

        if let Err(base_errors) = self.base.validate(entity) {
            errors.merge(base_errors);
        }

        errors.into_result()
    }
}
