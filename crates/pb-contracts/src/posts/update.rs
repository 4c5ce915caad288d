//! Update contract for posts

use pb_core::error::ValidationErrors;
use pb_core::traits::Id;

use super::base::{PictureRules, PostBaseContract, PostData};
use super::messages;
use crate::base::{Contract, ValidationResult};

/// Contract for updating an existing post
pub struct UpdatePostContract<'a> {
    base: PostBaseContract<'a>,
    post_id: Id,
}

impl<'a> UpdatePostContract<'a> {
    pub fn new(rules: &'a PictureRules, post_id: Id) -> Self {
        Self {
            base: PostBaseContract::new(rules),
            post_id,
        }
    }

    /// The submitted data must describe the post being updated
    fn validate_persisted<T: PostData + ?Sized>(&self, entity: &T, errors: &mut ValidationErrors) {
        match entity.id() {
            None => errors.add_base(messages::NEW_RECORD),
            Some(id) if id != self.post_id => {
                errors.add_base(format!("Post id {} does not match {}", id, self.post_id))
            }
            Some(_) => {}
        }
    }
}

impl<'a, T: PostData + ?Sized> Contract<T> for UpdatePostContract<'a> {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_persisted(entity, &mut errors);

        if let Err(base_errors) = self.base.validate(entity) {
            errors.merge(base_errors);
        }

        errors.into_result()
    }
}
