//! The user record and its validation boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted `name`, in characters.
pub const MAX_NAME_LEN: usize = 256;

/// A single user entry.
///
/// `id` is not required to be unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: u32,
}

/// Reasons a well-formed `User` is still rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("name must not be blank")]
    BlankName,

    #[error("name must be at most {max} characters, got {0}", max = MAX_NAME_LEN)]
    NameTooLong(usize),
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(UserValidationError::NameTooLong(len));
        }
        Ok(())
    }
}
