//! Domain service for member account management.
//!
//! Commands talk to storage and the password hasher only through this trait.

use thiserror::Error;

use crate::models::member::{Group, Member};

/// Errors surfaced by member operations.
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Logic(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MemberError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_username(username: &str) -> Self {
        Self::NotFound(format!("Invalid username: {username}"))
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

impl From<sea_orm::DbErr> for MemberError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MemberError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<std::io::Error> for MemberError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Input for [`MemberService::create_member`]. The password is plaintext.
#[derive(Debug, Clone, Default)]
pub struct CreateMemberInput {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub groups: Vec<i32>,
}

#[async_trait::async_trait]
pub trait MemberService: Send + Sync {
    /// Configured minimum password length (never 0).
    fn min_password_length(&self) -> usize;

    /// # Errors
    ///
    /// Returns [`MemberError::NotFound`] if no member has this username.
    async fn find_by_username(&self, username: &str) -> Result<Member, MemberError>;

    async fn list_members(&self) -> Result<Vec<Member>, MemberError>;

    async fn list_groups(&self) -> Result<Vec<Group>, MemberError>;

    /// Names for the given group ids, in the given order. Unknown ids are skipped.
    async fn group_names(&self, ids: &[i32]) -> Result<Vec<String>, MemberError>;

    /// Resolves a group by id or by name.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::Validation`] if no such group exists.
    async fn resolve_group(&self, reference: &str) -> Result<Group, MemberError>;

    /// Validates the input, hashes the password and inserts one row.
    async fn create_member(&self, input: CreateMemberInput) -> Result<Member, MemberError>;

    /// Hashes and stores a new password and clears the lockout state.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::Validation`] if the password is too short and
    /// [`MemberError::NotFound`] if no row was updated.
    async fn change_password(&self, username: &str, password: &str) -> Result<(), MemberError>;

    /// # Errors
    ///
    /// Returns [`MemberError::NotFound`] if no row was deleted.
    async fn delete_member(&self, username: &str) -> Result<(), MemberError>;

    async fn create_group(&self, name: &str) -> Result<Group, MemberError>;
}
