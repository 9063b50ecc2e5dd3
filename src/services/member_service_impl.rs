//! `SeaORM` implementation of the `MemberService` trait.

use anyhow::Context;
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, info};

use crate::config::SecurityConfig;
use crate::db::{Store, hash_password};
use crate::models::member::{Group, Member, NewMember};
use crate::services::member_service::{CreateMemberInput, MemberError, MemberService};
use crate::services::validation;

pub struct SeaOrmMemberService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmMemberService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Runs Argon2 on the blocking pool.
    async fn hash(&self, password: &str) -> Result<String, MemberError> {
        let password = password.to_string();
        let security = self.security.clone();

        let hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        Ok(hash)
    }
}

#[async_trait]
impl MemberService for SeaOrmMemberService {
    fn min_password_length(&self) -> usize {
        self.security.effective_min_password_length()
    }

    async fn find_by_username(&self, username: &str) -> Result<Member, MemberError> {
        self.store
            .get_member_by_username(username)
            .await?
            .ok_or_else(|| MemberError::invalid_username(username))
    }

    async fn list_members(&self) -> Result<Vec<Member>, MemberError> {
        Ok(self.store.list_members().await?)
    }

    async fn list_groups(&self) -> Result<Vec<Group>, MemberError> {
        Ok(self.store.list_groups().await?)
    }

    async fn group_names(&self, ids: &[i32]) -> Result<Vec<String>, MemberError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let names = self.store.group_name_map().await?;
        Ok(ids.iter().filter_map(|id| names.get(id).cloned()).collect())
    }

    async fn resolve_group(&self, reference: &str) -> Result<Group, MemberError> {
        let reference = reference.trim();

        if let Ok(id) = reference.parse::<i32>()
            && let Some(group) = self.store.get_group(id).await?
        {
            return Ok(group);
        }

        self.store
            .get_group_by_name(reference)
            .await?
            .ok_or_else(|| MemberError::validation(format!("Unknown member group: {reference}")))
    }

    async fn create_member(&self, input: CreateMemberInput) -> Result<Member, MemberError> {
        validation::validate_username(&input.username)?;
        validation::validate_required("firstname", &input.firstname)?;
        validation::validate_required("lastname", &input.lastname)?;
        validation::validate_email(&input.email)?;
        validation::validate_new_password(
            &input.password,
            &input.username,
            self.min_password_length(),
        )?;

        if self.store.member_username_exists(&input.username).await? {
            return Err(MemberError::validation(format!(
                "The username {} is already taken.",
                input.username
            )));
        }

        let mut groups = Vec::with_capacity(input.groups.len());
        for id in input.groups {
            if self.store.get_group(id).await?.is_none() {
                return Err(MemberError::validation(format!(
                    "Unknown member group: {id}"
                )));
            }
            if !groups.contains(&id) {
                groups.push(id);
            }
        }

        let password_hash = self.hash(&input.password).await?;

        self.store
            .insert_member(NewMember {
                username: input.username.clone(),
                firstname: input.firstname,
                lastname: input.lastname,
                email: input.email,
                password_hash,
                groups,
            })
            .await?;

        info!("Member {} created", input.username);
        self.find_by_username(&input.username).await
    }

    async fn change_password(&self, username: &str, password: &str) -> Result<(), MemberError> {
        validation::validate_min_length(password, self.min_password_length())?;

        let password_hash = self.hash(password).await?;
        let affected = self
            .store
            .update_member_password(username, password_hash)
            .await?;

        if affected == 0 {
            return Err(MemberError::invalid_username(username));
        }

        info!("Password changed for member {}", username);
        Ok(())
    }

    async fn delete_member(&self, username: &str) -> Result<(), MemberError> {
        let affected = self.store.delete_member(username).await?;

        if affected == 0 {
            return Err(MemberError::invalid_username(username));
        }

        debug!("Deleted {} row(s) for {}", affected, username);
        Ok(())
    }

    async fn create_group(&self, name: &str) -> Result<Group, MemberError> {
        let name = validation::validate_group_name(name)?;

        if self.store.get_group_by_name(name).await?.is_some() {
            return Err(MemberError::validation(format!(
                "The group {name} already exists."
            )));
        }

        let id = self.store.create_group(name).await?;
        Ok(Group {
            id,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let member_err: MemberError = db_err.into();
        assert!(matches!(member_err, MemberError::Database(_)));

        let member_err: MemberError = anyhow::anyhow!("boom").into();
        assert!(matches!(member_err, MemberError::Internal(_)));
    }

    #[test]
    fn not_found_message_names_the_user() {
        let err = MemberError::invalid_username("ghost");
        assert_eq!(err.to_string(), "Invalid username: ghost");
        assert_eq!(err.exit_code(), 1);
    }
}
