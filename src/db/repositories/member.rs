use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{members, prelude::*};
use crate::models::member::{Member, NewMember, decode_groups, encode_groups};

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Self {
            id: model.id,
            groups: decode_groups(model.groups.as_deref()),
            username: model.username,
            firstname: model.firstname,
            lastname: model.lastname,
            email: model.email,
            login_enabled: model.login_enabled,
            disabled: model.disabled,
            use_two_factor: model.use_two_factor,
            login_attempts: model.login_attempts,
            locked_until: model.locked_until,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct MemberRepository {
    conn: DatabaseConnection,
}

impl MemberRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<Member>> {
        let member = Members::find()
            .filter(members::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query member by username")?;

        Ok(member.map(Member::from))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = Members::find()
            .filter(members::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to count members by username")?;

        Ok(count > 0)
    }

    /// All members ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Member>> {
        let rows = Members::find()
            .order_by_asc(members::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list members")?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Members::find()
            .count(&self.conn)
            .await
            .context("Failed to count members")
    }

    pub async fn insert(&self, member: NewMember) -> Result<i32> {
        let now = chrono::Utc::now().timestamp();
        let username = member.username.clone();

        let active_model = members::ActiveModel {
            username: Set(member.username),
            firstname: Set(member.firstname),
            lastname: Set(member.lastname),
            email: Set(member.email),
            password_hash: Set(member.password_hash),
            login_enabled: Set(true),
            disabled: Set(false),
            use_two_factor: Set(false),
            groups: Set(encode_groups(&member.groups)),
            login_attempts: Set(0),
            locked_until: Set(0),
            last_login: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let res = Members::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert member")?;

        info!("Inserted member {} (id {})", username, res.last_insert_id);
        Ok(res.last_insert_id)
    }

    /// Replaces the password hash and clears the lockout counters.
    /// Returns the number of rows affected.
    pub async fn update_password(&self, username: &str, password_hash: String) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let res = Members::update_many()
            .col_expr(members::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(members::Column::LoginAttempts, Expr::value(0_i32))
            .col_expr(members::Column::LockedUntil, Expr::value(0_i64))
            .col_expr(members::Column::UpdatedAt, Expr::value(now))
            .filter(members::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to update member password")?;

        info!(
            "Password update for {} affected {} row(s)",
            username, res.rows_affected
        );
        Ok(res.rows_affected)
    }

    /// Returns the number of rows deleted.
    pub async fn delete_by_username(&self, username: &str) -> Result<u64> {
        let res = Members::delete_many()
            .filter(members::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to delete member")?;

        info!("Deleted member {} ({} row(s))", username, res.rows_affected);
        Ok(res.rows_affected)
    }

    pub async fn get_password_hash(&self, username: &str) -> Result<Option<String>> {
        let member = Members::find()
            .filter(members::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query member password hash")?;

        Ok(member.map(|m| m.password_hash))
    }

    /// Note: This uses `spawn_blocking` because Argon2 verification is CPU-intensive.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        let Some(password_hash) = self.get_password_hash(username).await? else {
            return Ok(false);
        };

        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password using Argon2id with the configured params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 256,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn hash_is_salted_argon2id() {
        let first = hash_password("supersecret1", &fast_params()).unwrap();
        let second = hash_password("supersecret1", &fast_params()).unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn hash_verifies_against_original_password() {
        let hash = hash_password("supersecret1", &fast_params()).unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(
            Argon2::default()
                .verify_password(b"supersecret1", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = SecurityConfig {
            argon2_parallelism: 0,
            ..SecurityConfig::default()
        };
        assert!(hash_password("supersecret1", &config).is_err());
    }
}
