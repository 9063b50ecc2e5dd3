use crate::models::member::{Group, Member, NewMember};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::member::hash_password;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn member_repo(&self) -> repositories::member::MemberRepository {
        repositories::member::MemberRepository::new(self.conn.clone())
    }

    fn group_repo(&self) -> repositories::group::GroupRepository {
        repositories::group::GroupRepository::new(self.conn.clone())
    }

    pub async fn get_member_by_username(&self, username: &str) -> Result<Option<Member>> {
        self.member_repo().get_by_username(username).await
    }

    pub async fn member_username_exists(&self, username: &str) -> Result<bool> {
        self.member_repo().username_exists(username).await
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.member_repo().list_all().await
    }

    pub async fn member_count(&self) -> Result<u64> {
        self.member_repo().count().await
    }

    pub async fn insert_member(&self, member: NewMember) -> Result<i32> {
        self.member_repo().insert(member).await
    }

    pub async fn update_member_password(&self, username: &str, password_hash: String) -> Result<u64> {
        self.member_repo()
            .update_password(username, password_hash)
            .await
    }

    pub async fn delete_member(&self, username: &str) -> Result<u64> {
        self.member_repo().delete_by_username(username).await
    }

    pub async fn get_member_password_hash(&self, username: &str) -> Result<Option<String>> {
        self.member_repo().get_password_hash(username).await
    }

    pub async fn verify_member_password(&self, username: &str, password: &str) -> Result<bool> {
        self.member_repo().verify_password(username, password).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.group_repo().list_all().await
    }

    pub async fn group_name_map(&self) -> Result<HashMap<i32, String>> {
        self.group_repo().name_map().await
    }

    pub async fn get_group(&self, id: i32) -> Result<Option<Group>> {
        self.group_repo().get(id).await
    }

    pub async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.group_repo().get_by_name(name).await
    }

    pub async fn create_group(&self, name: &str) -> Result<i32> {
        self.group_repo().create(name).await
    }
}
