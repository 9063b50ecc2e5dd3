use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    pub firstname: String,

    pub lastname: String,

    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub login_enabled: bool,

    pub disabled: bool,

    pub use_two_factor: bool,

    /// JSON array of group id strings, NULL when the member has no groups
    #[sea_orm(column_type = "Text", nullable)]
    pub groups: Option<String>,

    pub login_attempts: i32,

    /// Epoch seconds, 0 when not locked
    pub locked_until: i64,

    /// Epoch seconds, 0 when never logged in
    pub last_login: i64,

    pub created_at: i64,

    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
