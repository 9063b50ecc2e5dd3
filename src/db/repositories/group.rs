use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;
use tracing::info;

use crate::entities::{member_groups, prelude::*};
use crate::models::member::Group;

impl From<member_groups::Model> for Group {
    fn from(model: member_groups::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub struct GroupRepository {
    conn: DatabaseConnection,
}

impl GroupRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Group>> {
        let rows = MemberGroups::find()
            .order_by_asc(member_groups::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list member groups")?;

        Ok(rows.into_iter().map(Group::from).collect())
    }

    /// `id -> name` for every group.
    pub async fn name_map(&self) -> Result<HashMap<i32, String>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Group>> {
        let row = MemberGroups::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query member group by id")?;

        Ok(row.map(Group::from))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Group>> {
        let row = MemberGroups::find()
            .filter(member_groups::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query member group by name")?;

        Ok(row.map(Group::from))
    }

    pub async fn create(&self, name: &str) -> Result<i32> {
        let active_model = member_groups::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let res = MemberGroups::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert member group")?;

        info!("Created member group {} (id {})", name, res.last_insert_id);
        Ok(res.last_insert_id)
    }
}
