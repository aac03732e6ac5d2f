//! User badge entity - One unlock record per (user, badge), ever.
//!
//! The composite primary key is the uniqueness guarantee the evaluator relies
//! on: a duplicate insert under concurrent double-invocation is rejected by
//! the database rather than double-awarding points.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Badge unlock record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_badges")]
pub struct Model {
    /// User who unlocked the badge
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// The unlocked badge
    #[sea_orm(primary_key, auto_increment = false)]
    pub badge_id: i64,
    /// When the unlock happened
    pub unlocked_at: DateTimeUtc,
}

/// Defines relationships between `UserBadge` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unlock belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each unlock references one badge
    #[sea_orm(
        belongs_to = "super::badge::Entity",
        from = "Column::BadgeId",
        to = "super::badge::Column::Id"
    )]
    Badge,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Badge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
