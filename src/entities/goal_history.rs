//! Goal history entity - One row per user per day recording the goal outcome.
//!
//! The composite primary key (user, date) keys the upsert: concurrent
//! completions for the same day collapse to a single row. `completed` moves
//! from false to true at most once; the evaluator never rewrites a completed
//! row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily goal history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_goal_history")]
pub struct Model {
    /// Owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Calendar day the goal applied to
    #[sea_orm(primary_key, auto_increment = false)]
    pub goal_date: Date,
    /// Which template was active that day
    pub goal_template_id: i64,
    /// Whether the goal was met
    pub completed: bool,
    /// When the goal was validated, None while pending
    pub completed_at: Option<DateTimeUtc>,
    /// Points awarded for the completion, 0 while pending
    pub points_earned: i32,
}

/// Defines relationships between `GoalHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history row belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each history row references one template
    #[sea_orm(
        belongs_to = "super::goal_template::Entity",
        from = "Column::GoalTemplateId",
        to = "super::goal_template::Column::Id"
    )]
    GoalTemplate,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::goal_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalTemplate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
