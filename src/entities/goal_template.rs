//! Goal template entity - The immutable daily goal catalog.
//!
//! Seeded from config.toml, read-only to the evaluator. The threshold columns
//! are nullable because a template only carries the maxima relevant to its
//! target type.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily goal template database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_goal_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display title shown to the user
    pub title: String,
    /// Display description shown to the user
    pub description: String,
    /// Validation rule family ("reduction", "time", "period", "spacing", "context")
    pub category: String,
    /// Which consumption counter the goal targets ("cigarettes", "vape", "both")
    pub target_type: String,
    /// Display difficulty ("easy", "medium", "hard")
    pub difficulty: String,
    /// Maximum cigarettes allowed for the day, when relevant
    pub max_cigarettes: Option<i32>,
    /// Maximum vape puffs allowed for the day, when relevant
    pub max_vape_puffs: Option<i32>,
    /// Points awarded on first completion of the day
    pub points_reward: i32,
}

/// Defines relationships between `GoalTemplate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template appears in many history rows
    #[sea_orm(has_many = "super::goal_history::Entity")]
    GoalHistory,
}

impl Related<super::goal_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
