//! Badge entity - The immutable achievement catalog.
//!
//! Rows are seeded from config.toml and never modified by the engine. The
//! `code` column is the stable rule identifier the evaluator dispatches on.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Badge catalog database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "badges")]
pub struct Model {
    /// Unique identifier for the badge
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Stable rule identifier (e.g. "week_streak", "first_journal")
    #[sea_orm(unique)]
    pub code: String,
    /// Display name shown to the user
    pub name: String,
    /// Display description shown to the user
    pub description: String,
    /// Emoji or icon identifier for display
    pub icon: String,
    /// Points awarded when this badge unlocks
    pub points: i32,
    /// Display grouping ("milestone", "reduction", "action", "regularity")
    pub category: String,
}

/// Defines relationships between Badge and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One badge has many per-user unlock records
    #[sea_orm(has_many = "super::user_badge::Entity")]
    UserBadges,
}

impl Related<super::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
