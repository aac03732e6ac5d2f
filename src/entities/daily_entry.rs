//! Daily entry entity - One tracker row per user per calendar day.
//!
//! The composite primary key (user, date) is what enforces the at-most-one
//! entry per day invariant; saves for an existing day go through an upsert.
//! Both consumption counters are always present since "both" quit-type users
//! track cigarettes and vape puffs independently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily tracker entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_entries")]
pub struct Model {
    /// Owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Calendar day this entry covers
    #[sea_orm(primary_key, auto_increment = false)]
    pub entry_date: Date,
    /// Cigarettes smoked that day
    pub cigarettes_count: i32,
    /// Vape puffs taken that day
    pub vape_puffs: i32,
    /// Minutes of physical activity
    pub physical_activity_minutes: i32,
    /// Minutes of meditation
    pub meditation_minutes: i32,
    /// Self-reported mood, opaque to the engine
    pub mood: Option<String>,
    /// Self-reported energy level, opaque to the engine
    pub energy_level: Option<i32>,
}

/// Defines relationships between `DailyEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id"
    )]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
