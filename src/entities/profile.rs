//! Profile entity - One row per user, owned by account management.
//!
//! The engine only ever mutates the gamification fields (points, level, daily
//! goal bookkeeping). Accumulated points are non-negative and never decrease;
//! the level column is derived from points and rewritten on every award.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// External auth identifier, assigned outside this crate
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Accumulated gamification points, monotonically non-decreasing
    pub points: i64,
    /// Level tier derived from points ("beginner", "explorer", "champion", "master")
    pub level: String,
    /// What the user is quitting: "cigarettes", "vape", or "both"
    pub quit_type: String,
    /// Self-reported cigarettes per day before quitting
    pub cigarettes_per_day_baseline: Option<i32>,
    /// Self-reported vaping frequency before quitting ("heavy", "moderate", "light")
    pub vape_frequency_baseline: Option<String>,
    /// Currently selected daily goal template, None when no goal is active
    pub current_daily_goal_id: Option<i64>,
    /// When the current goal was selected
    pub daily_goal_started_at: Option<DateTimeUtc>,
    /// Informational flag for the UI; goal history is the source of truth
    pub daily_goal_completed_today: bool,
    /// Lifetime count of completed daily goals
    pub total_daily_goals_completed: i32,
    /// Date of the most recent goal completion
    pub daily_goal_last_completion_date: Option<Date>,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One profile has many daily tracker entries
    #[sea_orm(has_many = "super::daily_entry::Entity")]
    DailyEntries,
    /// One profile has many journal entries
    #[sea_orm(has_many = "super::journal_entry::Entity")]
    JournalEntries,
    /// One profile has many badge unlock records
    #[sea_orm(has_many = "super::user_badge::Entity")]
    UserBadges,
    /// One profile has many goal history rows
    #[sea_orm(has_many = "super::goal_history::Entity")]
    GoalHistory,
}

impl Related<super::daily_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyEntries.def()
    }
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadges.def()
    }
}

impl Related<super::goal_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
