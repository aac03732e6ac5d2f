//! Shared test utilities for `QuitBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    entities::{badge, daily_entry, goal_template, journal_entry, profile},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for building a `NaiveDate` in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a test profile with sensible defaults.
///
/// # Defaults
/// * `quit_type`: "both"
/// * `cigarettes_per_day_baseline`: 20
/// * `vape_frequency_baseline`: "moderate"
/// * `points`: 0, `level`: "beginner", no active goal
pub async fn create_test_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<profile::Model> {
    create_custom_profile(db, user_id, "both", Some(20), Some("moderate")).await
}

/// Creates a test profile with custom quit type and baselines.
/// Use this when a test depends on a specific consumption profile.
pub async fn create_custom_profile(
    db: &DatabaseConnection,
    user_id: &str,
    quit_type: &str,
    cigarettes_baseline: Option<i32>,
    vape_baseline: Option<&str>,
) -> Result<profile::Model> {
    let model = profile::ActiveModel {
        id: Set(user_id.to_string()),
        points: Set(0),
        level: Set("beginner".to_string()),
        quit_type: Set(quit_type.to_string()),
        cigarettes_per_day_baseline: Set(cigarettes_baseline),
        vape_frequency_baseline: Set(vape_baseline.map(ToString::to_string)),
        current_daily_goal_id: Set(None),
        daily_goal_started_at: Set(None),
        daily_goal_completed_today: Set(false),
        total_daily_goals_completed: Set(0),
        daily_goal_last_completion_date: Set(None),
    };
    let result = model.insert(db).await?;
    Ok(result)
}

/// Creates a daily tracker entry with the given consumption counters and no
/// activity minutes.
pub async fn create_test_entry(
    db: &DatabaseConnection,
    user_id: &str,
    entry_date: NaiveDate,
    cigarettes: i32,
    vape_puffs: i32,
) -> Result<daily_entry::Model> {
    create_custom_entry(db, user_id, entry_date, cigarettes, vape_puffs, 0, 0).await
}

/// Creates a daily tracker entry with full control over every counter.
pub async fn create_custom_entry(
    db: &DatabaseConnection,
    user_id: &str,
    entry_date: NaiveDate,
    cigarettes: i32,
    vape_puffs: i32,
    physical_activity_minutes: i32,
    meditation_minutes: i32,
) -> Result<daily_entry::Model> {
    let model = daily_entry::ActiveModel {
        user_id: Set(user_id.to_string()),
        entry_date: Set(entry_date),
        cigarettes_count: Set(cigarettes),
        vape_puffs: Set(vape_puffs),
        physical_activity_minutes: Set(physical_activity_minutes),
        meditation_minutes: Set(meditation_minutes),
        mood: Set(None),
        energy_level: Set(None),
    };
    let result = model.insert(db).await?;
    Ok(result)
}

/// Seeds one badge catalog row.
pub async fn seed_test_badge(
    db: &DatabaseConnection,
    code: &str,
    points: i32,
) -> Result<badge::Model> {
    let model = badge::ActiveModel {
        code: Set(code.to_string()),
        name: Set(code.replace('_', " ")),
        description: Set(format!("Test badge for {code}")),
        icon: Set("🏅".to_string()),
        points: Set(points),
        category: Set("milestone".to_string()),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    Ok(result)
}

/// Seeds one goal template catalog row.
pub async fn seed_test_template(
    db: &DatabaseConnection,
    category: &str,
    target_type: &str,
    max_cigarettes: Option<i32>,
    max_vape_puffs: Option<i32>,
    points_reward: i32,
) -> Result<goal_template::Model> {
    let model = goal_template::ActiveModel {
        title: Set(format!("Test {category} goal")),
        description: Set("Template seeded for tests".to_string()),
        category: Set(category.to_string()),
        target_type: Set(target_type.to_string()),
        difficulty: Set("easy".to_string()),
        max_cigarettes: Set(max_cigarettes),
        max_vape_puffs: Set(max_vape_puffs),
        points_reward: Set(points_reward),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    Ok(result)
}

/// Creates a journal entry with placeholder content.
pub async fn create_test_journal_entry(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<journal_entry::Model> {
    let model = journal_entry::ActiveModel {
        user_id: Set(user_id.to_string()),
        created_at: Set(Utc::now()),
        content: Set("Test journal entry".to_string()),
        mood: Set(None),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    Ok(result)
}
