//! Daily entry and journal persistence, plus the post-save evaluation hooks.
//!
//! Saving a tracker entry is an upsert keyed on the (user, date) primary key,
//! so a page reload that saves twice still produces a single row per day.
//! After a successful save the caller runs [`run_post_save_hooks`], which
//! evaluates the active daily goal against today's entry and then sweeps the
//! badge catalog.

use crate::{
    core::{badges, goals},
    entities::{DailyEntry, JournalEntry, badge, daily_entry, journal_entry},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    PaginatorTrait, QueryOrder, Set,
    prelude::*,
    sea_query::OnConflict,
};
use tracing::debug;

/// Consumption and activity counters for one tracked day.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    /// Cigarettes smoked
    pub cigarettes_count: i32,
    /// Vape puffs taken
    pub vape_puffs: i32,
    /// Minutes of physical activity
    pub physical_activity_minutes: i32,
    /// Minutes of meditation
    pub meditation_minutes: i32,
    /// Optional mood tag
    pub mood: Option<String>,
    /// Optional energy level
    pub energy_level: Option<i32>,
}

/// Creates or replaces the tracker entry for a (user, date).
///
/// All counters must be non-negative. Re-saving the same day overwrites the
/// previous counters instead of creating a second row.
pub async fn save_daily_entry(
    db: &DatabaseConnection,
    user_id: &str,
    entry_date: NaiveDate,
    input: EntryInput,
) -> Result<daily_entry::Model> {
    for (field, value) in [
        ("cigarettes_count", input.cigarettes_count),
        ("vape_puffs", input.vape_puffs),
        ("physical_activity_minutes", input.physical_activity_minutes),
        ("meditation_minutes", input.meditation_minutes),
    ] {
        if value < 0 {
            return Err(Error::InvalidCount { field, value });
        }
    }

    let model = daily_entry::ActiveModel {
        user_id: Set(user_id.to_string()),
        entry_date: Set(entry_date),
        cigarettes_count: Set(input.cigarettes_count),
        vape_puffs: Set(input.vape_puffs),
        physical_activity_minutes: Set(input.physical_activity_minutes),
        meditation_minutes: Set(input.meditation_minutes),
        mood: Set(input.mood),
        energy_level: Set(input.energy_level),
    };
    DailyEntry::insert(model)
        .on_conflict(
            OnConflict::columns([
                daily_entry::Column::UserId,
                daily_entry::Column::EntryDate,
            ])
            .update_columns([
                daily_entry::Column::CigarettesCount,
                daily_entry::Column::VapePuffs,
                daily_entry::Column::PhysicalActivityMinutes,
                daily_entry::Column::MeditationMinutes,
                daily_entry::Column::Mood,
                daily_entry::Column::EnergyLevel,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!(user_id, %entry_date, "Daily entry saved");

    DailyEntry::find_by_id((user_id.to_string(), entry_date))
        .one(db)
        .await?
        .ok_or_else(|| {
            Error::Database(DbErr::RecordNotFound(format!(
                "daily entry for {user_id} on {entry_date}"
            )))
        })
}

/// Returns a user's full tracker history, oldest day first.
pub async fn get_entries(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<daily_entry::Model>> {
    DailyEntry::find()
        .filter(daily_entry::Column::UserId.eq(user_id))
        .order_by_asc(daily_entry::Column::EntryDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends a journal entry for a user.
pub async fn add_journal_entry(
    db: &DatabaseConnection,
    user_id: &str,
    content: String,
    mood: Option<String>,
) -> Result<journal_entry::Model> {
    let model = journal_entry::ActiveModel {
        user_id: Set(user_id.to_string()),
        created_at: Set(Utc::now()),
        content: Set(content),
        mood: Set(mood),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    Ok(result)
}

/// Number of journal entries a user has written.
pub async fn count_journal_entries(db: &DatabaseConnection, user_id: &str) -> Result<u64> {
    JournalEntry::find()
        .filter(journal_entry::Column::UserId.eq(user_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Runs both evaluators after a successful save, in the order the app does:
/// the badge sweep first, then the daily goal against today's entry. The two
/// are independent, so the order only dictates which notification fires
/// first.
///
/// Neither evaluator raises, so this always returns a usable pair for the
/// caller's notifications.
pub async fn run_post_save_hooks(
    db: &DatabaseConnection,
    user_id: &str,
    today: NaiveDate,
) -> (Vec<badge::Model>, goals::GoalOutcome) {
    let today_entry = DailyEntry::find_by_id((user_id.to_string(), today))
        .one(db)
        .await
        .ok()
        .flatten();

    let unlocked = badges::evaluate_badges(db, user_id, today).await;
    let outcome = goals::evaluate_daily_goal(db, user_id, today_entry.as_ref(), today).await;

    (unlocked, outcome)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::goals::GoalOutcome;
    use crate::entities::Profile;
    use crate::test_utils::{
        create_test_profile, date, seed_test_badge, seed_test_template, setup_test_db,
    };
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_save_daily_entry_upserts_single_row() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "user1").await?;

        let first = save_daily_entry(
            &db,
            "user1",
            date(2025, 3, 1),
            EntryInput {
                cigarettes_count: 8,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(first.cigarettes_count, 8);

        // Double save for the same day replaces the counters, no second row
        let second = save_daily_entry(
            &db,
            "user1",
            date(2025, 3, 1),
            EntryInput {
                cigarettes_count: 5,
                vape_puffs: 10,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(second.cigarettes_count, 5);
        assert_eq!(second.vape_puffs, 10);

        let rows = DailyEntry::find().all(&db).await?;
        assert_eq!(rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_daily_entry_rejects_negative_counts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "user1").await?;

        let result = save_daily_entry(
            &db,
            "user1",
            date(2025, 3, 1),
            EntryInput {
                cigarettes_count: -1,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidCount {
                field: "cigarettes_count",
                value: -1
            }
        ));

        let rows = DailyEntry::find().all(&db).await?;
        assert!(rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_journal_entries_counted_per_user() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "user1").await?;
        create_test_profile(&db, "user2").await?;

        add_journal_entry(&db, "user1", "Day one".to_string(), None).await?;
        add_journal_entry(&db, "user1", "Day two".to_string(), Some("calm".to_string())).await?;
        add_journal_entry(&db, "user2", "Other user".to_string(), None).await?;

        assert_eq!(count_journal_entries(&db, "user1").await?, 2);
        assert_eq!(count_journal_entries(&db, "user2").await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_post_save_hooks_run_both_evaluators() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "user1").await?;
        seed_test_badge(&db, "first_day", 10).await?;
        let template = seed_test_template(&db, "reduction", "both", Some(5), Some(50), 30).await?;

        // Activate the goal, then save a compliant entry
        crate::core::goals::select_daily_goal(&db, "user1", template.id, date(2025, 3, 1))
            .await?;

        save_daily_entry(
            &db,
            "user1",
            date(2025, 3, 1),
            EntryInput {
                cigarettes_count: 3,
                vape_puffs: 20,
                ..Default::default()
            },
        )
        .await?;

        let (unlocked, outcome) = run_post_save_hooks(&db, "user1", date(2025, 3, 1)).await;
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].code, "first_day");
        assert!(matches!(outcome, GoalOutcome::Completed { .. }));

        // Badge and goal both paid out
        let profile = Profile::find_by_id("user1").one(&db).await?.unwrap();
        assert_eq!(profile.points, 40);

        // Running the hooks again changes nothing
        let (unlocked, outcome) = run_post_save_hooks(&db, "user1", date(2025, 3, 1)).await;
        assert!(unlocked.is_empty());
        assert_eq!(outcome, GoalOutcome::AlreadyCompleted);

        let profile = Profile::find_by_id("user1").one(&db).await?.unwrap();
        assert_eq!(profile.points, 40);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_entries_ascending() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "user1").await?;

        // Insert out of order, read back sorted
        for day in [3, 1, 2] {
            save_daily_entry(&db, "user1", date(2025, 3, day), EntryInput::default()).await?;
        }

        let entries = get_entries(&db, "user1").await?;
        let days: Vec<u32> = entries
            .iter()
            .map(|e| {
                use chrono::Datelike;
                e.entry_date.day()
            })
            .collect();
        assert_eq!(days, vec![1, 2, 3]);

        Ok(())
    }
}
