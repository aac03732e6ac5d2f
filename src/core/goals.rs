//! Daily goal evaluation - validates the user's active goal against today's
//! tracker entry, plus goal selection, history and stats.
//!
//! Evaluation is a small state machine per (user, date): no active goal, goal
//! already completed today (idempotent no-op), or pending. A pending goal is
//! checked against its template's category rule; the first success of the day
//! upserts the history row (keyed on the composite primary key so concurrent
//! completions collapse to one row), awards the template's points and bumps
//! the profile counters. The `time`/`period`/`spacing`/`context` categories
//! share one approximate rule - consumption strictly below 80% of baseline -
//! until real time-of-day data exists for them.

use crate::{
    core::level,
    entities::{
        GoalHistory, GoalTemplate, Profile, daily_entry, goal_history, goal_template, profile,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::OnConflict,
};
use tracing::{debug, warn};

/// Validation rule family of a goal template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    /// Stay under explicit daily maxima
    Reduction,
    /// Delay the first consumption of the day
    Time,
    /// Keep a period of the day consumption-free
    Period,
    /// Space consumptions out
    Spacing,
    /// Avoid a trigger context
    Context,
}

impl GoalCategory {
    /// Maps a catalog category string to its variant.
    #[must_use]
    pub fn parse(category: &str) -> Option<Self> {
        match category {
            "reduction" => Some(Self::Reduction),
            "time" => Some(Self::Time),
            "period" => Some(Self::Period),
            "spacing" => Some(Self::Spacing),
            "context" => Some(Self::Context),
            _ => None,
        }
    }
}

/// Which consumption counter a template targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// Cigarette counter only
    Cigarettes,
    /// Vape puff counter only
    Vape,
    /// Both counters
    Both,
}

impl TargetType {
    #[must_use]
    fn parse(target_type: &str) -> Option<Self> {
        match target_type {
            "cigarettes" => Some(Self::Cigarettes),
            "vape" => Some(Self::Vape),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// What the user is quitting, from the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitType {
    /// Quitting cigarettes
    Cigarettes,
    /// Quitting vaping
    Vape,
    /// Quitting both
    Both,
}

impl QuitType {
    #[must_use]
    fn parse(quit_type: &str) -> Option<Self> {
        match quit_type {
            "cigarettes" => Some(Self::Cigarettes),
            "vape" => Some(Self::Vape),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Result of evaluating the active daily goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalOutcome {
    /// The profile has no active goal; nothing to evaluate
    NoGoalSelected,
    /// Today's goal was already validated; idempotent no-op
    AlreadyCompleted,
    /// The goal was met for the first time today
    Completed {
        /// Display title of the completed goal
        goal_title: String,
        /// Points awarded for the completion
        points_earned: i32,
        /// Human-readable summary of the winning check
        details: String,
    },
    /// The goal was evaluated but not met; it stays pending for the day
    NotCompleted {
        /// Display title of the still-pending goal
        goal_title: String,
    },
    /// Evaluation could not run (missing profile or template, unknown
    /// category, store failure); nothing was mutated
    Failed {
        /// Why evaluation stopped
        reason: String,
    },
}

/// Aggregate statistics over a user's goal history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStats {
    /// Number of days with a history row
    pub total_attempts: u64,
    /// Number of completed days
    pub total_completed: u64,
    /// Completed days as a rounded percentage of attempts
    pub completion_rate: u32,
    /// Sum of points earned through daily goals
    pub total_points_earned: i64,
    /// Completed days counted backwards from the most recent row
    pub current_streak: u32,
}

/// Evaluates the user's active daily goal against today's tracker entry.
///
/// Never raises: failures come back as [`GoalOutcome::Failed`] with no
/// mutation, so the triggering save degrades to "nothing changed".
pub async fn evaluate_daily_goal(
    db: &DatabaseConnection,
    user_id: &str,
    today_entry: Option<&daily_entry::Model>,
    today: NaiveDate,
) -> GoalOutcome {
    match evaluate_daily_goal_inner(db, user_id, today_entry, today).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(user_id, error = %e, "Daily goal evaluation failed");
            GoalOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn evaluate_daily_goal_inner(
    db: &DatabaseConnection,
    user_id: &str,
    today_entry: Option<&daily_entry::Model>,
    today: NaiveDate,
) -> Result<GoalOutcome> {
    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let Some(template_id) = profile.current_daily_goal_id else {
        return Ok(GoalOutcome::NoGoalSelected);
    };

    let template = GoalTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::GoalTemplateNotFound { template_id })?;

    let existing = GoalHistory::find_by_id((user_id.to_string(), today))
        .one(db)
        .await?;
    if existing.as_ref().is_some_and(|h| h.completed) {
        debug!(user_id, %today, "Goal already completed today");
        return Ok(GoalOutcome::AlreadyCompleted);
    }

    let category =
        GoalCategory::parse(&template.category).ok_or_else(|| Error::UnknownGoalCategory {
            category: template.category.clone(),
        })?;

    let Some(entry) = today_entry else {
        return Ok(GoalOutcome::NotCompleted {
            goal_title: template.title,
        });
    };

    let quit_type = QuitType::parse(&profile.quit_type).unwrap_or(QuitType::Both);
    let (met, details) = match category {
        GoalCategory::Reduction => (
            reduction_goal_met(&template, entry, quit_type),
            reduction_details(&template, entry, quit_type),
        ),
        GoalCategory::Time => (
            fallback_goal_met(entry, &profile, quit_type),
            "First consumption delayed".to_string(),
        ),
        GoalCategory::Period => (
            fallback_goal_met(entry, &profile, quit_type),
            "Consumption-free period held".to_string(),
        ),
        GoalCategory::Spacing => (
            fallback_goal_met(entry, &profile, quit_type),
            "Consumptions spaced out".to_string(),
        ),
        GoalCategory::Context => (
            fallback_goal_met(entry, &profile, quit_type),
            "Trigger context avoided".to_string(),
        ),
    };

    if !met {
        return Ok(GoalOutcome::NotCompleted {
            goal_title: template.title,
        });
    }

    // First completion of the day: record it, award points, bump counters.
    // The upsert is keyed on (user, date) so a concurrent completion collapses
    // to one row and the AlreadyCompleted guard above stops the re-award.
    let history = goal_history::ActiveModel {
        user_id: Set(user_id.to_string()),
        goal_date: Set(today),
        goal_template_id: Set(template.id),
        completed: Set(true),
        completed_at: Set(Some(Utc::now())),
        points_earned: Set(template.points_reward),
    };
    GoalHistory::insert(history)
        .on_conflict(
            OnConflict::columns([
                goal_history::Column::UserId,
                goal_history::Column::GoalDate,
            ])
            .update_columns([
                goal_history::Column::GoalTemplateId,
                goal_history::Column::Completed,
                goal_history::Column::CompletedAt,
                goal_history::Column::PointsEarned,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if let Err(e) = level::award_points(db, user_id, template.points_reward).await {
        warn!(user_id, error = %e, "Goal completed but points not awarded");
    }

    let new_total = profile.total_daily_goals_completed + 1;
    let mut active: profile::ActiveModel = profile.into();
    active.total_daily_goals_completed = Set(new_total);
    active.daily_goal_last_completion_date = Set(Some(today));
    active.daily_goal_completed_today = Set(true);
    active.update(db).await?;

    debug!(user_id, %today, goal = %template.title, "Daily goal completed");
    Ok(GoalOutcome::Completed {
        goal_title: template.title,
        points_earned: template.points_reward,
        details,
    })
}

/// Reduction rule: every targeted counter must be at or below its template
/// maximum. For "both" templates a missing maximum defaults to 999 so an
/// unset threshold never blocks the other counter; a single-counter template
/// with its maximum unset does not pass.
fn reduction_goal_met(
    template: &goal_template::Model,
    entry: &daily_entry::Model,
    quit_type: QuitType,
) -> bool {
    let Some(target) = TargetType::parse(&template.target_type) else {
        return false;
    };

    let cigarettes_within =
        |max: Option<i32>| max.is_some_and(|m| entry.cigarettes_count <= m);
    let vape_within = |max: Option<i32>| max.is_some_and(|m| entry.vape_puffs <= m);

    match (quit_type, target) {
        (QuitType::Both, TargetType::Cigarettes) => cigarettes_within(template.max_cigarettes),
        (QuitType::Both, TargetType::Vape) => vape_within(template.max_vape_puffs),
        (QuitType::Both, TargetType::Both) => {
            entry.cigarettes_count <= template.max_cigarettes.unwrap_or(999)
                && entry.vape_puffs <= template.max_vape_puffs.unwrap_or(999)
        }
        (QuitType::Cigarettes, TargetType::Both) | (_, TargetType::Cigarettes) => {
            cigarettes_within(template.max_cigarettes)
        }
        (QuitType::Vape, TargetType::Both) | (_, TargetType::Vape) => {
            vape_within(template.max_vape_puffs)
        }
    }
}

fn reduction_details(
    template: &goal_template::Model,
    entry: &daily_entry::Model,
    quit_type: QuitType,
) -> String {
    if template.target_type == "cigarettes" || quit_type == QuitType::Cigarettes {
        format!(
            "{}/{} cigarettes",
            entry.cigarettes_count,
            template.max_cigarettes.unwrap_or(999)
        )
    } else {
        format!(
            "{}/{} puffs",
            entry.vape_puffs,
            template.max_vape_puffs.unwrap_or(999)
        )
    }
}

/// Shared approximate rule for the time-shaped categories: today's relevant
/// counter strictly below 80% of the user's baseline. Cigarette baseline
/// comes from the profile (default 20); vape baseline from the reported
/// frequency (heavy 300, moderate 200, light 100, default 200).
fn fallback_goal_met(
    entry: &daily_entry::Model,
    profile: &profile::Model,
    quit_type: QuitType,
) -> bool {
    if quit_type == QuitType::Cigarettes {
        let baseline = f64::from(profile.cigarettes_per_day_baseline.unwrap_or(20));
        f64::from(entry.cigarettes_count) < baseline * 0.8
    } else {
        let baseline = match profile.vape_frequency_baseline.as_deref() {
            Some("heavy") => 300.0,
            Some("light") => 100.0,
            _ => 200.0,
        };
        f64::from(entry.vape_puffs) < baseline * 0.8
    }
}

/// Makes a template the user's active daily goal.
///
/// Writes the goal reference onto the profile and seeds a pending history row
/// for today. An existing row for today is left untouched so selecting a new
/// goal can never un-complete a day.
pub async fn select_daily_goal(
    db: &DatabaseConnection,
    user_id: &str,
    template_id: i64,
    today: NaiveDate,
) -> Result<()> {
    let template = GoalTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or(Error::GoalTemplateNotFound { template_id })?;

    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let mut active: profile::ActiveModel = profile.into();
    active.current_daily_goal_id = Set(Some(template.id));
    active.daily_goal_started_at = Set(Some(Utc::now()));
    active.daily_goal_completed_today = Set(false);
    active.update(db).await?;

    let pending = goal_history::ActiveModel {
        user_id: Set(user_id.to_string()),
        goal_date: Set(today),
        goal_template_id: Set(template.id),
        completed: Set(false),
        completed_at: Set(None),
        points_earned: Set(0),
    };
    GoalHistory::insert(pending)
        .on_conflict(
            OnConflict::columns([
                goal_history::Column::UserId,
                goal_history::Column::GoalDate,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!(user_id, template_id, "Daily goal selected");
    Ok(())
}

/// Retrieves a user's goal history, most recent day first.
pub async fn get_goal_history(
    db: &DatabaseConnection,
    user_id: &str,
    limit: u64,
) -> Result<Vec<goal_history::Model>> {
    GoalHistory::find()
        .filter(goal_history::Column::UserId.eq(user_id))
        .order_by_desc(goal_history::Column::GoalDate)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes aggregate goal statistics for a user.
pub async fn get_goal_stats(db: &DatabaseConnection, user_id: &str) -> Result<GoalStats> {
    let history = GoalHistory::find()
        .filter(goal_history::Column::UserId.eq(user_id))
        .order_by_desc(goal_history::Column::GoalDate)
        .all(db)
        .await?;

    if history.is_empty() {
        return Ok(GoalStats::default());
    }

    let total_attempts = history.len() as u64;
    let total_completed = history.iter().filter(|h| h.completed).count() as u64;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let completion_rate =
        ((total_completed as f64 / total_attempts as f64) * 100.0).round() as u32;
    let total_points_earned = history.iter().map(|h| i64::from(h.points_earned)).sum();
    #[allow(clippy::cast_possible_truncation)]
    let current_streak = history.iter().take_while(|h| h.completed).count() as u32;

    Ok(GoalStats {
        total_attempts,
        total_completed,
        completion_rate,
        total_points_earned,
        current_streak,
    })
}
