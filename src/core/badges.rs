//! Badge evaluation - decides which catalog badges a user newly qualifies for.
//!
//! Every unlock rule is a pure predicate over the user's daily entry history
//! (ascending by date), journal entry count and profile, plus an explicit
//! evaluation date for the rules that depend on "today". The evaluator runs
//! after tracker and journal saves: it skips badges already unlocked, inserts
//! one unlock record per newly satisfied rule and awards the badge's points.
//! A duplicate unlock insert (concurrent double save) is rejected by the
//! (user, badge) primary key and absorbed here, so points are never awarded
//! twice for the same badge.

use crate::{
    core::level,
    entities::{
        Badge, DailyEntry, JournalEntry, Profile, UserBadge, badge, daily_entry, journal_entry,
        profile, user_badge,
    },
    errors::{Error, Result},
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Unlock rule behind a stable badge code.
///
/// Catalog rows whose code does not map to a variant never auto-unlock; they
/// can only be granted outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    /// At least one tracker entry exists
    FirstDay,
    /// 7 consecutive tracked days
    WeekStreak,
    /// 30 consecutive tracked days
    MonthStreak,
    /// 100 consecutive tracked days
    HundredDays,
    /// 365 consecutive tracked days
    YearStreak,
    /// One day with zero cigarettes and zero puffs
    ZeroDay,
    /// Ten days with zero consumption, not necessarily consecutive
    TenZeroDays,
    /// 7-day average cigarette count at or below half the baseline
    HalfReduction,
    /// Any entry with physical activity
    FirstSport,
    /// 100 cumulative minutes of physical activity
    HundredMinSport,
    /// At least one journal entry
    FirstJournal,
    /// At least ten journal entries
    TenJournals,
    /// Any entry with meditation
    FirstMeditation,
    /// 100 cumulative minutes of meditation
    HundredMinMeditation,
    /// Tracker filled 7 of the last 7 days
    TrackerWeek,
    /// Tracker filled 30 of the last 30 days
    TrackerMonth,
}

impl BadgeRule {
    /// Maps a catalog code to its rule. Returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "first_day" => Some(Self::FirstDay),
            "week_streak" => Some(Self::WeekStreak),
            "month_streak" => Some(Self::MonthStreak),
            "hundred_days" => Some(Self::HundredDays),
            "year_streak" => Some(Self::YearStreak),
            "zero_day" => Some(Self::ZeroDay),
            "ten_zero_days" => Some(Self::TenZeroDays),
            "half_reduction" => Some(Self::HalfReduction),
            "first_sport" => Some(Self::FirstSport),
            "hundred_min_sport" => Some(Self::HundredMinSport),
            "first_journal" => Some(Self::FirstJournal),
            "ten_journals" => Some(Self::TenJournals),
            "first_meditation" => Some(Self::FirstMeditation),
            "hundred_min_meditation" => Some(Self::HundredMinMeditation),
            "tracker_week" => Some(Self::TrackerWeek),
            "tracker_month" => Some(Self::TrackerMonth),
            _ => None,
        }
    }

    /// Evaluates the rule against a user's data. Pure: same inputs and
    /// evaluation date always give the same answer.
    #[must_use]
    pub fn is_satisfied(
        self,
        entries: &[daily_entry::Model],
        journal_count: u64,
        profile: &profile::Model,
        today: NaiveDate,
    ) -> bool {
        match self {
            Self::FirstDay => !entries.is_empty(),
            Self::WeekStreak => longest_consecutive_run(entries) >= 7,
            Self::MonthStreak => longest_consecutive_run(entries) >= 30,
            Self::HundredDays => longest_consecutive_run(entries) >= 100,
            Self::YearStreak => longest_consecutive_run(entries) >= 365,
            Self::ZeroDay => zero_consumption_days(entries) >= 1,
            Self::TenZeroDays => zero_consumption_days(entries) >= 10,
            Self::HalfReduction => half_reduction_reached(entries, profile),
            Self::FirstSport => entries.iter().any(|e| e.physical_activity_minutes > 0),
            Self::HundredMinSport => {
                entries
                    .iter()
                    .map(|e| i64::from(e.physical_activity_minutes))
                    .sum::<i64>()
                    >= 100
            }
            Self::FirstJournal => journal_count >= 1,
            Self::TenJournals => journal_count >= 10,
            Self::FirstMeditation => entries.iter().any(|e| e.meditation_minutes > 0),
            Self::HundredMinMeditation => {
                entries
                    .iter()
                    .map(|e| i64::from(e.meditation_minutes))
                    .sum::<i64>()
                    >= 100
            }
            Self::TrackerWeek => tracked_days_within(entries, today, 7) >= 7,
            Self::TrackerMonth => tracked_days_within(entries, today, 30) >= 30,
        }
    }
}

/// Longest run of calendar-consecutive entry dates.
///
/// Entries must be sorted ascending by date and unique per date (the data
/// model guarantees both). Consecutiveness is a calendar-day difference of
/// exactly one, so DST shifts cannot split a streak.
fn longest_consecutive_run(entries: &[daily_entry::Model]) -> u32 {
    if entries.is_empty() {
        return 0;
    }

    let mut run = 1u32;
    let mut longest = 1u32;
    for pair in entries.windows(2) {
        if (pair[1].entry_date - pair[0].entry_date).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Number of days with zero cigarettes and zero puffs, in any order.
fn zero_consumption_days(entries: &[daily_entry::Model]) -> usize {
    entries
        .iter()
        .filter(|e| e.cigarettes_count == 0 && e.vape_puffs == 0)
        .count()
}

/// Whether the mean cigarette count over the last 7 entries is at or below
/// half the profile baseline. Requires a positive baseline and a non-empty
/// history.
fn half_reduction_reached(entries: &[daily_entry::Model], profile: &profile::Model) -> bool {
    let baseline = match profile.cigarettes_per_day_baseline {
        Some(b) if b > 0 => f64::from(b),
        _ => return false,
    };
    if entries.is_empty() {
        return false;
    }

    let window = &entries[entries.len().saturating_sub(7)..];
    #[allow(clippy::cast_precision_loss)]
    let average = window
        .iter()
        .map(|e| f64::from(e.cigarettes_count))
        .sum::<f64>()
        / window.len() as f64;

    average <= baseline * 0.5
}

/// Number of entries dated within the `days`-day window ending at `today`,
/// inclusive on both ends. One entry per date, so this equals the number of
/// distinct days tracked in the window, and a count of `days` means every day
/// in the window was tracked.
fn tracked_days_within(entries: &[daily_entry::Model], today: NaiveDate, days: i64) -> usize {
    let cutoff = today - Duration::days(days - 1);
    entries
        .iter()
        .filter(|e| e.entry_date >= cutoff && e.entry_date <= today)
        .count()
}

/// Evaluates every catalog badge for a user and unlocks the ones newly earned.
///
/// Returns the badges unlocked by this call so the caller can surface them.
/// Never raises: a store failure is logged and yields an empty list, since
/// badge evaluation must not block the save that triggered it.
pub async fn evaluate_badges(
    db: &DatabaseConnection,
    user_id: &str,
    today: NaiveDate,
) -> Vec<badge::Model> {
    match evaluate_badges_inner(db, user_id, today).await {
        Ok(unlocked) => unlocked,
        Err(e) => {
            warn!(user_id, error = %e, "Badge evaluation aborted");
            Vec::new()
        }
    }
}

async fn evaluate_badges_inner(
    db: &DatabaseConnection,
    user_id: &str,
    today: NaiveDate,
) -> Result<Vec<badge::Model>> {
    let catalog = Badge::find().all(db).await?;

    let unlocked_ids: HashSet<i64> = UserBadge::find()
        .filter(user_badge::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|ub| ub.badge_id)
        .collect();

    let profile = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let entries = DailyEntry::find()
        .filter(daily_entry::Column::UserId.eq(user_id))
        .order_by_asc(daily_entry::Column::EntryDate)
        .all(db)
        .await?;

    let journal_count = JournalEntry::find()
        .filter(journal_entry::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    let mut newly_unlocked = Vec::new();
    for badge in catalog {
        if unlocked_ids.contains(&badge.id) {
            continue;
        }

        let Some(rule) = BadgeRule::from_code(&badge.code) else {
            continue;
        };
        if !rule.is_satisfied(&entries, journal_count, &profile, today) {
            continue;
        }

        let unlock = user_badge::ActiveModel {
            user_id: Set(user_id.to_string()),
            badge_id: Set(badge.id),
            unlocked_at: Set(Utc::now()),
        };
        match unlock.insert(db).await {
            Ok(_) => {
                if let Err(e) = level::award_points(db, user_id, badge.points).await {
                    warn!(user_id, badge = %badge.code, error = %e, "Badge unlocked but points not awarded");
                }
                debug!(user_id, badge = %badge.code, points = badge.points, "Badge unlocked");
                newly_unlocked.push(badge);
            }
            Err(e) => {
                // A concurrent save already created this unlock record; the
                // primary key rejected the duplicate. Skip without awarding.
                debug!(user_id, badge = %badge.code, error = %e, "Unlock insert rejected, skipping");
            }
        }
    }

    Ok(newly_unlocked)
}
