//! Points and level progression.
//!
//! The level tier is a pure function of accumulated points, shared by the
//! badge and daily goal evaluators. Awarding points applies the increment as
//! a single database-level column expression rather than a read-modify-write,
//! so concurrent awards for the same user never lose an update; the level
//! column is then rewritten from the post-increment total.

use crate::{
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use std::fmt;
use tracing::debug;

/// Level tier derived from accumulated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fewer than 100 points
    Beginner,
    /// 100 to 499 points
    Explorer,
    /// 500 to 1499 points
    Champion,
    /// 1500 points and above
    Master,
}

impl Level {
    /// Computes the level tier for a point total. Total over all point values
    /// and monotone: more points never yields a lower tier.
    #[must_use]
    pub const fn for_points(points: i64) -> Self {
        if points >= 1500 {
            Self::Master
        } else if points >= 500 {
            Self::Champion
        } else if points >= 100 {
            Self::Explorer
        } else {
            Self::Beginner
        }
    }

    /// The stable string stored in the `profiles.level` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Explorer => "explorer",
            Self::Champion => "champion",
            Self::Master => "master",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adds `delta` points to a user's profile and recomputes the level.
///
/// The increment runs as `points = points + delta` in a single UPDATE, then
/// the new total is read back to derive the level. If the profile does not
/// exist the award is abandoned and an error returned; callers treat that as
/// non-fatal (log and continue) so gamification never blocks a save.
///
/// # Returns
/// The new point total and the level derived from it.
pub async fn award_points(
    db: &DatabaseConnection,
    user_id: &str,
    delta: i32,
) -> Result<(i64, Level)> {
    use sea_orm::sea_query::Expr;

    // Verify the profile exists before touching anything
    Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    // Atomic increment: points = points + delta
    Profile::update_many()
        .col_expr(
            profile::Column::Points,
            Expr::col(profile::Column::Points).add(i64::from(delta)),
        )
        .filter(profile::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    let updated = Profile::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let new_points = updated.points;
    let new_level = Level::for_points(new_points);
    if updated.level != new_level.as_str() {
        let mut active: profile::ActiveModel = updated.into();
        active.level = Set(new_level.as_str().to_string());
        active.update(db).await?;
    }

    debug!(user_id, delta, total = new_points, level = %new_level, "Points awarded");
    Ok((new_points, new_level))
}
