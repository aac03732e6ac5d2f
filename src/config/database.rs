//! Database configuration module for `QuitBuddy`.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the schema is
//! generated straight from the entity definitions, including the composite
//! primary keys that carry the (user, date) and (user, badge) uniqueness
//! invariants - no hand-written SQL required.

use crate::entities::{
    Badge, DailyEntry, GoalHistory, GoalTemplate, JournalEntry, Profile, UserBadge,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/quit_buddy.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Creates tables for profiles, daily entries, journal entries, the badge and
/// goal template catalogs, badge unlock records, and goal history.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Profile),
        schema.create_table_from_entity(DailyEntry),
        schema.create_table_from_entity(JournalEntry),
        schema.create_table_from_entity(Badge),
        schema.create_table_from_entity(UserBadge),
        schema.create_table_from_entity(GoalTemplate),
        schema.create_table_from_entity(GoalHistory),
    ];
    for statement in &mut statements {
        // Rerunnable: the maintenance binary creates tables at every deploy
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
