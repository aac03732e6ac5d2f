//! Journal entry entity - Free-form user writing, timestamped.
//!
//! The badge evaluator only ever counts these rows; content is opaque.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// When the entry was written
    pub created_at: DateTimeUtc,
    /// Entry text, never inspected by the engine
    pub content: String,
    /// Optional mood tag attached by the user
    pub mood: Option<String>,
}

/// Defines relationships between `JournalEntry` and other entities
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
