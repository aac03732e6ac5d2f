//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod badge;
pub mod daily_entry;
pub mod goal_history;
pub mod goal_template;
pub mod journal_entry;
pub mod profile;
pub mod user_badge;

// Re-export specific types to avoid conflicts
pub use badge::{Column as BadgeColumn, Entity as Badge, Model as BadgeModel};
pub use daily_entry::{Column as DailyEntryColumn, Entity as DailyEntry, Model as DailyEntryModel};
pub use goal_history::{
    Column as GoalHistoryColumn, Entity as GoalHistory, Model as GoalHistoryModel,
};
pub use goal_template::{
    Column as GoalTemplateColumn, Entity as GoalTemplate, Model as GoalTemplateModel,
};
pub use journal_entry::{
    Column as JournalEntryColumn, Entity as JournalEntry, Model as JournalEntryModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use user_badge::{Column as UserBadgeColumn, Entity as UserBadge, Model as UserBadgeModel};
