//! Catalog configuration - loads badge and goal template definitions from
//! config.toml and seeds them into the database.
//!
//! Both catalogs are immutable as far as the engine is concerned; seeding is
//! idempotent so the maintenance binary can run at every deploy. Badges are
//! keyed on their stable `code`, goal templates are only inserted into an
//! empty table (their rows are referenced by id from profiles and history, so
//! re-seeding must never renumber them).

use crate::{
    entities::{Badge, GoalTemplate, badge, goal_template},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Root of the catalog configuration file.
#[derive(Deserialize, Debug)]
pub struct CatalogConfig {
    /// Badge catalog entries
    pub badges: Vec<BadgeConfig>,
    /// Daily goal template entries
    pub goal_templates: Vec<GoalTemplateConfig>,
}

/// One `[[badges]]` entry in config.toml.
#[derive(Deserialize, Debug, Clone)]
pub struct BadgeConfig {
    /// Stable rule identifier, must match a `BadgeRule` variant to auto-unlock
    pub code: String,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Emoji or icon identifier
    pub icon: String,
    /// Points awarded on unlock
    pub points: i32,
    /// Display grouping
    pub category: String,
}

/// One `[[goal_templates]]` entry in config.toml.
#[derive(Deserialize, Debug, Clone)]
pub struct GoalTemplateConfig {
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Validation rule family
    pub category: String,
    /// Targeted consumption counter
    pub target_type: String,
    /// Display difficulty
    pub difficulty: String,
    /// Daily cigarette ceiling, when relevant
    #[serde(default)]
    pub max_cigarettes: Option<i32>,
    /// Daily vape puff ceiling, when relevant
    #[serde(default)]
    pub max_vape_puffs: Option<i32>,
    /// Points awarded on completion
    pub points_reward: i32,
}

/// Loads the catalog configuration from a TOML file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load catalog configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {path_ref:?}: {e}"),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from catalog file {path_ref:?}: {e}"),
    })
}

/// Seeds both catalogs into the database.
///
/// Badge rows are matched on `code`: existing badges keep their id and points,
/// new codes are inserted. Goal templates are only seeded when the table is
/// empty, since profiles and history rows reference template ids.
pub async fn seed_catalogs(db: &DatabaseConnection, config: &CatalogConfig) -> Result<()> {
    let mut inserted_badges = 0usize;
    for badge_config in &config.badges {
        let existing = Badge::find()
            .filter(badge::Column::Code.eq(badge_config.code.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let model = badge::ActiveModel {
            code: Set(badge_config.code.clone()),
            name: Set(badge_config.name.clone()),
            description: Set(badge_config.description.clone()),
            icon: Set(badge_config.icon.clone()),
            points: Set(badge_config.points),
            category: Set(badge_config.category.clone()),
            ..Default::default()
        };
        model.insert(db).await?;
        inserted_badges += 1;
    }

    let template_count = GoalTemplate::find().count(db).await?;
    let mut inserted_templates = 0usize;
    if template_count == 0 {
        for template_config in &config.goal_templates {
            let model = goal_template::ActiveModel {
                title: Set(template_config.title.clone()),
                description: Set(template_config.description.clone()),
                category: Set(template_config.category.clone()),
                target_type: Set(template_config.target_type.clone()),
                difficulty: Set(template_config.difficulty.clone()),
                max_cigarettes: Set(template_config.max_cigarettes),
                max_vape_puffs: Set(template_config.max_vape_puffs),
                points_reward: Set(template_config.points_reward),
                ..Default::default()
            };
            model.insert(db).await?;
            inserted_templates += 1;
        }
    }

    info!(
        inserted_badges,
        inserted_templates, "Catalog seeding finished"
    );
    Ok(())
}
