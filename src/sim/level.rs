//! Level data: the static entity table a run is played on
//!
//! Entities are kept in file order. Collision scans iterate in that order, so the
//! order of the table is part of the level's behavior.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Rect;

/// Bundled level table
const BUILTIN_LEVEL: &str = include_str!("../../assets/level.json");

/// Entity kinds. Monster carries its patrol parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityKind {
    Platform,
    Hazard,
    Goal,
    Start,
    #[serde(rename_all = "camelCase")]
    Monster {
        patrol_start: f32,
        patrol_end: f32,
        speed: f32,
    },
}

/// A static level entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntity {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub w: f32,
    #[serde(default)]
    pub h: f32,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl LevelEntity {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Content errors found while loading a level
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level size must be positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("level has no start marker")]
    MissingStart,

    #[error("level has {0} start markers, expected exactly one")]
    MultipleStarts(usize),

    #[error("level has no goal")]
    MissingGoal,

    #[error("entity `{0}` has non-positive dimensions")]
    DegenerateEntity(String),

    #[error("monster `{0}` needs patrolStart < patrolEnd and speed > 0")]
    InvalidPatrol(String),

    #[error("entity id `{0}` is used more than once")]
    DuplicateId(String),
}

/// A loaded, validated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// World width; the player is clamped to [0, width]
    pub width: f32,
    /// Absolute floor of the world; nothing below it is ever shown
    pub height: f32,
    pub entities: Vec<LevelEntity>,
}

impl Level {
    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// The level shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVEL)
    }

    /// Check the content invariants every level must satisfy
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        let mut seen = HashSet::new();
        let mut starts = 0;
        let mut goals = 0;

        for entity in &self.entities {
            if !seen.insert(entity.id.as_str()) {
                return Err(LevelError::DuplicateId(entity.id.clone()));
            }

            match entity.kind {
                EntityKind::Start => starts += 1,
                EntityKind::Goal => goals += 1,
                EntityKind::Monster {
                    patrol_start,
                    patrol_end,
                    speed,
                } => {
                    if !(patrol_start < patrol_end && speed > 0.0) {
                        return Err(LevelError::InvalidPatrol(entity.id.clone()));
                    }
                }
                EntityKind::Platform | EntityKind::Hazard => {}
            }

            let needs_size = !matches!(entity.kind, EntityKind::Start);
            if needs_size && !(entity.w > 0.0 && entity.h > 0.0) {
                return Err(LevelError::DegenerateEntity(entity.id.clone()));
            }
        }

        match starts {
            0 => return Err(LevelError::MissingStart),
            1 => {}
            n => return Err(LevelError::MultipleStarts(n)),
        }
        if goals == 0 {
            return Err(LevelError::MissingGoal);
        }

        Ok(())
    }

    /// The start marker. Validated levels always have exactly one.
    pub fn start(&self) -> Option<&LevelEntity> {
        self.entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Start))
    }

    /// Monster spawn descriptors in level order
    pub fn monsters(&self) -> impl Iterator<Item = &LevelEntity> {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Monster { .. }))
    }
}
