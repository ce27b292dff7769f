#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bundled predefined levels and the advisory checks run before saving.

use thiserror::Error;
use tracing::debug;
use wise_mole_world::{query, LevelError, World};

const PREDEFINED_LEVELS: [&str; 3] = [
    include_str!("../levels/level1.wmgame"),
    include_str!("../levels/level2.wmgame"),
    include_str!("../levels/level3.wmgame"),
];

/// Errors raised while opening a predefined level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No level is bundled under the requested index.
    #[error("no predefined level {index} (levels are numbered 1 to {count})")]
    UnknownLevel {
        /// Requested 1-based index.
        index: usize,
        /// Number of bundled levels.
        count: usize,
    },
    /// The bundled level text failed to decode.
    #[error("predefined level {index} is malformed")]
    Malformed {
        /// Requested 1-based index.
        index: usize,
        /// Underlying decode failure.
        #[source]
        source: LevelError,
    },
}

/// Advisory problems reported before a level is written to disk.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The level has no mole, so it cannot be played.
    #[error("there is no mole on the field")]
    MissingMole,
    /// More target points than boxes, so the level cannot be solved.
    #[error("there are more target points ({targets}) than boxes ({boxes})")]
    TargetsExceedBoxes {
        /// Number of target points.
        targets: usize,
        /// Number of boxes.
        boxes: usize,
    },
}

/// Number of bundled levels; indices run from 1 to this value.
#[must_use]
pub const fn predefined_level_count() -> usize {
    PREDEFINED_LEVELS.len()
}

/// Reports whether a level is bundled under the 1-based index.
#[must_use]
pub fn has_predefined(index: usize) -> bool {
    predefined_level_text(index).is_some()
}

/// Raw text of the bundled level at the 1-based index.
#[must_use]
pub fn predefined_level_text(index: usize) -> Option<&'static str> {
    let slot = index.checked_sub(1)?;
    PREDEFINED_LEVELS.get(slot).copied()
}

/// Builds a world from the bundled level, named after its index.
pub fn load_predefined(index: usize) -> Result<World, CatalogError> {
    let text = predefined_level_text(index).ok_or(CatalogError::UnknownLevel {
        index,
        count: predefined_level_count(),
    })?;
    let mut world = World::from_level_bytes(text.as_bytes())
        .map_err(|source| CatalogError::Malformed { index, source })?;
    world.set_name(index.to_string());
    debug!(index, "predefined level opened");
    Ok(world)
}

/// Returns the first advisory issue that makes the level unplayable.
///
/// Saving may still proceed after the user acknowledges the issue.
pub fn validate_for_save(world: &World) -> Result<(), ValidationIssue> {
    if query::mole_position(world).is_none() {
        return Err(ValidationIssue::MissingMole);
    }
    let boxes = query::boxes(world).len();
    let targets = query::target_points(world).len();
    if boxes < targets {
        return Err(ValidationIssue::TargetsExceedBoxes { targets, boxes });
    }
    Ok(())
}
