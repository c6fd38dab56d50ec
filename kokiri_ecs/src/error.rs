//! Utilities for ECS error handling.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{Entity, HookKind};

/// Error type returned by systems and hooks.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result of any operation of the [`World`](crate::World) which can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of ECS.
#[derive(Debug, Error)]
pub enum Error {
    #[error("an entity with id {0} already exists")]
    DuplicateEntity(Entity),

    #[error("no systems to run")]
    NoSystems,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("system `{system}` failed to update entity {entity}: {source}")]
    SystemUpdate {
        system: String,
        entity: Entity,
        source: BoxError,
    },

    #[error("hook `{hook}` failed on {kind}: {source}")]
    Hook {
        hook: String,
        kind: HookKind,
        source: BoxError,
    },
}
