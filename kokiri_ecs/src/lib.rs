//! Entity Component System (ECS) with ordered and gated schedulers.

pub use component::{AnyHandle, Bundle, Capabilities, Component, ComponentBox, Handle};
pub use entity::Entity;
pub use error::{BoxError, Error, Result};
pub use hook::{Hook, HookEvent, HookKind, Selected};
pub use scheduler::{Scheduler, SchedulerId};
pub use system::{Capability, Fetch, Match, Query, System};
pub use table::Table;
pub use world::World;

pub mod component;
pub mod hook;
pub mod scheduler;
pub mod system;

mod entity;
mod error;
mod table;
mod world;
