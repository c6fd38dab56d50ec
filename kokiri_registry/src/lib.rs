//! Write-once read-many (WORM) registry of keyed values.
//!
//! Once a value is registered for a key, it cannot be replaced:
//!
//! ```
//! use kokiri_registry::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register("meaning of life", 42).unwrap();
//!
//! let holder = registry.get(&"meaning of life").unwrap();
//! assert_eq!(holder.value(), Some(&42));
//! assert!(registry.register("meaning of life", 69).is_err());
//! ```
//!

pub use error::{RegistryError, Result};
pub use holder::{Holder, HolderKind};
pub use registry::Registry;

mod error;
mod holder;
mod registry;
mod tests;
