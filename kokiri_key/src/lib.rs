//! Namespaced identifiers in form of `namespace:value`.

pub use error::{KeyError, Result};
pub use key::Key;
pub use keyed::{Keyed, Namespaced};

mod error;
mod key;
mod keyed;
mod tests;
