#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod collection;
mod encoding;
mod error;
mod host;
mod path;
mod query;

// Public API
pub use collection::{Collection, Component, Filter, FilterMode, Iter, Selector};
pub use error::{Error, Result};
pub use host::Host;
pub use path::Path;
pub use query::Query;
