//! User lists slice: named, ordered collections of catalog indices.

#[cfg(feature = "server")]
pub mod api;
mod error;
mod list;
mod registry;

pub use crate::error::{ListsError, ListsErrorExt};
pub use crate::list::DestinationList;
pub use crate::registry::{ListContent, ListRegistry, ListRegistryInner};

use atlas_kernel::domain::registry::InitializedSlice;

/// Starts with an empty registry; lists live for the lifetime of the process.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Lists slice initialized");

    InitializedSlice::new(ListRegistry::default())
}
