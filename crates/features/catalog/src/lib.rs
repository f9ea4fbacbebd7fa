//! Destination catalog slice: CSV ingestion, indexed lookup and case-insensitive field search.

#[cfg(feature = "server")]
pub mod api;
mod error;
mod ingest;
mod record;
mod schema;
mod store;

pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::record::{Coordinates, Destination, DestinationSummary};
pub use crate::schema::{FieldKey, Schema, fields};
pub use crate::store::{Catalog, CatalogInner};

use atlas_kernel::domain::config::CatalogConfig;
use atlas_kernel::domain::registry::InitializedSlice;

/// Loads the catalog described by `config` and wraps it as a feature slice.
///
/// # Errors
/// Any ingestion failure; the service must not start without its catalog.
pub fn init(config: &CatalogConfig) -> Result<InitializedSlice, CatalogError> {
    Ok(init_with(Catalog::load(config)?))
}

/// Registers an already built catalog.
#[must_use]
pub fn init_with(catalog: Catalog) -> InitializedSlice {
    tracing::info!(
        destinations = catalog.len(),
        fields = catalog.schema().len(),
        "Catalog slice initialized"
    );

    InitializedSlice::new(catalog)
}
