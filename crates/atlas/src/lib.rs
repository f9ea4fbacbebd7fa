//! Facade crate for the Atlas destination service.
//! Re-exports domain/kernel primitives and composes the feature slices.
//! Keep this crate thin: it wires other crates together, it does not implement business logic.
//!
//! ## Usage
//! - Add `atlas` with the `server` feature.
//! - Call [`init`] to build every feature slice, then register them in the API state.

pub use atlas_domain as domain;
use atlas_domain::config::ApiConfig;
use atlas_domain::registry::InitializedSlice;
pub use atlas_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use atlas_kernel::server::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        pub use atlas_kernel::server::router::system_router;

        /// System routes plus the routes of every feature slice.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router()
                .merge(crate::features::catalog::api::router())
                .merge(crate::features::lists::api::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use atlas_catalog as catalog;
    pub use atlas_lists as lists;

    /// Build-time enabled features.
    pub const ENABLED: &[&str] = &[
        "catalog",
        "lists",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initializes every feature slice.
///
/// `catalog` replaces loading `config.catalog.data_file` when given.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    catalog: Option<features::catalog::Catalog>,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Catalog
    slices.push(match catalog {
        Some(catalog) => features::catalog::init_with(catalog),
        None => features::catalog::init(&config.catalog)?,
    });

    // User lists
    slices.push(features::lists::init());

    Ok(slices)
}
