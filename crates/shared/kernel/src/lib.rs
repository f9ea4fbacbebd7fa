//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading plus, behind the `server` feature,
//! the shared Axum state, the API error envelope and the system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use atlas_kernel::config::load_config;
//! use atlas_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use atlas_domain as domain;
