//! Names shared between slices, the router and the `OpenAPI` document.

/// `OpenAPI` tag for service endpoints (health).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for destination catalog endpoints.
pub const CATALOG_TAG: &str = "Catalog";
/// `OpenAPI` tag for destination list endpoints.
pub const LISTS_TAG: &str = "Lists";

/// Prefix of environment variables overriding the configuration file (`ATLAS__SERVER__PORT`).
pub const ENV_PREFIX: &str = "ATLAS";
/// Configuration file looked up when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "server";
