#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace: error enums, feature slice handles,
//! API data models and documented Axum handlers.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own macros;
//! the consuming crates carry the real usages and tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a standard API data model (DTO).
///
/// * Adds `Debug`, `Serialize` and `Deserialize` unless already derived.
/// * Adds `utoipa::ToSchema` when the consuming crate builds with its `server` feature.
/// * Applies `#[serde(rename_all = "camelCase")]` and `#[serde(deny_unknown_fields)]` by default.
///
/// # Arguments
///
/// * `rename_all = "..."` - Overrides the Serde rename policy.
/// * `deny_unknown_fields = false` - Accepts unknown fields (useful for permissive request bodies).
///
/// # Example
///
/// ```rust,ignore
/// use atlas_derive::api_model;
///
/// #[api_model]
/// pub struct ListIdsResponse {
///     pub list_name: String,
///     pub destination_ids: Vec<usize>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with its `OpenAPI` description.
///
/// The arguments are forwarded verbatim to `utoipa::path` when the `server` feature of the
/// consuming crate is enabled, so the handler is registered by `utoipa_axum::routes!`.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/api/countries",
///     responses((status = OK, body = Vec<String>)),
///     tag = CATALOG_TAG,
/// )]
/// pub async fn countries(State(state): State<ApiState>) -> ApiResult<Json<Vec<String>>> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a domain error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext` trait adding `.context(..)` to `Result<T, ErrorName>` and to
///   `Result<T, Source>` for every variant that wraps a `source`.
/// * `From<Source>` for variants with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field must be `Option<Cow<'static, str>>`.
/// * A variant with a `source` must also declare `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[atlas_derive::atlas_error]
/// pub enum CatalogError {
///     #[error("Catalog file error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn open(path: &Path) -> Result<File, CatalogError> {
///     File::open(path).context("Opening catalog file")
/// }
/// ```
#[proc_macro_attribute]
pub fn atlas_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as a cheap-to-clone
/// `Arc` wrapper that dereferences to the inner state and implements `FeatureSlice`,
/// so it can be registered in the kernel's API state.
///
/// # Example
///
/// ```rust,ignore
/// #[atlas_derive::atlas_slice]
/// pub struct ListRegistry {
///     lists: RwLock<Vec<DestinationList>>,
/// }
///
/// let registry = ListRegistry::new(ListRegistryInner { lists: RwLock::default() });
/// ```
#[proc_macro_attribute]
pub fn atlas_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
