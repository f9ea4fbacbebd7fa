//! HTTP surface of the catalog.

use crate::store::leading_integer;
use crate::{Catalog, CatalogError, Coordinates, Destination};
use atlas_derive::api_handler;
use atlas_kernel::domain::constants::CATALOG_TAG;
use atlas_kernel::prelude::*;
use axum::Json;
use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        if err.is_client_error() { Self::bad_request(err.to_string()) } else { Self::internal(err) }
    }
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(destinations))
        .routes(routes!(destination))
        .routes(routes!(coordinates))
        .routes(routes!(countries))
        .routes(routes!(search))
        .routes(routes!(search_limited))
}

/// The leading integer of `raw` is the limit; none means "no limit" and negative limits clamp
/// to zero.
fn parse_limit(raw: &str) -> Option<usize> {
    let value = leading_integer(raw)?;
    Some(usize::try_from(value).unwrap_or(if value < 0 { 0 } else { usize::MAX }))
}

#[api_handler(
    get,
    path = "/api/destinations",
    responses((status = OK, description = "Every destination in catalog order", body = Vec<Destination>)),
    tag = CATALOG_TAG,
)]
async fn destinations(State(state): State<ApiState>) -> ApiResult<Json<Vec<Destination>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.all().to_vec()))
}

#[api_handler(
    get,
    path = "/api/destination/{id}",
    params(("id" = String, Path, description = "Catalog index")),
    responses(
        (status = OK, description = "Destination at the index", body = Destination),
        (status = BAD_REQUEST, description = "Not an integer or out of range", body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
async fn destination(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Destination>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let index = catalog.resolve_index(&id)?;
    Ok(Json(catalog.get(index)?.clone()))
}

#[api_handler(
    get,
    path = "/api/coordinates/{id}",
    params(("id" = String, Path, description = "Catalog index")),
    responses(
        (status = OK, description = "Latitude and longitude", body = Coordinates),
        (status = BAD_REQUEST, description = "Not an integer or out of range", body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
async fn coordinates(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Coordinates>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let index = catalog.resolve_index(&id)?;
    Ok(Json(catalog.coordinates(index)?))
}

#[api_handler(
    get,
    path = "/api/countries",
    responses((status = OK, description = "Distinct countries in first-seen order", body = Vec<String>)),
    tag = CATALOG_TAG,
)]
async fn countries(State(state): State<ApiState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.try_get_slice::<Catalog>()?.countries()))
}

#[api_handler(
    get,
    path = "/api/search/{field}/{pattern}",
    params(
        ("field" = String, Path, description = "Field name, any casing"),
        ("pattern" = String, Path, description = "Case-insensitive regular expression"),
    ),
    responses(
        (status = OK, description = "Matching destinations in catalog order", body = Vec<Destination>),
        (status = BAD_REQUEST, description = "Unknown field or invalid pattern", body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
async fn search(
    State(state): State<ApiState>,
    Path((field, pattern)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Destination>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.search(&field, &pattern, None)?))
}

#[api_handler(
    get,
    path = "/api/search/{field}/{pattern}/{n}",
    params(
        ("field" = String, Path, description = "Field name, any casing"),
        ("pattern" = String, Path, description = "Case-insensitive regular expression"),
        ("n" = String, Path, description = "Maximum number of results; ignored when not a number"),
    ),
    responses(
        (status = OK, description = "At most `n` matching destinations", body = Vec<Destination>),
        (status = BAD_REQUEST, description = "Unknown field or invalid pattern", body = ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
async fn search_limited(
    State(state): State<ApiState>,
    Path((field, pattern, n)): Path<(String, String, String)>,
) -> ApiResult<Json<Vec<Destination>>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.search(&field, &pattern, parse_limit(&n))?))
}
