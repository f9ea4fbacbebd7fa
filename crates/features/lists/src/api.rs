//! HTTP surface of the user lists.

use crate::{DestinationList, ListRegistry, ListsError};
use atlas_catalog::{Catalog, Destination, DestinationSummary};
use atlas_derive::{api_handler, api_model};
use atlas_kernel::domain::constants::LISTS_TAG;
use atlas_kernel::prelude::*;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const NO_LISTS: &str = "No destination lists were created.";

impl From<ListsError> for ApiError {
    fn from(err: ListsError) -> Self {
        if err.is_not_found() {
            Self::not_found(err.to_string())
        } else if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err)
        }
    }
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_all))
        .routes(routes!(create))
        .routes(routes!(replace_members, delete))
        .routes(routes!(full_content))
        .routes(routes!(projected_content))
        .routes(routes!(ids))
}

#[api_model(deny_unknown_fields = false)]
/// Request body carrying list members
pub struct MembersPayload {
    /// Catalog indices; invalid entries are dropped
    #[cfg_attr(feature = "server", schema(value_type = Option<Vec<u64>>))]
    pub destinations: Option<Value>,
}

/// Confirmation of a created list
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    pub new_list: DestinationList,
}

/// Confirmation of replaced members
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResponse {
    pub message: String,
    pub updated_list: DestinationList,
}

#[api_model]
pub struct ListIdsResponse {
    pub list_name: String,
    pub destination_ids: Vec<usize>,
}

/// A list with every member record
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListDetailResponse {
    pub list_name: String,
    pub destinations: Vec<Destination>,
}

/// A list with the reduced view of its members
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListSummaryResponse {
    pub list_name: String,
    pub destinations: Vec<DestinationSummary>,
}

/// Parses an optional JSON body; an empty body is `None`.
fn parse_body(body: &Bytes) -> ApiResult<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {e}")))
}

fn members(body: Option<&Value>) -> Option<&Value> {
    body.and_then(|body| body.get("destinations"))
}

#[api_handler(
    get,
    path = "/api/userLists",
    responses(
        (status = OK, description = "Every list in creation order", body = Vec<DestinationList>),
        (status = NOT_FOUND, description = "No list was created yet", body = MessageBody),
    ),
    tag = LISTS_TAG,
)]
async fn list_all(State(state): State<ApiState>) -> ApiResult<Response> {
    let registry = state.try_get_slice::<ListRegistry>()?;
    let lists = registry.list_all();

    if lists.is_empty() {
        return Ok((StatusCode::NOT_FOUND, Json(MessageBody::new(NO_LISTS))).into_response());
    }
    Ok(Json(lists).into_response())
}

#[api_handler(
    put,
    path = "/api/userLists/newList/{listName}",
    params(("listName" = String, Path, description = "New list name, unique ignoring case")),
    request_body(content = MembersPayload, description = "Initial members, optional"),
    responses(
        (status = OK, description = "List created", body = CreatedResponse),
        (status = BAD_REQUEST, description = "Name already taken", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn create(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<CreatedResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let registry = state.try_get_slice::<ListRegistry>()?;
    let body = parse_body(&body)?;

    let new_list = registry.create(&list_name, members(body.as_ref()), catalog)?;

    Ok(Json(CreatedResponse {
        message: format!("New list '{list_name}' created successfully"),
        new_list,
    }))
}

#[api_handler(
    put,
    path = "/api/userLists/{listName}",
    params(("listName" = String, Path, description = "List name, any casing")),
    request_body(content = MembersPayload, description = "Replacement members"),
    responses(
        (status = OK, description = "Members replaced", body = UpdatedResponse),
        (status = BAD_REQUEST, description = "Members are not an array", body = ErrorBody),
        (status = NOT_FOUND, description = "No such list", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn replace_members(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UpdatedResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let registry = state.try_get_slice::<ListRegistry>()?;
    let body = parse_body(&body)?;

    let updated_list = registry.replace_members(&list_name, members(body.as_ref()), catalog)?;

    Ok(Json(UpdatedResponse {
        message: format!("Destinations successfully updated for list '{}'", updated_list.name()),
        updated_list,
    }))
}

#[api_handler(
    delete,
    path = "/api/userLists/{listName}",
    params(("listName" = String, Path, description = "List name, any casing")),
    responses(
        (status = OK, description = "List deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No such list", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn delete(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    state.try_get_slice::<ListRegistry>()?.delete(&list_name)?;

    Ok(Json(MessageBody::new(format!("List '{list_name}' deleted successfully"))))
}

#[api_handler(
    get,
    path = "/api/userLists/allProperties/{listName}",
    params(("listName" = String, Path, description = "List name, any casing")),
    responses(
        (status = OK, description = "List with full member records", body = ListDetailResponse),
        (status = NOT_FOUND, description = "No such list", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn full_content(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<ListDetailResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let content = state.try_get_slice::<ListRegistry>()?.full_content(&list_name, catalog)?;

    Ok(Json(ListDetailResponse { list_name: content.name, destinations: content.destinations }))
}

#[api_handler(
    get,
    path = "/api/userLists/someProperties/{listName}",
    params(("listName" = String, Path, description = "List name, any casing")),
    responses(
        (status = OK, description = "List with reduced member records", body = ListSummaryResponse),
        (status = NOT_FOUND, description = "No such list", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn projected_content(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<ListSummaryResponse>> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let content = state.try_get_slice::<ListRegistry>()?.projected_content(&list_name, catalog)?;

    Ok(Json(ListSummaryResponse { list_name: content.name, destinations: content.destinations }))
}

#[api_handler(
    get,
    path = "/api/userLists/ids/{listName}",
    params(("listName" = String, Path, description = "List name, any casing")),
    responses(
        (status = OK, description = "List with member indices", body = ListIdsResponse),
        (status = NOT_FOUND, description = "No such list", body = ErrorBody),
    ),
    tag = LISTS_TAG,
)]
async fn ids(
    State(state): State<ApiState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<ListIdsResponse>> {
    let list = state.try_get_slice::<ListRegistry>()?.ids(&list_name)?;

    Ok(Json(ListIdsResponse {
        list_name: list.name().to_owned(),
        destination_ids: list.destinations().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_parsing() {
        assert_eq!(parse_body(&Bytes::from_static(b"  \n")).ok(), Some(None));

        let body = parse_body(&Bytes::from_static(br#"{"destinations":[1,2]}"#)).expect("json");
        assert_eq!(members(body.as_ref()), Some(&serde_json::json!([1, 2])));

        let body = parse_body(&Bytes::from_static(b"[1,2]")).expect("json");
        assert_eq!(members(body.as_ref()), None);

        let err = parse_body(&Bytes::from_static(b"{oops")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn list_errors_map_to_statuses() {
        let err: ApiError = ListsError::NotFound { name: "Trip".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ListsError::DuplicateName { name: "Trip".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "List name 'Trip' already exists. Choose a different name.");

        let err: ApiError = ListsError::InvalidFormat { context: None }.into();
        assert_eq!(err.message(), "Invalid data format. Provide an array of destination IDs.");

        let err: ApiError = ListsError::from("lock poisoned").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
