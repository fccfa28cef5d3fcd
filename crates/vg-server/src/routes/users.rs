//! User record routes, forwarded one-to-one to `UserService`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use vg_core::Error;
use vg_rpc::proto::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUserRequest, GetUserResponse, ListUsersRequest, ListUsersResponse, UpdateUserRequest,
    UpdateUserResponse,
};
use vg_rpc::status_to_error;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Partial update body; absent fields are sent as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserBody {
    fn into_request(self, id: i32) -> UpdateUserRequest {
        UpdateUserRequest {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

fn parse_user_id(raw: &str) -> vg_core::Result<i32> {
    raw.parse()
        .map_err(|_| Error::Validation(format!("Invalid user id: {raw}")))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> vg_core::Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| Error::Validation(e.body_text()))
}

/// POST /users
pub async fn create_user(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let request = body(payload).map_err(fail)?;
    let response = ctx
        .users
        .create_user(request)
        .await
        .map_err(|s| fail(status_to_error(s)))?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /users
pub async fn list_users(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<ListUsersResponse>, AppError> {
    ctx.users
        .list_users(ListUsersRequest {})
        .await
        .map(Json)
        .map_err(|s| AppError::from(status_to_error(s)).with_request_id(request_id.0))
}

/// GET /users/{id}
pub async fn get_user(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<GetUserResponse>, AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let id = parse_user_id(&id).map_err(fail)?;
    ctx.users
        .get_user(GetUserRequest { id })
        .await
        .map(Json)
        .map_err(|s| fail(status_to_error(s)))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let id = parse_user_id(&id).map_err(fail)?;
    let request = body(payload).map_err(fail)?.into_request(id);
    ctx.users
        .update_user(request)
        .await
        .map(Json)
        .map_err(|s| fail(status_to_error(s)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let id = parse_user_id(&id).map_err(fail)?;
    ctx.users
        .delete_user(DeleteUserRequest { id })
        .await
        .map(Json)
        .map_err(|s| fail(status_to_error(s)))
}
