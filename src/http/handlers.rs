//! Route handlers.
//!
//! Each handler performs exactly one `UserRepository` call. Ids that match
//! nothing are answered silently (empty 200 / unchanged / 204) unless
//! `api.strict_not_found` is set.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::users::User;

pub const GREETING: &str = "<h1> Users service is running </h1>";

/// `GET /`
pub async fn greeting() -> Html<&'static str> {
    Html(GREETING)
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list())
}

/// `GET /users/{user_id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_user_id(raw_id)?;
    match state.users.find(id) {
        Some(user) => Ok(Json(user).into_response()),
        None if state.api.strict_not_found => Err(ApiError::NotFound(id)),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<User>>), ApiError> {
    let user = accept_user(payload)?;
    let users = state.users.insert(user);
    Ok((StatusCode::CREATED, Json(users)))
}

/// `PUT /users/{user_id}`
///
/// Echoes the submitted body, not the collection.
pub async fn replace_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(raw_id)?;
    let user = accept_user(payload)?;

    let replaced = state.users.replace(id, user.clone());
    if replaced == 0 && state.api.strict_not_found {
        return Err(ApiError::NotFound(id));
    }
    Ok(Json(user))
}

/// `DELETE /users/{user_id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_user_id(raw_id)?;
    let removed = state.users.remove(id);
    if removed == 0 && state.api.strict_not_found {
        return Err(ApiError::NotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn parse_user_id(raw: String) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::InvalidId(raw))
}

fn accept_user(payload: Result<Json<User>, JsonRejection>) -> Result<User, ApiError> {
    let Json(user) = payload?;
    user.validate()?;
    Ok(user)
}
