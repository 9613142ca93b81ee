// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::AppJson,
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{RegisterUserPayload, UpdateUserPayload, User},
};

// POST /users (auto-cadastro, público)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "E-mail ou username já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .register_user(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /users/me
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses((status = 200, description = "Usuário autenticado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

// PUT /users/me
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    request_body = UpdateUserPayload,
    responses((status = 200, description = "Usuário atualizado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<UpdateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .auth_service
        .update_me(&user, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(updated))
}
