// src/handlers/quadras.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError, Entity},
        extract::{AppJson, AppQuery},
        pagination::Pagination,
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::quadra::{CreateQuadraPayload, Quadra, UpdateQuadraPayload},
};

// POST /quadras (admin)
#[utoipa::path(
    post,
    path = "/quadras",
    tag = "Quadras",
    request_body = CreateQuadraPayload,
    responses(
        (status = 201, description = "Quadra criada", body = Quadra),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_quadra(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateQuadraPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quadra = app_state
        .quadra_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(quadra)))
}

// GET /quadras (público)
#[utoipa::path(
    get,
    path = "/quadras",
    tag = "Quadras",
    params(Pagination),
    responses((status = 200, description = "Quadras", body = [Quadra]))
)]
pub async fn list_quadras(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quadras = app_state
        .quadra_service
        .list(page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(quadras))
}

// GET /quadras/{quadra_id} (público)
#[utoipa::path(
    get,
    path = "/quadras/{quadra_id}",
    tag = "Quadras",
    params(("quadra_id" = Uuid, Path, description = "ID da quadra")),
    responses(
        (status = 200, description = "Quadra", body = Quadra),
        (status = 404, description = "Quadra não encontrada")
    )
)]
pub async fn get_quadra(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(quadra_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quadra = app_state
        .quadra_service
        .get(quadra_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(quadra))
}

// PUT /quadras/{quadra_id} (admin)
#[utoipa::path(
    put,
    path = "/quadras/{quadra_id}",
    tag = "Quadras",
    request_body = UpdateQuadraPayload,
    params(("quadra_id" = Uuid, Path, description = "ID da quadra")),
    responses((status = 200, description = "Quadra atualizada", body = Quadra)),
    security(("api_jwt" = []))
)]
pub async fn update_quadra(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quadra_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateQuadraPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quadra = app_state
        .quadra_service
        .update(&user.caller(), quadra_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(quadra))
}

// DELETE /quadras/{quadra_id} (admin)
#[utoipa::path(
    delete,
    path = "/quadras/{quadra_id}",
    tag = "Quadras",
    params(("quadra_id" = Uuid, Path, description = "ID da quadra")),
    responses(
        (status = 200, description = "Quadra removida", body = MessageResponse),
        (status = 400, description = "Quadra ainda tem agendamentos"),
        (status = 404, description = "Quadra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_quadra(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(quadra_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .quadra_service
        .delete(&user.caller(), quadra_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Quadra, &locale, &app_state.i18n_store)))
}
