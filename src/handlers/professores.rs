// src/handlers/professores.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::{AppJson, AppQuery},
        pagination::Pagination,
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::professor::{CreateProfessorPayload, Ganhos, Professor, UpdateProfessorPayload},
};

// POST /professores (admin)
#[utoipa::path(
    post,
    path = "/professores",
    tag = "Professores",
    request_body = CreateProfessorPayload,
    responses(
        (status = 201, description = "Perfil de professor criado", body = Professor),
        (status = 400, description = "Usuário inválido ou professor já existe"),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_professor(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateProfessorPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let professor = app_state
        .professor_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(professor)))
}

// GET /professores (admin)
#[utoipa::path(
    get,
    path = "/professores",
    tag = "Professores",
    params(Pagination),
    responses((status = 200, description = "Perfis de professor", body = [Professor])),
    security(("api_jwt" = []))
)]
pub async fn list_professores(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let professores = app_state
        .professor_service
        .list(&user.caller(), page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(professores))
}

// GET /professores/me
#[utoipa::path(
    get,
    path = "/professores/me",
    tag = "Professores",
    responses(
        (status = 200, description = "Perfil do professor autenticado", body = Professor),
        (status = 403, description = "Usuário não é professor"),
        (status = 404, description = "Perfil ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let professor = app_state
        .professor_service
        .get_me(&user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(professor))
}

// PUT /professores/me
#[utoipa::path(
    put,
    path = "/professores/me",
    tag = "Professores",
    request_body = UpdateProfessorPayload,
    responses((status = 200, description = "Perfil atualizado", body = Professor)),
    security(("api_jwt" = []))
)]
pub async fn update_my_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<UpdateProfessorPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let professor = app_state
        .professor_service
        .update_me(&user, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(professor))
}

// GET /professores/ganhos
#[utoipa::path(
    get,
    path = "/professores/ganhos",
    tag = "Professores",
    responses((status = 200, description = "Resumo de ganhos do professor", body = Ganhos)),
    security(("api_jwt" = []))
)]
pub async fn get_ganhos(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let ganhos = app_state
        .professor_service
        .ganhos(&user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(ganhos))
}
