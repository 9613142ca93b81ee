// src/handlers/alunos.rs

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
    models::aluno::{Aluno, CreateAlunoPayload, UpdateAlunoPayload},
};

// POST /alunos
#[utoipa::path(
    post,
    path = "/alunos",
    tag = "Alunos",
    request_body = CreateAlunoPayload,
    responses(
        (status = 201, description = "Aluno criado", body = Aluno),
        (status = 403, description = "Professor só cria alunos para si mesmo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_aluno(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<CreateAlunoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let aluno = app_state
        .aluno_service
        .create(&user, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(aluno)))
}

// GET /alunos
#[utoipa::path(
    get,
    path = "/alunos",
    tag = "Alunos",
    params(Pagination),
    responses(
        (status = 200, description = "Admin vê todos; professor só os próprios", body = [Aluno]),
        (status = 403, description = "Clientes não acessam alunos")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_alunos(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let alunos = app_state
        .aluno_service
        .list(&user, page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(alunos))
}

// GET /alunos/{aluno_id}
#[utoipa::path(
    get,
    path = "/alunos/{aluno_id}",
    tag = "Alunos",
    params(("aluno_id" = Uuid, Path, description = "ID do aluno")),
    responses(
        (status = 200, description = "Aluno", body = Aluno),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_aluno(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(aluno_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let aluno = app_state
        .aluno_service
        .get(&user, aluno_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(aluno))
}

// PUT /alunos/{aluno_id}
#[utoipa::path(
    put,
    path = "/alunos/{aluno_id}",
    tag = "Alunos",
    request_body = UpdateAlunoPayload,
    params(("aluno_id" = Uuid, Path, description = "ID do aluno")),
    responses((status = 200, description = "Aluno atualizado", body = Aluno)),
    security(("api_jwt" = []))
)]
pub async fn update_aluno(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(aluno_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAlunoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let aluno = app_state
        .aluno_service
        .update(&user, aluno_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(aluno))
}

// DELETE /alunos/{aluno_id}
#[utoipa::path(
    delete,
    path = "/alunos/{aluno_id}",
    tag = "Alunos",
    params(("aluno_id" = Uuid, Path, description = "ID do aluno")),
    responses(
        (status = 200, description = "Aluno removido", body = MessageResponse),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_aluno(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(aluno_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .aluno_service
        .delete(&user, aluno_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Aluno, &locale, &app_state.i18n_store)))
}
