// src/handlers/agendamentos.rs

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
    models::agendamento::{
        Agendamento, AgendamentoFilter, CreateAgendamentoPayload, UpdateAgendamentoPayload,
    },
};

// POST /agendamentos (admin)
#[utoipa::path(
    post,
    path = "/agendamentos",
    tag = "Agendamentos",
    request_body = CreateAgendamentoPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = Agendamento),
        (status = 400, description = "Quadra ou cliente inexistente, ou período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateAgendamentoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamento = app_state
        .agendamento_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(agendamento)))
}

// GET /agendamentos?quadra_id=
#[utoipa::path(
    get,
    path = "/agendamentos",
    tag = "Agendamentos",
    params(AgendamentoFilter, Pagination),
    responses((status = 200, description = "Admin vê todos; os demais só os próprios", body = [Agendamento])),
    security(("api_jwt" = []))
)]
pub async fn list_agendamentos(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppQuery(filter): AppQuery<AgendamentoFilter>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let agendamentos = app_state
        .agendamento_service
        .list(&user.caller(), filter, page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(agendamentos))
}

// GET /agendamentos/{agendamento_id}
#[utoipa::path(
    get,
    path = "/agendamentos/{agendamento_id}",
    tag = "Agendamentos",
    params(("agendamento_id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento", body = Agendamento),
        (status = 403, description = "Agendamento de outro cliente"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(agendamento_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamento = app_state
        .agendamento_service
        .get(&user.caller(), agendamento_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(agendamento))
}

// PUT /agendamentos/{agendamento_id} (admin)
#[utoipa::path(
    put,
    path = "/agendamentos/{agendamento_id}",
    tag = "Agendamentos",
    request_body = UpdateAgendamentoPayload,
    params(("agendamento_id" = Uuid, Path, description = "ID do agendamento")),
    responses((status = 200, description = "Agendamento atualizado", body = Agendamento)),
    security(("api_jwt" = []))
)]
pub async fn update_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(agendamento_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAgendamentoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamento = app_state
        .agendamento_service
        .update(&user.caller(), agendamento_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(agendamento))
}

// DELETE /agendamentos/{agendamento_id} (admin)
#[utoipa::path(
    delete,
    path = "/agendamentos/{agendamento_id}",
    tag = "Agendamentos",
    params(("agendamento_id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento removido", body = MessageResponse),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(agendamento_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .agendamento_service
        .delete(&user.caller(), agendamento_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Agendamento, &locale, &app_state.i18n_store)))
}
