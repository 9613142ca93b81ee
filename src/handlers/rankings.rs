// src/handlers/rankings.rs

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
    models::ranking::{
        AddParticipantePayload, CreateRankingPayload, ParticipanteRanking, Ranking,
        UpdateParticipantePayload, UpdateRankingPayload,
    },
};

// =============================================================================
//  1. RANKINGS
// =============================================================================

// POST /rankings (admin)
#[utoipa::path(
    post,
    path = "/rankings",
    tag = "Rankings",
    request_body = CreateRankingPayload,
    responses((status = 201, description = "Ranking criado", body = Ranking)),
    security(("api_jwt" = []))
)]
pub async fn create_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateRankingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .ranking_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ranking)))
}

// GET /rankings (público)
#[utoipa::path(
    get,
    path = "/rankings",
    tag = "Rankings",
    params(Pagination),
    responses((status = 200, description = "Rankings", body = [Ranking]))
)]
pub async fn list_rankings(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let rankings = app_state
        .ranking_service
        .list(page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rankings))
}

// GET /rankings/{ranking_id} (público)
#[utoipa::path(
    get,
    path = "/rankings/{ranking_id}",
    tag = "Rankings",
    params(("ranking_id" = Uuid, Path, description = "ID do ranking")),
    responses(
        (status = 200, description = "Ranking", body = Ranking),
        (status = 404, description = "Ranking não encontrado")
    )
)]
pub async fn get_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(ranking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .ranking_service
        .get(ranking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(ranking))
}

// PUT /rankings/{ranking_id} (admin)
#[utoipa::path(
    put,
    path = "/rankings/{ranking_id}",
    tag = "Rankings",
    request_body = UpdateRankingPayload,
    params(("ranking_id" = Uuid, Path, description = "ID do ranking")),
    responses((status = 200, description = "Ranking atualizado", body = Ranking)),
    security(("api_jwt" = []))
)]
pub async fn update_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(ranking_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateRankingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .ranking_service
        .update(&user.caller(), ranking_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(ranking))
}

// DELETE /rankings/{ranking_id} (admin)
#[utoipa::path(
    delete,
    path = "/rankings/{ranking_id}",
    tag = "Rankings",
    params(("ranking_id" = Uuid, Path, description = "ID do ranking")),
    responses(
        (status = 200, description = "Ranking removido", body = MessageResponse),
        (status = 404, description = "Ranking não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(ranking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .ranking_service
        .delete(&user.caller(), ranking_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Ranking, &locale, &app_state.i18n_store)))
}

// =============================================================================
//  2. PARTICIPANTES
// =============================================================================

// GET /rankings/{ranking_id}/participantes (público)
#[utoipa::path(
    get,
    path = "/rankings/{ranking_id}/participantes",
    tag = "Rankings",
    params(
        ("ranking_id" = Uuid, Path, description = "ID do ranking"),
        Pagination
    ),
    responses((status = 200, description = "Classificação, maior pontuação primeiro", body = [ParticipanteRanking]))
)]
pub async fn list_participantes(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(ranking_id): Path<Uuid>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let participantes = app_state
        .ranking_service
        .list_participantes(ranking_id, page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(participantes))
}

// POST /rankings/{ranking_id}/participantes (admin)
#[utoipa::path(
    post,
    path = "/rankings/{ranking_id}/participantes",
    tag = "Rankings",
    request_body = AddParticipantePayload,
    params(("ranking_id" = Uuid, Path, description = "ID do ranking")),
    responses(
        (status = 201, description = "Jogador inscrito", body = ParticipanteRanking),
        (status = 400, description = "Jogador inexistente ou já inscrito")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_participante(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(ranking_id): Path<Uuid>,
    AppJson(payload): AppJson<AddParticipantePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let participante = app_state
        .ranking_service
        .add_participante(&user.caller(), ranking_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(participante)))
}

// PUT /rankings/{ranking_id}/participantes/{participante_id} (admin)
#[utoipa::path(
    put,
    path = "/rankings/{ranking_id}/participantes/{participante_id}",
    tag = "Rankings",
    request_body = UpdateParticipantePayload,
    params(
        ("ranking_id" = Uuid, Path, description = "ID do ranking"),
        ("participante_id" = Uuid, Path, description = "ID da inscrição")
    ),
    responses((status = 200, description = "Pontuação atualizada", body = ParticipanteRanking)),
    security(("api_jwt" = []))
)]
pub async fn update_participante(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path((ranking_id, participante_id)): Path<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateParticipantePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let participante = app_state
        .ranking_service
        .update_participante(&user.caller(), ranking_id, participante_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(participante))
}

// DELETE /rankings/{ranking_id}/participantes/{participante_id} (admin)
#[utoipa::path(
    delete,
    path = "/rankings/{ranking_id}/participantes/{participante_id}",
    tag = "Rankings",
    params(
        ("ranking_id" = Uuid, Path, description = "ID do ranking"),
        ("participante_id" = Uuid, Path, description = "ID da inscrição")
    ),
    responses((status = 200, description = "Inscrição removida", body = MessageResponse)),
    security(("api_jwt" = []))
)]
pub async fn remove_participante(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path((ranking_id, participante_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .ranking_service
        .remove_participante(&user.caller(), ranking_id, participante_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Participante, &locale, &app_state.i18n_store)))
}
