// src/handlers/comandas.rs

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
    models::comanda::{
        AddItemPayload, Comanda, CreateComandaPayload, ItemComanda, UpdateComandaPayload,
    },
};

// =============================================================================
//  1. COMANDAS
// =============================================================================

// POST /comandas (admin)
#[utoipa::path(
    post,
    path = "/comandas",
    tag = "Comandas",
    request_body = CreateComandaPayload,
    responses(
        (status = 201, description = "Comanda aberta", body = Comanda),
        (status = 400, description = "Cliente inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_comanda(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateComandaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let comanda = app_state
        .comanda_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(comanda)))
}

// GET /comandas
#[utoipa::path(
    get,
    path = "/comandas",
    tag = "Comandas",
    params(Pagination),
    responses((status = 200, description = "Admin vê todas; os demais só as próprias", body = [Comanda])),
    security(("api_jwt" = []))
)]
pub async fn list_comandas(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let comandas = app_state
        .comanda_service
        .list(&user.caller(), page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(comandas))
}

// GET /comandas/{comanda_id}
#[utoipa::path(
    get,
    path = "/comandas/{comanda_id}",
    tag = "Comandas",
    params(("comanda_id" = Uuid, Path, description = "ID da comanda")),
    responses(
        (status = 200, description = "Comanda", body = Comanda),
        (status = 403, description = "Comanda de outro cliente"),
        (status = 404, description = "Comanda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_comanda(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(comanda_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let comanda = app_state
        .comanda_service
        .get(&user.caller(), comanda_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(comanda))
}

// PUT /comandas/{comanda_id} (admin)
#[utoipa::path(
    put,
    path = "/comandas/{comanda_id}",
    tag = "Comandas",
    request_body = UpdateComandaPayload,
    params(("comanda_id" = Uuid, Path, description = "ID da comanda")),
    responses((status = 200, description = "Comanda atualizada", body = Comanda)),
    security(("api_jwt" = []))
)]
pub async fn update_comanda(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(comanda_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateComandaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let comanda = app_state
        .comanda_service
        .update(&user.caller(), comanda_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(comanda))
}

// DELETE /comandas/{comanda_id} (admin)
#[utoipa::path(
    delete,
    path = "/comandas/{comanda_id}",
    tag = "Comandas",
    params(("comanda_id" = Uuid, Path, description = "ID da comanda")),
    responses(
        (status = 200, description = "Comanda removida", body = MessageResponse),
        (status = 404, description = "Comanda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_comanda(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(comanda_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .comanda_service
        .delete(&user.caller(), comanda_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Comanda, &locale, &app_state.i18n_store)))
}

// =============================================================================
//  2. ITENS DA COMANDA
// =============================================================================

// GET /comandas/{comanda_id}/itens
#[utoipa::path(
    get,
    path = "/comandas/{comanda_id}/itens",
    tag = "Comandas",
    params(("comanda_id" = Uuid, Path, description = "ID da comanda")),
    responses((status = 200, description = "Itens lançados", body = [ItemComanda])),
    security(("api_jwt" = []))
)]
pub async fn list_itens(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(comanda_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let itens = app_state
        .comanda_service
        .list_items(&user.caller(), comanda_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(itens))
}

// POST /comandas/{comanda_id}/itens (admin)
#[utoipa::path(
    post,
    path = "/comandas/{comanda_id}/itens",
    tag = "Comandas",
    request_body = AddItemPayload,
    params(("comanda_id" = Uuid, Path, description = "ID da comanda")),
    responses(
        (status = 201, description = "Item lançado; total da comanda atualizado", body = ItemComanda),
        (status = 404, description = "Comanda ou produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_item(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(comanda_id): Path<Uuid>,
    AppJson(payload): AppJson<AddItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .comanda_service
        .add_item(&user.caller(), comanda_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// DELETE /comandas/{comanda_id}/itens/{item_id} (admin)
#[utoipa::path(
    delete,
    path = "/comandas/{comanda_id}/itens/{item_id}",
    tag = "Comandas",
    params(
        ("comanda_id" = Uuid, Path, description = "ID da comanda"),
        ("item_id" = Uuid, Path, description = "ID do item")
    ),
    responses(
        (status = 200, description = "Item removido; total da comanda atualizado", body = MessageResponse),
        (status = 404, description = "Comanda ou item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_item(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path((comanda_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .comanda_service
        .remove_item(&user.caller(), comanda_id, item_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::ItemComanda, &locale, &app_state.i18n_store)))
}
