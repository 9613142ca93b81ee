// src/handlers/produtos.rs

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
    models::produto::{CreateProdutoPayload, Produto, UpdateProdutoPayload},
};

// POST /produtos (admin)
#[utoipa::path(
    post,
    path = "/produtos",
    tag = "Produtos",
    request_body = CreateProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateProdutoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let produto = app_state
        .produto_service
        .create(&user.caller(), payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(produto)))
}

// GET /produtos (público)
#[utoipa::path(
    get,
    path = "/produtos",
    tag = "Produtos",
    params(Pagination),
    responses((status = 200, description = "Produtos", body = [Produto]))
)]
pub async fn list_produtos(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let produtos = app_state
        .produto_service
        .list(page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(produtos))
}

// GET /produtos/{produto_id} (público)
#[utoipa::path(
    get,
    path = "/produtos/{produto_id}",
    tag = "Produtos",
    params(("produto_id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Produto),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(produto_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let produto = app_state
        .produto_service
        .get(produto_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(produto))
}

// PUT /produtos/{produto_id} (admin)
#[utoipa::path(
    put,
    path = "/produtos/{produto_id}",
    tag = "Produtos",
    request_body = UpdateProdutoPayload,
    params(("produto_id" = Uuid, Path, description = "ID do produto")),
    responses((status = 200, description = "Produto atualizado", body = Produto)),
    security(("api_jwt" = []))
)]
pub async fn update_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(produto_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateProdutoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let produto = app_state
        .produto_service
        .update(&user.caller(), produto_id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(produto))
}

// DELETE /produtos/{produto_id} (admin)
#[utoipa::path(
    delete,
    path = "/produtos/{produto_id}",
    tag = "Produtos",
    params(("produto_id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido", body = MessageResponse),
        (status = 400, description = "Produto ainda consta em comandas"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produto(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(produto_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .produto_service
        .delete(&user.caller(), produto_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse::deleted(Entity::Produto, &locale, &app_state.i18n_store)))
}
