// src/handlers/health.rs

use axum::{extract::State, Json};

use crate::{config::AppState, handlers::MessageResponse, middleware::i18n::Locale};

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Mensagem de boas-vindas", body = MessageResponse))
)]
pub async fn welcome(State(app_state): State<AppState>, locale: Locale) -> Json<MessageResponse> {
    Json(MessageResponse { message: app_state.i18n_store.translate(&locale.0, "welcome") })
}

// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Serviço no ar"))
)]
pub async fn health() -> &'static str {
    "OK"
}
