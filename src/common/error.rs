// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

/// As entidades persistidas, usadas nas mensagens de erro e de exclusão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Professor,
    Aluno,
    Quadra,
    Produto,
    Comanda,
    ItemComanda,
    Ranking,
    Participante,
    Agendamento,
}

impl Entity {
    pub fn name(&self) -> &'static str {
        match self {
            Entity::User => "User",
            Entity::Professor => "Professor",
            Entity::Aluno => "Aluno",
            Entity::Quadra => "Quadra",
            Entity::Produto => "Produto",
            Entity::Comanda => "Comanda",
            Entity::ItemComanda => "Item",
            Entity::Ranking => "Ranking",
            Entity::Participante => "Participante",
            Entity::Agendamento => "Agendamento",
        }
    }
}

// Nosso tipo de erro de domínio. Cada variante sabe qual status HTTP e
// qual chave de tradução usar.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyRegistered,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyRegistered,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário inativo")]
    InactiveUser,

    /// Autenticado, mas sem direito. Carrega a chave da mensagem.
    #[error("Acesso negado: {0}")]
    Forbidden(&'static str),

    #[error("{} não encontrado", .0.name())]
    NotFound(Entity),

    #[error("Professor já existe")]
    ProfessorAlreadyExists,

    #[error("Usuário alvo não é professor")]
    InvalidProfessorUser,

    #[error("Referência inválida: {0}")]
    InvalidReference(&'static str),

    #[error("{} ainda referenciado", .0.name())]
    StillReferenced(Entity),

    #[error("Jogador já participa do ranking")]
    ParticipantAlreadyExists,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Monta um erro de validação para um único campo.
    pub fn field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = validator::ValidationError::new(code);
        err.message = Some(message.into());
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::EmailAlreadyRegistered
            | AppError::UsernameAlreadyRegistered
            | AppError::InactiveUser
            | AppError::ProfessorAlreadyExists
            | AppError::InvalidProfessorUser
            | AppError::InvalidReference(_)
            | AppError::StillReferenced(_)
            | AppError::ParticipantAlreadyExists => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro de domínio na resposta HTTP, traduzindo a mensagem
    /// para o idioma pedido.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        let error = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                return ApiError {
                    status,
                    error: store.translate(lang, "validation.failed"),
                    details: Some(Value::Object(details)),
                };
            }
            AppError::EmailAlreadyRegistered => store.translate(lang, "auth.email_taken"),
            AppError::UsernameAlreadyRegistered => store.translate(lang, "auth.username_taken"),
            AppError::InvalidCredentials => store.translate(lang, "auth.invalid_credentials"),
            AppError::InvalidToken => store.translate(lang, "auth.invalid_token"),
            AppError::InactiveUser => store.translate(lang, "auth.inactive_user"),
            AppError::Forbidden(key) => store.translate(lang, key),
            AppError::NotFound(entity) => {
                store.translate_with(lang, "not_found", &[("entity", entity.name())])
            }
            AppError::ProfessorAlreadyExists => store.translate(lang, "professor.already_exists"),
            AppError::InvalidProfessorUser => store.translate(lang, "professor.invalid_user"),
            AppError::InvalidReference(field) => {
                store.translate_with(lang, "reference.invalid", &[("field", field)])
            }
            AppError::StillReferenced(entity) => {
                store.translate_with(lang, "reference.in_use", &[("entity", entity.name())])
            }
            AppError::ParticipantAlreadyExists => {
                store.translate(lang, "ranking.participant_exists")
            }
            // Detalhes internos ficam só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                store.translate(lang, "internal.unexpected")
            }
        };

        ApiError { status, error, details: None }
    }
}

// O erro que de fato vira resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Corpo JSON malformado ou com campos faltando vira 400, não 422.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: rejection.body_text(),
            details: None,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: rejection.body_text(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> I18nStore {
        I18nStore::load().expect("catálogos embutidos são válidos")
    }

    #[rstest]
    #[case(AppError::EmailAlreadyRegistered, StatusCode::BAD_REQUEST)]
    #[case(AppError::ProfessorAlreadyExists, StatusCode::BAD_REQUEST)]
    #[case(AppError::InvalidReference("quadra_id"), StatusCode::BAD_REQUEST)]
    #[case(AppError::InvalidToken, StatusCode::UNAUTHORIZED)]
    #[case(AppError::Forbidden("forbidden.not_enough_permissions"), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound(Entity::Quadra), StatusCode::NOT_FOUND)]
    #[case(AppError::InternalServerError(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_taxonomy_to_status(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.status(), expected);
    }

    #[rstest]
    fn not_found_message_names_the_entity(store: I18nStore) {
        let api = AppError::NotFound(Entity::Aluno).to_api_error(&Locale::default(), &store);
        assert_eq!(api.error, "Aluno not found");
        assert!(api.details.is_none());
    }

    #[rstest]
    fn internal_errors_hide_details(store: I18nStore) {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: 123"))
            .to_api_error(&Locale("pt".into()), &store);
        assert_eq!(api.error, "Ocorreu um erro inesperado.");
    }

    #[rstest]
    fn validation_errors_carry_field_details(store: I18nStore) {
        let api = AppError::field("nome", "null", "Este campo não pode ser nulo.")
            .to_api_error(&Locale::default(), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes por campo");
        assert_eq!(details["nome"][0], "Este campo não pode ser nulo.");
    }

    #[rstest]
    #[tokio::test]
    async fn response_body_has_error_field(store: I18nStore) {
        let response = AppError::ProfessorAlreadyExists
            .to_api_error(&Locale::default(), &store)
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Professor already exists" }));
    }
}
