use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{error::Entity, i18n::I18nStore},
    middleware::i18n::Locale,
};

pub mod agendamentos;
pub mod alunos;
pub mod auth;
pub mod comandas;
pub mod health;
pub mod produtos;
pub mod professores;
pub mod quadras;
pub mod rankings;
pub mod users;

/// Corpo das respostas que só carregam uma mensagem.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Quadra deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: Entity, locale: &Locale, store: &I18nStore) -> Self {
        Self {
            message: store.translate_with(&locale.0, "deleted", &[("entity", entity.name())]),
        }
    }
}
