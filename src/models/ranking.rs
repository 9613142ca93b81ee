// src/models/ranking.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{patch::Patch, validation::validate_not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "categoria_ranking", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoriaRanking {
    Iniciante,
    Intermediario,
    Avancado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_ranking", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoRanking {
    Masculino,
    Feminino,
    Misto,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Ranking {
    pub id: Uuid,
    pub nome: String,
    pub categoria: CategoriaRanking,
    pub tipo: TipoRanking,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ParticipanteRanking {
    pub id: Uuid,
    pub ranking_id: Uuid,
    pub jogador_id: Uuid,
    pub pontos: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRankingPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome: String,
    pub categoria: CategoriaRanking,
    pub tipo: TipoRanking,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRankingPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<CategoriaRanking>)]
    pub categoria: Patch<CategoriaRanking>,

    #[serde(default)]
    #[schema(value_type = Option<TipoRanking>)]
    pub tipo: Patch<TipoRanking>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddParticipantePayload {
    pub jogador_id: Uuid,

    #[serde(default)]
    pub pontos: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateParticipantePayload {
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub pontos: Patch<i32>,
}
