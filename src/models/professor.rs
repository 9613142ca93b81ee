// src/models/professor.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    patch::Patch,
    validation::{validate_not_blank, validate_percentual},
};

// Perfil de professor, 1:1 com um usuário do tipo "professor"
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Professor {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "tennis")]
    pub especialidade: String,

    /// Percentual padrão de repasse
    #[schema(value_type = f64, example = 10.0)]
    pub percentual_padrao: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfessorPayload {
    pub user_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "tennis")]
    pub especialidade: String,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(value_type = f64, example = 10.0)]
    pub percentual_padrao: Decimal,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfessorPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub especialidade: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub percentual_padrao: Patch<Decimal>,
}

/// Resposta de `/professores/ganhos`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Ganhos {
    #[schema(value_type = f64)]
    pub ganhos_potenciais: Decimal,
    pub alunos_ativos: i64,
}
