// src/models/aluno.rs

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

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Aluno {
    pub id: Uuid,

    #[schema(example = "João")]
    pub nome: String,

    pub professor_id: Uuid,

    #[schema(value_type = f64, example = 15.0)]
    pub percentual_desconto: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlunoPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome: String,

    pub professor_id: Uuid,

    #[validate(custom(function = "validate_percentual"))]
    #[schema(value_type = f64)]
    pub percentual_desconto: Decimal,
}

// O professor_id não é alterável por aqui
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAlunoPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub percentual_desconto: Patch<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_with_only_nome_leaves_discount_missing() {
        let p: UpdateAlunoPayload = serde_json::from_str(r#"{ "nome": "Maria" }"#).unwrap();
        assert_eq!(p.nome, Patch::Value("Maria".to_string()));
        assert!(p.percentual_desconto.is_missing());
    }

    #[test]
    fn create_rejects_discount_above_100() {
        let p: CreateAlunoPayload = serde_json::from_str(&format!(
            r#"{{ "nome": "Maria", "professor_id": "{}", "percentual_desconto": 150.0 }}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert!(p.validate().is_err());
    }
}
