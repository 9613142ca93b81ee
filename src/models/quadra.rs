// src/models/quadra.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    patch::Patch,
    validation::{validate_not_blank, validate_money},
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Quadra {
    pub id: Uuid,

    #[schema(example = "Court 1")]
    pub nome: String,

    pub descricao: String,

    /// Preço por hora
    #[schema(value_type = f64, example = 50.0)]
    pub valor_hora: Decimal,

    pub coberta: bool,
    pub iluminacao: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuadraPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Court 1")]
    pub nome: String,

    #[serde(default)]
    pub descricao: String,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = f64, example = 50.0)]
    pub valor_hora: Decimal,

    #[serde(default)]
    pub coberta: bool,

    #[serde(default)]
    pub iluminacao: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateQuadraPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub descricao: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub valor_hora: Patch<Decimal>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub coberta: Patch<bool>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub iluminacao: Patch<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_flags_to_false() {
        let p: CreateQuadraPayload =
            serde_json::from_str(r#"{ "nome": "Court 1", "valor_hora": 50.0 }"#).unwrap();
        assert!(!p.coberta && !p.iluminacao);
        assert_eq!(p.valor_hora, Decimal::new(50, 0));
        assert!(p.validate().is_ok());
    }
}
