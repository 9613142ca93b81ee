// src/models/produto.rs

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
pub struct Produto {
    pub id: Uuid,

    #[schema(example = "Água 500ml")]
    pub nome: String,

    pub descricao: Option<String>,

    #[schema(value_type = f64, example = 4.5)]
    pub preco: Decimal,

    pub estoque: i32,

    #[schema(example = "bebidas")]
    pub categoria: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProdutoPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome: String,

    pub descricao: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = f64)]
    pub preco: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub estoque: i32,

    #[validate(custom(function = "validate_not_blank"))]
    pub categoria: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProdutoPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,

    // Anulável: null limpa a descrição
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub descricao: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub preco: Patch<Decimal>,

    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub estoque: Patch<i32>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub categoria: Patch<String>,
}
