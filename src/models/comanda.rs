// src/models/comanda.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{patch::Patch, validation::validate_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_comanda", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusComanda {
    Aberta,
    Fechada,
    Paga,
}

// Comanda (conta) de um cliente
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Comanda {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub status: StatusComanda,

    /// Total corrente, mantido a cada item lançado ou removido
    #[schema(value_type = f64)]
    pub valor_total: Decimal,

    pub forma_pagamento: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ItemComanda {
    pub id: Uuid,
    pub comanda_id: Uuid,
    pub produto_id: Uuid,
    pub quantidade: i32,

    #[schema(value_type = f64)]
    pub valor_unitario: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemComanda {
    pub fn subtotal(&self) -> Decimal {
        self.valor_unitario * Decimal::from(self.quantidade)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComandaPayload {
    pub cliente_id: Uuid,
    pub forma_pagamento: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateComandaPayload {
    #[serde(default)]
    #[schema(value_type = Option<StatusComanda>)]
    pub status: Patch<StatusComanda>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub forma_pagamento: Patch<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddItemPayload {
    pub produto_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    /// Se ausente, usa o preço atual do produto
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub valor_unitario: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_is_quantity_times_unit_price() {
        let item = ItemComanda {
            id: Uuid::new_v4(),
            comanda_id: Uuid::new_v4(),
            produto_id: Uuid::new_v4(),
            quantidade: 3,
            valor_unitario: Decimal::new(450, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(item.subtotal(), Decimal::new(1350, 2));
    }

    #[test]
    fn add_item_requires_positive_quantity() {
        let p = AddItemPayload { produto_id: Uuid::nil(), quantidade: 0, valor_unitario: None };
        assert!(p.validate().is_err());
    }
}
