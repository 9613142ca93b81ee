// src/models/agendamento.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::{patch::Patch, validation::validate_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_agendamento", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusAgendamento {
    Pendente,
    Confirmado,
    Cancelado,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Agendamento {
    pub id: Uuid,
    pub quadra_id: Uuid,
    pub cliente_id: Uuid,
    pub data_hora_inicio: DateTime<Utc>,
    pub data_hora_fim: DateTime<Utc>,
    pub status: StatusAgendamento,

    #[schema(value_type = f64)]
    pub valor: Decimal,

    pub observacoes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_periodo_create", skip_on_field_errors = false))]
pub struct CreateAgendamentoPayload {
    pub quadra_id: Uuid,
    pub cliente_id: Uuid,
    pub data_hora_inicio: DateTime<Utc>,
    pub data_hora_fim: DateTime<Utc>,

    pub status: Option<StatusAgendamento>,

    /// Se ausente: valor_hora da quadra x duração
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub valor: Option<Decimal>,

    pub observacoes: Option<String>,
}

fn validate_periodo_create(payload: &CreateAgendamentoPayload) -> Result<(), ValidationError> {
    validate_periodo(payload.data_hora_inicio, payload.data_hora_fim)
}

pub fn validate_periodo(inicio: DateTime<Utc>, fim: DateTime<Utc>) -> Result<(), ValidationError> {
    if fim <= inicio {
        let mut err = ValidationError::new("periodo");
        err.message = Some("O fim do agendamento deve ser posterior ao início.".into());
        return Err(err);
    }
    Ok(())
}

/// Valor padrão de um agendamento: preço por hora proporcional à duração.
pub fn valor_padrao(valor_hora: Decimal, inicio: DateTime<Utc>, fim: DateTime<Utc>) -> Decimal {
    let minutos = Decimal::from((fim - inicio).num_minutes());
    (valor_hora * minutos / Decimal::from(60)).round_dp(2)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAgendamentoPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub data_hora_inicio: Patch<DateTime<Utc>>,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub data_hora_fim: Patch<DateTime<Utc>>,

    #[serde(default)]
    #[schema(value_type = Option<StatusAgendamento>)]
    pub status: Patch<StatusAgendamento>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub valor: Patch<Decimal>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub observacoes: Patch<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgendamentoFilter {
    /// Filtra pela quadra
    pub quadra_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn inicio() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn default_value_is_proportional_to_duration() {
        let fim = inicio() + Duration::minutes(90);
        assert_eq!(valor_padrao(Decimal::new(50, 0), inicio(), fim), Decimal::new(75, 0));
    }

    #[test]
    fn end_must_be_after_start() {
        assert!(validate_periodo(inicio(), inicio()).is_err());
        assert!(validate_periodo(inicio(), inicio() + Duration::hours(1)).is_ok());
    }

    #[test]
    fn create_payload_checks_the_period() {
        let payload = CreateAgendamentoPayload {
            quadra_id: Uuid::nil(),
            cliente_id: Uuid::nil(),
            data_hora_inicio: inicio(),
            data_hora_fim: inicio() - Duration::hours(1),
            status: None,
            valor: None,
            observacoes: None,
        };
        assert!(payload.validate().is_err());
    }
}
