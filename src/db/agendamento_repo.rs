// src/db/agendamento_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_fk_violation, UpdateBuilder},
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::agendamento::{Agendamento, StatusAgendamento},
};

/// Dados completos de um novo agendamento (padrões já resolvidos).
#[derive(Debug)]
pub struct NewAgendamento {
    pub quadra_id: Uuid,
    pub cliente_id: Uuid,
    pub data_hora_inicio: DateTime<Utc>,
    pub data_hora_fim: DateTime<Utc>,
    pub status: StatusAgendamento,
    pub valor: Decimal,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default)]
pub struct AgendamentoChanges {
    pub data_hora_inicio: Option<DateTime<Utc>>,
    pub data_hora_fim: Option<DateTime<Utc>>,
    pub status: Option<StatusAgendamento>,
    pub valor: Option<Decimal>,
    pub observacoes: Option<Option<String>>,
}

#[derive(Clone)]
pub struct AgendamentoRepository {
    pool: PgPool,
}

impl AgendamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agendamento>, AppError> {
        let agendamento =
            sqlx::query_as::<_, Agendamento>("SELECT * FROM agendamentos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(agendamento)
    }

    /// Trava a linha até o fim da transação (patch de período).
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(
            "SELECT * FROM agendamentos WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(agendamento)
    }

    pub async fn list(
        &self,
        cliente_id: Option<Uuid>,
        quadra_id: Option<Uuid>,
        page: Pagination,
    ) -> Result<Vec<Agendamento>, AppError> {
        let agendamentos = sqlx::query_as::<_, Agendamento>(
            r#"
            SELECT * FROM agendamentos
            WHERE ($1::uuid IS NULL OR cliente_id = $1)
              AND ($2::uuid IS NULL OR quadra_id = $2)
            ORDER BY data_hora_inicio, id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(cliente_id)
        .bind(quadra_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(agendamentos)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        novo: NewAgendamento,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Agendamento>(
            r#"
            INSERT INTO agendamentos (
                quadra_id, cliente_id, data_hora_inicio, data_hora_fim,
                status, valor, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(novo.quadra_id)
        .bind(novo.cliente_id)
        .bind(novo.data_hora_inicio)
        .bind(novo.data_hora_fim)
        .bind(novo.status)
        .bind(novo.valor)
        .bind(novo.observacoes)
        .fetch_one(executor)
        .await
        .map_err(|e| map_fk_violation(e, &["cliente_id", "quadra_id"]))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: AgendamentoChanges,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("agendamentos");
        builder
            .set_opt("data_hora_inicio", changes.data_hora_inicio)
            .set_opt("data_hora_fim", changes.data_hora_fim)
            .set_opt("status", changes.status)
            .set_opt("valor", changes.valor)
            .set_opt("observacoes", changes.observacoes);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Agendamento>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Agendamento))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM agendamentos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
