// src/db/quadra_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_violation, UpdateBuilder},
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::quadra::{CreateQuadraPayload, Quadra},
};

/// Mudanças já validadas para o UPDATE parcial.
#[derive(Debug, Default)]
pub struct QuadraChanges {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub valor_hora: Option<rust_decimal::Decimal>,
    pub coberta: Option<bool>,
    pub iluminacao: Option<bool>,
}

#[derive(Clone)]
pub struct QuadraRepository {
    pool: PgPool,
}

impl QuadraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quadra>, AppError> {
        let quadra = sqlx::query_as::<_, Quadra>("SELECT * FROM quadras WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quadra)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Quadra>, AppError> {
        let quadras = sqlx::query_as::<_, Quadra>(
            "SELECT * FROM quadras ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(quadras)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateQuadraPayload,
    ) -> Result<Quadra, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quadra = sqlx::query_as::<_, Quadra>(
            r#"
            INSERT INTO quadras (nome, descricao, valor_hora, coberta, iluminacao)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.descricao)
        .bind(payload.valor_hora)
        .bind(payload.coberta)
        .bind(payload.iluminacao)
        .fetch_one(executor)
        .await?;
        Ok(quadra)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: QuadraChanges,
    ) -> Result<Quadra, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("quadras");
        builder
            .set_opt("nome", changes.nome)
            .set_opt("descricao", changes.descricao)
            .set_opt("valor_hora", changes.valor_hora)
            .set_opt("coberta", changes.coberta)
            .set_opt("iluminacao", changes.iluminacao);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Quadra>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Quadra))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM quadras WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_delete_violation(e, Entity::Quadra))?;
        Ok(result.rows_affected() > 0)
    }
}
