// src/db/comanda_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_fk_violation, map_numeric_overflow, UpdateBuilder},
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::comanda::{Comanda, ItemComanda, StatusComanda},
};

#[derive(Clone)]
pub struct ComandaRepository {
    pool: PgPool,
}

impl ComandaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  COMANDAS
    // =========================================================================

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comanda>, AppError> {
        let comanda = sqlx::query_as::<_, Comanda>("SELECT * FROM comandas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comanda)
    }

    /// Trava a linha da comanda até o fim da transação (ajuste de total).
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Comanda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comanda =
            sqlx::query_as::<_, Comanda>("SELECT * FROM comandas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(comanda)
    }

    /// `cliente_id = None` lista todas.
    pub async fn list(
        &self,
        cliente_id: Option<Uuid>,
        page: Pagination,
    ) -> Result<Vec<Comanda>, AppError> {
        let comandas = sqlx::query_as::<_, Comanda>(
            r#"
            SELECT * FROM comandas
            WHERE ($1::uuid IS NULL OR cliente_id = $1)
            ORDER BY created_at, id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(cliente_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(comandas)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        forma_pagamento: Option<&str>,
    ) -> Result<Comanda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Comanda>(
            r#"
            INSERT INTO comandas (cliente_id, forma_pagamento)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(cliente_id)
        .bind(forma_pagamento)
        .fetch_one(executor)
        .await
        .map_err(|e| map_fk_violation(e, &["cliente_id"]))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: Option<StatusComanda>,
        forma_pagamento: Option<Option<String>>,
    ) -> Result<Comanda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("comandas");
        builder
            .set_opt("status", status)
            .set_opt("forma_pagamento", forma_pagamento);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Comanda>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Comanda))
    }

    /// Soma (ou subtrai, com delta negativo) ao total corrente.
    pub async fn adjust_total<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: Decimal,
    ) -> Result<Comanda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comanda = sqlx::query_as::<_, Comanda>(
            r#"
            UPDATE comandas
            SET valor_total = valor_total + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            map_numeric_overflow(e, "valor_total", "O total da comanda excede o limite permitido.")
        })?
        .ok_or(AppError::NotFound(Entity::Comanda))?;
        Ok(comanda)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM comandas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn list_items(&self, comanda_id: Uuid) -> Result<Vec<ItemComanda>, AppError> {
        let itens = sqlx::query_as::<_, ItemComanda>(
            "SELECT * FROM itens_comanda WHERE comanda_id = $1 ORDER BY created_at, id",
        )
        .bind(comanda_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(itens)
    }

    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        comanda_id: Uuid,
        produto_id: Uuid,
        quantidade: i32,
        valor_unitario: Decimal,
    ) -> Result<ItemComanda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ItemComanda>(
            r#"
            INSERT INTO itens_comanda (comanda_id, produto_id, quantidade, valor_unitario)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(comanda_id)
        .bind(produto_id)
        .bind(quantidade)
        .bind(valor_unitario)
        .fetch_one(executor)
        .await
        .map_err(|e| map_fk_violation(e, &["produto_id", "comanda_id"]))
    }

    /// Remove o item e o devolve, para o serviço ajustar o total.
    pub async fn remove_item<'e, E>(
        &self,
        executor: E,
        comanda_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ItemComanda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ItemComanda>(
            "DELETE FROM itens_comanda WHERE id = $1 AND comanda_id = $2 RETURNING *",
        )
        .bind(item_id)
        .bind(comanda_id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }
}
