// src/db/produto_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_violation, UpdateBuilder},
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::produto::{CreateProdutoPayload, Produto},
};

#[derive(Debug, Default)]
pub struct ProdutoChanges {
    pub nome: Option<String>,
    /// `Some(None)` limpa a descrição
    pub descricao: Option<Option<String>>,
    pub preco: Option<Decimal>,
    pub estoque: Option<i32>,
    pub categoria: Option<String>,
}

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: PgPool,
}

impl ProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto = sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(produto)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateProdutoPayload,
    ) -> Result<Produto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (nome, descricao, preco, estoque, categoria)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.descricao)
        .bind(payload.preco)
        .bind(payload.estoque)
        .bind(&payload.categoria)
        .fetch_one(executor)
        .await?;
        Ok(produto)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: ProdutoChanges,
    ) -> Result<Produto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("produtos");
        builder
            .set_opt("nome", changes.nome)
            .set_opt("descricao", changes.descricao)
            .set_opt("preco", changes.preco)
            .set_opt("estoque", changes.estoque)
            .set_opt("categoria", changes.categoria);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Produto>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Produto))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_delete_violation(e, Entity::Produto))?;
        Ok(result.rows_affected() > 0)
    }
}
