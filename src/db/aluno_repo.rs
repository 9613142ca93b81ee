// src/db/aluno_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_fk_violation, UpdateBuilder},
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::aluno::Aluno,
};

#[derive(Clone)]
pub struct AlunoRepository {
    pool: PgPool,
}

impl AlunoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Aluno>, AppError> {
        let aluno = sqlx::query_as::<_, Aluno>("SELECT * FROM alunos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(aluno)
    }

    /// `professor_id = None` lista todos (visão do admin).
    pub async fn list(
        &self,
        professor_id: Option<Uuid>,
        page: Pagination,
    ) -> Result<Vec<Aluno>, AppError> {
        let alunos = sqlx::query_as::<_, Aluno>(
            r#"
            SELECT * FROM alunos
            WHERE ($1::uuid IS NULL OR professor_id = $1)
            ORDER BY created_at, id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(professor_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(alunos)
    }

    pub async fn count_by_professor(&self, professor_id: Uuid) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alunos WHERE professor_id = $1")
            .bind(professor_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nome: &str,
        professor_id: Uuid,
        percentual_desconto: Decimal,
    ) -> Result<Aluno, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Aluno>(
            r#"
            INSERT INTO alunos (nome, professor_id, percentual_desconto)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(professor_id)
        .bind(percentual_desconto)
        .fetch_one(executor)
        .await
        .map_err(|e| map_fk_violation(e, &["professor_id"]))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: Option<String>,
        percentual_desconto: Option<Decimal>,
    ) -> Result<Aluno, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("alunos");
        builder
            .set_opt("nome", nome)
            .set_opt("percentual_desconto", percentual_desconto);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Aluno>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Aluno))
    }

    /// Devolve `false` se nada foi removido.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM alunos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
