// src/db/professor_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::UpdateBuilder,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::professor::Professor,
};

#[derive(Clone)]
pub struct ProfessorRepository {
    pool: PgPool,
}

impl ProfessorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Professor>, AppError> {
        let professor =
            sqlx::query_as::<_, Professor>("SELECT * FROM professores WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(professor)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Professor>, AppError> {
        let professores = sqlx::query_as::<_, Professor>(
            "SELECT * FROM professores ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(professores)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        especialidade: &str,
        percentual_padrao: Decimal,
    ) -> Result<Professor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Professor>(
            r#"
            INSERT INTO professores (user_id, especialidade, percentual_padrao)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(especialidade)
        .bind(percentual_padrao)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // Duas requisições simultâneas passando pela checagem prévia
                if db_err.is_unique_violation() {
                    return AppError::ProfessorAlreadyExists;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::InvalidProfessorUser;
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        especialidade: Option<String>,
        percentual_padrao: Option<Decimal>,
    ) -> Result<Professor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("professores");
        builder
            .set_opt("especialidade", especialidade)
            .set_opt("percentual_padrao", percentual_padrao);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Professor>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Professor))
    }
}
