// src/db/ranking_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::UpdateBuilder,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::ranking::{
        CategoriaRanking, CreateRankingPayload, ParticipanteRanking, Ranking, TipoRanking,
    },
};

#[derive(Clone)]
pub struct RankingRepository {
    pool: PgPool,
}

impl RankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ranking>, AppError> {
        let ranking = sqlx::query_as::<_, Ranking>("SELECT * FROM rankings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ranking)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Ranking>, AppError> {
        let rankings = sqlx::query_as::<_, Ranking>(
            "SELECT * FROM rankings ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rankings)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateRankingPayload,
    ) -> Result<Ranking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ranking = sqlx::query_as::<_, Ranking>(
            "INSERT INTO rankings (nome, categoria, tipo) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&payload.nome)
        .bind(payload.categoria)
        .bind(payload.tipo)
        .fetch_one(executor)
        .await?;
        Ok(ranking)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: Option<String>,
        categoria: Option<CategoriaRanking>,
        tipo: Option<TipoRanking>,
    ) -> Result<Ranking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("rankings");
        builder
            .set_opt("nome", nome)
            .set_opt("categoria", categoria)
            .set_opt("tipo", tipo);

        let mut query = builder.finish(id);
        query
            .build_query_as::<Ranking>()
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound(Entity::Ranking))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rankings WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  PARTICIPANTES
    // =========================================================================

    /// Classificação: mais pontos primeiro.
    pub async fn list_participantes(
        &self,
        ranking_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<ParticipanteRanking>, AppError> {
        let participantes = sqlx::query_as::<_, ParticipanteRanking>(
            r#"
            SELECT * FROM participantes_ranking
            WHERE ranking_id = $1
            ORDER BY pontos DESC, created_at, id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(ranking_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(participantes)
    }

    pub async fn add_participante<'e, E>(
        &self,
        executor: E,
        ranking_id: Uuid,
        jogador_id: Uuid,
        pontos: i32,
    ) -> Result<ParticipanteRanking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ParticipanteRanking>(
            r#"
            INSERT INTO participantes_ranking (ranking_id, jogador_id, pontos)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(ranking_id)
        .bind(jogador_id)
        .bind(pontos)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::ParticipantAlreadyExists;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::InvalidReference("jogador_id");
                }
            }
            e.into()
        })
    }

    pub async fn update_pontos<'e, E>(
        &self,
        executor: E,
        ranking_id: Uuid,
        participante_id: Uuid,
        pontos: Option<i32>,
    ) -> Result<ParticipanteRanking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let participante = sqlx::query_as::<_, ParticipanteRanking>(
            r#"
            UPDATE participantes_ranking
            SET pontos = COALESCE($3, pontos), updated_at = NOW()
            WHERE id = $1 AND ranking_id = $2
            RETURNING *
            "#,
        )
        .bind(participante_id)
        .bind(ranking_id)
        .bind(pontos)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound(Entity::Participante))?;
        Ok(participante)
    }

    pub async fn remove_participante<'e, E>(
        &self,
        executor: E,
        ranking_id: Uuid,
        participante_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("DELETE FROM participantes_ranking WHERE id = $1 AND ranking_id = $2")
                .bind(participante_id)
                .bind(ranking_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
