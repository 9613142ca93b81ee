// src/services/ranking_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_not_blank},
    },
    db::{RankingRepository, UserRepository},
    models::ranking::{
        AddParticipantePayload, CreateRankingPayload, ParticipanteRanking, Ranking,
        UpdateParticipantePayload, UpdateRankingPayload,
    },
    services::policy::{authorize, Action, Caller, Target},
};

#[derive(Clone)]
pub struct RankingService {
    ranking_repo: RankingRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl RankingService {
    pub fn new(ranking_repo: RankingRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self { ranking_repo, user_repo, pool }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateRankingPayload,
    ) -> Result<Ranking, AppError> {
        authorize(Some(caller), Action::Create, Target::Ranking)?;
        payload.validate()?;

        let ranking = self.ranking_repo.create(&self.pool, &payload).await?;
        tracing::info!(ranking_id = %ranking.id, "Ranking criado");
        Ok(ranking)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Ranking>, AppError> {
        authorize(None, Action::Read, Target::Ranking)?;
        self.ranking_repo.list(page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Ranking, AppError> {
        authorize(None, Action::Read, Target::Ranking)?;
        self.find(id).await
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateRankingPayload,
    ) -> Result<Ranking, AppError> {
        authorize(Some(caller), Action::Update, Target::Ranking)?;

        let nome = payload.nome.into_required("nome")?;
        let categoria = payload.categoria.into_required("categoria")?;
        let tipo = payload.tipo.into_required("tipo")?;

        if let Some(nome) = &nome {
            check_field("nome", nome.as_str(), validate_not_blank)?;
        }

        self.ranking_repo.update(&self.pool, id, nome, categoria, tipo).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        authorize(Some(caller), Action::Delete, Target::Ranking)?;

        if !self.ranking_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Entity::Ranking));
        }
        tracing::info!(ranking_id = %id, "Ranking removido");
        Ok(())
    }

    // --- Participantes ---

    /// Classificação: maior pontuação primeiro.
    pub async fn list_participantes(
        &self,
        ranking_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<ParticipanteRanking>, AppError> {
        authorize(None, Action::Read, Target::Ranking)?;
        let ranking = self.find(ranking_id).await?;
        self.ranking_repo.list_participantes(ranking.id, page).await
    }

    pub async fn add_participante(
        &self,
        caller: &Caller,
        ranking_id: Uuid,
        payload: AddParticipantePayload,
    ) -> Result<ParticipanteRanking, AppError> {
        authorize(Some(caller), Action::Update, Target::Ranking)?;

        let ranking = self.find(ranking_id).await?;
        if self.user_repo.find_by_id(payload.jogador_id).await?.is_none() {
            return Err(AppError::InvalidReference("jogador_id"));
        }

        let participante = self
            .ranking_repo
            .add_participante(&self.pool, ranking.id, payload.jogador_id, payload.pontos)
            .await?;

        tracing::info!(
            ranking_id = %ranking.id,
            jogador_id = %participante.jogador_id,
            "Participante inscrito no ranking"
        );
        Ok(participante)
    }

    pub async fn update_participante(
        &self,
        caller: &Caller,
        ranking_id: Uuid,
        participante_id: Uuid,
        payload: UpdateParticipantePayload,
    ) -> Result<ParticipanteRanking, AppError> {
        authorize(Some(caller), Action::Update, Target::Ranking)?;

        let pontos = payload.pontos.into_required("pontos")?;
        self.ranking_repo
            .update_pontos(&self.pool, ranking_id, participante_id, pontos)
            .await
    }

    pub async fn remove_participante(
        &self,
        caller: &Caller,
        ranking_id: Uuid,
        participante_id: Uuid,
    ) -> Result<(), AppError> {
        authorize(Some(caller), Action::Update, Target::Ranking)?;

        if !self
            .ranking_repo
            .remove_participante(&self.pool, ranking_id, participante_id)
            .await?
        {
            return Err(AppError::NotFound(Entity::Participante));
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Ranking, AppError> {
        self.ranking_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Ranking))
    }
}
