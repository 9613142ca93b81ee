// src/services/quadra_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_not_blank, validate_money},
    },
    db::{quadra_repo::QuadraChanges, QuadraRepository},
    models::quadra::{CreateQuadraPayload, Quadra, UpdateQuadraPayload},
    services::policy::{authorize, Action, Caller, Target},
};

#[derive(Clone)]
pub struct QuadraService {
    quadra_repo: QuadraRepository,
    pool: PgPool,
}

impl QuadraService {
    pub fn new(quadra_repo: QuadraRepository, pool: PgPool) -> Self {
        Self { quadra_repo, pool }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateQuadraPayload,
    ) -> Result<Quadra, AppError> {
        authorize(Some(caller), Action::Create, Target::Quadra)?;
        payload.validate()?;

        let quadra = self.quadra_repo.create(&self.pool, &payload).await?;
        tracing::info!(quadra_id = %quadra.id, "Quadra criada");
        Ok(quadra)
    }

    // Leitura pública
    pub async fn list(&self, page: Pagination) -> Result<Vec<Quadra>, AppError> {
        authorize(None, Action::Read, Target::Quadra)?;
        self.quadra_repo.list(page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Quadra, AppError> {
        authorize(None, Action::Read, Target::Quadra)?;
        self.quadra_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Quadra))
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateQuadraPayload,
    ) -> Result<Quadra, AppError> {
        authorize(Some(caller), Action::Update, Target::Quadra)?;

        let changes = QuadraChanges {
            nome: payload.nome.into_required("nome")?,
            descricao: payload.descricao.into_required("descricao")?,
            valor_hora: payload.valor_hora.into_required("valor_hora")?,
            coberta: payload.coberta.into_required("coberta")?,
            iluminacao: payload.iluminacao.into_required("iluminacao")?,
        };
        if let Some(nome) = &changes.nome {
            check_field("nome", nome.as_str(), validate_not_blank)?;
        }
        if let Some(valor_hora) = &changes.valor_hora {
            check_field("valor_hora", valor_hora, validate_money)?;
        }

        self.quadra_repo.update(&self.pool, id, changes).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        authorize(Some(caller), Action::Delete, Target::Quadra)?;

        if !self.quadra_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Entity::Quadra));
        }
        tracing::info!(quadra_id = %id, "Quadra removida");
        Ok(())
    }
}
