// src/services/aluno_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_not_blank, validate_percentual},
    },
    db::AlunoRepository,
    models::{
        aluno::{Aluno, CreateAlunoPayload, UpdateAlunoPayload},
        auth::User,
    },
    services::{
        policy::{aluno_scope, authorize, Action, AlunoScope, Caller, Target},
        professor_service::ProfessorService,
    },
};

#[derive(Clone)]
pub struct AlunoService {
    aluno_repo: AlunoRepository,
    professor_service: ProfessorService,
    pool: PgPool,
}

impl AlunoService {
    pub fn new(
        aluno_repo: AlunoRepository,
        professor_service: ProfessorService,
        pool: PgPool,
    ) -> Self {
        Self { aluno_repo, professor_service, pool }
    }

    pub async fn create(&self, user: &User, payload: CreateAlunoPayload) -> Result<Aluno, AppError> {
        let caller = self.professor_service.resolve_caller(user).await?;
        authorize(Some(&caller), Action::Create, Target::Aluno(Some(payload.professor_id)))?;
        payload.validate()?;

        let aluno = self
            .aluno_repo
            .create(&self.pool, &payload.nome, payload.professor_id, payload.percentual_desconto)
            .await?;

        tracing::info!(aluno_id = %aluno.id, professor_id = %aluno.professor_id, "Aluno criado");
        Ok(aluno)
    }

    /// Admin vê todos; professor só os próprios.
    pub async fn list(&self, user: &User, page: Pagination) -> Result<Vec<Aluno>, AppError> {
        let caller = self.professor_service.resolve_caller(user).await?;
        authorize(Some(&caller), Action::Read, Target::Aluno(None))?;

        let professor_id = match aluno_scope(&caller)? {
            AlunoScope::All => None,
            AlunoScope::Professor(id) => Some(id),
        };
        self.aluno_repo.list(professor_id, page).await
    }

    pub async fn get(&self, user: &User, id: Uuid) -> Result<Aluno, AppError> {
        let (caller, aluno) = self.load(user, id).await?;
        authorize(Some(&caller), Action::Read, Target::Aluno(Some(aluno.professor_id)))?;
        Ok(aluno)
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        payload: UpdateAlunoPayload,
    ) -> Result<Aluno, AppError> {
        let (caller, aluno) = self.load(user, id).await?;
        authorize(Some(&caller), Action::Update, Target::Aluno(Some(aluno.professor_id)))?;

        let nome = payload.nome.into_required("nome")?;
        let percentual_desconto = payload.percentual_desconto.into_required("percentual_desconto")?;

        if let Some(nome) = &nome {
            check_field("nome", nome.as_str(), validate_not_blank)?;
        }
        if let Some(pct) = &percentual_desconto {
            check_field("percentual_desconto", pct, validate_percentual)?;
        }

        self.aluno_repo.update(&self.pool, aluno.id, nome, percentual_desconto).await
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        let (caller, aluno) = self.load(user, id).await?;
        authorize(Some(&caller), Action::Delete, Target::Aluno(Some(aluno.professor_id)))?;

        if !self.aluno_repo.delete(&self.pool, aluno.id).await? {
            return Err(AppError::NotFound(Entity::Aluno));
        }
        tracing::info!(aluno_id = %aluno.id, "Aluno removido");
        Ok(())
    }

    // Cliente é barrado antes da busca, para não revelar quais ids existem
    async fn load(&self, user: &User, id: Uuid) -> Result<(Caller, Aluno), AppError> {
        let caller = self.professor_service.resolve_caller(user).await?;
        authorize(Some(&caller), Action::Read, Target::Aluno(None))?;

        let aluno = self
            .aluno_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Aluno))?;
        Ok((caller, aluno))
    }
}
