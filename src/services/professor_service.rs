// src/services/professor_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_not_blank, validate_percentual},
    },
    db::{AlunoRepository, ProfessorRepository, UserRepository},
    models::{
        auth::{User, UserType},
        professor::{CreateProfessorPayload, Ganhos, Professor, UpdateProfessorPayload},
    },
    services::policy::{authorize, Action, Caller, Target},
};

#[derive(Clone)]
pub struct ProfessorService {
    professor_repo: ProfessorRepository,
    user_repo: UserRepository,
    aluno_repo: AlunoRepository,
    pool: PgPool,
}

impl ProfessorService {
    pub fn new(
        professor_repo: ProfessorRepository,
        user_repo: UserRepository,
        aluno_repo: AlunoRepository,
        pool: PgPool,
    ) -> Self {
        Self { professor_repo, user_repo, aluno_repo, pool }
    }

    /// Monta o chamador. Só busca o perfil quando o usuário é professor.
    pub async fn resolve_caller(&self, user: &User) -> Result<Caller, AppError> {
        let professor_id = match user.user_type {
            UserType::Professor => self
                .professor_repo
                .find_by_user_id(user.id)
                .await?
                .map(|p| p.id),
            _ => None,
        };
        Ok(Caller::new(user, professor_id))
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateProfessorPayload,
    ) -> Result<Professor, AppError> {
        authorize(Some(caller), Action::Create, Target::Professor(Some(payload.user_id)))?;
        payload.validate()?;

        // O usuário alvo precisa existir e ser do tipo professor
        match self.user_repo.find_by_id(payload.user_id).await? {
            Some(user) if user.user_type == UserType::Professor => {}
            _ => return Err(AppError::InvalidProfessorUser),
        }

        if self.professor_repo.find_by_user_id(payload.user_id).await?.is_some() {
            return Err(AppError::ProfessorAlreadyExists);
        }

        let professor = self
            .professor_repo
            .create(
                &self.pool,
                payload.user_id,
                &payload.especialidade,
                payload.percentual_padrao,
            )
            .await?;

        tracing::info!(professor_id = %professor.id, user_id = %professor.user_id, "Professor criado");
        Ok(professor)
    }

    pub async fn list(&self, caller: &Caller, page: Pagination) -> Result<Vec<Professor>, AppError> {
        authorize(Some(caller), Action::Read, Target::Professor(None))?;
        self.professor_repo.list(page).await
    }

    pub async fn get_me(&self, user: &User) -> Result<Professor, AppError> {
        let caller = Caller::new(user, None);
        authorize(Some(&caller), Action::Read, Target::Professor(Some(user.id)))?;
        self.own_profile(user).await
    }

    pub async fn update_me(
        &self,
        user: &User,
        payload: UpdateProfessorPayload,
    ) -> Result<Professor, AppError> {
        let caller = Caller::new(user, None);
        authorize(Some(&caller), Action::Update, Target::Professor(Some(user.id)))?;

        let especialidade = payload.especialidade.into_required("especialidade")?;
        let percentual_padrao = payload.percentual_padrao.into_required("percentual_padrao")?;

        if let Some(especialidade) = &especialidade {
            check_field("especialidade", especialidade.as_str(), validate_not_blank)?;
        }
        if let Some(pct) = &percentual_padrao {
            check_field("percentual_padrao", pct, validate_percentual)?;
        }

        let professor = self.own_profile(user).await?;
        self.professor_repo
            .update(&self.pool, professor.id, especialidade, percentual_padrao)
            .await
    }

    pub async fn ganhos(&self, user: &User) -> Result<Ganhos, AppError> {
        let caller = Caller::new(user, None);
        authorize(Some(&caller), Action::Read, Target::Professor(Some(user.id)))?;

        let professor = self.own_profile(user).await?;
        let alunos_ativos = self.aluno_repo.count_by_professor(professor.id).await?;

        // TODO: calcular ganhos_potenciais quando a fórmula de repasse for definida
        Ok(Ganhos { ganhos_potenciais: Decimal::ZERO, alunos_ativos })
    }

    async fn own_profile(&self, user: &User) -> Result<Professor, AppError> {
        self.professor_repo
            .find_by_user_id(user.id)
            .await?
            .ok_or(AppError::NotFound(Entity::Professor))
    }
}
