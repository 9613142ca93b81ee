// src/services/agendamento_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_money},
    },
    db::{
        agendamento_repo::{AgendamentoChanges, NewAgendamento},
        AgendamentoRepository, QuadraRepository, UserRepository,
    },
    models::agendamento::{
        validate_periodo, valor_padrao, Agendamento, AgendamentoFilter, CreateAgendamentoPayload,
        StatusAgendamento, UpdateAgendamentoPayload,
    },
    services::policy::{authorize, owner_scope, Action, Caller, Target},
};

#[derive(Clone)]
pub struct AgendamentoService {
    agendamento_repo: AgendamentoRepository,
    quadra_repo: QuadraRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl AgendamentoService {
    pub fn new(
        agendamento_repo: AgendamentoRepository,
        quadra_repo: QuadraRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self { agendamento_repo, quadra_repo, user_repo, pool }
    }

    /// Cria o agendamento. Sobreposição de horários na mesma quadra não é verificada.
    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateAgendamentoPayload,
    ) -> Result<Agendamento, AppError> {
        authorize(Some(caller), Action::Create, Target::Agendamento(Some(payload.cliente_id)))?;
        payload.validate()?;

        let quadra = self
            .quadra_repo
            .find_by_id(payload.quadra_id)
            .await?
            .ok_or(AppError::InvalidReference("quadra_id"))?;

        if self.user_repo.find_by_id(payload.cliente_id).await?.is_none() {
            return Err(AppError::InvalidReference("cliente_id"));
        }

        let valor = payload.valor.unwrap_or_else(|| {
            valor_padrao(quadra.valor_hora, payload.data_hora_inicio, payload.data_hora_fim)
        });
        // O valor calculado também precisa caber na coluna
        check_field("valor", &valor, validate_money)?;

        let novo = NewAgendamento {
            quadra_id: quadra.id,
            cliente_id: payload.cliente_id,
            data_hora_inicio: payload.data_hora_inicio,
            data_hora_fim: payload.data_hora_fim,
            status: payload.status.unwrap_or(StatusAgendamento::Pendente),
            valor,
            observacoes: payload.observacoes,
        };

        let agendamento = self.agendamento_repo.create(&self.pool, novo).await?;

        tracing::info!(
            agendamento_id = %agendamento.id,
            quadra_id = %agendamento.quadra_id,
            "Agendamento criado"
        );
        Ok(agendamento)
    }

    pub async fn list(
        &self,
        caller: &Caller,
        filter: AgendamentoFilter,
        page: Pagination,
    ) -> Result<Vec<Agendamento>, AppError> {
        authorize(Some(caller), Action::Read, Target::Agendamento(None))?;
        self.agendamento_repo
            .list(owner_scope(caller), filter.quadra_id, page)
            .await
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<Agendamento, AppError> {
        let agendamento = self.find(id).await?;
        authorize(Some(caller), Action::Read, Target::Agendamento(Some(agendamento.cliente_id)))?;
        Ok(agendamento)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateAgendamentoPayload,
    ) -> Result<Agendamento, AppError> {
        authorize(Some(caller), Action::Update, Target::Agendamento(None))?;

        let changes = AgendamentoChanges {
            data_hora_inicio: payload.data_hora_inicio.into_required("data_hora_inicio")?,
            data_hora_fim: payload.data_hora_fim.into_required("data_hora_fim")?,
            status: payload.status.into_required("status")?,
            valor: payload.valor.into_required("valor")?,
            observacoes: payload.observacoes.into_nullable(),
        };
        if let Some(valor) = &changes.valor {
            check_field("valor", valor, validate_money)?;
        }

        let mut tx = self.pool.begin().await?;

        // O período final combina o patch com a linha travada até o commit
        if changes.data_hora_inicio.is_some() || changes.data_hora_fim.is_some() {
            let atual = self
                .agendamento_repo
                .find_for_update(&mut *tx, id)
                .await?
                .ok_or(AppError::NotFound(Entity::Agendamento))?;
            let periodo = (
                changes.data_hora_inicio.unwrap_or(atual.data_hora_inicio),
                changes.data_hora_fim.unwrap_or(atual.data_hora_fim),
            );
            check_field("data_hora_fim", &periodo, |p| validate_periodo(p.0, p.1))?;
        }

        let agendamento = self.agendamento_repo.update(&mut *tx, id, changes).await?;
        tx.commit().await?;
        Ok(agendamento)
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        authorize(Some(caller), Action::Delete, Target::Agendamento(None))?;

        if !self.agendamento_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Entity::Agendamento));
        }
        tracing::info!(agendamento_id = %id, "Agendamento removido");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Agendamento, AppError> {
        self.agendamento_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Agendamento))
    }
}
