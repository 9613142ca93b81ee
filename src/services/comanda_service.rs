// src/services/comanda_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
    },
    db::{ComandaRepository, ProdutoRepository, UserRepository},
    models::comanda::{
        AddItemPayload, Comanda, CreateComandaPayload, ItemComanda, UpdateComandaPayload,
    },
    services::policy::{authorize, owner_scope, Action, Caller, Target},
};

#[derive(Clone)]
pub struct ComandaService {
    comanda_repo: ComandaRepository,
    produto_repo: ProdutoRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl ComandaService {
    pub fn new(
        comanda_repo: ComandaRepository,
        produto_repo: ProdutoRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self { comanda_repo, produto_repo, user_repo, pool }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateComandaPayload,
    ) -> Result<Comanda, AppError> {
        authorize(Some(caller), Action::Create, Target::Comanda(Some(payload.cliente_id)))?;
        payload.validate()?;

        if self.user_repo.find_by_id(payload.cliente_id).await?.is_none() {
            return Err(AppError::InvalidReference("cliente_id"));
        }

        let comanda = self
            .comanda_repo
            .create(&self.pool, payload.cliente_id, payload.forma_pagamento.as_deref())
            .await?;

        tracing::info!(comanda_id = %comanda.id, cliente_id = %comanda.cliente_id, "Comanda aberta");
        Ok(comanda)
    }

    /// Admin vê todas; os demais só as próprias.
    pub async fn list(&self, caller: &Caller, page: Pagination) -> Result<Vec<Comanda>, AppError> {
        authorize(Some(caller), Action::Read, Target::Comanda(None))?;
        self.comanda_repo.list(owner_scope(caller), page).await
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<Comanda, AppError> {
        let comanda = self.find(id).await?;
        authorize(Some(caller), Action::Read, Target::Comanda(Some(comanda.cliente_id)))?;
        Ok(comanda)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateComandaPayload,
    ) -> Result<Comanda, AppError> {
        authorize(Some(caller), Action::Update, Target::Comanda(None))?;

        let status = payload.status.into_required("status")?;
        let forma_pagamento = payload.forma_pagamento.into_nullable();

        self.comanda_repo.update(&self.pool, id, status, forma_pagamento).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        authorize(Some(caller), Action::Delete, Target::Comanda(None))?;

        // Os itens caem junto (ON DELETE CASCADE)
        if !self.comanda_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Entity::Comanda));
        }
        tracing::info!(comanda_id = %id, "Comanda removida");
        Ok(())
    }

    // --- Itens ---

    pub async fn list_items(&self, caller: &Caller, id: Uuid) -> Result<Vec<ItemComanda>, AppError> {
        let comanda = self.get(caller, id).await?;
        self.comanda_repo.list_items(comanda.id).await
    }

    /// Lança um item e soma o subtotal ao total da comanda, na mesma transação.
    pub async fn add_item(
        &self,
        caller: &Caller,
        comanda_id: Uuid,
        payload: AddItemPayload,
    ) -> Result<ItemComanda, AppError> {
        authorize(Some(caller), Action::Update, Target::Comanda(None))?;
        payload.validate()?;

        let mut tx = self.pool.begin().await?;

        self.comanda_repo
            .find_for_update(&mut *tx, comanda_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Comanda))?;

        let produto = self
            .produto_repo
            .find_by_id(&mut *tx, payload.produto_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Produto))?;

        let valor_unitario = payload.valor_unitario.unwrap_or(produto.preco);

        let item = self
            .comanda_repo
            .add_item(&mut *tx, comanda_id, produto.id, payload.quantidade, valor_unitario)
            .await?;

        self.comanda_repo
            .adjust_total(&mut *tx, comanda_id, item.subtotal())
            .await?;

        tx.commit().await?;

        tracing::info!(comanda_id = %comanda_id, item_id = %item.id, "Item lançado na comanda");
        Ok(item)
    }

    pub async fn remove_item(
        &self,
        caller: &Caller,
        comanda_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), AppError> {
        authorize(Some(caller), Action::Update, Target::Comanda(None))?;

        let mut tx = self.pool.begin().await?;

        self.comanda_repo
            .find_for_update(&mut *tx, comanda_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Comanda))?;

        let item = self
            .comanda_repo
            .remove_item(&mut *tx, comanda_id, item_id)
            .await?
            .ok_or(AppError::NotFound(Entity::ItemComanda))?;

        self.comanda_repo
            .adjust_total(&mut *tx, comanda_id, Decimal::ZERO - item.subtotal())
            .await?;

        tx.commit().await?;

        tracing::info!(comanda_id = %comanda_id, item_id = %item_id, "Item removido da comanda");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Comanda, AppError> {
        self.comanda_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Comanda))
    }
}
