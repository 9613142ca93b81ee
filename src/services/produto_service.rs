// src/services/produto_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
        validation::{check_field, validate_not_blank, validate_money},
    },
    db::{produto_repo::ProdutoChanges, ProdutoRepository},
    models::produto::{CreateProdutoPayload, Produto, UpdateProdutoPayload},
    services::policy::{authorize, Action, Caller, Target},
};

#[derive(Clone)]
pub struct ProdutoService {
    produto_repo: ProdutoRepository,
    pool: PgPool,
}

impl ProdutoService {
    pub fn new(produto_repo: ProdutoRepository, pool: PgPool) -> Self {
        Self { produto_repo, pool }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateProdutoPayload,
    ) -> Result<Produto, AppError> {
        authorize(Some(caller), Action::Create, Target::Produto)?;
        payload.validate()?;

        let produto = self.produto_repo.create(&self.pool, &payload).await?;
        tracing::info!(produto_id = %produto.id, "Produto criado");
        Ok(produto)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<Produto>, AppError> {
        authorize(None, Action::Read, Target::Produto)?;
        self.produto_repo.list(page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Produto, AppError> {
        authorize(None, Action::Read, Target::Produto)?;
        self.produto_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Entity::Produto))
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateProdutoPayload,
    ) -> Result<Produto, AppError> {
        authorize(Some(caller), Action::Update, Target::Produto)?;

        let changes = ProdutoChanges {
            nome: payload.nome.into_required("nome")?,
            descricao: payload.descricao.into_nullable(),
            preco: payload.preco.into_required("preco")?,
            estoque: payload.estoque.into_required("estoque")?,
            categoria: payload.categoria.into_required("categoria")?,
        };
        if let Some(nome) = &changes.nome {
            check_field("nome", nome.as_str(), validate_not_blank)?;
        }
        if let Some(categoria) = &changes.categoria {
            check_field("categoria", categoria.as_str(), validate_not_blank)?;
        }
        if let Some(preco) = &changes.preco {
            check_field("preco", preco, validate_money)?;
        }
        if matches!(changes.estoque, Some(estoque) if estoque < 0) {
            return Err(AppError::field("estoque", "range", "O estoque não pode ser negativo."));
        }

        self.produto_repo.update(&self.pool, id, changes).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        authorize(Some(caller), Action::Delete, Target::Produto)?;

        if !self.produto_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Entity::Produto));
        }
        tracing::info!(produto_id = %id, "Produto removido");
        Ok(())
    }
}
