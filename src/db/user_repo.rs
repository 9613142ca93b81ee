// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::UpdateBuilder,
        error::{AppError, Entity},
    },
    models::auth::{User, UserType},
};

/// Campos já validados (e senha já em hash) para o UPDATE de `/users/me`.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub hashed_password: Option<String>,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Login aceita tanto o username quanto o e-mail. O e-mail tem prioridade.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 OR email = $1 ORDER BY (email = $1) DESC LIMIT 1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    // Cria um novo usuário no banco de dados.
    // As checagens prévias ficam no serviço; aqui a constraint é a última barreira.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        username: &str,
        hashed_password: &str,
        full_name: &str,
        user_type: UserType,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, hashed_password, full_name, user_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(hashed_password)
        .bind(full_name)
        .bind(user_type)
        .fetch_one(executor)
        .await
        .map_err(map_user_unique_violation)
    }

    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = UpdateBuilder::new("users");
        builder
            .set_opt("email", changes.email)
            .set_opt("full_name", changes.full_name)
            .set_opt("hashed_password", changes.hashed_password);

        let mut query = builder.finish(id);
        query
            .build_query_as::<User>()
            .fetch_optional(executor)
            .await
            .map_err(map_user_unique_violation)?
            .ok_or(AppError::NotFound(Entity::User))
    }
}

fn map_user_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint() {
                match constraint {
                    "users_email_key" => return AppError::EmailAlreadyRegistered,
                    "users_username_key" => return AppError::UsernameAlreadyRegistered,
                    _ => {}
                }
            }
        }
    }
    e.into()
}
