// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{patch::Patch, validation::validate_username};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum UserType {
    Admin,
    Professor,
    Cliente,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,

    #[schema(example = "ana@arena.com")]
    pub email: String,

    #[schema(example = "ana")]
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub hashed_password: String,

    #[schema(example = "Ana Souza")]
    pub full_name: String,

    pub user_type: UserType,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "ana@arena.com")]
    pub email: String,

    #[validate(
        length(min = 3, max = 50, message = "O username deve ter entre 3 e 50 caracteres."),
        custom(function = "validate_username")
    )]
    #[schema(example = "ana")]
    pub username: String,

    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub full_name: String,

    pub user_type: UserType,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para login (aceita username ou e-mail)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "O username é obrigatório."))]
    pub username: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// PUT /users/me: só e-mail, nome e senha
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub full_name: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub password: Patch<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self { access_token, token_type: "bearer".to_string() }
    }
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_rejects_bad_email_and_short_password() {
        let payload = RegisterUserPayload {
            email: "nao-e-email".into(),
            username: "ana".into(),
            full_name: "Ana".into(),
            user_type: UserType::Cliente,
            password: "123".into(),
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn register_payload_rejects_username_shaped_like_an_email() {
        let payload = RegisterUserPayload {
            email: "a@x.com".into(),
            username: "bob@x.com".into(),
            full_name: "A".into(),
            user_type: UserType::Cliente,
            password: "senha123".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn user_type_uses_lowercase_on_the_wire() {
        let t: UserType = serde_json::from_str(r#""professor""#).unwrap();
        assert_eq!(t, UserType::Professor);
        assert_eq!(serde_json::to_string(&UserType::Cliente).unwrap(), r#""cliente""#);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            username: "a".into(),
            hashed_password: "$2b$12$segredo".into(),
            full_name: "A".into(),
            user_type: UserType::Admin,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["user_type"], "admin");
    }
}
