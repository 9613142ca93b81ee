// src/services/policy.rs

//! Regras de acesso de todas as entidades num lugar só.
//!
//! Os serviços montam o [`Caller`] (usuário + perfil de professor, se houver)
//! e chamam [`authorize`] antes de ler ou gravar qualquer linha.

use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    models::auth::{User, UserType},
};

/// Quem está fazendo a requisição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub user_type: UserType,
    /// Id em `professores`, só para usuários do tipo professor com perfil
    pub professor_id: Option<Uuid>,
}

impl Caller {
    pub fn new(user: &User, professor_id: Option<Uuid>) -> Self {
        Self { user_id: user.id, user_type: user.user_type, professor_id }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// O alvo da ação. O `Option` carrega o dono da linha; `None` é a coleção
/// (listagem ou criação sem dono definido).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Id do próprio registro de usuário
    User(Uuid),
    /// user_id dono do perfil
    Professor(Option<Uuid>),
    /// professor_id dono do aluno
    Aluno(Option<Uuid>),
    Quadra,
    Produto,
    Ranking,
    /// cliente_id dono da comanda
    Comanda(Option<Uuid>),
    /// cliente_id dono do agendamento
    Agendamento(Option<Uuid>),
}

const NOT_ENOUGH_PERMISSIONS: &str = "forbidden.not_enough_permissions";
const NOT_A_PROFESSOR: &str = "forbidden.not_a_professor";
const OWN_RECORDS: &str = "forbidden.own_records";

/// Avalia a política de acesso. `caller = None` é requisição anônima.
pub fn authorize(caller: Option<&Caller>, action: Action, target: Target) -> Result<(), AppError> {
    use Action::*;

    // Leituras públicas e auto-cadastro dispensam autenticação
    match (action, target) {
        (Read, Target::Quadra | Target::Produto | Target::Ranking) => return Ok(()),
        (Create, Target::User(_)) => return Ok(()),
        _ => {}
    }

    let caller = caller.ok_or(AppError::InvalidToken)?;

    let allowed = match target {
        Target::User(id) => match action {
            Read | Update => caller.user_id == id,
            // Exclusão de usuário não é exposta
            Create | Delete => false,
        },

        Target::Professor(owner) => match action {
            Create => caller.is_admin(),
            // Listagem de perfis: só admin
            Read if owner.is_none() => caller.is_admin(),
            Read | Update => {
                if caller.user_type != UserType::Professor {
                    return Err(AppError::Forbidden(NOT_A_PROFESSOR));
                }
                owner == Some(caller.user_id)
            }
            Delete => false,
        },

        Target::Aluno(owner) => {
            match caller.user_type {
                UserType::Admin => true,
                UserType::Cliente => false,
                UserType::Professor => match owner {
                    // Listagem do professor é filtrada por aluno_scope
                    None => action == Read,
                    Some(professor_id) => {
                        if caller.professor_id != Some(professor_id) {
                            return Err(AppError::Forbidden(aluno_denial(action)));
                        }
                        true
                    }
                },
            }
        }

        Target::Quadra | Target::Produto | Target::Ranking => caller.is_admin(),

        Target::Comanda(owner) | Target::Agendamento(owner) => match action {
            Read => caller.is_admin() || owner.is_none() || owner == Some(caller.user_id),
            Create | Update | Delete => caller.is_admin(),
        },
    };

    if allowed {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %caller.user_id,
            ?action,
            ?target,
            "Acesso negado"
        );
        let key = match (target, action) {
            (Target::User(_), Read | Update) => OWN_RECORDS,
            (Target::Comanda(_) | Target::Agendamento(_), Read) => OWN_RECORDS,
            _ => NOT_ENOUGH_PERMISSIONS,
        };
        Err(AppError::Forbidden(key))
    }
}

fn aluno_denial(action: Action) -> &'static str {
    match action {
        Action::Create => "forbidden.aluno_create",
        Action::Read => "forbidden.aluno_read",
        Action::Update => "forbidden.aluno_update",
        Action::Delete => "forbidden.aluno_delete",
    }
}

/// Quais alunos o chamador enxerga na listagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlunoScope {
    All,
    Professor(Uuid),
}

pub fn aluno_scope(caller: &Caller) -> Result<AlunoScope, AppError> {
    match caller.user_type {
        UserType::Admin => Ok(AlunoScope::All),
        UserType::Professor => caller
            .professor_id
            .map(AlunoScope::Professor)
            .ok_or(AppError::NotFound(Entity::Professor)),
        UserType::Cliente => Err(AppError::Forbidden(NOT_ENOUGH_PERMISSIONS)),
    }
}

/// Filtro de dono para comandas e agendamentos: admin vê tudo.
pub fn owner_scope(caller: &Caller) -> Option<Uuid> {
    if caller.is_admin() { None } else { Some(caller.user_id) }
}
