// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        AgendamentoRepository, AlunoRepository, ComandaRepository, ProdutoRepository,
        ProfessorRepository, QuadraRepository, RankingRepository, UserRepository,
    },
    services::{
        agendamento_service::AgendamentoService, aluno_service::AlunoService, auth::AuthService,
        comanda_service::ComandaService, produto_service::ProdutoService,
        professor_service::ProfessorService, quadra_service::QuadraService,
        ranking_service::RankingService,
    },
};

/// Configuração lida do ambiente (com `.env` opcional).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub server_addr: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca de chaves.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // DATABASE_URL tem prioridade; senão monta a partir das partes
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                get_or("DB_USER", "postgres"),
                get_or("DB_PASSWORD", "postgres"),
                get_or("DB_HOST", "localhost"),
                get_or("DB_PORT", "5432"),
                get_or("DB_NAME", "arena_db"),
            ),
        };

        let jwt_secret = lookup("JWT_SECRET")
            .or_else(|| lookup("SECRET_KEY"))
            .context("JWT_SECRET (ou SECRET_KEY) deve ser definido")?;

        let access_token_expire_minutes = get_or("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
            .parse::<i64>()
            .context("ACCESS_TOKEN_EXPIRE_MINUTES deve ser um número inteiro")?;

        let db_max_connections = get_or("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS deve ser um número inteiro positivo")?;

        Ok(Self {
            database_url,
            jwt_secret,
            access_token_expire_minutes,
            server_addr: get_or("SERVER_ADDR", "0.0.0.0:3000"),
            db_max_connections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub professor_service: ProfessorService,
    pub aluno_service: AlunoService,
    pub quadra_service: QuadraService,
    pub produto_service: ProdutoService,
    pub comanda_service: ComandaService,
    pub ranking_service: RankingService,
    pub agendamento_service: AgendamentoService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: Config) -> anyhow::Result<Self> {
        let i18n_store = Arc::new(I18nStore::load()?);

        let user_repo = UserRepository::new(db_pool.clone());
        let professor_repo = ProfessorRepository::new(db_pool.clone());
        let aluno_repo = AlunoRepository::new(db_pool.clone());
        let quadra_repo = QuadraRepository::new(db_pool.clone());
        let produto_repo = ProdutoRepository::new(db_pool.clone());
        let comanda_repo = ComandaRepository::new(db_pool.clone());
        let ranking_repo = RankingRepository::new(db_pool.clone());
        let agendamento_repo = AgendamentoRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            config.access_token_expire_minutes,
            db_pool.clone(),
        );
        let professor_service = ProfessorService::new(
            professor_repo.clone(),
            user_repo.clone(),
            aluno_repo.clone(),
            db_pool.clone(),
        );
        let aluno_service =
            AlunoService::new(aluno_repo, professor_service.clone(), db_pool.clone());
        let quadra_service = QuadraService::new(quadra_repo.clone(), db_pool.clone());
        let produto_service = ProdutoService::new(produto_repo.clone(), db_pool.clone());
        let comanda_service = ComandaService::new(
            comanda_repo,
            produto_repo,
            user_repo.clone(),
            db_pool.clone(),
        );
        let ranking_service =
            RankingService::new(ranking_repo, user_repo.clone(), db_pool.clone());
        let agendamento_service =
            AgendamentoService::new(agendamento_repo, quadra_repo, user_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            config: Arc::new(config),
            i18n_store,
            auth_service,
            professor_service,
            aluno_service,
            quadra_service,
            produto_service,
            comanda_service,
            ranking_service,
            agendamento_service,
        })
    }
}
