// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::welcome,
        handlers::health::health,

        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::users::register,
        handlers::users::get_me,
        handlers::users::update_me,

        // --- Professores ---
        handlers::professores::create_professor,
        handlers::professores::list_professores,
        handlers::professores::get_my_profile,
        handlers::professores::update_my_profile,
        handlers::professores::get_ganhos,

        // --- Alunos ---
        handlers::alunos::create_aluno,
        handlers::alunos::list_alunos,
        handlers::alunos::get_aluno,
        handlers::alunos::update_aluno,
        handlers::alunos::delete_aluno,

        // --- Quadras ---
        handlers::quadras::create_quadra,
        handlers::quadras::list_quadras,
        handlers::quadras::get_quadra,
        handlers::quadras::update_quadra,
        handlers::quadras::delete_quadra,

        // --- Produtos ---
        handlers::produtos::create_produto,
        handlers::produtos::list_produtos,
        handlers::produtos::get_produto,
        handlers::produtos::update_produto,
        handlers::produtos::delete_produto,

        // --- Comandas ---
        handlers::comandas::create_comanda,
        handlers::comandas::list_comandas,
        handlers::comandas::get_comanda,
        handlers::comandas::update_comanda,
        handlers::comandas::delete_comanda,
        handlers::comandas::list_itens,
        handlers::comandas::add_item,
        handlers::comandas::remove_item,

        // --- Rankings ---
        handlers::rankings::create_ranking,
        handlers::rankings::list_rankings,
        handlers::rankings::get_ranking,
        handlers::rankings::update_ranking,
        handlers::rankings::delete_ranking,
        handlers::rankings::list_participantes,
        handlers::rankings::add_participante,
        handlers::rankings::update_participante,
        handlers::rankings::remove_participante,

        // --- Agendamentos ---
        handlers::agendamentos::create_agendamento,
        handlers::agendamentos::list_agendamentos,
        handlers::agendamentos::get_agendamento,
        handlers::agendamentos::update_agendamento,
        handlers::agendamentos::delete_agendamento,
    ),
    components(
        schemas(
            handlers::MessageResponse,

            // --- Auth ---
            models::auth::UserType,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::TokenResponse,

            // --- Professores e alunos ---
            models::professor::Professor,
            models::professor::CreateProfessorPayload,
            models::professor::UpdateProfessorPayload,
            models::professor::Ganhos,
            models::aluno::Aluno,
            models::aluno::CreateAlunoPayload,
            models::aluno::UpdateAlunoPayload,

            // --- Catálogo ---
            models::quadra::Quadra,
            models::quadra::CreateQuadraPayload,
            models::quadra::UpdateQuadraPayload,
            models::produto::Produto,
            models::produto::CreateProdutoPayload,
            models::produto::UpdateProdutoPayload,

            // --- Comandas ---
            models::comanda::StatusComanda,
            models::comanda::Comanda,
            models::comanda::ItemComanda,
            models::comanda::CreateComandaPayload,
            models::comanda::UpdateComandaPayload,
            models::comanda::AddItemPayload,

            // --- Rankings ---
            models::ranking::CategoriaRanking,
            models::ranking::TipoRanking,
            models::ranking::Ranking,
            models::ranking::ParticipanteRanking,
            models::ranking::CreateRankingPayload,
            models::ranking::UpdateRankingPayload,
            models::ranking::AddParticipantePayload,
            models::ranking::UpdateParticipantePayload,

            // --- Agendamentos ---
            models::agendamento::StatusAgendamento,
            models::agendamento::Agendamento,
            models::agendamento::CreateAgendamentoPayload,
            models::agendamento::UpdateAgendamentoPayload,
        )
    ),
    tags(
        (name = "Health", description = "Boas-vindas e verificação de saúde"),
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Cadastro e dados do próprio usuário"),
        (name = "Professores", description = "Perfis de professor e ganhos"),
        (name = "Alunos", description = "Alunos de cada professor"),
        (name = "Quadras", description = "Quadras da arena"),
        (name = "Produtos", description = "Produtos vendidos na arena"),
        (name = "Comandas", description = "Comandas e itens lançados"),
        (name = "Rankings", description = "Rankings e participantes"),
        (name = "Agendamentos", description = "Reservas de quadra")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
