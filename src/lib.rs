//! Backend da arena esportiva: usuários, professores, alunos, quadras,
//! produtos, comandas, rankings e agendamentos.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

/// Monta o roteador completo da aplicação.
///
/// Rotas registradas antes de cada `route_layer` passam pelo `auth_guard`;
/// as leituras públicas entram depois dele.
pub fn app(app_state: AppState) -> Router {
    let guard = || axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/me",
            get(handlers::users::get_me).put(handlers::users::update_me),
        )
        .route_layer(guard())
        // Auto-cadastro é público
        .route("/", post(handlers::users::register));

    let professor_routes = Router::new()
        .route(
            "/",
            post(handlers::professores::create_professor)
                .get(handlers::professores::list_professores),
        )
        .route(
            "/me",
            get(handlers::professores::get_my_profile)
                .put(handlers::professores::update_my_profile),
        )
        .route("/ganhos", get(handlers::professores::get_ganhos))
        .route_layer(guard());

    let aluno_routes = Router::new()
        .route(
            "/",
            post(handlers::alunos::create_aluno).get(handlers::alunos::list_alunos),
        )
        .route(
            "/{aluno_id}",
            get(handlers::alunos::get_aluno)
                .put(handlers::alunos::update_aluno)
                .delete(handlers::alunos::delete_aluno),
        )
        .route_layer(guard());

    let quadra_routes = Router::new()
        .route("/", post(handlers::quadras::create_quadra))
        .route(
            "/{quadra_id}",
            put(handlers::quadras::update_quadra).delete(handlers::quadras::delete_quadra),
        )
        .route_layer(guard())
        .route("/", get(handlers::quadras::list_quadras))
        .route("/{quadra_id}", get(handlers::quadras::get_quadra));

    let produto_routes = Router::new()
        .route("/", post(handlers::produtos::create_produto))
        .route(
            "/{produto_id}",
            put(handlers::produtos::update_produto).delete(handlers::produtos::delete_produto),
        )
        .route_layer(guard())
        .route("/", get(handlers::produtos::list_produtos))
        .route("/{produto_id}", get(handlers::produtos::get_produto));

    let comanda_routes = Router::new()
        .route(
            "/",
            post(handlers::comandas::create_comanda).get(handlers::comandas::list_comandas),
        )
        .route(
            "/{comanda_id}",
            get(handlers::comandas::get_comanda)
                .put(handlers::comandas::update_comanda)
                .delete(handlers::comandas::delete_comanda),
        )
        .route(
            "/{comanda_id}/itens",
            get(handlers::comandas::list_itens).post(handlers::comandas::add_item),
        )
        .route(
            "/{comanda_id}/itens/{item_id}",
            axum::routing::delete(handlers::comandas::remove_item),
        )
        .route_layer(guard());

    let ranking_routes = Router::new()
        .route("/", post(handlers::rankings::create_ranking))
        .route(
            "/{ranking_id}",
            put(handlers::rankings::update_ranking).delete(handlers::rankings::delete_ranking),
        )
        .route(
            "/{ranking_id}/participantes",
            post(handlers::rankings::add_participante),
        )
        .route(
            "/{ranking_id}/participantes/{participante_id}",
            put(handlers::rankings::update_participante)
                .delete(handlers::rankings::remove_participante),
        )
        .route_layer(guard())
        .route("/", get(handlers::rankings::list_rankings))
        .route("/{ranking_id}", get(handlers::rankings::get_ranking))
        .route(
            "/{ranking_id}/participantes",
            get(handlers::rankings::list_participantes),
        );

    let agendamento_routes = Router::new()
        .route(
            "/",
            post(handlers::agendamentos::create_agendamento)
                .get(handlers::agendamentos::list_agendamentos),
        )
        .route(
            "/{agendamento_id}",
            get(handlers::agendamentos::get_agendamento)
                .put(handlers::agendamentos::update_agendamento)
                .delete(handlers::agendamentos::delete_agendamento),
        )
        .route_layer(guard());

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::health::welcome))
        .route("/health", get(handlers::health::health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/professores", professor_routes)
        .nest("/alunos", aluno_routes)
        .nest("/quadras", quadra_routes)
        .nest("/produtos", produto_routes)
        .nest("/comandas", comanda_routes)
        .nest("/rankings", ranking_routes)
        .nest("/agendamentos", agendamento_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
