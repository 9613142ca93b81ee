// Cenários ponta a ponta contra um PostgreSQL real.
// Rodar com: DATABASE_URL=postgres://... cargo test -- --ignored

use arena_backend::{
    common::{error::{AppError, Entity}, i18n::I18nStore, pagination::Pagination},
    config::{AppState, Config},
    middleware::i18n::Locale,
    models::{
        agendamento::{AgendamentoFilter, CreateAgendamentoPayload, StatusAgendamento},
        aluno::{CreateAlunoPayload, UpdateAlunoPayload},
        auth::{RegisterUserPayload, User, UserType},
        comanda::{AddItemPayload, CreateComandaPayload},
        produto::CreateProdutoPayload,
        professor::CreateProfessorPayload,
        quadra::CreateQuadraPayload,
        ranking::{AddParticipantePayload, CategoriaRanking, CreateRankingPayload, TipoRanking},
    },
    services::policy::Caller,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

const SENHA: &str = "senha-forte";

fn state(pool: PgPool) -> AppState {
    let config = Config {
        database_url: String::new(),
        jwt_secret: "segredo-de-teste".into(),
        access_token_expire_minutes: 30,
        server_addr: "127.0.0.1:0".into(),
        db_max_connections: 1,
    };
    AppState::from_pool(pool, config).unwrap()
}

async fn register(state: &AppState, username: &str, user_type: UserType) -> User {
    state
        .auth_service
        .register_user(RegisterUserPayload {
            email: format!("{username}@x.com"),
            username: username.into(),
            full_name: username.to_uppercase(),
            user_type,
            password: SENHA.into(),
        })
        .await
        .unwrap()
}

fn admin_caller(user: &User) -> Caller {
    Caller::new(user, None)
}

async fn professor_with_profile(state: &AppState, admin: &User, username: &str) -> (User, Uuid) {
    let user = register(state, username, UserType::Professor).await;
    let profile = state
        .professor_service
        .create(
            &admin_caller(admin),
            CreateProfessorPayload {
                user_id: user.id,
                especialidade: "tennis".into(),
                percentual_padrao: Decimal::new(10, 0),
            },
        )
        .await
        .unwrap();
    (user, profile.id)
}

fn aluno(nome: &str, professor_id: Uuid) -> CreateAlunoPayload {
    CreateAlunoPayload {
        nome: nome.into(),
        professor_id,
        percentual_desconto: Decimal::new(15, 0),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn duplicate_email_is_a_conflict_even_with_another_username(pool: PgPool) {
    let state = state(pool);
    register(&state, "a", UserType::Cliente).await;

    let result = state
        .auth_service
        .register_user(RegisterUserPayload {
            email: "a@x.com".into(),
            username: "outro".into(),
            full_name: "Outro".into(),
            user_type: UserType::Cliente,
            password: SENHA.into(),
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::EmailAlreadyRegistered));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn second_professor_for_the_same_user_is_rejected(pool: PgPool) {
    let state = state(pool);
    let admin = register(&state, "admin", UserType::Admin).await;
    let (professor, _) = professor_with_profile(&state, &admin, "a").await;

    let err = state
        .professor_service
        .create(
            &admin_caller(&admin),
            CreateProfessorPayload {
                user_id: professor.id,
                especialidade: "tennis".into(),
                percentual_padrao: Decimal::new(10, 0),
            },
        )
        .await
        .unwrap_err();

    let api = err.to_api_error(&Locale::default(), &I18nStore::load().unwrap());
    assert_eq!(api.status, StatusCode::BAD_REQUEST);
    assert_eq!(api.error, "Professor already exists");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn professor_profile_requires_a_professor_user(pool: PgPool) {
    let state = state(pool);
    let admin = register(&state, "admin", UserType::Admin).await;
    let cliente = register(&state, "cli", UserType::Cliente).await;

    for user_id in [cliente.id, Uuid::new_v4()] {
        let err = state
            .professor_service
            .create(
                &admin_caller(&admin),
                CreateProfessorPayload {
                    user_id,
                    especialidade: "tennis".into(),
                    percentual_padrao: Decimal::new(10, 0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidProfessorUser));
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn student_ownership_and_listing_scope(pool: PgPool) {
    let state = state(pool);
    let admin = register(&state, "admin", UserType::Admin).await;
    let cliente = register(&state, "cli", UserType::Cliente).await;
    let (prof_a, perfil_a) = professor_with_profile(&state, &admin, "prof_a").await;
    let (prof_b, perfil_b) = professor_with_profile(&state, &admin, "prof_b").await;

    state.aluno_service.create(&prof_a, aluno("Ana", perfil_a)).await.unwrap();
    state.aluno_service.create(&prof_b, aluno("Bia", perfil_b)).await.unwrap();

    // Professor não cria aluno para outro professor
    let err = state.aluno_service.create(&prof_a, aluno("Caio", perfil_b)).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden("forbidden.aluno_create")));

    let page = Pagination::default();
    let de_a = state.aluno_service.list(&prof_a, page).await.unwrap();
    assert_eq!(de_a.len(), 1);
    assert_eq!(de_a[0].nome, "Ana");

    assert_eq!(state.aluno_service.list(&admin, page).await.unwrap().len(), 2);
    assert!(matches!(
        state.aluno_service.list(&cliente, page).await,
        Err(AppError::Forbidden(_))
    ));

    let ganhos = state.professor_service.ganhos(&prof_a).await.unwrap();
    assert_eq!(ganhos.alunos_ativos, 1);
    assert_eq!(ganhos.ganhos_potenciais, Decimal::ZERO);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn partial_update_keeps_untouched_fields(pool: PgPool) {
    let state = state(pool);
    let admin = register(&state, "admin", UserType::Admin).await;
    let (prof, perfil) = professor_with_profile(&state, &admin, "prof").await;
    let criado = state.aluno_service.create(&prof, aluno("Ana", perfil)).await.unwrap();

    let patch: UpdateAlunoPayload = serde_json::from_str(r#"{ "nome": "Ana Maria" }"#).unwrap();
    let atualizado = state.aluno_service.update(&prof, criado.id, patch).await.unwrap();

    assert_eq!(atualizado.nome, "Ana Maria");
    assert_eq!(atualizado.percentual_desconto, criado.percentual_desconto);

    let lido = state.aluno_service.get(&prof, criado.id).await.unwrap();
    assert_eq!(lido.nome, "Ana Maria");
    assert_eq!(lido.professor_id, perfil);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn deleting_unknown_ids_is_not_found(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let id = Uuid::new_v4();

    let results = [
        (Entity::Aluno, state.aluno_service.delete(&admin_user, id).await),
        (Entity::Quadra, state.quadra_service.delete(&admin, id).await),
        (Entity::Produto, state.produto_service.delete(&admin, id).await),
        (Entity::Comanda, state.comanda_service.delete(&admin, id).await),
        (Entity::Ranking, state.ranking_service.delete(&admin, id).await),
        (Entity::Agendamento, state.agendamento_service.delete(&admin, id).await),
    ];

    for (entity, result) in results {
        match result {
            Err(AppError::NotFound(found)) => assert_eq!(found, entity),
            other => panic!("esperava NotFound({entity:?}), veio {other:?}"),
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn court_created_by_admin_is_publicly_readable(pool: PgPool) {
    let state = state(pool);
    register(&state, "admin", UserType::Admin).await;
    let token = state.auth_service.login_user("admin", SENHA).await.unwrap();
    let app = arena_backend::app(state);

    let create = Request::builder()
        .method(Method::POST)
        .uri("/quadras")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{ "nome": "Court 1", "valor_hora": 50.0 }"#))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let criada: Value = serde_json::from_slice(&bytes).unwrap();
    let id = criada["id"].as_str().unwrap().to_owned();

    // Leitura sem token
    let read = Request::builder().uri(format!("/quadras/{id}")).body(Body::empty()).unwrap();
    let response = app.oneshot(read).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let lida: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(lida["nome"], "Court 1");
    assert_eq!(lida["valor_hora"], 50.0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn tab_total_follows_items(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let cliente = register(&state, "cli", UserType::Cliente).await;
    let outro = register(&state, "outro", UserType::Cliente).await;

    let produto = state
        .produto_service
        .create(
            &admin,
            CreateProdutoPayload {
                nome: "Água".into(),
                descricao: None,
                preco: Decimal::new(450, 2),
                estoque: 10,
                categoria: "bebidas".into(),
            },
        )
        .await
        .unwrap();

    let comanda = state
        .comanda_service
        .create(&admin, CreateComandaPayload { cliente_id: cliente.id, forma_pagamento: None })
        .await
        .unwrap();

    let item = state
        .comanda_service
        .add_item(
            &admin,
            comanda.id,
            AddItemPayload { produto_id: produto.id, quantidade: 3, valor_unitario: None },
        )
        .await
        .unwrap();
    assert_eq!(item.valor_unitario, produto.preco);

    let dono = Caller::new(&cliente, None);
    let lida = state.comanda_service.get(&dono, comanda.id).await.unwrap();
    assert_eq!(lida.valor_total, Decimal::new(1350, 2));

    // Outro cliente não enxerga a comanda
    assert!(matches!(
        state.comanda_service.get(&Caller::new(&outro, None), comanda.id).await,
        Err(AppError::Forbidden("forbidden.own_records"))
    ));

    state.comanda_service.remove_item(&admin, comanda.id, item.id).await.unwrap();
    let lida = state.comanda_service.get(&dono, comanda.id).await.unwrap();
    assert_eq!(lida.valor_total, Decimal::ZERO);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn ranking_players_join_once_and_sort_by_points(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let ana = register(&state, "ana", UserType::Cliente).await;
    let bia = register(&state, "bia", UserType::Cliente).await;

    let ranking = state
        .ranking_service
        .create(
            &admin,
            CreateRankingPayload {
                nome: "Verão".into(),
                categoria: CategoriaRanking::Iniciante,
                tipo: TipoRanking::Misto,
            },
        )
        .await
        .unwrap();

    for (jogador, pontos) in [(&ana, 10), (&bia, 30)] {
        state
            .ranking_service
            .add_participante(
                &admin,
                ranking.id,
                AddParticipantePayload { jogador_id: jogador.id, pontos },
            )
            .await
            .unwrap();
    }

    let repetido = state
        .ranking_service
        .add_participante(
            &admin,
            ranking.id,
            AddParticipantePayload { jogador_id: ana.id, pontos: 0 },
        )
        .await;
    assert!(matches!(repetido, Err(AppError::ParticipantAlreadyExists)));

    let tabela = state
        .ranking_service
        .list_participantes(ranking.id, Pagination::default())
        .await
        .unwrap();
    let ordem: Vec<Uuid> = tabela.iter().map(|p| p.jogador_id).collect();
    assert_eq!(ordem, vec![bia.id, ana.id]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn booking_defaults_and_owner_scope(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let cliente = register(&state, "cli", UserType::Cliente).await;
    let outro = register(&state, "outro", UserType::Cliente).await;

    let quadra = state
        .quadra_service
        .create(
            &admin,
            CreateQuadraPayload {
                nome: "Court 1".into(),
                descricao: String::new(),
                valor_hora: Decimal::new(50, 0),
                coberta: false,
                iluminacao: true,
            },
        )
        .await
        .unwrap();

    let inicio = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
    let agendamento = state
        .agendamento_service
        .create(
            &admin,
            CreateAgendamentoPayload {
                quadra_id: quadra.id,
                cliente_id: cliente.id,
                data_hora_inicio: inicio,
                data_hora_fim: inicio + Duration::minutes(90),
                status: None,
                valor: None,
                observacoes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(agendamento.status, StatusAgendamento::Pendente);
    assert_eq!(agendamento.valor, Decimal::new(75, 0));

    let page = Pagination::default();
    let filtro = || AgendamentoFilter { quadra_id: Some(quadra.id) };
    let do_cliente = state
        .agendamento_service
        .list(&Caller::new(&cliente, None), filtro(), page)
        .await
        .unwrap();
    assert_eq!(do_cliente.len(), 1);

    let do_outro = state
        .agendamento_service
        .list(&Caller::new(&outro, None), filtro(), page)
        .await
        .unwrap();
    assert!(do_outro.is_empty());
}

fn quadra(valor_hora: Decimal) -> CreateQuadraPayload {
    CreateQuadraPayload {
        nome: "Court 1".into(),
        descricao: String::new(),
        valor_hora,
        coberta: false,
        iluminacao: false,
    }
}

fn field_error(err: &AppError) -> Vec<String> {
    match err {
        AppError::ValidationError(errors) => {
            errors.field_errors().keys().map(|k| k.to_string()).collect()
        }
        other => panic!("esperava erro de validação, veio {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn login_by_email_reaches_the_email_owner(pool: PgPool) {
    let state = state(pool.clone());

    // Linha antiga, anterior à regra que proíbe '@' no username
    sqlx::query(
        "INSERT INTO users (email, username, hashed_password, full_name, user_type) \
         VALUES ('a@x.com', 'bob@x.com', 'sem-hash', 'A', 'cliente')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let bob = register(&state, "bob", UserType::Cliente).await;
    assert_eq!(bob.email, "bob@x.com");

    let token = state.auth_service.login_user("bob@x.com", SENHA).await.unwrap();
    let logado = state.auth_service.validate_token(&token).await.unwrap();
    assert_eq!(logado.id, bob.id);

    // Novos cadastros não conseguem repetir a colisão
    let err = state
        .auth_service
        .register_user(RegisterUserPayload {
            email: "c@x.com".into(),
            username: "ana@x.com".into(),
            full_name: "C".into(),
            user_type: UserType::Cliente,
            password: SENHA.into(),
        })
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["username"]);
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn money_must_fit_the_column_exactly(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);

    // Acima de NUMERIC(10, 2): 400 no campo, não 500
    let err = state
        .quadra_service
        .create(&admin, quadra(Decimal::new(1_000_000_000, 0)))
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["valor_hora"]);
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // Três casas seriam arredondadas pelo banco
    let err = state
        .quadra_service
        .create(&admin, quadra(Decimal::new(50555, 3)))
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["valor_hora"]);

    let criada = state
        .quadra_service
        .create(&admin, quadra(Decimal::new(5055, 2)))
        .await
        .unwrap();
    let lida = state.quadra_service.get(criada.id).await.unwrap();
    assert_eq!(lida.valor_hora, Decimal::new(5055, 2));

    let patch = serde_json::from_str(r#"{ "valor_hora": 12.345 }"#).unwrap();
    let err = state.quadra_service.update(&admin, criada.id, patch).await.unwrap_err();
    assert_eq!(field_error(&err), vec!["valor_hora"]);
    assert_eq!(
        state.quadra_service.get(criada.id).await.unwrap().valor_hora,
        Decimal::new(5055, 2)
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn derived_amounts_that_overflow_are_validation_errors(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let cliente = register(&state, "cli", UserType::Cliente).await;

    let teto = Decimal::new(9_999_999_999, 2);
    let cara = state.quadra_service.create(&admin, quadra(teto)).await.unwrap();

    // Duas horas no preço máximo passam do teto da coluna
    let inicio = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
    let err = state
        .agendamento_service
        .create(
            &admin,
            CreateAgendamentoPayload {
                quadra_id: cara.id,
                cliente_id: cliente.id,
                data_hora_inicio: inicio,
                data_hora_fim: inicio + Duration::hours(2),
                status: None,
                valor: None,
                observacoes: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["valor"]);

    let produto = state
        .produto_service
        .create(
            &admin,
            CreateProdutoPayload {
                nome: "Raquete".into(),
                descricao: None,
                preco: teto,
                estoque: 1,
                categoria: "equipamentos".into(),
            },
        )
        .await
        .unwrap();
    let comanda = state
        .comanda_service
        .create(&admin, CreateComandaPayload { cliente_id: cliente.id, forma_pagamento: None })
        .await
        .unwrap();

    let err = state
        .comanda_service
        .add_item(
            &admin,
            comanda.id,
            AddItemPayload { produto_id: produto.id, quantidade: 1000, valor_unitario: None },
        )
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["valor_total"]);

    // A transação desfez o item
    let itens = state.comanda_service.list_items(&admin, comanda.id).await.unwrap();
    assert!(itens.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn forbidden_callers_get_403_even_with_invalid_bodies(pool: PgPool) {
    let state = state(pool);
    let cliente = register(&state, "cli", UserType::Cliente).await;

    let invalido = CreateAlunoPayload {
        nome: "   ".into(),
        professor_id: Uuid::new_v4(),
        percentual_desconto: Decimal::new(200, 0),
    };
    let err = state.aluno_service.create(&cliente, invalido).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = state
        .quadra_service
        .create(&Caller::new(&cliente, None), quadra(Decimal::new(-1, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn booking_period_patch_is_checked_against_the_stored_row(pool: PgPool) {
    let state = state(pool);
    let admin_user = register(&state, "admin", UserType::Admin).await;
    let admin = admin_caller(&admin_user);
    let cliente = register(&state, "cli", UserType::Cliente).await;
    let court = state.quadra_service.create(&admin, quadra(Decimal::new(50, 0))).await.unwrap();

    let inicio = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
    let agendamento = state
        .agendamento_service
        .create(
            &admin,
            CreateAgendamentoPayload {
                quadra_id: court.id,
                cliente_id: cliente.id,
                data_hora_inicio: inicio,
                data_hora_fim: inicio + Duration::hours(1),
                status: None,
                valor: None,
                observacoes: None,
            },
        )
        .await
        .unwrap();

    // Fim antes do início gravado: 400 no campo, não violação de CHECK
    let patch = serde_json::from_value(serde_json::json!({
        "data_hora_fim": inicio - Duration::hours(1),
    }))
    .unwrap();
    let err = state
        .agendamento_service
        .update(&admin, agendamento.id, patch)
        .await
        .unwrap_err();
    assert_eq!(field_error(&err), vec!["data_hora_fim"]);

    let patch = serde_json::from_value(serde_json::json!({
        "data_hora_fim": inicio + Duration::hours(2),
    }))
    .unwrap();
    let atualizado = state
        .agendamento_service
        .update(&admin, agendamento.id, patch)
        .await
        .unwrap();
    assert_eq!(atualizado.data_hora_fim, inicio + Duration::hours(2));
    assert_eq!(atualizado.data_hora_inicio, inicio);

    let patch = serde_json::from_value(serde_json::json!({
        "data_hora_inicio": inicio,
    }))
    .unwrap();
    assert!(matches!(
        state.agendamento_service.update(&admin, Uuid::new_v4(), patch).await,
        Err(AppError::NotFound(Entity::Agendamento))
    ));
}
