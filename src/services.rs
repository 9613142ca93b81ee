pub mod policy;
pub mod auth;
pub mod professor_service;
pub mod aluno_service;
pub mod quadra_service;
pub mod produto_service;
pub mod comanda_service;
pub mod ranking_service;
pub mod agendamento_service;
