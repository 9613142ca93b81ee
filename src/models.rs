pub mod auth;
pub mod professor;
pub mod aluno;
pub mod quadra;
pub mod produto;
pub mod comanda;
pub mod ranking;
pub mod agendamento;
