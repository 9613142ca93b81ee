pub mod user_repo;
pub use user_repo::UserRepository;
pub mod professor_repo;
pub use professor_repo::ProfessorRepository;
pub mod aluno_repo;
pub use aluno_repo::AlunoRepository;
pub mod quadra_repo;
pub use quadra_repo::QuadraRepository;
pub mod produto_repo;
pub use produto_repo::ProdutoRepository;
pub mod comanda_repo;
pub use comanda_repo::ComandaRepository;
pub mod ranking_repo;
pub use ranking_repo::RankingRepository;
pub mod agendamento_repo;
pub use agendamento_repo::AgendamentoRepository;
