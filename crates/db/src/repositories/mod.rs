//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Single-statement methods are generic over [`sqlx::PgExecutor`] so they run
//! against the pool or inside a caller-owned transaction; methods issuing
//! several statements take `&mut PgConnection`.

pub mod atividade_repo;
pub mod projeto_repo;
pub mod squad_repo;
pub mod usuario_repo;

pub use atividade_repo::AtividadeRepo;
pub use projeto_repo::ProjetoRepo;
pub use squad_repo::SquadRepo;
pub use usuario_repo::UsuarioRepo;
