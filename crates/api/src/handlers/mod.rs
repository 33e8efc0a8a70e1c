pub mod atividades;
pub mod auth;
pub mod projetos;
pub mod squads;
pub mod usuarios;
