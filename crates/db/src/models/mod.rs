//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts and an update DTO for partial changes
//! - A `Serialize` response struct with the canonical JSON shape

pub mod atividade;
pub mod projeto;
pub mod squad;
pub mod usuario;
