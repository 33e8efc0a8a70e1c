//! Domain types and pure logic shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod atividade;
pub mod dates;
pub mod error;
pub mod ids;
pub mod pagination;
pub mod patch;
pub mod roles;
pub mod search;
pub mod types;
