//! Senha hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, which carry the algorithm, cost
//! parameters and salt alongside the digest.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Failures while hashing or checking a senha.
///
/// A senha that simply does not match is not an error; see [`verify_password`].
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Falha ao gerar hash da senha: {0}")]
    Hash(password_hash::Error),

    #[error("Hash de senha armazenado inválido: {0}")]
    StoredHash(password_hash::Error),

    #[error("Falha ao verificar senha: {0}")]
    Verify(password_hash::Error),
}

fn argon2id() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash `senha` with a fresh random salt, returning the PHC string.
pub fn hash_password(senha: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2id()
        .hash_password(senha.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check `senha` against a stored PHC string.
///
/// `Ok(false)` means the senha is wrong. Errors are reserved for hashes that
/// cannot be parsed or checked at all.
pub fn verify_password(senha: &str, senha_hash: &str) -> Result<bool, PasswordError> {
    let stored = PasswordHash::new(senha_hash).map_err(PasswordError::StoredHash)?;
    match argon2id().verify_password(senha.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e)),
    }
}
