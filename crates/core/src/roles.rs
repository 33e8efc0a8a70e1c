//! Well-known role name constants.
//!
//! These must match the `ck_usuarios_role` CHECK constraint in the
//! `usuarios` migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ANALISTA: &str = "analista";

/// Role assigned when a user is created without an explicit role.
pub const DEFAULT_ROLE: &str = ROLE_ANALISTA;

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_ANALISTA];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Role inválida. Use: {}",
            VALID_ROLES.join(" ou ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_ANALISTA).is_ok());
    }

    #[test]
    fn unknown_role_rejected() {
        let err = validate_role("superuser").unwrap_err();
        assert!(err.contains("admin ou analista"));
    }

    #[test]
    fn role_match_is_case_sensitive() {
        assert!(validate_role("Admin").is_err());
    }
}
