//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Their
//! lifetime is governed by a [`TokenExpiryPolicy`]: either a short session
//! lifetime with a longer "remember me" variant, or no expiry at all.

use atividades_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the usuario's internal database id.
    pub sub: DbId,
    /// The usuario's role name (`"admin"` or `"analista"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp). Absent for non-expiring tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// How long issued tokens stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiryPolicy {
    /// Tokens expire; `lembrar` (remember-me) logins get the longer lifetime.
    Expiring {
        session_hours: i64,
        remember_days: i64,
    },
    /// Tokens carry no `exp` claim and are valid until the secret rotates.
    NonExpiring,
}

impl TokenExpiryPolicy {
    /// Token lifetime in seconds for a login, or `None` when tokens never expire.
    pub fn lifetime_secs(&self, lembrar: bool) -> Option<i64> {
        match *self {
            TokenExpiryPolicy::Expiring {
                session_hours,
                remember_days,
            } => Some(if lembrar {
                remember_days * 24 * 60 * 60
            } else {
                session_hours * 60 * 60
            }),
            TokenExpiryPolicy::NonExpiring => None,
        }
    }
}

impl Default for TokenExpiryPolicy {
    fn default() -> Self {
        TokenExpiryPolicy::Expiring {
            session_hours: DEFAULT_SESSION_EXPIRY_HOURS,
            remember_days: DEFAULT_REMEMBER_EXPIRY_DAYS,
        }
    }
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime policy.
    pub expiry: TokenExpiryPolicy,
}

/// Default session token lifetime in hours.
const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 8;
/// Default remember-me token lifetime in days.
const DEFAULT_REMEMBER_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_SESSION_EXPIRY_HOURS` | no       | `8`     |
    /// | `JWT_REMEMBER_EXPIRY_DAYS` | no       | `30`    |
    /// | `JWT_DISABLE_EXPIRY`       | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if a numeric
    /// variable does not parse.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let disable_expiry = std::env::var("JWT_DISABLE_EXPIRY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let expiry = if disable_expiry {
            TokenExpiryPolicy::NonExpiring
        } else {
            let session_hours: i64 = std::env::var("JWT_SESSION_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
                .parse()
                .expect("JWT_SESSION_EXPIRY_HOURS must be a valid i64");

            let remember_days: i64 = std::env::var("JWT_REMEMBER_EXPIRY_DAYS")
                .unwrap_or_else(|_| DEFAULT_REMEMBER_EXPIRY_DAYS.to_string())
                .parse()
                .expect("JWT_REMEMBER_EXPIRY_DAYS must be a valid i64");

            TokenExpiryPolicy::Expiring {
                session_hours,
                remember_days,
            }
        };

        Self { secret, expiry }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Generate an HS256 token for the given usuario.
///
/// `lembrar` selects the remember-me lifetime under an expiring policy.
pub fn generate_token(
    usuario_id: DbId,
    role: &str,
    lembrar: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: usuario_id,
        role: role.to_string(),
        exp: config.expiry.lifetime_secs(lembrar).map(|secs| now + secs),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Always checks the signature. Under an expiring policy `exp` is required
/// and enforced; under [`TokenExpiryPolicy::NonExpiring`] it is not.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    if config.expiry == TokenExpiryPolicy::NonExpiring {
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
