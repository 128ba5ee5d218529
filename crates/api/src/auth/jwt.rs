//! JWT access-token generation/validation and the JWT identity provider.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! subject is the user's UUID; the optional `role` claim selects the caller's
//! [`Role`]. Tokens are normally issued by the external auth service sharing
//! `JWT_SECRET`; [`generate_access_token`] exists for development and tests.

use forge_core::identity::{AuthFailure, Caller, IdentityProvider};
use forge_core::roles::Role;
use forge_core::types::UserId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's UUID.
    pub sub: UserId,
    /// Role name (`"student"`, `"staff"`, `"admin"`). Absent means student.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Issuer, checked only when `JWT_ISSUER` is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Unique token identifier.
    #[serde(default)]
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Expected `iss` claim, if any.
    pub issuer: Option<String>,
    /// Lifetime of locally minted tokens in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ISSUER`             | no       | unset   |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            issuer,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: UserId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        role: Some(role.as_str().to_string()),
        exp,
        iat: now,
        iss: config.issuer.clone(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry, and the issuer when one is configured.
/// The audience claim is not checked.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// [`IdentityProvider`] backed by shared-secret JWT validation.
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    config: JwtConfig,
}

impl JwtIdentityProvider {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn resolve_caller(&self, credential: &str) -> Result<Caller, AuthFailure> {
        let claims = validate_token(credential, &self.config).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            _ => AuthFailure::InvalidToken,
        })?;

        Ok(Caller {
            user_id: claims.sub,
            role: Role::from_claim(claims.role.as_deref()),
        })
    }
}
