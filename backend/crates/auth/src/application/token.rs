//! Access Tokens
//!
//! Wraps `platform::token` with the claim set this API issues:
//! `sub` (numeric user id), `screenName`, `scope`, `iss`, `iat`, `exp`.

use kernel::id::UserId;
use platform::token::{TokenIssuer, TokenKeys, TokenVerifier, now_unix};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::{Caller, User};
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(rename = "screenName")]
    pub screen_name: String,
    pub scope: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

impl AccessClaims {
    /// Caller identity asserted by these claims
    pub fn caller(&self) -> AuthResult<Caller> {
        let user_id = self
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::TokenInvalid)?;
        let role = UserRole::from_scope(&self.scope).ok_or(AuthError::TokenInvalid)?;

        Ok(Caller {
            user_id,
            screen_name: self.screen_name.clone(),
            role,
        })
    }
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    issuer_name: String,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(keys: &TokenKeys, config: &AuthConfig) -> Self {
        Self {
            issuer: keys.issuer(),
            verifier: keys.verifier(&config.issuer),
            issuer_name: config.issuer.clone(),
            ttl_secs: config.token_ttl.as_secs().max(1),
        }
    }

    pub fn claims_for(&self, user: &User) -> AccessClaims {
        let iat = now_unix();
        AccessClaims {
            sub: user.user_id.to_string(),
            screen_name: user.screen_name.to_string(),
            scope: user.user_role.scope().to_string(),
            iss: self.issuer_name.clone(),
            iat,
            exp: iat + self.ttl_secs,
        }
    }

    pub fn issue_for(&self, user: &User) -> AuthResult<String> {
        Ok(self.issuer.issue(&self.claims_for(user))?)
    }

    /// Verify signature, issuer and expiry, then resolve the caller
    pub fn verify(&self, token: &str) -> AuthResult<Caller> {
        let claims: AccessClaims = self.verifier.verify(token)?;
        claims.caller()
    }
}
