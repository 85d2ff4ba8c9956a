//! Signed Access Tokens (RS256 JWT)
//!
//! Tokens are signed with an RSA private key and verified with the matching
//! public key. Both keys are loaded from PEM.
//!
//! Verification checks the signature, the issuer and the expiry with zero
//! leeway.

use std::path::Path;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Key material could not be read or parsed
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing failed
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Token is past its `exp`
    #[error("Token has expired")]
    Expired,

    /// Malformed token, bad signature, wrong issuer, missing claims
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// RSA key pair used for signing and verification
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Load from PEM bytes (PKCS#1 or PKCS#8 private key, SPKI public key)
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, TokenError> {
        let encoding = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| TokenError::InvalidKey(format!("private key: {e}")))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| TokenError::InvalidKey(format!("public key: {e}")))?;
        Ok(Self { encoding, decoding })
    }

    /// Load from PEM files
    pub fn from_pem_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, TokenError> {
        let read = |path: &Path| {
            std::fs::read(path)
                .map_err(|e| TokenError::InvalidKey(format!("{}: {e}", path.display())))
        };
        let private_pem = read(private_path.as_ref())?;
        let public_pem = read(public_path.as_ref())?;
        Self::from_pem(&private_pem, &public_pem)
    }

    pub fn issuer(&self) -> TokenIssuer {
        TokenIssuer {
            key: self.encoding.clone(),
        }
    }

    /// Verifier that only accepts tokens carrying `iss == issuer`
    pub fn verifier(&self, issuer: &str) -> TokenVerifier {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        TokenVerifier {
            key: self.decoding.clone(),
            validation,
        }
    }
}

/// Signs claims into a compact JWT
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &self.key)
            .map_err(TokenError::Signing)
    }
}

/// Verifies a compact JWT and decodes its claims
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        jsonwebtoken::decode::<C>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }
}

/// Current time as seconds since the Unix epoch
pub fn now_unix() -> u64 {
    jsonwebtoken::get_current_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const PRIVATE_PEM: &str = include_str!("../testdata/private_key.pem");
    const PUBLIC_PEM: &str = include_str!("../testdata/public_key.pem");
    const OTHER_PRIVATE_PEM: &str = include_str!("../testdata/other_private_key.pem");

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        iss: String,
        iat: u64,
        exp: u64,
    }

    fn keys() -> TokenKeys {
        TokenKeys::from_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap()
    }

    fn claims(iss: &str, exp: u64) -> TestClaims {
        TestClaims {
            sub: "42".to_string(),
            iss: iss.to_string(),
            iat: now_unix(),
            exp,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let original = claims("postbug-api", now_unix() + 3600);

        let token = keys.issuer().issue(&original).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = keys.verifier("postbug-api").verify(&token).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let token = keys
            .issuer()
            .issue(&claims("postbug-api", now_unix() - 10))
            .unwrap();

        let result = keys.verifier("postbug-api").verify::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let keys = keys();
        let token = keys
            .issuer()
            .issue(&claims("someone-else", now_unix() + 3600))
            .unwrap();

        let result = keys.verifier("postbug-api").verify::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let foreign =
            TokenKeys::from_pem(OTHER_PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap();
        let token = foreign
            .issuer()
            .issue(&claims("postbug-api", now_unix() + 3600))
            .unwrap();

        let result = keys().verifier("postbug-api").verify::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = keys()
            .verifier("postbug-api")
            .verify::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_invalid_pem_is_rejected() {
        let result = TokenKeys::from_pem(b"not a key", PUBLIC_PEM.as_bytes());
        assert!(matches!(result, Err(TokenError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_key_file_is_rejected() {
        let result =
            TokenKeys::from_pem_files("/nonexistent/private.pem", "/nonexistent/public.pem");
        assert!(matches!(result, Err(TokenError::InvalidKey(_))));
    }
}
