//! Identity verification for authenticated endpoints.

use async_trait::async_trait;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// The identity a verified credential resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Trait resolving a Bearer credential to an authenticated identity.
///
/// Sessions themselves are an external concern; the boundary layer only
/// consumes the credential the session provider issued.
///
/// # Implementations
///
/// - [`SignedTokenIdentity`] - HMAC-signed self-contained tokens
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies a credential and returns the identity it encodes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any malformed, forged, or
    /// otherwise unverifiable credential.
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError>;
}

/// Identity provider for self-contained signed tokens.
///
/// Token format: `<payload>.<signature>` where `payload` is URL-safe
/// unpadded base64 of the identity JSON (`{id, name, email}`) and
/// `signature` is the lowercase hex HMAC-SHA256 of the payload segment,
/// keyed by the server signing secret. The signature is compared in
/// constant time via `Mac::verify_slice`.
pub struct SignedTokenIdentity {
    signing_secret: String,
}

impl SignedTokenIdentity {
    /// Creates a provider keyed with the given signing secret.
    ///
    /// The secret must match the one the session issuer signs with.
    pub fn new(signing_secret: String) -> Self {
        Self { signing_secret }
    }

    /// Issues a token for an identity. Used by session tooling and tests;
    /// the serving path only verifies.
    pub fn issue(&self, user: &AuthUser) -> String {
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(user).expect("identity serializes"));
        let signature = hex::encode(self.sign(&payload));
        format!("{payload}.{signature}")
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn unauthorized() -> AppError {
        AppError::unauthorized(
            "User not authenticated",
            json!({ "reason": "Invalid credential" }),
        )
    }
}

#[async_trait]
impl IdentityProvider for SignedTokenIdentity {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        let (payload, signature_hex) = token.split_once('.').ok_or_else(Self::unauthorized)?;

        let signature = hex::decode(signature_hex).map_err(|_| Self::unauthorized())?;

        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| Self::unauthorized())?;

        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| Self::unauthorized())?;

        serde_json::from_slice(&decoded).map_err(|_| Self::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SignedTokenIdentity {
        SignedTokenIdentity::new("test-signing-secret".to_string())
    }

    fn test_user() -> AuthUser {
        AuthUser {
            id: "user-42".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_issued_token() {
        let provider = provider();
        let token = provider.issue(&test_user());

        let user = provider.authenticate(&token).await.unwrap();

        assert_eq!(user, test_user());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_secret() {
        let token = SignedTokenIdentity::new("other-secret".to_string()).issue(&test_user());

        let result = provider().authenticate(&token).await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_tampered_payload() {
        let provider = provider();
        let token = provider.issue(&test_user());

        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(r#"{"id":"admin","name":"Eve","email":"eve@example.com"}"#);
        let forged = format!("{forged_payload}.{signature}");

        let result = provider.authenticate(&forged).await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage() {
        let provider = provider();

        for token in ["", "no-dot", "a.b", "a.zz"] {
            let result = provider.authenticate(token).await;
            let err = result.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized { .. }));
            assert_eq!(err.to_string(), "User not authenticated");
        }
    }
}
