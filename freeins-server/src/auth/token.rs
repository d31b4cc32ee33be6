//! HS256 session tokens

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuthConfig, AuthError};

/// Claims carried by an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.token_ttl)
    }

    /// Issue a token for `user_id` valid from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or(AuthError::TokenLifetime(self.ttl))?;
        let claims = Claims { user_id, iat, exp };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DEFAULT_TOKEN_TTL;

    fn issuer(secret: &[u8]) -> TokenIssuer {
        TokenIssuer::new(secret, DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn issued_token_carries_user_id_and_24h_expiry() {
        let tokens = issuer(b"secret");
        let user_id = Uuid::new_v4();
        let claims = tokens.verify(&tokens.issue(user_id).unwrap()).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn ttl_comes_from_config() {
        let config = AuthConfig {
            jwt_secret: "secret".into(),
            token_ttl: Duration::from_secs(60),
            bcrypt_cost: 4,
        };
        let tokens = TokenIssuer::from_config(&config);
        let claims = tokens.verify(&tokens.issue(Uuid::nil()).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn claims_use_camel_case() {
        let claims = Claims {
            user_id: Uuid::nil(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = issuer(b"secret");
        let two_days_ago = Utc::now() - chrono::Duration::days(2);
        let token = tokens.issue_at(Uuid::new_v4(), two_days_ago).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = issuer(b"other").issue(Uuid::new_v4()).unwrap();
        assert!(issuer(b"secret").verify(&token).is_err());
    }

    #[test]
    fn out_of_range_ttl_is_an_error() {
        for secs in [i64::MAX as u64, u64::MAX] {
            let tokens = TokenIssuer::new(b"secret", Duration::from_secs(secs));
            assert!(
                matches!(tokens.issue(Uuid::nil()), Err(AuthError::TokenLifetime(_))),
                "{secs}"
            );
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer(b"secret").verify("not.a.jwt").is_err());
        assert!(issuer(b"secret").verify("").is_err());
    }
}
