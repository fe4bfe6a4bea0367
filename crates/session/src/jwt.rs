use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::Config as SessionConfig;
use crate::cookies;
use crate::identity::Identity;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    pub user: Identity,
}

/// Issues and verifies the signed session token carried in the
/// `auth-token` cookie.
#[derive(Clone)]
pub struct SessionCodec {
    cookie_name: Arc<str>,
    max_age: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionCodec {
    pub fn new(cfg: &SessionConfig) -> anyhow::Result<Self> {
        Self::with_secret(cfg.secret(), cfg.cookie_name(), cfg.max_age())
    }

    pub fn with_secret(secret: &str, cookie_name: &str, max_age: i64) -> anyhow::Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("session secret must not be empty");
        }
        Ok(Self {
            cookie_name: Arc::from(cookie_name),
            max_age,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        })
    }

    pub fn cookie_name(&self) -> &str {
        self.cookie_name.as_ref()
    }

    pub fn issue(&self, identity: &Identity) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            exp: now + self.max_age,
            iat: now,
            user: identity.clone(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Identity> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.user)
    }

    /// Reconstructs the identity from a `Cookie` request header. Missing
    /// cookie, bad signature and expired token all yield `None`, the
    /// request proceeds unauthenticated.
    pub fn decode(&self, cookie_header: &str) -> Option<Identity> {
        let token = cookies::cookie_value(cookie_header, self.cookie_name())?;
        self.verify(token)
            .map_err(|err| {
                log::debug!("session token rejected: {err}");
                err
            })
            .ok()
    }

    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
            self.cookie_name(),
            token,
            self.max_age
        )
    }

    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict",
            self.cookie_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SessionCodec;
    use crate::identity::Identity;
    use uuid::Uuid;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: Arc::from("alice@example.com"),
            roles: vec![Arc::from("USER"), Arc::from("EDITOR")],
        }
    }

    fn codec(secret: &str) -> SessionCodec {
        SessionCodec::with_secret(secret, "auth-token", 604800).unwrap()
    }

    #[test]
    fn issue_then_decode_round_trip_test() -> anyhow::Result<()> {
        let codec = codec("round-trip-secret");
        let identity = identity();
        let token = codec.issue(&identity)?;
        let header = format!("other=1; auth-token={token}");
        assert_eq!(codec.decode(&header), Some(identity));
        Ok(())
    }

    #[test]
    fn foreign_secret_yields_absent_test() -> anyhow::Result<()> {
        let token = codec("first-secret").issue(&identity())?;
        let header = format!("auth-token={token}");
        assert_eq!(codec("second-secret").decode(&header), None);
        Ok(())
    }

    #[test]
    fn expired_token_yields_absent_test() -> anyhow::Result<()> {
        let codec = SessionCodec::with_secret("expiry-secret", "auth-token", -120)?;
        let token = codec.issue(&identity())?;
        assert_eq!(codec.decode(&format!("auth-token={token}")), None);
        Ok(())
    }

    #[test]
    fn missing_cookie_yields_absent_test() {
        let codec = codec("missing-secret");
        assert_eq!(codec.decode(""), None);
        assert_eq!(codec.decode("unrelated=value"), None);
        assert_eq!(codec.decode("auth-token=not-a-token"), None);
    }

    #[test]
    fn empty_secret_is_rejected_test() {
        assert!(SessionCodec::with_secret("", "auth-token", 604800).is_err());
    }

    #[test]
    fn cookie_directives_test() {
        let codec = codec("directive-secret");
        let set = codec.session_cookie("tok");
        assert!(set.starts_with("auth-token=tok;"));
        assert!(set.contains("Max-Age=604800"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("SameSite=Strict"));
        assert!(set.contains("Path=/"));
        assert_eq!(
            codec.clear_cookie(),
            "auth-token=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict"
        );
    }
}
