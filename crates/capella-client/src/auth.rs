//! Credentials and per-request signing

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

pub const ACCESS_KEY_ENV: &str = "CBC_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "CBC_SECRET_KEY";

/// Header carrying the signing timestamp
pub const TIMESTAMP_HEADER: &str = "Couchbase-Timestamp";

/// API secret key
///
/// `Debug` and `Display` never print the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Access/secret key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: SecretKey,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretKey::new(secret_key),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Build the context used to sign one API call
    pub fn auth_context(&self) -> AuthContext<'_> {
        AuthContext { credentials: self }
    }
}

/// Headers attached to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub timestamp: String,
}

/// Request context carrying the credentials for one call
#[derive(Debug, Clone, Copy)]
pub struct AuthContext<'a> {
    credentials: &'a Credentials,
}

impl AuthContext<'_> {
    pub fn access_key(&self) -> &str {
        self.credentials.access_key()
    }

    /// Sign `method` + `path` with the current time
    pub fn sign(&self, method: &str, path: &str) -> SignedHeaders {
        self.sign_at(method, path, chrono::Utc::now().timestamp_millis())
    }

    /// Sign `method` + `path` with a fixed timestamp (unix millis)
    pub fn sign_at(&self, method: &str, path: &str, timestamp_ms: i64) -> SignedHeaders {
        let timestamp = timestamp_ms.to_string();
        let payload = format!("{}\n{}\n{}", method.to_uppercase(), path, timestamp);

        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.expose().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        SignedHeaders {
            authorization: format!("Bearer {}:{}", self.credentials.access_key, signature),
            timestamp,
        }
    }
}
