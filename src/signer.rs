use crate::{
    canonical::CanonicalString,
    constants::AUTH_TOKEN_ENV_VAR,
    error::ConfigError,
};
use failure::Error;
use ring::hmac;
use std::{env, fmt};

/// Shared secret used to sign requests, the account's auth token.
///
/// Held as a precomputed HMAC-SHA1 key. It can not be empty and never shows up in
/// `Debug` output.
#[derive(Clone)]
pub struct SigningKey {
    key: hmac::Key,
}

impl SigningKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::EmptyKey);
        }

        Ok(SigningKey {
            key: hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret),
        })
    }

    /// Read the key from `TWILIO_AUTH_TOKEN`
    pub fn from_env() -> Result<Self, Error> {
        SigningKey::from_env_var(AUTH_TOKEN_ENV_VAR)
    }

    pub fn from_env_var(name: &str) -> Result<Self, Error> {
        let secret = env::var(name).map_err(|e| match e {
            env::VarError::NotPresent => ConfigError::MissingEnv {
                name: name.to_owned(),
            },
            env::VarError::NotUnicode(_) => ConfigError::NotUnicodeEnv {
                name: name.to_owned(),
            },
        })?;
        Ok(SigningKey::new(secret)?)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Base64 encoded HMAC-SHA1 digest, as carried in `X-Twilio-Signature`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSignature(String);

impl EncodedSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn sign(canonical: &CanonicalString, key: &SigningKey) -> EncodedSignature {
    let tag = hmac::sign(&key.key, canonical.as_bytes());
    EncodedSignature(base64::encode(tag.as_ref()))
}
