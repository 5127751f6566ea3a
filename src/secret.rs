//! One-time resolution of configuration secrets that may be KMS-encrypted.
//!
//! A configured value is either used verbatim or, when it looks like a
//! base64 ciphertext, decrypted once. Every later caller sees the same
//! plaintext without another round trip to the key service.

use std::sync::LazyLock;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_kms::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_kms::primitives::Blob;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::error::{NotifyError, Result};

/// Blobs at or below this length are never treated as ciphertext.
const MIN_ENCRYPTED_LEN: usize = 50;

/// A decrypted webhook URL is 78-80 characters; ciphertext is far longer.
const MIN_ENCRYPTED_URL_LEN: usize = 100;

static LITERAL_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\w").unwrap());

/// Extra check a caller can supply before a blob is sent for decryption.
pub type Validator = fn(&str) -> bool;

/// Something that turns ciphertext into plaintext.
#[async_trait]
pub trait Decryptor: Send + Sync {
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<String>;
}

/// Decrypts with AWS KMS using the ambient AWS configuration.
#[derive(Default)]
pub struct KmsDecryptor;

#[async_trait]
impl Decryptor for KmsDecryptor {
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let client = aws_sdk_kms::Client::new(&config);

        let response = match client
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let detail = match (e.code(), e.message()) {
                    (Some(code), message) => format!("{code}: {}", message.unwrap_or_default()),
                    (None, _) => DisplayErrorContext(&e).to_string(),
                };
                return Err(NotifyError::Decrypt(detail));
            }
        };

        let plaintext = response
            .plaintext()
            .ok_or_else(|| NotifyError::Decrypt("KMS returned no plaintext".to_string()))?;

        Ok(String::from_utf8_lossy(plaintext.as_ref()).into_owned())
    }
}

/// Whether `blob` looks like ciphertext worth a decryption attempt.
pub fn should_decrypt(blob: &str, is_valid: Option<Validator>) -> bool {
    blob.len() > MIN_ENCRYPTED_LEN
        && !blob.chars().any(char::is_whitespace)
        && is_valid.is_none_or(|check| check(blob))
}

/// Rejects values that already read as a literal URL or are too short to be
/// an encrypted one.
pub fn webhook_url_predicate(blob: &str) -> bool {
    blob.len() > MIN_ENCRYPTED_URL_LEN && !LITERAL_URL.is_match(blob)
}

/// Lazily resolved, memoized secret.
///
/// Concurrent first callers share a single in-flight resolution.
pub struct SecretResolver<D> {
    blob: String,
    is_valid: Option<Validator>,
    decryptor: D,
    resolved: OnceCell<String>,
}

impl<D: Decryptor> SecretResolver<D> {
    pub fn new(blob: impl Into<String>, decryptor: D) -> Self {
        Self {
            blob: blob.into(),
            is_valid: None,
            decryptor,
            resolved: OnceCell::new(),
        }
    }

    pub fn with_validator(mut self, is_valid: Validator) -> Self {
        self.is_valid = Some(is_valid);
        self
    }

    /// Plaintext value, resolving it on first use.
    pub async fn resolve(&self) -> &str {
        self.resolved
            .get_or_init(|| self.decrypt_or_raw())
            .await
            .as_str()
    }

    async fn decrypt_or_raw(&self) -> String {
        if !should_decrypt(&self.blob, self.is_valid) {
            debug!("Secret does not look encrypted, using as-is");
            return self.blob.clone();
        }

        match self.try_decrypt().await {
            Ok(plaintext) => {
                debug!("Secret decrypted");
                plaintext
            }
            Err(e) => {
                // Fail open: a bad ciphertext surfaces later as a delivery error.
                error!(error = %e, "Error decrypting secret (using as-is)");
                self.blob.clone()
            }
        }
    }

    async fn try_decrypt(&self) -> Result<String> {
        let ciphertext = STANDARD.decode(&self.blob)?;
        self.decryptor.decrypt(&ciphertext).await
    }
}
