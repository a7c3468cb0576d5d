//! Phone number encryption.
//!
//! Phone numbers are used as a lookup key in the `requests` table, so the
//! same plaintext must always produce the same ciphertext. Encryption uses
//! AES-256-GCM with a synthetic nonce: the nonce is the truncated
//! HMAC-SHA256 of the plaintext under the shared secret, and is stored in
//! front of the ciphertext. Both functions build their cipher from scratch on
//! every call and keep no state between calls.

use std::fmt;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("missing phone encryption key")]
    MissingKey,
    #[error("invalid ciphertext length: {0}")]
    InvalidCiphertextLength(usize),
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("decrypted phone is not valid UTF-8")]
    Utf8,
    #[error("crypto failure")]
    Aead,
}

/// The process-wide phone encryption secret.
///
/// `Debug` never prints the secret.
#[derive(Clone)]
pub struct PhoneKey {
    secret: Vec<u8>,
}

impl PhoneKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, CryptoError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(CryptoError::MissingKey);
        }
        Ok(Self {
            secret: secret.to_vec(),
        })
    }

    /// Encrypt a phone number. See [`encrypt_phone`].
    pub fn encrypt(&self, phone: &str) -> Result<String, CryptoError> {
        encrypt_phone(phone, &self.secret)
    }

    /// Decrypt a phone number. See [`decrypt_phone`].
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        decrypt_phone(ciphertext, &self.secret)
    }
}

impl fmt::Debug for PhoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneKey").finish_non_exhaustive()
    }
}

/// Encrypt a phone number into lowercase hex.
///
/// Deterministic: the same phone and secret always give the same output.
pub fn encrypt_phone(phone: &str, secret: &[u8]) -> Result<String, CryptoError> {
    let nonce_bytes = synthetic_nonce(phone.as_bytes(), secret)?;
    let cipher = new_cipher(secret)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), phone.as_bytes())
        .map_err(|_| CryptoError::Aead)?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(hex::encode(out))
}

/// Decrypt a hex ciphertext produced by [`encrypt_phone`].
pub fn decrypt_phone(ciphertext: &str, secret: &[u8]) -> Result<String, CryptoError> {
    let bytes = hex::decode(ciphertext.trim())?;
    if bytes.len() <= NONCE_LEN {
        return Err(CryptoError::InvalidCiphertextLength(bytes.len()));
    }
    let (nonce_bytes, sealed) = bytes.split_at(NONCE_LEN);
    let cipher = new_cipher(secret)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed)
        .map_err(|_| CryptoError::Aead)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::Utf8)
}

fn new_cipher(secret: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::MissingKey);
    }
    let key = Sha256::digest(secret);
    <Aes256Gcm as KeyInit>::new_from_slice(&key).map_err(|_| CryptoError::Aead)
}

fn synthetic_nonce(plaintext: &[u8], secret: &[u8]) -> Result<[u8; NONCE_LEN], CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::MissingKey);
    }
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| CryptoError::MissingKey)?;
    mac.update(plaintext);
    let tag = mac.finalize().into_bytes();
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&tag[..NONCE_LEN]);
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-phone-secret";

    #[test]
    fn test_encrypt_is_deterministic() {
        let a = encrypt_phone("+15555550123", SECRET).unwrap();
        let b = encrypt_phone("+15555550123", SECRET).unwrap();
        assert_eq!(a, b);
        assert!(!a.contains("5555550123"));
    }

    #[test]
    fn test_different_phones_differ() {
        let a = encrypt_phone("+15555550123", SECRET).unwrap();
        let b = encrypt_phone("+15555550124", SECRET).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_decrypt_recovers_phone() {
        let encrypted = encrypt_phone("+19075551234", SECRET).unwrap();
        let phone = decrypt_phone(&encrypted, SECRET).unwrap();
        assert_eq!(phone, "+19075551234");
    }

    #[test]
    fn test_decrypt_with_wrong_secret_fails() {
        let encrypted = encrypt_phone("+19075551234", SECRET).unwrap();
        let result = decrypt_phone(&encrypted, b"another-secret");
        assert!(matches!(result, Err(CryptoError::Aead)));
    }

    #[test]
    fn test_decrypt_rejects_short_input() {
        let result = decrypt_phone("abcd", SECRET);
        assert!(matches!(result, Err(CryptoError::InvalidCiphertextLength(2))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(PhoneKey::new(""), Err(CryptoError::MissingKey)));
        assert!(matches!(
            encrypt_phone("+15555550123", b""),
            Err(CryptoError::MissingKey)
        ));
    }

    #[test]
    fn test_phone_key_debug_hides_secret() {
        let key = PhoneKey::new("super-secret").unwrap();
        assert!(!format!("{:?}", key).contains("super-secret"));
    }
}
