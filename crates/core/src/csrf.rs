//! CSRF token minting and verification.
//!
//! Tokens use the double-submit pattern: the same signed token is stored in a
//! cookie and echoed back by the page (header or form field). A token is
//! `<nonce-hex>.<hmac-sha256-hex>` where the MAC covers the nonce bytes and is
//! keyed with the 32-byte `CSRF_KEY`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::error::CoreError;

/// Required length of the decoded `CSRF_KEY`.
pub const KEY_LEN: usize = 32;

/// Number of random bytes in a token nonce.
pub const NONCE_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

/// Decode a base64 `CSRF_KEY` into exactly [`KEY_LEN`] bytes.
pub fn decode_key(encoded: &str) -> Result<[u8; KEY_LEN], CoreError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CoreError::Validation(format!("CSRF_KEY is not valid base64: {e}")))?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        CoreError::Validation(format!(
            "CSRF_KEY must decode to {KEY_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

/// Generate a throwaway key for local runs without `CSRF_KEY`.
pub fn generate_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    rand::rng().fill_bytes(&mut key);
    key
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Mints and verifies tokens with a fixed key.
#[derive(Clone)]
pub struct CsrfSigner {
    key: [u8; KEY_LEN],
}

impl std::fmt::Debug for CsrfSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfSigner").finish_non_exhaustive()
    }
}

impl CsrfSigner {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length")
    }

    /// Create a fresh signed token.
    pub fn mint(&self) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        let mut mac = self.mac();
        mac.update(&nonce);
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", hex::encode(nonce), hex::encode(signature))
    }

    /// Whether `token` was minted with this key.
    pub fn verify(&self, token: &str) -> bool {
        let Some((nonce_hex, sig_hex)) = token.split_once('.') else {
            return false;
        };
        let (Some(nonce), Some(signature)) = (hex::decode(nonce_hex), hex::decode(sig_hex)) else {
            return false;
        };
        if nonce.len() != NONCE_LEN {
            return false;
        }

        let mut mac = self.mac();
        mac.update(&nonce);
        mac.verify_slice(&signature).is_ok()
    }

    /// Double-submit check: the cookie token is authentic and the submitted
    /// token is the same value.
    pub fn matches(&self, cookie_token: &str, submitted: &str) -> bool {
        self.verify(cookie_token) && self.tokens_equal(cookie_token, submitted)
    }

    /// Constant-time equality: MAC both tokens and compare the tags with
    /// `verify_slice`.
    fn tokens_equal(&self, a: &str, b: &str) -> bool {
        let mut expected = self.mac();
        expected.update(a.as_bytes());
        let tag = expected.finalize().into_bytes();

        let mut actual = self.mac();
        actual.update(b.as_bytes());
        actual.verify_slice(&tag).is_ok()
    }
}

// ---------------------------------------------------------------------------
// hex helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}
