use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Alphanumeric characters without the easily confused `0 O 1 l I`.
pub const UNAMBIGUOUS_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

pub const STATE_LEN: usize = 16;
pub const CODE_VERIFIER_LEN: usize = 64;

pub fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| UNAMBIGUOUS_CHARSET[rng.random_range(0..UNAMBIGUOUS_CHARSET.len())] as char)
        .collect()
}

pub fn generate_state() -> String {
    random_string(STATE_LEN)
}

pub fn generate_code_verifier() -> String {
    random_string(CODE_VERIFIER_LEN)
}

/// base64url(SHA-256(verifier)) without padding, as required for `S256`.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts a playlist id from a bare id, an `open.spotify.com` link or a
/// `spotify:playlist:` URI.
pub fn playlist_id_from_input(input: &str) -> Option<String> {
    let input = input.trim().trim_end_matches('/');
    let tail = match input.strip_prefix("spotify:playlist:") {
        Some(id) => id,
        None => input.rsplit('/').next().unwrap_or(input),
    };
    let id = tail.split(['?', '#']).next().unwrap_or(tail).trim();

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(id.to_string())
}

pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
