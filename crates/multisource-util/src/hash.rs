use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// The first `len` hex digits of the SHA-256 of `data`.
///
/// `len` is capped at the full 64-digit digest.
pub fn sha256_prefix(data: &[u8], len: usize) -> String {
    let mut hex = sha256_hex(data);
    hex.truncate(len);
    hex
}
