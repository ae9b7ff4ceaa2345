use sha2::{Digest, Sha256};

/// Maps a client address to an opaque liker identifier (hex SHA-256).
pub fn anonymize(address: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.as_bytes());
    format!("{:x}", hasher.finalize())
}
