//! SHA256 + base36 record ID generation.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hash length of generated record ids (`oil-k3f9x2`).
pub const ID_HASH_LENGTH: usize = 6;

/// Converts a byte slice to a base36 string of the specified length.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let mut num = BigUint::from_bytes_be(data);
    let base = BigUint::from(36u32);
    let zero = BigUint::zero();

    // Build the string in reverse.
    let mut chars: Vec<u8> = Vec::with_capacity(length);
    while num > zero {
        let rem = &num % &base;
        num /= &base;
        // rem is guaranteed to be < 36, so fits in a u8 index.
        let idx = rem.to_u32_digits();
        let i = if idx.is_empty() { 0 } else { idx[0] as usize };
        chars.push(BASE36_ALPHABET[i]);
    }

    // Reverse to get most-significant digit first.
    chars.reverse();

    let mut s = String::from_utf8(chars).expect("base36 chars are valid UTF-8");

    // Pad with zeros if needed.
    if s.len() < length {
        let padding = "0".repeat(length - s.len());
        s = padding + &s;
    }

    // Truncate to exact length (keep least significant digits).
    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }

    s
}

/// Creates a hash-based ID for a record.
///
/// The prefix names the record kind (`oil`, `rcp`, `itm`); the hash is
/// derived from the record name, the creation timestamp, and a nonce used
/// to sidestep collisions.
pub fn generate_record_id(
    prefix: &str,
    name: &str,
    timestamp: DateTime<Utc>,
    nonce: i32,
) -> String {
    let content = format!(
        "{}|{}|{}",
        name,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );

    let hash = Sha256::digest(content.as_bytes());

    // 4 bytes = 32 bits ~ 6.18 base36 chars.
    let short_hash = encode_base36(&hash[..4], ID_HASH_LENGTH);
    format!("{}-{}", prefix, short_hash)
}
