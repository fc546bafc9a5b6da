//! Generic HMAC (RFC 2104), parameterized over any digest function in
//! [`super`]. The caller supplies the digest as a closure and its block
//! size in bytes (64 for every digest here except SHA-512 and the BLAKE2b
//! family, which use 128).

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Computes `HMAC(key, message)` using `digest` as the underlying hash
/// function and `block_size` as its compression block size.
pub fn hmac(block_size: usize, digest: impl Fn(&[u8]) -> Vec<u8>, key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut key_block = vec![0u8; block_size];
    if key.len() > block_size {
        let hashed = digest(key);
        key_block[..hashed.len()].copy_from_slice(&hashed);
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let inner_pad: Vec<u8> = key_block.iter().map(|b| b ^ IPAD).collect();
    let outer_pad: Vec<u8> = key_block.iter().map(|b| b ^ OPAD).collect();

    let mut inner_input = inner_pad;
    inner_input.extend_from_slice(message);
    let inner_digest = digest(&inner_input);

    let mut outer_input = outer_pad;
    outer_input.extend_from_slice(&inner_digest);
    digest(&outer_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256::sha256;

    fn sha256_vec(m: &[u8]) -> Vec<u8> {
        sha256(m).to_vec()
    }

    #[test]
    fn deterministic_and_key_sensitive() {
        let msg = b"message body";
        let mac1 = hmac(64, sha256_vec, b"key-a", msg);
        let mac2 = hmac(64, sha256_vec, b"key-a", msg);
        let mac3 = hmac(64, sha256_vec, b"key-b", msg);
        assert_eq!(mac1, mac2);
        assert_ne!(mac1, mac3);
        assert_eq!(mac1.len(), 32);
    }

    #[test]
    fn long_key_is_hashed_down() {
        let long_key = vec![0x5cu8; 200];
        let mac = hmac(64, sha256_vec, &long_key, b"msg");
        assert_eq!(mac.len(), 32);
    }
}
