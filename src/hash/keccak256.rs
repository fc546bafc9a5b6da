//! Keccak-256, the original (pre-standardization) Keccak padding —
//! notably what Ethereum calls `keccak256`, distinct from the `0x06`-padded
//! SHA3-256 despite sharing the same permutation.

use super::keccak::sponge_256;

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    sponge_256(input, 0x01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string() {
        let digest = keccak256(b"");
        let expected: [u8; 32] = [
            0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7,
            0x03, 0xc0, 0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04,
            0x5d, 0x85, 0xa4, 0x70,
        ];
        assert_eq!(digest, expected);
    }
}
