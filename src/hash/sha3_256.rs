//! SHA3-256, as specified by FIPS 202. A Keccak-f[1600] sponge with the
//! `0x06` domain-separation padding byte.

use super::keccak::sponge_256;

pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    sponge_256(input, 0x06)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string() {
        let digest = sha3_256(b"");
        let expected: [u8; 32] = [
            0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61,
            0xd6, 0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b,
            0x80, 0xf8, 0x43, 0x4a,
        ];
        assert_eq!(digest, expected);
    }
}
