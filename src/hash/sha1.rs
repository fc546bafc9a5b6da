//! SHA-1, as specified by FIPS 180-4. Kept for legacy interop; callers
//! preferring collision resistance should reach for SHA-256 instead.

const H_INIT: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

fn compress(block: &[u8; 64], state: &mut [u32; 5]) {
    let mut w = [0u32; 80];
    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(4)).take(16) {
        *slot = u32::from_be_bytes(chunk.try_into().unwrap());
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;
    for (i, &wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => ((b & c) | ((!b) & d), 0x5A827999u32),
            20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
            40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
            _ => (b ^ c ^ d, 0xCA62C1D6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

/// Computes the SHA-1 digest of `input`.
pub fn sha1(input: &[u8]) -> [u8; 20] {
    let mut state = H_INIT;
    let mut i = 0;
    let len = input.len();

    while i + 64 <= len {
        let block: &[u8; 64] = input[i..i + 64].try_into().unwrap();
        compress(block, &mut state);
        i += 64;
    }

    let mut block = [0u8; 64];
    let rem = len - i;
    block[..rem].copy_from_slice(&input[i..]);
    block[rem] = 0x80;
    if rem > 55 {
        compress(&block, &mut state);
        block = [0; 64];
    }
    let bit_len = (len as u64) << 3;
    block[56..64].copy_from_slice(&bit_len.to_be_bytes());
    compress(&block, &mut state);

    let mut out = [0u8; 20];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abc_known_answer() {
        let digest = sha1(b"abc");
        let expected: [u8; 20] = [
            0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50,
            0xc2, 0x6c, 0x9c, 0xd0, 0xd8, 0x9d,
        ];
        assert_eq!(digest, expected);
    }
}
