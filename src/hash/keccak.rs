//! Keccak-f[1600] permutation, shared by [`super::sha3_256::sha3_256`] and
//! [`super::keccak256::keccak256`] — the two differ only in the padding
//! byte (`0x06` for SHA3, `0x01` for original Keccak) and are otherwise the
//! same sponge construction at rate 136 bytes (capacity 512 bits).

const ROUND_CONSTANTS: [u64; 24] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808A, 0x8000000080008000,
    0x000000000000808B, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008A, 0x0000000000000088, 0x0000000080008009, 0x000000008000000A,
    0x000000008000808B, 0x800000000000008B, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800A, 0x800000008000000A,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

const RHO: [u32; 25] = [
    0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

const PI: [usize; 25] = [
    0, 6, 12, 18, 24, 3, 9, 10, 16, 22, 1, 7, 13, 19, 20, 4, 5, 11, 17, 23, 2, 8, 14, 15, 21,
];

fn keccak_f1600(state: &mut [u64; 25]) {
    for round in 0..24 {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        let mut d = [0u64; 5];
        for x in 0..5 {
            d[x] = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        }
        for x in 0..5 {
            for y in 0..5 {
                state[x + 5 * y] ^= d[x];
            }
        }

        // Rho + Pi
        let mut b = [0u64; 25];
        for i in 0..25 {
            b[PI[i]] = state[i].rotate_left(RHO[i]);
        }

        // Chi
        for y in 0..5 {
            for x in 0..5 {
                state[x + 5 * y] =
                    b[x + 5 * y] ^ ((!b[(x + 1) % 5 + 5 * y]) & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // Iota
        state[0] ^= ROUND_CONSTANTS[round];
    }
}

/// Sponge construction over Keccak-f[1600] at a fixed 136-byte rate
/// (appropriate for both SHA3-256 and Keccak-256, both 256-bit-capacity
/// variants), with the padding final byte left to the caller.
pub(crate) fn sponge_256(input: &[u8], pad_byte: u8) -> [u8; 32] {
    const RATE: usize = 136;
    let mut state = [0u64; 25];

    let mut chunks = input.chunks_exact(RATE);
    for block in chunks.by_ref() {
        for (i, word) in block.chunks_exact(8).enumerate() {
            state[i] ^= u64::from_le_bytes(word.try_into().unwrap());
        }
        keccak_f1600(&mut state);
    }

    let rem = chunks.remainder();
    let mut last = [0u8; RATE];
    last[..rem.len()].copy_from_slice(rem);
    last[rem.len()] ^= pad_byte;
    last[RATE - 1] ^= 0x80;
    for (i, word) in last.chunks_exact(8).enumerate() {
        state[i] ^= u64::from_le_bytes(word.try_into().unwrap());
    }
    keccak_f1600(&mut state);

    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
