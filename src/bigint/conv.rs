//! Conversions between [`super::U256`] and native integer / byte types.
//!
//! All conversions preserve big-endian semantics and avoid implicit
//! truncation: narrowing conversions are `TryFrom` and fail if any
//! higher-order byte is non-zero.

use super::U256;

impl From<U256> for [u8; 32] {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl From<[u8; 32]> for U256 {
    fn from(value: [u8; 32]) -> Self {
        U256(value)
    }
}

impl AsRef<[u8]> for U256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8; 32]> for U256 {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

macro_rules! impl_uint_conv {
    ($t:ty) => {
        impl From<$t> for U256 {
            fn from(value: $t) -> Self {
                let mut out = [0u8; 32];
                let bytes = value.to_be_bytes();
                out[32 - bytes.len()..].copy_from_slice(&bytes);
                U256(out)
            }
        }

        impl TryFrom<U256> for $t {
            type Error = ();

            fn try_from(value: U256) -> Result<Self, Self::Error> {
                const WIDTH: usize = std::mem::size_of::<$t>();
                let (high, low) = value.0.split_at(32 - WIDTH);
                if high.iter().any(|&b| b != 0) {
                    return Err(());
                }
                Ok(<$t>::from_be_bytes(low.try_into().unwrap()))
            }
        }
    };
}

impl_uint_conv!(u8);
impl_uint_conv!(u16);
impl_uint_conv!(u32);
impl_uint_conv!(u64);
impl_uint_conv!(u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_u64() {
        let v: U256 = 0xDEAD_BEEF_CAFE_u64.into();
        let back: u64 = v.try_into().unwrap();
        assert_eq!(back, 0xDEAD_BEEF_CAFE_u64);
    }

    #[test]
    fn oversized_rejected() {
        let v = U256::from_be_bytes([0xFF; 32]);
        let res: Result<u32, _> = v.try_into();
        assert!(res.is_err());
    }
}
