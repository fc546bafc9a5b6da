//! Black-box digest producers used by the curve and signature layers.
//!
//! None of these take a dependency on [`crate::bigint`] or [`crate::curve`]
//! — every function here is a plain byte-slice-in, fixed-size-array-out
//! digest, kept that way so the curve layer can treat hashing as a pluggable
//! collaborator rather than something it has to know the internals of.

pub mod sha256;
pub mod sha1;
pub mod sha512;
pub mod sm3;
pub mod keccak;
pub mod sha3_256;
pub mod keccak256;
pub mod md5;
pub mod md4;
pub mod ripemd160;
pub mod blake2b;
pub mod blake2s;
pub mod blake256;
pub mod blake512;
pub mod hmac;

pub use sha256::sha256;
pub use sha1::sha1;
pub use sha512::sha512;
pub use sm3::sm3;
pub use sha3_256::sha3_256;
pub use keccak256::keccak256;
pub use md5::md5;
pub use md4::md4;
pub use ripemd160::ripemd160;
pub use blake2b::blake2b;
pub use blake2s::blake2s;
pub use blake256::blake256;
pub use blake512::blake512;
pub use hmac::hmac;
