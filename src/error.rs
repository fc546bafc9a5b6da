//! Crate-wide error and result-code vocabulary.
//!
//! This module defines the single error type shared by every protocol layer
//! (Montgomery arithmetic, curve arithmetic, ECDSA, SM2) as well as the
//! 16-bit result-code vocabulary exposed at the [`crate::dispatch`] boundary.
//!
//! The two types are kept distinct on purpose: [`Error`] is the ergonomic,
//! idiomatic-Rust `Result` error used internally and by direct callers of
//! `curve`/`ecdsa`/`sm2`, while [`ResultCode`] is the fixed 16-bit wire value
//! documented for consumers that route through the curve-tag dispatch
//! surface. [`ResultCode::from`] maps every [`Error`] onto its documented
//! code.

use std::fmt;

/// Failure modes shared by every protocol layer in this crate.
///
/// Ordered, where more than one applies, by the precedence a caller should
/// use to interpret them: a wrong curve tag is checked before a malformed
/// input, which is checked before key legality, and so on down to a soft
/// verification failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested curve tag does not support this operation.
    WrongCurveType,
    /// Input length or shape does not match the documented fixed layout.
    MalformedInput,
    /// A scalar was not in `[1, n-1]`.
    PrivateKeyIllegal,
    /// A point was off-curve, outside the prime-order subgroup, or had a
    /// coordinate `>= p`.
    PublicKeyIllegal,
    /// SM2 operation was invoked without a non-empty identity string.
    MissingId,
    /// A required modular inverse did not exist, or an internal allocation
    /// failed. Fatal for the current call; retrying with fresh randomness
    /// may succeed where the failure was scalar-dependent.
    ArithmeticFailure,
    /// Signature check or ciphertext integrity check did not hold. This
    /// variant intentionally carries no further detail: SM2 decryption must
    /// not let a caller distinguish a bad key from a bad MAC from a bad
    /// format.
    VerificationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::WrongCurveType => "curve tag not supported for this operation",
            Error::MalformedInput => "malformed input",
            Error::PrivateKeyIllegal => "private key out of range",
            Error::PublicKeyIllegal => "public key not on curve or not in prime-order subgroup",
            Error::MissingId => "SM2 operation requires a non-empty identity",
            Error::ArithmeticFailure => "modular inverse does not exist",
            Error::VerificationFailed => "verification failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// 16-bit result codes, matching the documented wire contract of the
/// curve-tag dispatch surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ResultCode {
    Success = 0x0001,
    Failure = 0x0000,
    EccPrikeyIllegal = 0xE000,
    EccPubkeyIllegal = 0xE001,
    EccWrongType = 0xE002,
    EccMissId = 0xE003,
}

impl From<Error> for ResultCode {
    fn from(err: Error) -> Self {
        match err {
            Error::WrongCurveType => ResultCode::EccWrongType,
            Error::MalformedInput => ResultCode::EccPubkeyIllegal,
            Error::PrivateKeyIllegal => ResultCode::EccPrikeyIllegal,
            Error::PublicKeyIllegal => ResultCode::EccPubkeyIllegal,
            Error::MissingId => ResultCode::EccMissId,
            Error::ArithmeticFailure => ResultCode::Failure,
            Error::VerificationFailed => ResultCode::Failure,
        }
    }
}

impl From<u16> for ResultCode {
    fn from(value: u16) -> Self {
        match value {
            0x0001 => ResultCode::Success,
            0xE000 => ResultCode::EccPrikeyIllegal,
            0xE001 => ResultCode::EccPubkeyIllegal,
            0xE002 => ResultCode::EccWrongType,
            0xE003 => ResultCode::EccMissId,
            _ => ResultCode::Failure,
        }
    }
}

impl From<ResultCode> for u16 {
    fn from(code: ResultCode) -> Self {
        code as u16
    }
}

/// Convenience alias used throughout the crate's protocol layers.
pub type Result<T> = std::result::Result<T, Error>;
