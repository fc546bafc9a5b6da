//! Edwards25519 group, field, and scalar arithmetic, plus the EdDSA
//! signing/verification built on top of them.

pub(crate) mod consttime;
pub(crate) mod field;
pub(crate) mod group;
pub(crate) mod scalar;

pub(crate) mod core;
