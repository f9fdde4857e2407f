//! The crate's error type.
//!
//! Grounded in the teacher corpus's general preference for `thiserror`
//! derive-based error enums over hand-rolled `Display`/`Error` impls (see
//! `SPEC_FULL.md` §2); the specific variants are this crate's own, there
//! being no error type in the retrieved teacher files to adapt from.

use thiserror::Error;

/// Everything that can go wrong calling into this crate, short of a bug.
#[derive(Debug, Error)]
pub enum MlDsaError {
    /// A context string longer than 255 bytes was passed to
    /// `sign_with_context`/`verify_with_context` (spec.md §4.7: the context
    /// length field is a single byte).
    #[error("context string exceeds 255 bytes")]
    ContextTooLong,

    /// The caller-supplied RNG failed.
    #[error("random number generator failed")]
    Rng,

    /// A byte string handed to a decoder didn't have the length that
    /// parameter set requires.
    #[error("invalid encoding length: expected {expected}, got {got}")]
    InvalidEncodingLength { expected: usize, got: usize },

    /// A signature decoded to the right length but failed a structural
    /// check (a malformed hint, or a `z` whose norm is already out of
    /// range) — spec.md §9: treat this as an invalid signature, not a
    /// distinct failure mode callers need to handle separately.
    #[error("malformed signature")]
    MalformedSignature,
}

impl From<MlDsaError> for signature::Error {
    fn from(_: MlDsaError) -> Self {
        signature::Error::new()
    }
}
