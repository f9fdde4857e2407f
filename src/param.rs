//! The three ML-DSA parameter sets (spec.md §3): `MlDsa44`, `MlDsa65`,
//! `MlDsa87` are zero-sized marker types implementing `MlDsaParams`, which
//! exposes every parameter needed downstream as a plain associated
//! constant.
//!
//! Ported from the teacher's `param.rs` `ParameterSet`/`SigningKeyParams`/
//! `VerificationKeyParams`/`SignatureParams` traits, which derive every
//! encoded size at compile time via `typenum` arithmetic over `hybrid_array`
//! lengths (`EncodedPolynomialSize`, `VectorEncodingSize`, ...). That
//! approach needs the whole trait-bound chain to type-check in one shot;
//! here the same sizes are plain `usize` values computed in ordinary
//! functions, traded deliberately for resilience to not being able to run
//! the compiler (see `DESIGN.md`). The three concrete profiles themselves
//! (`k`, `l`, `eta`, `gamma1`, `gamma2`, `tau`, `omega`, `lambda`) are the
//! same values the teacher's commented-out `MlDsa44`/`65`/`87` definitions
//! use, matching `other_examples/c8a96a59_..._param.rs.rs`.

use crate::encode::{bit_pack_poly_size, simple_bit_pack_poly_size};
use crate::field::Q;

/// Compile-time-fixed parameters of one of the three ML-DSA security levels.
/// `K`/`L`/... are associated constants rather than `typenum` types: every
/// size derived from them is computed once, in a plain function, not
/// re-derived by the type system at every call site.
pub trait MlDsaParams: Copy + Clone + Default + Send + Sync + 'static {
    /// Rows of the public matrix `A` / length of `t`, `w`, `z` mod the
    /// `L`-length `s1`.
    const K: usize;
    /// Columns of `A` / length of `s1`.
    const L: usize;
    /// Private key coefficient bound: `s1`, `s2` coefficients lie in
    /// `[-eta, eta]`.
    const ETA: i64;
    /// Mask coefficient bound: `y` coefficients lie in `[-(gamma1-1), gamma1]`.
    const GAMMA1: i64;
    /// Low-order rounding range.
    const GAMMA2: i64;
    /// Number of +-1 entries in the challenge polynomial `c`.
    const TAU: usize;
    /// Maximum number of 1s allowed in the encoded hint.
    const OMEGA: usize;
    /// Collision-strength parameter, in bits (used to size `c~`).
    const LAMBDA: usize;

    /// `beta = tau * eta`, the infinity-norm bound `c * s1`/`c * s2` must
    /// respect for the signature to both verify and carry no information
    /// about `s1`/`s2` beyond what rejection sampling already allows.
    const BETA: i64 = (Self::TAU as i64) * Self::ETA;

    /// Bytes of the per-signature commitment hash `c~` (Algorithm 7/8):
    /// `2 * lambda` bits.
    const C_TILDE_BYTES: usize = Self::LAMBDA / 4;

    /// Number of bits of `gamma1` itself, i.e. `bitlen(gamma1)`; `z` is
    /// packed with `BitPack(_, gamma1 - 1, gamma1)`.
    fn gamma1_bits() -> u32 {
        32 - (Self::GAMMA1 as u32).leading_zeros()
    }

    /// Encoded-byte size of one `SimpleBitPack(_, 2*eta)` polynomial (used
    /// for `s1`/`s2`).
    fn eta_poly_bytes() -> usize {
        bit_pack_poly_size(Self::ETA, Self::ETA)
    }

    /// Encoded-byte size of one `BitPack(_, gamma1-1, gamma1)` polynomial
    /// (used for `z`).
    fn gamma1_poly_bytes() -> usize {
        bit_pack_poly_size(Self::GAMMA1 - 1, Self::GAMMA1)
    }

    /// Encoded-byte size of one `SimpleBitPack(_, 2^(d-1) - 1)` polynomial
    /// (used for `t0`, Power2Round's low part re-centered to non-negative).
    fn t0_poly_bytes() -> usize {
        bit_pack_poly_size((1 << 12) - 1, 1 << 12)
    }

    /// Encoded-byte size of one `SimpleBitPack(_, (q-1)/(2*gamma2) - 1)`
    /// polynomial (used for `t1`, the high part of Power2Round).
    fn t1_poly_bytes() -> usize {
        let bound = (Q - 1) / (1 << 13) - 1;
        simple_bit_pack_poly_size(bound as u32)
    }

    /// Byte length of an encoded verifying key (`pkEncode`, Algorithm 22):
    /// 32-byte seed `rho` plus `k` packed `t1` polynomials.
    fn verifying_key_bytes() -> usize {
        32 + Self::K * Self::t1_poly_bytes()
    }

    /// Byte length of an encoded signing key (`skEncode`, Algorithm 24):
    /// `rho || K || tr || s1 || s2 || t0`.
    fn signing_key_bytes() -> usize {
        32 + 32 + 64 + Self::L * Self::eta_poly_bytes() + Self::K * Self::eta_poly_bytes()
            + Self::K * Self::t0_poly_bytes()
    }

    /// Byte length of an encoded signature (`sigEncode`, Algorithm 26):
    /// `c~ || z || h`, where `h`'s encoded length is `omega + k` (spec.md
    /// §4.5 HintBitPack).
    fn signature_bytes() -> usize {
        Self::C_TILDE_BYTES + Self::L * Self::gamma1_poly_bytes() + Self::OMEGA + Self::K
    }
}

/// ML-DSA-44 (NIST security category 2).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MlDsa44;

impl MlDsaParams for MlDsa44 {
    const K: usize = 4;
    const L: usize = 4;
    const ETA: i64 = 2;
    const GAMMA1: i64 = 1 << 17;
    const GAMMA2: i64 = (Q - 1) / 88;
    const TAU: usize = 39;
    const OMEGA: usize = 80;
    const LAMBDA: usize = 128;
}

/// ML-DSA-65 (NIST security category 3).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MlDsa65;

impl MlDsaParams for MlDsa65 {
    const K: usize = 6;
    const L: usize = 5;
    const ETA: i64 = 4;
    const GAMMA1: i64 = 1 << 19;
    const GAMMA2: i64 = (Q - 1) / 32;
    const TAU: usize = 49;
    const OMEGA: usize = 55;
    const LAMBDA: usize = 192;
}

/// ML-DSA-87 (NIST security category 5).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MlDsa87;

impl MlDsaParams for MlDsa87 {
    const K: usize = 8;
    const L: usize = 7;
    const ETA: i64 = 2;
    const GAMMA1: i64 = 1 << 19;
    const GAMMA2: i64 = (Q - 1) / 32;
    const TAU: usize = 60;
    const OMEGA: usize = 75;
    const LAMBDA: usize = 256;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn beta_matches_tau_times_eta() {
        assert_eq!(MlDsa44::BETA, 39 * 2);
        assert_eq!(MlDsa65::BETA, 49 * 4);
        assert_eq!(MlDsa87::BETA, 60 * 2);
    }

    #[test]
    fn verifying_key_sizes_match_fips_204() {
        // FIPS 204 table 2 gives the encoded-object sizes directly.
        assert_eq!(MlDsa44::verifying_key_bytes(), 1312);
        assert_eq!(MlDsa65::verifying_key_bytes(), 1952);
        assert_eq!(MlDsa87::verifying_key_bytes(), 2592);
    }

    #[test]
    fn signing_key_sizes_match_fips_204() {
        assert_eq!(MlDsa44::signing_key_bytes(), 2560);
        assert_eq!(MlDsa65::signing_key_bytes(), 4032);
        assert_eq!(MlDsa87::signing_key_bytes(), 4896);
    }

    #[test]
    fn signature_sizes_match_fips_204() {
        assert_eq!(MlDsa44::signature_bytes(), 2420);
        assert_eq!(MlDsa65::signature_bytes(), 3309);
        assert_eq!(MlDsa87::signature_bytes(), 4627);
    }
}
