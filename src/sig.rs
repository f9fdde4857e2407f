//! The `Signature<P>` type: `c~ || z || h` (spec.md §4.6, Algorithms 26/27
//! sigEncode/sigDecode).
//!
//! Grounded in the upstream `other_examples/47d6a69c_..._lib.rs.rs`
//! `Signature<P>` struct and its `encode`/`decode` methods, adapted from
//! `hybrid_array`-sized fields to the plain `Vec`/`PolyVec` types used
//! throughout this crate. Deliberately narrower than upstream in one
//! respect: this omits `signature::SignatureEncoding`/`pkcs8` wiring, whose
//! exact trait bounds (`Repr: TryFrom<&[u8], Error = signature::Error>`)
//! can't be confirmed without a compiler round-trip; `encode`/`decode` plus
//! a plain `TryFrom<&[u8]>` cover every documented use (see `DESIGN.md`).

use crate::encode::{bit_pack_vec, bit_unpack_vec};
use crate::error::MlDsaError;
use crate::hint::Hint;
use crate::param::MlDsaParams;
use crate::poly::PolyVec;

/// An ML-DSA signature: the commitment hash `c~`, the response `z`, and the
/// hint `h`.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature<P: MlDsaParams> {
    pub(crate) c_tilde: Vec<u8>,
    pub(crate) z: PolyVec,
    pub(crate) h: Hint,
    _params: core::marker::PhantomData<P>,
}

impl<P: MlDsaParams> Signature<P> {
    pub(crate) fn new(c_tilde: Vec<u8>, z: PolyVec, h: Hint) -> Self {
        Signature {
            c_tilde,
            z,
            h,
            _params: core::marker::PhantomData,
        }
    }

    /// Algorithm 26 sigEncode: `c~ || BitPack(z) || HintBitPack(h)`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.c_tilde.clone();
        out.extend(bit_pack_vec(&self.z, P::GAMMA1 - 1, P::GAMMA1));
        out.extend(self.h.encode(P::OMEGA));
        out
    }

    /// Algorithm 27 sigDecode. Rejects inputs of the wrong length, a
    /// malformed hint encoding, or a `z` whose infinity norm is already too
    /// large to have come from honest signing.
    pub fn decode(bytes: &[u8]) -> Result<Self, MlDsaError> {
        let expected = P::signature_bytes();
        if bytes.len() != expected {
            return Err(MlDsaError::InvalidEncodingLength {
                expected,
                got: bytes.len(),
            });
        }

        let c_tilde = bytes[..P::C_TILDE_BYTES].to_vec();
        let z_start = P::C_TILDE_BYTES;
        let z_len = P::L * crate::encode::bit_pack_poly_size(P::GAMMA1 - 1, P::GAMMA1);
        let z_bytes = &bytes[z_start..z_start + z_len];
        let z = bit_unpack_vec(z_bytes, P::GAMMA1 - 1, P::GAMMA1, P::L);

        let h_bytes = &bytes[z_start + z_len..];
        let h = Hint::decode(h_bytes, P::K, P::OMEGA).ok_or(MlDsaError::MalformedSignature)?;

        if z.infinity_norm() >= P::GAMMA1 - P::BETA {
            return Err(MlDsaError::MalformedSignature);
        }

        Ok(Signature::new(c_tilde, z, h))
    }
}

impl<P: MlDsaParams> TryFrom<&[u8]> for Signature<P> {
    type Error = MlDsaError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Signature::decode(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::param::MlDsa44;
    use crate::poly::Poly;

    #[test]
    fn encode_decode_round_trip() {
        let c_tilde = vec![5u8; MlDsa44::C_TILDE_BYTES];
        let z = PolyVec(vec![Poly::default(); MlDsa44::L]);
        let h = Hint {
            bits: vec![[false; 256]; MlDsa44::K],
        };
        let sig = Signature::<MlDsa44>::new(c_tilde, z, h);
        let encoded = sig.encode();
        assert_eq!(encoded.len(), MlDsa44::signature_bytes());
        let decoded = Signature::<MlDsa44>::decode(&encoded).expect("valid signature");
        assert_eq!(decoded, sig);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let err = Signature::<MlDsa44>::decode(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, MlDsaError::InvalidEncodingLength { .. }));
    }
}
