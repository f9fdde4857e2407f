//! `SigningKey`, `VerifyingKey`, `KeyPair`, and the top-level `KeyGen`/
//! `Sign`/`Verify` pipeline (spec.md §4.7/§4.8, Algorithms 1-3 and 6-8).
//!
//! Grounded in the upstream `other_examples/47d6a69c_..._lib.rs.rs`'s
//! `SigningKey`/`VerifyingKey`/`KeyPair`/`KeyGen` structs and methods
//! (`key_gen_internal`, `sign_internal`, `sign_randomized`,
//! `sign_deterministic`, `verify_internal`, `verify_with_context`), adapted
//! from `hybrid_array`-sized fields to the `PolyVec`/`Vec<u8>` types used
//! throughout this crate, and from upstream's slice-of-slices message
//! assembly to direct chained `H::absorb` calls (no `Mp` byte string is ever
//! materialized).

use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{Xof256, H};
use crate::encode::{bit_pack_vec, bit_unpack_vec, simple_bit_pack_vec, simple_bit_unpack_vec};
use crate::error::MlDsaError;
use crate::field::FieldElement;
use crate::param::MlDsaParams;
use crate::poly::{NttMatrix, Poly, PolyVec};
use crate::sampling::{expand_a, expand_mask, sample_in_ball};
use crate::sig::Signature;

/// Domain separator byte for the non-prehashed ("pure") variant of
/// `ML-DSA.Sign`/`ML-DSA.Verify` (spec.md §4.7). HashML-DSA, which uses `1`
/// here, is out of scope.
const PURE_DOMAIN_SEPARATOR: u8 = 0;

fn scale_by_power_of_two(v: &PolyVec, shift: u32) -> PolyVec {
    let c = FieldElement::new(1i64 << shift);
    PolyVec(
        v.0.iter()
            .map(|p| Poly(core::array::from_fn(|i| p.0[i] * c)))
            .collect(),
    )
}

fn check_context_len(ctx: &[u8]) -> Result<(), MlDsaError> {
    if ctx.len() > 255 {
        Err(MlDsaError::ContextTooLong)
    } else {
        Ok(())
    }
}

/// An ML-DSA signing (private) key.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SigningKey<P: MlDsaParams> {
    #[zeroize(skip)]
    rho: [u8; 32],
    k_seed: [u8; 32],
    tr: [u8; 64],
    s1: PolyVec,
    s2: PolyVec,
    t0: PolyVec,
    #[zeroize(skip)]
    a_hat: NttMatrix,
    #[zeroize(skip)]
    _params: core::marker::PhantomData<P>,
}

impl Zeroize for PolyVec {
    fn zeroize(&mut self) {
        for p in self.0.iter_mut() {
            for c in p.0.iter_mut() {
                *c = FieldElement::ZERO;
            }
        }
    }
}

impl<P: MlDsaParams> SigningKey<P> {
    fn new(
        rho: [u8; 32],
        k_seed: [u8; 32],
        tr: [u8; 64],
        s1: PolyVec,
        s2: PolyVec,
        t0: PolyVec,
        a_hat: NttMatrix,
    ) -> Self {
        SigningKey {
            rho,
            k_seed,
            tr,
            s1,
            s2,
            t0,
            a_hat,
            _params: core::marker::PhantomData,
        }
    }

    /// Algorithm 7 ML-DSA.Sign_internal: the rejection-sampling core shared
    /// by the randomized and deterministic signing entry points. `rnd` is
    /// either fresh randomness (randomized signing) or the all-zero string
    /// (deterministic signing).
    pub fn sign_internal(&self, domain_sep: u8, ctx: &[u8], msg: &[u8], rnd: &[u8; 32]) -> Signature<P> {
        let mu = H::default()
            .absorb(&self.tr)
            .absorb(&[domain_sep])
            .absorb(&[ctx.len() as u8])
            .absorb(ctx)
            .absorb(msg)
            .squeeze_64();

        let rho_pp = H::default()
            .absorb(&self.k_seed)
            .absorb(rnd)
            .absorb(&mu)
            .squeeze_64();

        let s1_hat = self.s1.ntt();
        let s2_hat = self.s2.ntt();
        let t0_hat = self.t0.ntt();

        let mut kappa: u16 = 0;
        loop {
            let y = expand_mask(&rho_pp, kappa, P::L, P::GAMMA1);
            let w = self.a_hat.mul_vec(&y.ntt()).ntt_inverse();
            let w1 = w.high_bits(P::GAMMA2);

            let w1_tilde = crate::encode::w1_encode(&w1, P::GAMMA2);
            let c_tilde = H::default()
                .absorb(&mu)
                .absorb(&w1_tilde)
                .squeeze(P::C_TILDE_BYTES);
            let c = sample_in_ball(&c_tilde, P::TAU);
            let c_hat = c.ntt();

            let cs1 = s1_hat.scale(&c_hat).ntt_inverse();
            let cs2 = s2_hat.scale(&c_hat).ntt_inverse();

            let z = y.add(&cs1);
            let r0 = w.sub(&cs2).low_bits(P::GAMMA2);

            if z.infinity_norm() >= P::GAMMA1 - P::BETA || r0.infinity_norm() >= P::GAMMA2 - P::BETA
            {
                kappa = kappa.wrapping_add(P::L as u16);
                continue;
            }

            let ct0 = t0_hat.scale(&c_hat).ntt_inverse();
            let minus_ct0 = PolyVec(ct0.0.iter().map(Poly::neg).collect());
            let w_cs2_ct0 = w.sub(&cs2).add(&ct0);
            let h = crate::hint::Hint::new(&minus_ct0, &w_cs2_ct0, P::GAMMA2);

            if ct0.infinity_norm() >= P::GAMMA2 || h.hamming_weight() > P::OMEGA {
                kappa = kappa.wrapping_add(P::L as u16);
                continue;
            }

            let z = z.mod_plus_minus(crate::field::Q);
            return Signature::new(c_tilde, z, h);
        }
    }

    /// Algorithm 2 ML-DSA.Sign, hedged variant: mixes fresh randomness from
    /// `rng` into the rejection-sampling seed.
    pub fn sign_randomized(
        &self,
        msg: &[u8],
        ctx: &[u8],
        rng: &mut impl CryptoRngCore,
    ) -> Result<Signature<P>, MlDsaError> {
        check_context_len(ctx)?;
        let mut rnd = [0u8; 32];
        rng.try_fill_bytes(&mut rnd).map_err(|_| MlDsaError::Rng)?;
        Ok(self.sign_internal(PURE_DOMAIN_SEPARATOR, ctx, msg, &rnd))
    }

    /// Algorithm 2 ML-DSA.Sign, optional deterministic variant: `rnd` is the
    /// all-zero string, so signing the same message with the same key
    /// always produces the same signature.
    pub fn sign_deterministic(&self, msg: &[u8], ctx: &[u8]) -> Result<Signature<P>, MlDsaError> {
        check_context_len(ctx)?;
        Ok(self.sign_internal(PURE_DOMAIN_SEPARATOR, ctx, msg, &[0u8; 32]))
    }

    /// Algorithm 24 skEncode.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(P::signing_key_bytes());
        out.extend_from_slice(&self.rho);
        out.extend_from_slice(&self.k_seed);
        out.extend_from_slice(&self.tr);
        out.extend(bit_pack_vec(&self.s1, P::ETA, P::ETA));
        out.extend(bit_pack_vec(&self.s2, P::ETA, P::ETA));
        out.extend(bit_pack_vec(&self.t0, (1 << 12) - 1, 1 << 12));
        out
    }

    /// Algorithm 25 skDecode.
    pub fn decode(bytes: &[u8]) -> Result<Self, MlDsaError> {
        let expected = P::signing_key_bytes();
        if bytes.len() != expected {
            return Err(MlDsaError::InvalidEncodingLength {
                expected,
                got: bytes.len(),
            });
        }
        let mut rho = [0u8; 32];
        rho.copy_from_slice(&bytes[0..32]);
        let mut k_seed = [0u8; 32];
        k_seed.copy_from_slice(&bytes[32..64]);
        let mut tr = [0u8; 64];
        tr.copy_from_slice(&bytes[64..128]);

        let s1_bytes = P::L * P::eta_poly_bytes();
        let s2_bytes = P::K * P::eta_poly_bytes();
        let mut offset = 128;
        let s1 = bit_unpack_vec(
            &bytes[offset..offset + s1_bytes],
            P::ETA,
            P::ETA,
            P::L,
        );
        offset += s1_bytes;
        let s2 = bit_unpack_vec(
            &bytes[offset..offset + s2_bytes],
            P::ETA,
            P::ETA,
            P::K,
        );
        offset += s2_bytes;
        let t0 = bit_unpack_vec(&bytes[offset..], (1 << 12) - 1, 1 << 12, P::K);

        let a_hat = expand_a(&rho, P::K, P::L);
        Ok(SigningKey::new(rho, k_seed, tr, s1, s2, t0, a_hat))
    }
}

/// An ML-DSA verifying (public) key.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyingKey<P: MlDsaParams> {
    rho: [u8; 32],
    t1: PolyVec,
    a_hat: NttMatrix,
    t1_2d_hat: crate::poly::NttVec,
    tr: [u8; 64],
    _params: core::marker::PhantomData<P>,
}

impl<P: MlDsaParams> VerifyingKey<P> {
    fn new(rho: [u8; 32], t1: PolyVec, a_hat: NttMatrix) -> Self {
        let encoded = Self::encode_parts(&rho, &t1);
        let tr = H::default().absorb(&encoded).squeeze_64();
        let t1_2d_hat = scale_by_power_of_two(&t1, 13).ntt();
        VerifyingKey {
            rho,
            t1,
            a_hat,
            t1_2d_hat,
            tr,
            _params: core::marker::PhantomData,
        }
    }

    fn encode_parts(rho: &[u8; 32], t1: &PolyVec) -> Vec<u8> {
        let bound = ((crate::field::Q - 1) / (1 << 13) - 1) as u32;
        let mut out = Vec::with_capacity(P::verifying_key_bytes());
        out.extend_from_slice(rho);
        out.extend(simple_bit_pack_vec(t1, bound));
        out
    }

    /// Algorithm 8 ML-DSA.Verify_internal.
    pub fn verify_internal(&self, domain_sep: u8, ctx: &[u8], msg: &[u8], sig: &Signature<P>) -> bool {
        let mu = H::default()
            .absorb(&self.tr)
            .absorb(&[domain_sep])
            .absorb(&[ctx.len() as u8])
            .absorb(ctx)
            .absorb(msg)
            .squeeze_64();

        let c = sample_in_ball(&sig.c_tilde, P::TAU);
        let z_hat = sig.z.ntt();
        let c_hat = c.ntt();

        let az_hat = self.a_hat.mul_vec(&z_hat);
        let ct1_2d_hat = self.t1_2d_hat.scale(&c_hat);
        let w_approx = az_hat.sub(&ct1_2d_hat).ntt_inverse();

        let w1p = sig.h.use_hint(&w_approx, P::GAMMA2);
        let w1p_tilde = crate::encode::w1_encode(&w1p, P::GAMMA2);

        let c_tilde_p = H::default()
            .absorb(&mu)
            .absorb(&w1p_tilde)
            .squeeze(P::C_TILDE_BYTES);

        sig.z.infinity_norm() < P::GAMMA1 - P::BETA
            && sig.h.hamming_weight() <= P::OMEGA
            && sig.c_tilde == c_tilde_p
    }

    /// Algorithm 3 ML-DSA.Verify.
    pub fn verify_with_context(&self, msg: &[u8], ctx: &[u8], sig: &Signature<P>) -> bool {
        if ctx.len() > 255 {
            return false;
        }
        self.verify_internal(PURE_DOMAIN_SEPARATOR, ctx, msg, sig)
    }

    /// Algorithm 22 pkEncode.
    pub fn encode(&self) -> Vec<u8> {
        Self::encode_parts(&self.rho, &self.t1)
    }

    /// Algorithm 23 pkDecode.
    pub fn decode(bytes: &[u8]) -> Result<Self, MlDsaError> {
        let expected = P::verifying_key_bytes();
        if bytes.len() != expected {
            return Err(MlDsaError::InvalidEncodingLength {
                expected,
                got: bytes.len(),
            });
        }
        let mut rho = [0u8; 32];
        rho.copy_from_slice(&bytes[..32]);
        let bound = ((crate::field::Q - 1) / (1 << 13) - 1) as u32;
        let t1 = simple_bit_unpack_vec(&bytes[32..], bound, P::K);
        let a_hat = expand_a(&rho, P::K, P::L);
        Ok(VerifyingKey::new(rho, t1, a_hat))
    }
}

impl<P: MlDsaParams> signature::Signer<Signature<P>> for SigningKey<P> {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature<P>, signature::Error> {
        self.sign_deterministic(msg, &[]).map_err(Into::into)
    }
}

impl<P: MlDsaParams> signature::RandomizedSigner<Signature<P>> for SigningKey<P> {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Result<Signature<P>, signature::Error> {
        self.sign_randomized(msg, &[], rng).map_err(Into::into)
    }
}

impl<P: MlDsaParams> signature::Verifier<Signature<P>> for VerifyingKey<P> {
    fn verify(&self, msg: &[u8], sig: &Signature<P>) -> Result<(), signature::Error> {
        self.verify_with_context(msg, &[], sig)
            .then_some(())
            .ok_or_else(signature::Error::new)
    }
}

/// An ML-DSA key pair: a signing key, its matching verifying key, and the
/// 32-byte seed they were both derived from.
pub struct KeyPair<P: MlDsaParams> {
    signing_key: SigningKey<P>,
    verifying_key: VerifyingKey<P>,
}

impl<P: MlDsaParams> KeyPair<P> {
    pub fn signing_key(&self) -> &SigningKey<P> {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey<P> {
        &self.verifying_key
    }
}

impl<P: MlDsaParams> AsRef<VerifyingKey<P>> for KeyPair<P> {
    fn as_ref(&self) -> &VerifyingKey<P> {
        &self.verifying_key
    }
}

impl<P: MlDsaParams> signature::KeypairRef for KeyPair<P> {
    type VerifyingKey = VerifyingKey<P>;
}

impl<P: MlDsaParams> signature::Signer<Signature<P>> for KeyPair<P> {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature<P>, signature::Error> {
        self.signing_key.try_sign(msg)
    }
}

/// Generates an ML-DSA key pair for a given parameter set (spec.md §4.7,
/// Algorithms 1 and 6). Implemented for every `MlDsaParams` type, so
/// `MlDsa65::key_gen(&mut rng)` is the entry point.
pub trait KeyGen: MlDsaParams {
    fn key_gen<R: CryptoRngCore>(rng: &mut R) -> KeyPair<Self>
    where
        Self: Sized;

    fn key_gen_internal(seed: &[u8; 32]) -> KeyPair<Self>
    where
        Self: Sized;
}

impl<P: MlDsaParams> KeyGen for P {
    fn key_gen<R: CryptoRngCore>(rng: &mut R) -> KeyPair<P> {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        P::key_gen_internal(&seed)
    }

    /// Algorithm 6 ML-DSA.KeyGen_internal.
    fn key_gen_internal(seed: &[u8; 32]) -> KeyPair<P> {
        let mut seed_bytes = Vec::with_capacity(34);
        seed_bytes.extend_from_slice(seed);
        seed_bytes.push(P::K as u8);
        seed_bytes.push(P::L as u8);
        let mut xof = Xof256::new(&seed_bytes);
        let mut rho = [0u8; 32];
        rho.copy_from_slice(&xof.squeeze(32));
        let mut rho_prime = [0u8; 64];
        rho_prime.copy_from_slice(&xof.squeeze(64));
        let mut k_seed = [0u8; 32];
        k_seed.copy_from_slice(&xof.squeeze(32));

        let a_hat = expand_a(&rho, P::K, P::L);
        let (s1, s2) = crate::sampling::expand_s(&rho_prime, P::K, P::L, P::ETA);

        let t = a_hat.mul_vec(&s1.ntt()).ntt_inverse().add(&s2);
        let (t1, t0) = t.power2round();

        let verifying_key = VerifyingKey::new(rho, t1, a_hat.clone());
        let signing_key = SigningKey::new(rho, k_seed, verifying_key.tr, s1, s2, t0, a_hat);

        KeyPair {
            signing_key,
            verifying_key,
        }
    }
}
