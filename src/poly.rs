//! Polynomials, polynomial vectors, and the NTT-matrix type, plus the
//! coefficient-wise operations spec.md §4.1/§4.2/§4.3 define over them:
//! `Power2Round`, `Decompose`/`HighBits`/`LowBits`, infinity norm, and the
//! domain-tagged add/sub/pointwise-multiply family.
//!
//! Ported from the teacher's `algebra.rs` `AlgebraExt`/`Decompose` traits.
//! The teacher represents standard- and NTT-domain polynomials with the same
//! `Polynomial` type and relies on callers to track which domain they're in;
//! this port instead gives them distinct types (`Poly` vs `NttPoly`), per the
//! Design Note in spec.md §9 that flags domain mixing as "the single most
//! common source of bugs in lattice implementations." There is no safe
//! conversion between the two except through `ntt()`/`ntt_inverse()`.

use crate::field::FieldElement;
use crate::ntt::{ntt, ntt_inverse};

/// A standard-domain polynomial: 256 coefficients in `Z_q`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Poly(pub [FieldElement; 256]);

/// An NTT-domain polynomial: 256 evaluations at the primitive 512th roots of
/// unity, in bit-reversed order. Structurally identical to `Poly` but a
/// logically distinct type so the two domains can never be mixed silently.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NttPoly(pub [FieldElement; 256]);

impl Poly {
    pub fn ntt(&self) -> NttPoly {
        ntt(self)
    }

    pub fn add(&self, rhs: &Poly) -> Poly {
        Poly(core::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }

    pub fn sub(&self, rhs: &Poly) -> Poly {
        Poly(core::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }

    pub fn neg(&self) -> Poly {
        Poly(core::array::from_fn(|i| -self.0[i]))
    }

    /// The centered-mod form this polynomial's coefficients take, mod `m`.
    /// Used both for infinity-norm checks and to re-center `z` before
    /// `sigEncode`'s `BitPack` call (spec.md §9, "Centered modulus pitfall").
    pub fn mod_plus_minus(&self, m: i64) -> Poly {
        Poly(core::array::from_fn(|i| {
            FieldElement::new(self.0[i].mod_plus_minus(m))
        }))
    }

    pub fn infinity_norm(&self) -> i64 {
        self.0.iter().map(|x| x.infinity_norm()).max().unwrap()
    }

    /// Algorithm 35 Power2Round, applied coefficient-wise with `d = 13`.
    pub fn power2round(&self) -> (Poly, Poly) {
        let mut t1 = Poly::default();
        let mut t0 = Poly::default();
        for i in 0..256 {
            let (r1, r0) = power2round_coeff(self.0[i]);
            t1.0[i] = r1;
            t0.0[i] = r0;
        }
        (t1, t0)
    }

    /// Algorithm 36 Decompose, applied coefficient-wise.
    pub fn decompose(&self, gamma2: i64) -> (Poly, Poly) {
        let mut r1 = Poly::default();
        let mut r0 = Poly::default();
        for i in 0..256 {
            let (hi, lo) = decompose_coeff(self.0[i], gamma2);
            r1.0[i] = hi;
            r0.0[i] = lo;
        }
        (r1, r0)
    }

    pub fn high_bits(&self, gamma2: i64) -> Poly {
        self.decompose(gamma2).0
    }

    pub fn low_bits(&self, gamma2: i64) -> Poly {
        self.decompose(gamma2).1
    }
}

impl NttPoly {
    pub fn ntt_inverse(&self) -> Poly {
        ntt_inverse(self)
    }

    /// Coefficient-wise product of two NTT-domain polynomials.
    pub fn pointwise_mul(&self, rhs: &NttPoly) -> NttPoly {
        NttPoly(core::array::from_fn(|i| self.0[i] * rhs.0[i]))
    }

    pub fn add(&self, rhs: &NttPoly) -> NttPoly {
        NttPoly(core::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }

    pub fn sub(&self, rhs: &NttPoly) -> NttPoly {
        NttPoly(core::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

pub(crate) fn power2round_coeff(r: FieldElement) -> (FieldElement, FieldElement) {
    const D: i64 = 13;
    let pow2d = 1i64 << D;
    let r0 = r.mod_plus_minus(pow2d);
    let r_plus = r.0 as i64;
    let r1 = (r_plus - r0).div_euclid(pow2d);
    (FieldElement::new(r1), FieldElement::new(r0))
}

/// Algorithm 36 Decompose, with the edge-case wraparound spec.md §4.3 calls out:
/// when `r+ - r0 == q - 1`, fold `r1` back to 0 and nudge `r0` down by one so
/// the representation stays in range.
pub(crate) fn decompose_coeff(r: FieldElement, gamma2: i64) -> (FieldElement, FieldElement) {
    let two_gamma2 = 2 * gamma2;
    let r0 = r.mod_plus_minus(two_gamma2);
    let r_plus = r.0 as i64;
    if r_plus - r0 == crate::field::Q - 1 {
        (FieldElement::ZERO, FieldElement::new(r0 - 1))
    } else {
        let r1 = (r_plus - r0) / two_gamma2;
        (FieldElement::new(r1), FieldElement::new(r0))
    }
}

/// A length-`n` vector of standard-domain polynomials (`n` is `k` or `l`
/// depending on context; checked at runtime rather than compile time — see
/// `DESIGN.md` for why this trades the teacher's compile-time-sized
/// `hybrid_array`/`typenum` vectors for plain `Vec`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolyVec(pub Vec<Poly>);

/// A length-`n` vector of NTT-domain polynomials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NttVec(pub Vec<NttPoly>);

impl PolyVec {
    pub fn zero(n: usize) -> Self {
        PolyVec(vec![Poly::default(); n])
    }

    pub fn ntt(&self) -> NttVec {
        NttVec(self.0.iter().map(Poly::ntt).collect())
    }

    pub fn add(&self, rhs: &PolyVec) -> PolyVec {
        PolyVec(self.0.iter().zip(&rhs.0).map(|(a, b)| a.add(b)).collect())
    }

    pub fn sub(&self, rhs: &PolyVec) -> PolyVec {
        PolyVec(self.0.iter().zip(&rhs.0).map(|(a, b)| a.sub(b)).collect())
    }

    pub fn mod_plus_minus(&self, m: i64) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.mod_plus_minus(m)).collect())
    }

    pub fn infinity_norm(&self) -> i64 {
        self.0.iter().map(Poly::infinity_norm).max().unwrap_or(0)
    }

    pub fn power2round(&self) -> (PolyVec, PolyVec) {
        let pairs: Vec<_> = self.0.iter().map(Poly::power2round).collect();
        (
            PolyVec(pairs.iter().map(|(a, _)| *a).collect()),
            PolyVec(pairs.iter().map(|(_, b)| *b).collect()),
        )
    }

    pub fn high_bits(&self, gamma2: i64) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.high_bits(gamma2)).collect())
    }

    pub fn low_bits(&self, gamma2: i64) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.low_bits(gamma2)).collect())
    }
}

impl NttVec {
    pub fn zero(n: usize) -> Self {
        NttVec(vec![NttPoly::default(); n])
    }

    pub fn ntt_inverse(&self) -> PolyVec {
        PolyVec(self.0.iter().map(NttPoly::ntt_inverse).collect())
    }

    pub fn add(&self, rhs: &NttVec) -> NttVec {
        NttVec(self.0.iter().zip(&rhs.0).map(|(a, b)| a.add(b)).collect())
    }

    pub fn sub(&self, rhs: &NttVec) -> NttVec {
        NttVec(self.0.iter().zip(&rhs.0).map(|(a, b)| a.sub(b)).collect())
    }

    /// Scale every polynomial in this vector by a single NTT-domain scalar,
    /// i.e. `c_hat * v` for each entry `v`.
    pub fn scale(&self, c_hat: &NttPoly) -> NttVec {
        NttVec(self.0.iter().map(|v| v.pointwise_mul(c_hat)).collect())
    }
}

/// A `k x l` matrix of NTT-domain polynomials, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NttMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<NttPoly>,
}

impl NttMatrix {
    pub fn new(rows: usize, cols: usize, data: Vec<NttPoly>) -> Self {
        assert_eq!(data.len(), rows * cols);
        NttMatrix { rows, cols, data }
    }

    fn at(&self, r: usize, c: usize) -> &NttPoly {
        &self.data[r * self.cols + c]
    }

    /// `A_hat * v_hat`, i.e. `Sum_j pointwise(A[i][j], v[j])` summed mod q
    /// for each output row `i`.
    pub fn mul_vec(&self, v: &NttVec) -> NttVec {
        assert_eq!(self.cols, v.0.len());
        let mut out = NttVec::zero(self.rows);
        for i in 0..self.rows {
            let mut acc = NttPoly::default();
            for j in 0..self.cols {
                acc = acc.add(&self.at(i, j).pointwise_mul(&v.0[j]));
            }
            out.0[i] = acc;
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::Q;

    #[test]
    fn power2round_recombines() {
        for x in [0i64, 1, 4096, Q - 1, Q / 2] {
            let f = FieldElement::new(x);
            let (r1, r0) = power2round_coeff(f);
            let recombined = FieldElement::new((r1.0 as i64) * (1 << 13) + r0.0 as i64);
            assert_eq!(recombined, FieldElement::new(x));
        }
    }

    #[test]
    fn decompose_recombines_except_edge_case() {
        let gamma2 = (Q - 1) / 88;
        for x in [0i64, 1, 1000, Q / 2, Q - 2] {
            let f = FieldElement::new(x);
            let (r1, r0) = decompose_coeff(f, gamma2);
            let recombined = FieldElement::new(r1.0 as i64 * 2 * gamma2 + r0.0 as i64);
            assert_eq!(recombined, FieldElement::new(x));
        }
    }

    #[test]
    fn infinity_norm_is_max_centered_abs() {
        let mut p = Poly::default();
        p.0[3] = FieldElement::new(Q / 2);
        p.0[9] = FieldElement::new(100);
        assert_eq!(p.infinity_norm(), Q / 2);
    }
}
