//! Hints: `MakeHint`/`UseHint` (spec.md §4.3, Algorithms 14/15) let a
//! verifier recover `HighBits(w)` from `HighBits(w - c*s2)` plus a single
//! bit per coefficient, and `HintBitPack`/`HintBitUnpack` (spec.md §4.5,
//! Algorithms 20/21) give the sparse on-the-wire encoding of those bits.
//!
//! `MakeHint`/`UseHint` are ported from the teacher's `hint.rs`, generalized
//! from a `typenum`-fixed `Gamma2` to a runtime parameter. The teacher's
//! `Hint<P>` type stores the bits densely and never encodes them — spec.md
//! §4.5 fully specifies a sparse index-list wire format the teacher never
//! got to, so `encode`/`decode` below are new, grounded directly in that
//! section rather than in any teacher code.

use crate::field::FieldElement;
use crate::poly::{decompose_coeff, PolyVec};

fn make_hint_coeff(z: FieldElement, r: FieldElement, gamma2: i64) -> bool {
    let r1 = decompose_coeff(r, gamma2).0;
    let v1 = decompose_coeff(r + z, gamma2).0;
    r1 != v1
}

fn use_hint_coeff(h: bool, r: FieldElement, gamma2: i64) -> FieldElement {
    use crate::field::Q;
    let m = (Q - 1) / (2 * gamma2);
    let (r1, r0) = decompose_coeff(r, gamma2);
    if !h {
        return r1;
    }
    if r0.mod_plus_minus(2 * gamma2) > 0 {
        FieldElement::new((r1.0 as i64 + 1).rem_euclid(m))
    } else {
        FieldElement::new((r1.0 as i64 - 1).rem_euclid(m))
    }
}

/// A `k`-polynomial hint. Internally a dense `[bool; 256]` per row (simplest
/// to compute coefficient-wise); `encode`/`decode` translate to and from the
/// sparse wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub bits: Vec<[bool; 256]>,
}

impl Hint {
    /// Algorithm 14 MakeHint, applied coefficient-wise across `z` and `r`
    /// (spec.md calls these `z = -c*s2` / `c*t0` and `r = w - c*s2 + c*t0`
    /// depending on call site; this function only needs their difference).
    pub fn new(z: &PolyVec, r: &PolyVec, gamma2: i64) -> Self {
        let bits = z
            .0
            .iter()
            .zip(&r.0)
            .map(|(zv, rv)| core::array::from_fn(|i| make_hint_coeff(zv.0[i], rv.0[i], gamma2)))
            .collect();
        Hint { bits }
    }

    pub fn k(&self) -> usize {
        self.bits.len()
    }

    pub fn hamming_weight(&self) -> usize {
        self.bits.iter().flatten().filter(|b| **b).count()
    }

    /// Algorithm 15 UseHint: recover `HighBits(w)` given `HighBits(w - c*s2)`
    /// and this hint.
    pub fn use_hint(&self, r: &PolyVec, gamma2: i64) -> PolyVec {
        PolyVec(
            self.bits
                .iter()
                .zip(&r.0)
                .map(|(hv, rv)| {
                    let mut out = crate::poly::Poly::default();
                    for i in 0..256 {
                        out.0[i] = use_hint_coeff(hv[i], rv.0[i], gamma2);
                    }
                    out
                })
                .collect(),
        )
    }

    /// Algorithm 20 HintBitPack: a byte array of length `omega + k`. The
    /// first `Index` bytes list, per row in order, the coefficient indices
    /// where the hint bit is set; `y[omega + i]` records the cumulative
    /// count after row `i`, so a decoder can recover row boundaries without
    /// a separate length field per row.
    pub fn encode(&self, omega: usize) -> Vec<u8> {
        let k = self.bits.len();
        let mut y = vec![0u8; omega + k];
        let mut index = 0usize;
        for (i, row) in self.bits.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                if bit {
                    y[index] = j as u8;
                    index += 1;
                }
            }
            y[omega + i] = index as u8;
        }
        y
    }

    /// Algorithm 21 HintBitUnpack. Returns `None` for any encoding that
    /// fails the hint's validity checks (non-monotone indices within a row,
    /// a row-end counter that decreases or exceeds `omega`, or nonzero
    /// padding past the last used slot) rather than panicking: a malformed
    /// hint just makes the signature invalid, per spec.md §9 ("treat a
    /// malformed... hint... as an invalid signature, not a panic").
    pub fn decode(y: &[u8], k: usize, omega: usize) -> Option<Self> {
        if y.len() != omega + k {
            return None;
        }
        let mut bits = vec![[false; 256]; k];
        let mut index = 0usize;
        for i in 0..k {
            let end = y[omega + i] as usize;
            if end < index || end > omega {
                return None;
            }
            let first = index;
            while index < end {
                if index > first && y[index - 1] >= y[index] {
                    return None;
                }
                bits[i][y[index] as usize] = true;
                index += 1;
            }
        }
        for &byte in &y[index..omega] {
            if byte != 0 {
                return None;
            }
        }
        Some(Hint { bits })
    }
}
