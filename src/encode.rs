//! Bit/byte codecs: `SimpleBitPack`/`SimpleBitUnpack`, `BitPack`/`BitUnpack`,
//! and `w1Encode` (spec.md §4.5, Algorithms 16-18 and 28 of FIPS 204). All
//! bit strings are little-endian: bit 0 is the low bit of byte 0.
//!
//! Ported from the teacher's `encode.rs` `SimpleBitPack`/`BitPack` traits,
//! which pack values into `u128`-sized chunks via `typenum`-computed strides
//! for speed. This port instead walks the output bit-by-bit (see
//! `DESIGN.md`): slower, but its correctness doesn't depend on getting a
//! chunking stride calculation right without a compiler to check it, and
//! every coefficient count here (256) divides evenly into bytes for every
//! bit width ML-DSA actually uses, so there's no edge case the
//! straightforward version would handle differently.

use crate::field::{FieldElement, Q};
use crate::poly::{Poly, PolyVec};

/// Number of bits needed to represent `b` in binary (`bitlen` in spec.md).
fn bitlen(b: u32) -> u32 {
    if b == 0 {
        0
    } else {
        32 - b.leading_zeros()
    }
}

fn pack_bits(values: impl Iterator<Item = u32>, bits: u32, count: usize) -> Vec<u8> {
    let total_bits = count * bits as usize;
    let mut out = vec![0u8; total_bits.div_ceil(8)];
    let mut bitpos = 0usize;
    for v in values {
        for b in 0..bits {
            if (v >> b) & 1 == 1 {
                out[bitpos / 8] |= 1 << (bitpos % 8);
            }
            bitpos += 1;
        }
    }
    out
}

fn unpack_bits(bytes: &[u8], bits: u32, count: usize) -> Vec<u32> {
    let mut out = vec![0u32; count];
    let mut bitpos = 0usize;
    for slot in out.iter_mut() {
        let mut v = 0u32;
        for b in 0..bits {
            if (bytes[bitpos / 8] >> (bitpos % 8)) & 1 == 1 {
                v |= 1 << b;
            }
            bitpos += 1;
        }
        *slot = v;
    }
    out
}

/// Algorithm 16 SimpleBitPack: each coefficient in `[0, b]` packed into
/// `bitlen(b)` bits.
pub fn simple_bit_pack(p: &Poly, b: u32) -> Vec<u8> {
    let bits = bitlen(b);
    pack_bits(p.0.iter().map(|x| x.0 as u32), bits, 256)
}

/// Algorithm 18 SimpleBitUnpack.
pub fn simple_bit_unpack(bytes: &[u8], b: u32) -> Poly {
    let bits = bitlen(b);
    let vals = unpack_bits(bytes, bits, 256);
    Poly(core::array::from_fn(|i| FieldElement::new(vals[i] as i64)))
}

/// Algorithm 17 BitPack: each coefficient in `[-a, b]` encoded as `b - w` in
/// `bitlen(a + b)` bits. Coefficients are read out of their centered-mod-`q`
/// representative, valid because every range ML-DSA packs this way
/// (`eta`, `2^(d-1)`, `gamma1`) is far below `q/2`.
pub fn bit_pack(p: &Poly, a: i64, b: i64) -> Vec<u8> {
    let bits = bitlen((a + b) as u32);
    let values = p.0.iter().map(|w| {
        let centered = w.mod_plus_minus(Q);
        (b - centered) as u32
    });
    pack_bits(values, bits, 256)
}

/// Algorithm 17 (inverse direction) BitUnpack.
pub fn bit_unpack(bytes: &[u8], a: i64, b: i64) -> Poly {
    let bits = bitlen((a + b) as u32);
    let vals = unpack_bits(bytes, bits, 256);
    Poly(core::array::from_fn(|i| {
        FieldElement::new(b - vals[i] as i64)
    }))
}

/// `SimpleBitPack` applied polynomial-by-polynomial across a vector, results
/// concatenated in order.
pub fn simple_bit_pack_vec(v: &PolyVec, b: u32) -> Vec<u8> {
    v.0.iter().flat_map(|p| simple_bit_pack(p, b)).collect()
}

pub fn simple_bit_unpack_vec(bytes: &[u8], b: u32, n: usize) -> PolyVec {
    let poly_bytes = simple_bit_pack_poly_size(b);
    PolyVec(
        bytes
            .chunks_exact(poly_bytes)
            .take(n)
            .map(|chunk| simple_bit_unpack(chunk, b))
            .collect(),
    )
}

pub fn bit_pack_vec(v: &PolyVec, a: i64, b: i64) -> Vec<u8> {
    v.0.iter().flat_map(|p| bit_pack(p, a, b)).collect()
}

pub fn bit_unpack_vec(bytes: &[u8], a: i64, b: i64, n: usize) -> PolyVec {
    let poly_bytes = bit_pack_poly_size(a, b);
    PolyVec(
        bytes
            .chunks_exact(poly_bytes)
            .take(n)
            .map(|chunk| bit_unpack(chunk, a, b))
            .collect(),
    )
}

/// Algorithm 28 w1Encode: `SimpleBitPack(w1[i], m - 1)` for each of the `k`
/// rows, where `m = (q - 1) / (2 * gamma2)`.
pub fn w1_encode(w1: &PolyVec, gamma2: i64) -> Vec<u8> {
    let m = (Q - 1) / (2 * gamma2);
    simple_bit_pack_vec(w1, (m - 1) as u32)
}

/// Bytes needed to encode one polynomial with `SimpleBitPack(_, b)`.
pub fn simple_bit_pack_poly_size(b: u32) -> usize {
    (256 * bitlen(b) as usize).div_ceil(8)
}

/// Bytes needed to encode one polynomial with `BitPack(_, a, b)`.
pub fn bit_pack_poly_size(a: i64, b: i64) -> usize {
    (256 * bitlen((a + b) as u32) as usize).div_ceil(8)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_bit_pack_known_answer() {
        let mut p = Poly::default();
        for i in 0..256 {
            p.0[i] = FieldElement::new((i % 8) as i64);
        }
        let b = 7u32; // bitlen(7) = 3
        let encoded = simple_bit_pack(&p, b);
        assert_eq!(encoded.len(), 96); // 256*3/8
        let decoded = simple_bit_unpack(&encoded, b);
        assert_eq!(decoded, p);
    }

    #[test]
    fn bit_pack_round_trip_eta() {
        let mut p = Poly::default();
        for i in 0..256 {
            let v = (i as i64 % 5) - 2; // in [-2, 2]
            p.0[i] = FieldElement::new(v);
        }
        let encoded = bit_pack(&p, 2, 2);
        assert_eq!(encoded.len(), bit_pack_poly_size(2, 2));
        let decoded = bit_unpack(&encoded, 2, 2);
        assert_eq!(decoded, p);
    }

    #[test]
    fn bit_pack_round_trip_gamma1() {
        let gamma1 = 1i64 << 17;
        let mut p = Poly::default();
        for i in 0..256 {
            let v = (i as i64 % (2 * gamma1)) - gamma1 + 1;
            p.0[i] = FieldElement::new(v);
        }
        let encoded = bit_pack(&p, gamma1 - 1, gamma1);
        let decoded = bit_unpack(&encoded, gamma1 - 1, gamma1);
        assert_eq!(decoded, p);
    }

    #[test]
    fn vector_pack_concatenates_per_polynomial() {
        let v = PolyVec(vec![Poly::default(); 4]);
        let encoded = simple_bit_pack_vec(&v, 10);
        assert_eq!(encoded.len(), simple_bit_pack_poly_size(10) * 4);
    }
}
