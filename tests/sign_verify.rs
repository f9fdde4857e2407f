//! End-to-end sign/verify coverage across all three parameter sets, plus the
//! rejection paths spec.md §9 calls out explicitly (oversized context,
//! corrupted signature bytes, wrong key, wrong message). There's no ACVP
//! fixture in this workspace to drive a known-answer test against, so this
//! exercises the public API round-trip instead.

use ml_dsa::{KeyGen, MlDsa44, MlDsa65, MlDsa87, MlDsaParams, Signature, SigningKey, VerifyingKey};
use rand::{rngs::StdRng, SeedableRng};
use signature::{Signer, Verifier};

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn round_trip_randomized<P: MlDsaParams + KeyGen>() {
    let mut r = rng(1);
    let kp = P::key_gen(&mut r);
    let msg = b"the quick brown fox jumps over the lazy dog";

    let sig = kp
        .signing_key()
        .sign_randomized(msg, &[], &mut r)
        .expect("signing should succeed");
    assert!(kp.verifying_key().verify_with_context(msg, &[], &sig));
}

fn round_trip_deterministic<P: MlDsaParams + KeyGen>() {
    let mut r = rng(2);
    let kp = P::key_gen(&mut r);
    let msg = b"deterministic signatures must match on replay";

    let sig1 = kp.signing_key().sign_deterministic(msg, &[]).unwrap();
    let sig2 = kp.signing_key().sign_deterministic(msg, &[]).unwrap();
    assert_eq!(sig1.encode(), sig2.encode());
    assert!(kp.verifying_key().verify_with_context(msg, &[], &sig1));
}

#[test]
fn round_trip_ml_dsa_44() {
    round_trip_randomized::<MlDsa44>();
    round_trip_deterministic::<MlDsa44>();
}

#[test]
fn round_trip_ml_dsa_65() {
    round_trip_randomized::<MlDsa65>();
    round_trip_deterministic::<MlDsa65>();
}

#[test]
fn round_trip_ml_dsa_87() {
    round_trip_randomized::<MlDsa87>();
    round_trip_deterministic::<MlDsa87>();
}

#[test]
fn signature_trait_impls_round_trip() {
    let mut r = rng(3);
    let kp = MlDsa65::key_gen(&mut r);
    let msg = b"routed through the signature crate's traits";

    let sig = kp.signing_key().sign_randomized(msg, &[], &mut r).unwrap();
    assert!(kp.verifying_key().verify(msg, &sig).is_ok());

    let sig2: Signature<MlDsa65> = kp.try_sign(msg).unwrap();
    assert!(kp.verifying_key().verify(msg, &sig2).is_ok());
}

#[test]
fn verify_rejects_message_tampering() {
    let mut r = rng(4);
    let kp = MlDsa44::key_gen(&mut r);
    let sig = kp
        .signing_key()
        .sign_deterministic(b"original message", &[])
        .unwrap();
    assert!(!kp
        .verifying_key()
        .verify_with_context(b"tampered message", &[], &sig));
}

#[test]
fn verify_rejects_wrong_key() {
    let mut r = rng(5);
    let kp1 = MlDsa44::key_gen(&mut r);
    let kp2 = MlDsa44::key_gen(&mut r);
    let sig = kp1
        .signing_key()
        .sign_deterministic(b"shared message", &[])
        .unwrap();
    assert!(!kp2
        .verifying_key()
        .verify_with_context(b"shared message", &[], &sig));
}

#[test]
fn verify_rejects_context_mismatch() {
    let mut r = rng(6);
    let kp = MlDsa44::key_gen(&mut r);
    let msg = b"context-bound message";
    let sig = kp.signing_key().sign_deterministic(msg, b"ctx-a").unwrap();
    assert!(kp.verifying_key().verify_with_context(msg, b"ctx-a", &sig));
    assert!(!kp.verifying_key().verify_with_context(msg, b"ctx-b", &sig));
}

#[test]
fn sign_rejects_oversized_context() {
    let mut r = rng(7);
    let kp = MlDsa44::key_gen(&mut r);
    let ctx = vec![0u8; 256];
    assert!(kp.signing_key().sign_deterministic(b"m", &ctx).is_err());
}

#[test]
fn verify_rejects_oversized_context() {
    let mut r = rng(8);
    let kp = MlDsa44::key_gen(&mut r);
    let msg = b"m";
    let sig = kp.signing_key().sign_deterministic(msg, &[]).unwrap();
    let ctx = vec![0u8; 256];
    assert!(!kp.verifying_key().verify_with_context(msg, &ctx, &sig));
}

#[test]
fn verify_rejects_corrupted_signature_bytes() {
    let mut r = rng(9);
    let kp = MlDsa44::key_gen(&mut r);
    let msg = b"corruption target";
    let sig = kp.signing_key().sign_deterministic(msg, &[]).unwrap();

    let mut bytes = sig.encode();
    // Flip a bit in the commitment hash: changes the signature but keeps it
    // the right length, so it exercises verification failure rather than
    // the decoder's length check.
    bytes[0] ^= 0x01;
    let corrupted = Signature::<MlDsa44>::decode(&bytes).unwrap();
    assert!(!kp
        .verifying_key()
        .verify_with_context(msg, &[], &corrupted));
}

#[test]
fn signature_decode_rejects_malformed_hint() {
    let mut r = rng(10);
    let kp = MlDsa44::key_gen(&mut r);
    let sig = kp
        .signing_key()
        .sign_deterministic(b"hint target", &[])
        .unwrap();

    let mut bytes = sig.encode();
    // The trailing bytes are the hint's row-end counters, which must be
    // non-decreasing and capped at OMEGA; 0xFF violates both.
    let last = bytes.len() - 1;
    bytes[last] = 0xFF;
    assert!(Signature::<MlDsa44>::decode(&bytes).is_err());
}

#[test]
fn signature_decode_rejects_wrong_length() {
    let bytes = vec![0u8; 10];
    assert!(Signature::<MlDsa44>::decode(&bytes).is_err());
}

#[test]
fn signing_key_and_verifying_key_encode_decode_round_trip() {
    let mut r = rng(11);
    let kp = MlDsa65::key_gen(&mut r);

    let sk_bytes = kp.signing_key().encode();
    let sk = SigningKey::<MlDsa65>::decode(&sk_bytes).unwrap();
    assert_eq!(sk.encode(), sk_bytes);

    let pk_bytes = kp.verifying_key().encode();
    let pk = VerifyingKey::<MlDsa65>::decode(&pk_bytes).unwrap();
    assert_eq!(pk.encode(), pk_bytes);

    let msg = b"signed with the reloaded key";
    let sig = sk.sign_deterministic(msg, &[]).unwrap();
    assert!(pk.verify_with_context(msg, &[], &sig));
}

#[test]
fn verifying_key_decode_rejects_wrong_length() {
    let bytes = vec![0u8; 4];
    assert!(VerifyingKey::<MlDsa44>::decode(&bytes).is_err());
}
