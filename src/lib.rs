#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![warn(clippy::pedantic)]
#![allow(non_snake_case)]

//! Pure Rust implementation of ML-DSA, the module-lattice-based digital
//! signature algorithm standardized as [FIPS 204](https://csrc.nist.gov/pubs/fips/204/final)
//! (formerly CRYSTALS-Dilithium).
//!
//! ```
//! use ml_dsa::{KeyGen, MlDsa65};
//! use signature::Verifier;
//!
//! let mut rng = rand::thread_rng();
//! let kp = MlDsa65::key_gen(&mut rng);
//!
//! let msg = b"Hello world";
//! let sig = kp.signing_key().sign_randomized(msg, &[], &mut rng).unwrap();
//!
//! assert!(kp.verifying_key().verify(msg, &sig).is_ok());
//! ```

mod crypto;
mod encode;
mod error;
mod field;
mod hint;
mod keys;
mod ntt;
mod param;
mod poly;
mod sampling;
mod sig;

pub use crate::error::MlDsaError;
pub use crate::keys::{KeyGen, KeyPair, SigningKey, VerifyingKey};
pub use crate::param::{MlDsa44, MlDsa65, MlDsa87, MlDsaParams};
pub use crate::sig::Signature;
